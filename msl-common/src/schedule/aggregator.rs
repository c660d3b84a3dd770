use crate::diagnostics::{RunLog, Warning};
use crate::errors::*;
use crate::parser::{self, AssignmentPage, GameReportPage, RejectedRow, RosterPage};
use crate::retry::RetryPolicy;
use crate::schedule::Schedule;
use crate::schedule::dates;
use crate::site::{DateMode, Query, Session, SessionClient, Transport};

use chrono::NaiveDate;

/// Drives the session client over a set of dates and folds the pages into one `Schedule`.
///
/// Fetches are strictly sequential on the caller's session. A date that keeps failing is
/// recorded in the `RunLog` and skipped; only a failed login stops a collection.
pub struct ScheduleAggregator<'c, T>
    where T: Transport + 'c
{
    client: &'c SessionClient<T>,
    policy: RetryPolicy,
    mode: DateMode,
}

impl<'c, T> ScheduleAggregator<'c, T>
    where T: Transport + 'c
{
    pub fn new(client: &'c SessionClient<T>) -> ScheduleAggregator<'c, T>
    {
        let policy = RetryPolicy::new(client.config().retry_attempts, client.config().retry_delay);

        ScheduleAggregator {
            client,
            policy,
            mode: DateMode::FutureDates,
        }
    }

    /// `FutureDates` for upcoming weekends, `AllDates` to reach dates already played.
    pub fn with_mode(mut self, mode: DateMode) -> ScheduleAggregator<'c, T>
    {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> ScheduleAggregator<'c, T>
    {
        self.policy = policy;
        self
    }

    pub fn collect(&self, session: &mut Session, dates: &[NaiveDate], log: &mut RunLog) -> Result<Schedule>
    {
        let mut schedule = Schedule::new();
        self.collect_into(session, dates, &mut schedule, log)?;

        info!("Collected {} games at {} venues over {} dates", schedule.len(), schedule.venues().count(), dates.len());
        Ok(schedule)
    }

    /// Adds the games of `dates` to an existing schedule; games already present stay single.
    pub fn collect_into(&self, session: &mut Session, dates: &[NaiveDate], schedule: &mut Schedule, log: &mut RunLog) -> Result<()>
    {
        for date in dates
        {
            let date = *date;
            let query = Query::Assignments { date, mode: self.mode };
            let label = format!("assignments for {}", date);

            match self.fetch_page(session, &query, &label, |html| parser::parse_assignments(html, date))
            {
                Ok(AssignmentPage { games, rejected }) =>
                {
                    record_rejected(log, Some(date), rejected);

                    let inserted = schedule.merge(games);
                    debug!("{} added {} games", label, inserted);
                },
                Err(error) =>
                {
                    if is_authentication(&error)
                    {
                        return Err(error);
                    }

                    log.record(Warning::Fetch {
                        date,
                        attempts: self.policy.attempts,
                        cause: error.to_string(),
                    });
                },
            }
        }

        Ok(())
    }

    /// Labels of the season index, navigation links excluded, in site order.
    pub fn collect_season_dates(&self, session: &mut Session) -> Result<Vec<String>>
    {
        self.fetch_page(session, &Query::SeasonIndex, "season index", parser::parse_season_dates)
    }

    /// Every date of the season index. Labels that are not dates become warnings.
    pub fn collect_season(&self, session: &mut Session, log: &mut RunLog) -> Result<Schedule>
    {
        let labels = self.collect_season_dates(session)?;

        let mut season = Vec::with_capacity(labels.len());
        for label in labels
        {
            match dates::parse_date_label(&label)
            {
                Ok(date) => season.push(date),
                Err(error) => log.record(Warning::DateLabel {
                    label,
                    reason: error.to_string(),
                }),
            }
        }

        self.collect(session, &season, log)
    }

    pub fn collect_roster(&self, session: &mut Session, log: &mut RunLog) -> Result<RosterPage>
    {
        let mut page = self.fetch_page(session, &Query::RefereeRoster, "referee roster", parser::parse_roster)?;
        record_rejected(log, None, page.rejected.drain(..).collect());

        Ok(page)
    }

    pub fn collect_game_reports(&self, session: &mut Session, log: &mut RunLog) -> Result<GameReportPage>
    {
        let mut page = self.fetch_page(session, &Query::GameReports, "game reports", parser::parse_game_reports)?;
        record_rejected(log, None, page.rejected.drain(..).collect());

        Ok(page)
    }

    /// Fetch and parse as one retried step. An expired session is renewed at the start of the
    /// next attempt, so running out of attempts never logs in for nothing. A renewal that fails
    /// ends the retries at once.
    fn fetch_page<P, F>(&self, session: &mut Session, query: &Query, label: &str, parse: F) -> Result<P>
        where F: Fn(&str) -> Result<P>
    {
        let client = self.client;
        let mut expired = false;

        self.policy.run_unless(label, is_authentication, |attempt| {
            trace!("{}: attempt {}", label, attempt);

            if expired
            {
                client.renew(session)?;
                expired = false;
            }

            let html = client.fetch(session, query)?;

            let parsed = parse(html.as_str());
            if let Err(Error(ErrorKind::SessionExpired, _)) = parsed
            {
                warn!("{}: session expired", label);
                expired = true;
            }
            parsed
        })
    }
}

fn is_authentication(error: &Error) -> bool
{
    match error.kind()
    {
        ErrorKind::Authentication(_) => true,
        _ => false,
    }
}

fn record_rejected(log: &mut RunLog, date: Option<NaiveDate>, rejected: Vec<RejectedRow>)
{
    for RejectedRow { row, reason } in rejected
    {
        log.record(Warning::Parse {
            date,
            row,
            reason,
        });
    }
}
