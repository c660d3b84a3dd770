extern crate error_chain;

#[macro_use]
extern crate log;
extern crate env_logger;

use env_logger::{Builder, Target};

#[macro_use]
extern crate serde_derive;
extern crate serde_json;

extern crate chrono;

extern crate msl_common;

use msl_common::config::{self, Credentials, SiteConfig};
use msl_common::diagnostics::{RunLog, Warning};
use msl_common::errors::*;
use msl_common::names::{NameNormalizer, NamePolicy, RefereeIdentity};
use msl_common::schedule::{GameRecord, ScheduleAggregator};
use msl_common::site::{DateMode, HttpTransport, Session, SessionClient, Transport};
use msl_common::store::{JsonStore, RefereeStore};
use msl_common::workload::{unknown_referees, Roster, SeasonMetrics};

use error_chain::ChainedError;

use chrono::{Datelike, Local};

use std::env;
use std::process;

const DEFAULT_STORE_PATH: &'static str = "msl-store.json";

#[derive(Debug, Serialize)]
struct SeasonReport<'a>
{
    /// Season dates that produced at least one game
    dates_with_games: usize,
    games_collected: usize,
    games_stored: usize,
    /// New referees the site's roster does not list under the stored spelling
    unknown_referees: Vec<RefereeIdentity>,
    metrics: SeasonMetrics,
    warnings: &'a [Warning],
}

/// Names on the roster, checked against the store's new referees.
fn roster_check<T>(aggregator: &ScheduleAggregator<T>, session: &mut Session, store: &JsonStore, normalizer: &NameNormalizer, since_year: i32, log: &mut RunLog) -> Result<Vec<RefereeIdentity>>
    where T: Transport
{
    let page = aggregator.collect_roster(session, log)?;
    let roster = Roster::from_rows(&page.referees, normalizer, log);
    info!("Site roster lists {} referees", roster.len());

    let new_referees = store.new_referees(since_year)?;
    Ok(unknown_referees(&new_referees, &roster))
}

fn run() -> Result<()>
{
    let site = SiteConfig::from_env();
    let credentials = Credentials::from_env()?;

    let certified_within: i32 = config::env_or("CERTIFIED_WITHIN_YEARS", 0);
    let name_policy = config::env_parse("NAME_POLICY", NamePolicy::Lenient)?;
    let store_path = env::var("MSL_STORE_PATH")
        .unwrap_or(String::from(DEFAULT_STORE_PATH));

    let since_year = Local::now().year() - certified_within;

    /* Site */
    let transport = HttpTransport::new(&site)?;
    let client = SessionClient::new(transport, site)?;
    let mut session = client.open(&credentials)?;

    let mut log = RunLog::new();
    let aggregator = ScheduleAggregator::new(&client)
        .with_mode(DateMode::AllDates);

    let schedule = aggregator.collect_season(&mut session, &mut log)?;
    let dates_with_games = schedule.dates().len();

    /* Store */
    let mut store = JsonStore::open(&store_path)?;
    let games: Vec<GameRecord> = schedule.games().cloned().collect();
    let games_stored = store.store_games(&games)?;
    info!("Stored {} new games of {} collected", games_stored, games.len());

    /* Roster + Metrics */
    let normalizer = NameNormalizer::new(name_policy);
    let unknown = roster_check(&aggregator, &mut session, &store, &normalizer, since_year, &mut log)?;
    for referee in unknown.iter()
    {
        warn!("{} is not on the site roster under that name", referee);
    }

    let reports = aggregator.collect_game_reports(&mut session, &mut log)?;
    let metrics = SeasonMetrics::from_reports(&reports.games);

    let report = SeasonReport {
        dates_with_games,
        games_collected: schedule.len(),
        games_stored,
        unknown_referees: unknown,
        metrics,
        warnings: log.warnings(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn main() {
    /* Logger */
    let mut builder = Builder::new();
    builder.target(Target::Stderr);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();

    if let Err(error) = run()
    {
        error!("{}", error.display_chain());
        process::exit(1);
    }
}
