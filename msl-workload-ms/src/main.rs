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
use msl_common::names::{NameNormalizer, NamePolicy};
use msl_common::schedule::dates::weekend_of;
use msl_common::schedule::{GameRecord, ScheduleAggregator};
use msl_common::site::{HttpTransport, SessionClient};
use msl_common::store::{JsonStore, RefereeStore};
use msl_common::workload::{ArMentoringPolicy, WorkloadCorrelator, WorkloadEntry};

use error_chain::ChainedError;

use chrono::{Datelike, Local, NaiveDate};

use std::env;
use std::process;

const DEFAULT_STORE_PATH: &'static str = "msl-store.json";

/// What one run prints to stdout.
#[derive(Debug, Serialize)]
struct WorkloadReport<'a>
{
    weekend: [NaiveDate; 3],
    games_collected: usize,
    games_stored: usize,
    entries: &'a [WorkloadEntry],
    warnings: &'a [Warning],
}

/// WORKLOAD_DATE back-dates the run, the weekend is the one on or after it.
fn workload_date() -> Result<NaiveDate>
{
    match env::var("WORKLOAD_DATE")
    {
        Err(_) => Ok(Local::now().naive_local().date()),
        Ok(date) => date.trim().parse::<NaiveDate>()
            .chain_err(|| ErrorKind::Config(format!("WORKLOAD_DATE is not a yyyy-mm-dd date: '{}'", date))),
    }
}

fn run() -> Result<()>
{
    let site = SiteConfig::from_env();
    let credentials = Credentials::from_env()?;

    let day = workload_date()?;
    let weekend = weekend_of(day);

    let certified_within: i32 = config::env_or("CERTIFIED_WITHIN_YEARS", 0);
    let ar_policy = config::env_parse("AR_MENTORING_POLICY", ArMentoringPolicy::default())?;
    let name_policy = config::env_parse("NAME_POLICY", NamePolicy::Lenient)?;
    let store_path = env::var("MSL_STORE_PATH")
        .unwrap_or(String::from(DEFAULT_STORE_PATH));

    info!("Workload for the weekend of {} ({:?} AR mentoring, {:?} names)", weekend[0], ar_policy, name_policy);

    /* Site */
    let transport = HttpTransport::new(&site)?;
    let client = SessionClient::new(transport, site)?;
    let mut session = client.open(&credentials)?;

    let mut log = RunLog::new();
    let schedule = ScheduleAggregator::new(&client)
        .collect(&mut session, &weekend, &mut log)?;

    /* Store */
    let mut store = JsonStore::open(&store_path)?;
    let games: Vec<GameRecord> = schedule.games().cloned().collect();
    let games_stored = store.store_games(&games)?;

    let new_referees = store.new_referees(day.year() - certified_within)?;
    let mentored = store.mentored_positions()?;
    let at_risk = store.at_risk(day)?;
    debug!("{} new referees, {} with mentoring history, {} at risk", new_referees.len(), mentored.len(), at_risk.len());

    /* Workload */
    let correlator = WorkloadCorrelator::new(NameNormalizer::new(name_policy), ar_policy);
    let entries = correlator.correlate(&schedule, &new_referees, &mentored, &at_risk, &mut log);

    let report = WorkloadReport {
        weekend,
        games_collected: schedule.len(),
        games_stored,
        entries: &entries,
        warnings: log.warnings(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("{} games with new referees, {} warnings", entries.len(), log.len());
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
