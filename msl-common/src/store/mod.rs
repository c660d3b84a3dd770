pub mod json;
pub mod model;

pub use self::json::JsonStore;
pub use self::model::{MentorSession, RiskFlag, StoredReferee};

use crate::errors::*;
use crate::names::RefereeIdentity;
use crate::schedule::GameRecord;
use crate::workload::MentoredPositions;

use chrono::{Duration, NaiveDate};

use std::collections::HashSet;

/// How far back a risky mentoring session keeps a referee flagged.
pub const AT_RISK_WINDOW_DAYS: i64 = 31;

/// Where referee history lives and where scraped games are kept.
pub trait RefereeStore
{
    /// Referees certified in `certified_since_year` or later.
    fn new_referees(&self, certified_since_year: i32) -> Result<HashSet<RefereeIdentity>>;

    fn mentored_positions(&self) -> Result<MentoredPositions>;

    /// Referees with a risky session in the window ending on `as_of`.
    fn at_risk(&self, as_of: NaiveDate) -> Result<HashSet<RefereeIdentity>>;

    /// Keeps games not already stored under the same venue, game id, date and time.
    /// Returns how many were new.
    fn store_games(&mut self, games: &[GameRecord]) -> Result<usize>;
}

/// First day of the at-risk window ending on `as_of`, both ends inclusive.
pub fn at_risk_since(as_of: NaiveDate) -> NaiveDate
{
    as_of - Duration::days(AT_RISK_WINDOW_DAYS)
}
