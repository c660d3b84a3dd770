use crate::names::RefereeIdentity;
use crate::schedule::Position;

use chrono::NaiveDate;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct StoredReferee
{
    pub referee: RefereeIdentity,
    pub year_certified: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MentorSession
{
    pub mentor: String,
    pub referee: RefereeIdentity,
    pub position: Position,
    pub date: NaiveDate,
    #[new(default)]
    #[serde(default)]
    pub comments: String,
}

/// A mentoring session that ended with the referee marked for follow-up.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct RiskFlag
{
    pub referee: RefereeIdentity,
    pub date: NaiveDate,
}
