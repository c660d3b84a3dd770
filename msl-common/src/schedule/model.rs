use crate::errors::*;
use crate::parser::text;

use chrono::NaiveDate;

use std::fmt;
use std::str::FromStr;

/// A referee cell exactly as the site shows it, with the empty-slot sentinels folded into
/// one value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub enum RawName
{
    Unassigned,
    Requested,
    Name(String),
}

impl RawName
{
    /// Cleans cell text and recognizes the sentinels: blank, `&nbsp;`, "Not Used" and
    /// "(requested)".
    pub fn from_site(cell: &str) -> RawName
    {
        let cleaned = text::strip_tags(cell);

        if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("not used")
        {
            RawName::Unassigned
        } else if cleaned.eq_ignore_ascii_case("(requested)")
        {
            RawName::Requested
        } else {
            RawName::Name(cleaned)
        }
    }

    pub fn name(&self) -> Option<&str>
    {
        match self
        {
            RawName::Name(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_person(&self) -> bool
    {
        self.name().is_some()
    }
}

impl fmt::Display for RawName
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self
        {
            RawName::Unassigned => write!(f, "Not Used"),
            RawName::Requested => write!(f, "(requested)"),
            RawName::Name(name) => write!(f, "{}", name),
        }
    }
}

/// The three on-field positions of a game.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position
{
    Center,
    #[serde(rename = "AR1")]
    Ar1,
    #[serde(rename = "AR2")]
    Ar2,
}

impl Position
{
    pub const ALL: [Position; 3] = [Position::Center, Position::Ar1, Position::Ar2];

    pub fn is_assistant(&self) -> bool
    {
        *self != Position::Center
    }
}

impl fmt::Display for Position
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self
        {
            Position::Center => write!(f, "Center"),
            Position::Ar1 => write!(f, "AR1"),
            Position::Ar2 => write!(f, "AR2"),
        }
    }
}

impl FromStr for Position
{
    type Err = Error;

    fn from_str(raw: &str) -> Result<Position>
    {
        match raw.trim().to_lowercase().as_str()
        {
            "center" | "centre" | "cr" | "referee" => Ok(Position::Center),
            "ar1" | "ar 1" => Ok(Position::Ar1),
            "ar2" | "ar 2" => Ok(Position::Ar2),
            _ => bail!("Unknown position: '{}'", raw),
        }
    }
}

/// One game row of the assignments report.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, new)]
pub struct GameRecord
{
    pub game_id: String,
    pub venue: String,
    pub date: NaiveDate,
    pub time: String,
    pub age_group: String,
    pub level: String,
    pub center: RawName,
    pub assistant1: RawName,
    pub assistant2: RawName,
}

/// What makes two game rows the same game.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameKey
{
    pub venue: String,
    pub game_id: String,
    pub date: NaiveDate,
    pub time: String,
}

impl GameRecord
{
    pub fn key(&self) -> GameKey
    {
        GameKey {
            venue: self.venue.clone(),
            game_id: self.game_id.clone(),
            date: self.date,
            time: self.time.clone(),
        }
    }

    pub fn referee(&self, position: Position) -> &RawName
    {
        match position
        {
            Position::Center => &self.center,
            Position::Ar1 => &self.assistant1,
            Position::Ar2 => &self.assistant2,
        }
    }

    pub fn slots(&self) -> [(Position, &RawName); 3]
    {
        [
            (Position::Center, &self.center),
            (Position::Ar1, &self.assistant1),
            (Position::Ar2, &self.assistant2),
        ]
    }
}
