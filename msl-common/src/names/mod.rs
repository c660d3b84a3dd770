pub mod exceptions;
pub mod normalizer;

pub use self::exceptions::{NameException, Resolution, EXCEPTIONS};
pub use self::normalizer::{NameNormalizer, NamePolicy, SUFFIXES};

use std::fmt;

/// Canonical (first, last) pair used to join scraped names against stored referees.
///
/// Both halves are lower-cased and whitespace-collapsed on construction, so derived equality
/// and hashing are already case-insensitive.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "IdentityParts")]
pub struct RefereeIdentity
{
    first: String,
    last: String,
}

#[derive(Deserialize)]
struct IdentityParts
{
    first: String,
    #[serde(default)]
    last: String,
}

impl From<IdentityParts> for RefereeIdentity
{
    fn from(parts: IdentityParts) -> RefereeIdentity
    {
        RefereeIdentity::new(parts.first, parts.last)
    }
}

impl RefereeIdentity
{
    pub fn new<S1, S2>(first: S1, last: S2) -> RefereeIdentity
        where S1: AsRef<str>, S2: AsRef<str>
    {
        RefereeIdentity {
            first: canonical(first.as_ref()),
            last: canonical(last.as_ref()),
        }
    }

    pub fn first(&self) -> &str
    {
        &self.first
    }

    pub fn last(&self) -> &str
    {
        &self.last
    }
}

/// "first last", or "last, first" when the last name has several tokens. Either form normalizes
/// back to the same identity under both name policies.
impl fmt::Display for RefereeIdentity
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        if self.last.is_empty()
        {
            write!(f, "{}", self.first)
        } else if self.last.contains(' ') {
            write!(f, "{}, {}", self.last, self.first)
        } else {
            write!(f, "{} {}", self.first, self.last)
        }
    }
}

fn canonical(raw: &str) -> String
{
    raw.split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}
