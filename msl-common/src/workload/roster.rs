use crate::diagnostics::{RunLog, Warning};
use crate::names::{NameNormalizer, RefereeIdentity};
use crate::parser::RosterRow;

use std::collections::{BTreeMap, HashSet};

/// The site's referee list keyed by identity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster
{
    emails: BTreeMap<RefereeIdentity, String>,
}

impl Roster
{
    /// Names that cannot be normalized are left out and logged.
    pub fn from_rows(rows: &[RosterRow], normalizer: &NameNormalizer, log: &mut RunLog) -> Roster
    {
        let mut emails = BTreeMap::new();

        for row in rows
        {
            match normalizer.normalize(&row.name)
            {
                Ok(Some(identity)) =>
                {
                    emails.insert(identity, row.email.clone());
                },
                Ok(None) => {},
                Err(error) => log.record(Warning::NameAmbiguity {
                    raw: row.name.to_string(),
                    context: format!("referee roster: {}", error),
                }),
            }
        }

        Roster {
            emails,
        }
    }

    pub fn contains(&self, referee: &RefereeIdentity) -> bool
    {
        self.emails.contains_key(referee)
    }

    pub fn email(&self, referee: &RefereeIdentity) -> Option<&str>
    {
        self.emails.get(referee).map(|email| email.as_str())
    }

    pub fn referees(&self) -> impl Iterator<Item = &RefereeIdentity>
    {
        self.emails.keys()
    }

    pub fn len(&self) -> usize
    {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.emails.is_empty()
    }
}

/// New referees the site does not know under that spelling, sorted.
pub fn unknown_referees(new_referees: &HashSet<RefereeIdentity>, roster: &Roster) -> Vec<RefereeIdentity>
{
    let mut unknown: Vec<RefereeIdentity> = new_referees.iter()
        .filter(|referee| !roster.contains(referee))
        .cloned()
        .collect();

    unknown.sort();
    unknown
}
