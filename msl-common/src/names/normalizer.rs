use crate::errors::*;
use crate::names::RefereeIdentity;
use crate::names::exceptions::{self, Lookup, NameException, EXCEPTIONS};
use crate::parser::text;
use crate::schedule::RawName;

use std::str::FromStr;

/// Generational suffixes that stay attached to the last name, lower case.
pub const SUFFIXES: &[&str] = &["jr.", "jr", "sr.", "sr", "ii", "iii", "iv"];

/// What to do with a three-plus-token name that no suffix or exception explains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamePolicy
{
    /// First token is the first name, everything else the last name
    Lenient,
    /// Report it as ambiguous
    Strict,
}

impl FromStr for NamePolicy
{
    type Err = Error;

    fn from_str(raw: &str) -> Result<NamePolicy>
    {
        match raw.trim().to_lowercase().as_str()
        {
            "lenient" => Ok(NamePolicy::Lenient),
            "strict" => Ok(NamePolicy::Strict),
            _ => bail!(ErrorKind::Config(format!("Unknown name policy: '{}'", raw))),
        }
    }
}

/// Turns site spellings ("Curby, Kate", "Michael Aguilera Jr", "Mary Kate Smith") into
/// `RefereeIdentity` values.
#[derive(Debug, Clone)]
pub struct NameNormalizer
{
    policy: NamePolicy,
    exceptions: &'static [NameException],
}

impl Default for NameNormalizer
{
    fn default() -> NameNormalizer
    {
        NameNormalizer::new(NamePolicy::Lenient)
    }
}

impl NameNormalizer
{
    pub fn new(policy: NamePolicy) -> NameNormalizer
    {
        NameNormalizer {
            policy,
            exceptions: EXCEPTIONS,
        }
    }

    pub fn with_exceptions(policy: NamePolicy, exceptions: &'static [NameException]) -> NameNormalizer
    {
        NameNormalizer {
            policy,
            exceptions,
        }
    }

    pub fn policy(&self) -> NamePolicy
    {
        self.policy
    }

    /// `Ok(None)` means no person occupies the slot. `NameAmbiguity` means there is a person but
    /// guessing who would be a fabrication.
    pub fn normalize(&self, raw: &RawName) -> Result<Option<RefereeIdentity>>
    {
        match raw
        {
            RawName::Unassigned | RawName::Requested => Ok(None),
            RawName::Name(name) => self.normalize_name(name),
        }
    }

    /// Runs the cell cleanup and sentinel detection first, so anything the site prints works.
    pub fn normalize_str(&self, raw: &str) -> Result<Option<RefereeIdentity>>
    {
        self.normalize(&RawName::from_site(raw))
    }

    fn normalize_name(&self, name: &str) -> Result<Option<RefereeIdentity>>
    {
        let name = text::strip_tags(name).to_lowercase();
        let tokens: Vec<&str> = name.split_whitespace().collect();

        if tokens.is_empty()
        {
            return Ok(None);
        }

        if let Some(comma) = name.find(',')
        {
            let before = name[..comma].trim();
            let after = name[comma + 1..].trim();

            let after_tokens: Vec<&str> = after.split_whitespace().collect();

            // "First Last, Jr" puts the suffix after the comma, not the first name
            let suffix_only = after_tokens.len() == 1 && is_suffix(after_tokens[0]);
            if !suffix_only
            {
                return match after_tokens.first()
                {
                    Some(first) if !before.is_empty() => Ok(Some(RefereeIdentity::new(first.trim_matches(','), before))),
                    _ => bail!(ErrorKind::NameAmbiguity(name.clone())),
                };
            }
        }

        // Exception spellings keep their commas ("william covey, jr")
        if let Lookup::Resolved(first, last) = exceptions::lookup(self.exceptions, &tokens)
        {
            trace!("'{}' resolved by the exception table", name);
            return Ok(Some(RefereeIdentity::new(first, last)));
        }

        let tokens: Vec<&str> = tokens.iter()
            .map(|token| token.trim_matches(','))
            .filter(|token| !token.is_empty())
            .collect();

        match tokens.len()
        {
            0 => Ok(None),
            1 => Ok(Some(RefereeIdentity::new(tokens[0], ""))),
            2 => Ok(Some(RefereeIdentity::new(tokens[0], tokens[1]))),
            _ => self.split_long_name(&name, &tokens).map(Some),
        }
    }

    fn split_long_name(&self, name: &str, tokens: &[&str]) -> Result<RefereeIdentity>
    {
        let last_index = tokens.len() - 1;

        if is_suffix(tokens[last_index])
        {
            let last = format!("{} {}", tokens[1..last_index].join(" "), tokens[last_index]);
            return Ok(RefereeIdentity::new(tokens[0], last));
        }

        // A listed spelling with one token off
        if let Lookup::Unresolved = exceptions::lookup(self.exceptions, tokens)
        {
            bail!(ErrorKind::NameAmbiguity(name.to_string()));
        }

        // Nicknames like "(Brie)" make the middle token meaningless without an exception
        if tokens.iter().any(|token| token.starts_with('(') || token.ends_with(')'))
        {
            bail!(ErrorKind::NameAmbiguity(name.to_string()));
        }

        match self.policy
        {
            NamePolicy::Strict => bail!(ErrorKind::NameAmbiguity(name.to_string())),
            NamePolicy::Lenient => Ok(RefereeIdentity::new(tokens[0], tokens[1..].join(" "))),
        }
    }
}

fn is_suffix(token: &str) -> bool
{
    let token = token.trim_matches(',');
    SUFFIXES.iter().any(|suffix| *suffix == token)
}
