pub mod metrics;
pub mod roster;

pub use self::metrics::SeasonMetrics;
pub use self::roster::{unknown_referees, Roster};

use crate::diagnostics::{RunLog, Warning};
use crate::errors::*;
use crate::names::{NameNormalizer, RefereeIdentity};
use crate::schedule::{GameRecord, Position, Schedule};

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

/// Positions each referee has already been mentored at.
pub type MentoredPositions = HashMap<RefereeIdentity, HashSet<Position>>;

/// Whether mentoring at one assistant position counts for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArMentoringPolicy
{
    /// AR1 and AR2 are the same job
    Interchangeable,
    /// Only the exact position counts
    Strict,
}

impl Default for ArMentoringPolicy
{
    fn default() -> ArMentoringPolicy
    {
        ArMentoringPolicy::Interchangeable
    }
}

impl FromStr for ArMentoringPolicy
{
    type Err = Error;

    fn from_str(raw: &str) -> Result<ArMentoringPolicy>
    {
        match raw.trim().to_lowercase().as_str()
        {
            "interchangeable" => Ok(ArMentoringPolicy::Interchangeable),
            "strict" => Ok(ArMentoringPolicy::Strict),
            _ => bail!(ErrorKind::Config(format!("Unknown AR mentoring policy: '{}'", raw))),
        }
    }
}

/// A new referee working one position of a game.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct SlotAnnotation
{
    pub position: Position,
    pub referee: RefereeIdentity,
    pub already_mentored: bool,
    pub needs_follow_up: bool,
}

/// A game with at least one new referee on it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct WorkloadEntry
{
    pub game: GameRecord,
    pub slots: Vec<SlotAnnotation>,
}

impl WorkloadEntry
{
    pub fn slot(&self, position: Position) -> Option<&SlotAnnotation>
    {
        self.slots.iter()
            .find(|slot| slot.position == position)
    }
}

/// Joins a schedule against the referee sets supplied by the store.
#[derive(Debug, Clone, Default)]
pub struct WorkloadCorrelator
{
    normalizer: NameNormalizer,
    policy: ArMentoringPolicy,
}

impl WorkloadCorrelator
{
    pub fn new(normalizer: NameNormalizer, policy: ArMentoringPolicy) -> WorkloadCorrelator
    {
        WorkloadCorrelator {
            normalizer,
            policy,
        }
    }

    /// Entries follow the schedule's order: venues alphabetically, games as the site listed
    /// them. Games without a new referee are left out.
    pub fn correlate(&self,
                     schedule: &Schedule,
                     new_referees: &HashSet<RefereeIdentity>,
                     mentored: &MentoredPositions,
                     at_risk: &HashSet<RefereeIdentity>,
                     log: &mut RunLog) -> Vec<WorkloadEntry>
    {
        let mut entries = Vec::new();

        for game in schedule.games()
        {
            let mut slots = Vec::new();

            for (position, raw) in game.slots().iter()
            {
                let referee = match self.normalizer.normalize(raw)
                {
                    Ok(Some(referee)) => referee,
                    Ok(None) => continue,
                    Err(error) =>
                    {
                        log.record(Warning::NameAmbiguity {
                            raw: raw.to_string(),
                            context: format!("game {} at {} on {} ({}): {}", game.game_id, game.venue, game.date, position, error),
                        });
                        continue;
                    },
                };

                if !new_referees.contains(&referee)
                {
                    continue;
                }

                let already_mentored = self.already_mentored(mentored, &referee, *position);
                let needs_follow_up = at_risk.contains(&referee);

                slots.push(SlotAnnotation::new(*position, referee, already_mentored, needs_follow_up));
            }

            if !slots.is_empty()
            {
                entries.push(WorkloadEntry::new(game.clone(), slots));
            }
        }

        debug!("{} games carry new referees", entries.len());
        entries
    }

    pub fn already_mentored(&self, mentored: &MentoredPositions, referee: &RefereeIdentity, position: Position) -> bool
    {
        let positions = match mentored.get(referee)
        {
            None => return false,
            Some(positions) => positions,
        };

        if positions.contains(&position)
        {
            return true;
        }

        match self.policy
        {
            ArMentoringPolicy::Strict => false,
            ArMentoringPolicy::Interchangeable =>
            {
                position.is_assistant() && positions.iter().any(|mentored| mentored.is_assistant())
            },
        }
    }
}
