pub mod aggregator;
pub mod dates;
pub mod model;

pub use self::aggregator::ScheduleAggregator;
pub use self::model::{GameKey, GameRecord, Position, RawName};

use chrono::NaiveDate;

use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Games grouped by venue. Venues iterate in lexicographic order, games within a venue in the
/// order the site listed them. A game is stored once no matter how often it is merged.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct Schedule
{
    venues: BTreeMap<String, Vec<GameRecord>>,
    #[serde(skip)]
    seen: HashSet<GameKey>,
}

impl Schedule
{
    pub fn new() -> Schedule
    {
        Schedule::default()
    }

    /// Returns false when the game was already there.
    pub fn insert(&mut self, game: GameRecord) -> bool
    {
        if !self.seen.insert(game.key())
        {
            trace!("Game {} at {} on {} already scheduled", game.game_id, game.venue, game.date);
            return false;
        }

        self.venues.entry(game.venue.clone())
            .or_insert_with(Vec::new)
            .push(game);
        true
    }

    /// Inserts every game, returns how many were new.
    pub fn merge<I>(&mut self, games: I) -> usize
        where I: IntoIterator<Item = GameRecord>
    {
        let mut inserted = 0;

        for game in games
        {
            if self.insert(game)
            {
                inserted = inserted + 1;
            }
        }

        inserted
    }

    pub fn venues(&self) -> impl Iterator<Item = (&str, &[GameRecord])>
    {
        self.venues.iter()
            .map(|(venue, games)| (venue.as_str(), games.as_slice()))
    }

    pub fn venue(&self, venue: &str) -> Option<&[GameRecord]>
    {
        self.venues.get(venue)
            .map(|games| games.as_slice())
    }

    /// Every game, venue by venue.
    pub fn games(&self) -> impl Iterator<Item = &GameRecord>
    {
        self.venues.values()
            .flat_map(|games| games.iter())
    }

    pub fn games_on(&self, date: NaiveDate) -> Vec<&GameRecord>
    {
        self.games()
            .filter(|game| game.date == date)
            .collect()
    }

    pub fn dates(&self) -> BTreeSet<NaiveDate>
    {
        self.games()
            .map(|game| game.date)
            .collect()
    }

    pub fn len(&self) -> usize
    {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.seen.is_empty()
    }
}
