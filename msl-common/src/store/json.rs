use crate::errors::*;
use crate::names::RefereeIdentity;
use crate::schedule::{GameKey, GameRecord};
use crate::store::{at_risk_since, MentorSession, RefereeStore, RiskFlag, StoredReferee};
use crate::workload::MentoredPositions;

use chrono::NaiveDate;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
struct StoreData
{
    #[serde(default)]
    referees: Vec<StoredReferee>,
    #[serde(default)]
    mentor_sessions: Vec<MentorSession>,
    #[serde(default)]
    risky: Vec<RiskFlag>,
    #[serde(default)]
    games: Vec<GameRecord>,
}

/// A `RefereeStore` kept in one JSON file.
///
/// Every change is written back straight away. A store without a path lives only in memory.
#[derive(Debug)]
pub struct JsonStore
{
    path: Option<PathBuf>,
    data: StoreData,
    game_keys: HashSet<GameKey>,
}

impl JsonStore
{
    /// A missing file opens as an empty store and is created on the first write.
    pub fn open<P>(path: P) -> Result<JsonStore>
        where P: AsRef<Path>
    {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists()
        {
            let raw = fs::read_to_string(&path)
                .chain_err(|| ErrorKind::Store(format!("Unable to read {}", path.display())))?;

            serde_json::from_str(&raw)
                .chain_err(|| ErrorKind::Store(format!("{} is not a referee store", path.display())))?
        } else {
            info!("No store at {}, starting empty", path.display());
            StoreData::default()
        };

        Ok(JsonStore::from_data(Some(path), data))
    }

    pub fn in_memory() -> JsonStore
    {
        JsonStore::from_data(None, StoreData::default())
    }

    fn from_data(path: Option<PathBuf>, data: StoreData) -> JsonStore
    {
        let game_keys = data.games.iter()
            .map(|game| game.key())
            .collect();

        JsonStore {
            path,
            data,
            game_keys,
        }
    }

    pub fn path(&self) -> Option<&Path>
    {
        self.path.as_ref().map(|path| path.as_path())
    }

    pub fn save(&self) -> Result<()>
    {
        let path = match self.path
        {
            None => return Ok(()),
            Some(ref path) => path,
        };

        let raw = serde_json::to_string_pretty(&self.data)?;
        fs::write(path, raw)
            .chain_err(|| ErrorKind::Store(format!("Unable to write {}", path.display())))?;

        debug!("Saved store to {}", path.display());
        Ok(())
    }

    /// Returns false when the referee is already on file.
    pub fn add_referee(&mut self, referee: RefereeIdentity, year_certified: i32) -> Result<bool>
    {
        if self.data.referees.iter().any(|stored| stored.referee == referee)
        {
            return Ok(false);
        }

        self.data.referees.push(StoredReferee::new(referee, year_certified));
        self.save()?;

        Ok(true)
    }

    /// A risky session also flags the referee as of the session date.
    pub fn add_mentor_session(&mut self, session: MentorSession, risky: bool) -> Result<()>
    {
        if risky
        {
            self.data.risky.push(RiskFlag::new(session.referee.clone(), session.date));
        }

        self.data.mentor_sessions.push(session);
        self.save()
    }

    /// Drops every risk flag of `referee`.
    pub fn clear_risk(&mut self, referee: &RefereeIdentity) -> Result<usize>
    {
        let before = self.data.risky.len();
        self.data.risky.retain(|flag| &flag.referee != referee);

        let removed = before - self.data.risky.len();
        if removed > 0
        {
            self.save()?;
        }

        Ok(removed)
    }

    pub fn games(&self) -> &[GameRecord]
    {
        &self.data.games
    }

    pub fn mentor_sessions(&self) -> &[MentorSession]
    {
        &self.data.mentor_sessions
    }
}

impl RefereeStore for JsonStore
{
    fn new_referees(&self, certified_since_year: i32) -> Result<HashSet<RefereeIdentity>>
    {
        Ok(self.data.referees.iter()
            .filter(|stored| stored.year_certified >= certified_since_year)
            .map(|stored| stored.referee.clone())
            .collect())
    }

    fn mentored_positions(&self) -> Result<MentoredPositions>
    {
        let mut mentored = MentoredPositions::new();

        for session in self.data.mentor_sessions.iter()
        {
            mentored.entry(session.referee.clone())
                .or_insert_with(HashSet::new)
                .insert(session.position);
        }

        Ok(mentored)
    }

    fn at_risk(&self, as_of: NaiveDate) -> Result<HashSet<RefereeIdentity>>
    {
        let since = at_risk_since(as_of);

        Ok(self.data.risky.iter()
            .filter(|flag| flag.date >= since && flag.date <= as_of)
            .map(|flag| flag.referee.clone())
            .collect())
    }

    fn store_games(&mut self, games: &[GameRecord]) -> Result<usize>
    {
        let mut inserted = 0;

        for game in games
        {
            if self.game_keys.insert(game.key())
            {
                self.data.games.push(game.clone());
                inserted = inserted + 1;
            }
        }

        if inserted > 0
        {
            self.save()?;
        }

        debug!("Stored {} of {} games", inserted, games.len());
        Ok(inserted)
    }
}
