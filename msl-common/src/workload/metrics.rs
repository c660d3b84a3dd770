use crate::parser::GameReportRow;

/// Age groups that play small-sided with a center referee only.
pub const CENTER_ONLY_AGE_GROUPS: &[&str] = &["U-9", "U-10"];

/// Referee coverage of the played games of a season.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct SeasonMetrics
{
    pub games_played: u32,
    pub total_ref_assignments: u32,
    pub refs_assigned: u32,
    pub refs_missing: u32,
    pub missing_centers: u32,
    pub missing_ars: u32,
}

impl SeasonMetrics
{
    pub fn from_reports(games: &[GameReportRow]) -> SeasonMetrics
    {
        let mut metrics = SeasonMetrics::default();

        for game in games
        {
            metrics.add(game);
        }

        metrics
    }

    /// Only the positions a game needs count, an AR on a center-only game is neither
    /// assigned nor missing.
    pub fn add(&mut self, game: &GameReportRow)
    {
        let center_only = CENTER_ONLY_AGE_GROUPS.iter()
            .any(|age| game.age_group.eq_ignore_ascii_case(age));
        let needed = if center_only { 1 } else { 3 };

        let mut assigned = 0;

        if game.center.is_person()
        {
            assigned = assigned + 1;
        } else {
            self.missing_centers = self.missing_centers + 1;
        }

        if !center_only
        {
            for assistant in [&game.assistant1, &game.assistant2].iter()
            {
                if assistant.is_person()
                {
                    assigned = assigned + 1;
                } else {
                    self.missing_ars = self.missing_ars + 1;
                }
            }
        }

        self.games_played = self.games_played + 1;
        self.total_ref_assignments = self.total_ref_assignments + needed;
        self.refs_assigned = self.refs_assigned + assigned;
        self.refs_missing = self.refs_missing + (needed - assigned);
    }
}
