use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::league::{LeaderboardEntry, TournamentId};

/// Immutable, dated copy of a tournament leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tournament_id: TournamentId,
    pub date: NaiveDate,
    pub entries: Vec<LeaderboardEntry>,
}

impl Snapshot {
    pub fn new(
        tournament_id: TournamentId,
        date: NaiveDate,
        entries: Vec<LeaderboardEntry>,
    ) -> Self {
        Self {
            tournament_id,
            date,
            entries,
        }
    }

    /// The leaderboard as a JSON array, for storage or display elsewhere
    pub fn payload(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}
