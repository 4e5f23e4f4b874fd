//! Collaborators the leaderboard pipeline reads from and writes to.
//!
//! The scoring engine itself does no I/O; everything it needs comes through
//! these traits. `file` holds the implementations used by the CLI.

pub mod file;
pub mod state;

#[cfg(test)]
pub(crate) mod memory;

use anyhow::Result;
use chrono::NaiveDate;

use crate::league::{
    FantasyTeam, LeaderboardEntry, SquadMember, TeamId, Tournament, TournamentId,
};
use crate::snapshot::Snapshot;

pub use file::{LeagueFile, MatchDir, StateFile};
pub use state::{LeaderboardState, TournamentState};

/// Raw stored match: metadata JSON plus an optional dedicated scorecard JSON
/// that supersedes the scorecard embedded in the metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub series_id: String,
    pub match_id: String,
    pub match_info: String,
    pub scorecard: Option<String>,
}

pub trait TournamentSource {
    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>>;

    /// Every known tournament, ordered by id
    fn tournaments(&self) -> Result<Vec<Tournament>>;
}

pub trait SquadProvider {
    /// Fantasy teams entered in a series
    fn teams(&self, series_id: &str) -> Result<Vec<FantasyTeam>>;

    /// Squad for one team, in roster order
    fn squad(&self, team_id: TeamId) -> Result<Vec<SquadMember>>;
}

pub trait MatchSource {
    fn match_record(&self, series_id: &str, match_id: &str) -> Result<Option<MatchRecord>>;

    /// Ids of the stored matches of a series, sorted. A series with no
    /// stored matches yields an empty list.
    fn match_ids(&self, series_id: &str) -> Result<Vec<String>>;
}

/// Leaderboard persistence for tournaments.
///
/// Implementations are single-writer: every mutating method takes `&mut self`,
/// so a read-aggregate-write cycle holding the store exclusively cannot
/// interleave with another one in the same process.
pub trait LeaderboardStore {
    /// Current entries, ordered by rank
    fn leaderboard(&self, tournament_id: TournamentId) -> Result<Vec<LeaderboardEntry>>;

    /// Replace the full leaderboard for a tournament
    fn replace_leaderboard(
        &mut self,
        tournament_id: TournamentId,
        entries: &[LeaderboardEntry],
    ) -> Result<()>;

    fn is_applied(&self, tournament_id: TournamentId, match_id: &str) -> Result<bool>;

    /// Replace the leaderboard and record the match as applied, in one write
    fn record_match(
        &mut self,
        tournament_id: TournamentId,
        match_id: &str,
        entries: &[LeaderboardEntry],
    ) -> Result<()>;

    fn snapshot(&self, tournament_id: TournamentId, date: NaiveDate) -> Result<Option<Snapshot>>;

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// All snapshots for a tournament, newest first
    fn snapshots(&self, tournament_id: TournamentId) -> Result<Vec<Snapshot>>;
}
