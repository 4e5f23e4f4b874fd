use thiserror::Error;

use crate::league::TournamentId;

/// Errors surfaced by the leaderboard pipeline
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("Match not found: {match_id} (series {series_id})")]
    MatchNotFound { series_id: String, match_id: String },

    /// Stored match metadata could not be decoded
    #[error("Corrupt match data for {match_id}: {source}")]
    DataCorruption {
        match_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Match {match_id} was already applied to tournament {tournament_id}")]
    AlreadyApplied {
        tournament_id: TournamentId,
        match_id: String,
    },

    // Collaborator failures (file I/O, parse errors in stored state)
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl EngineError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::TournamentNotFound(_) | EngineError::MatchNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
