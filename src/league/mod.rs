pub mod aggregate;
pub mod rank;
pub mod types;

pub use aggregate::{apply_match, team_match_points};
pub use rank::rank_teams;
pub use types::{
    FantasyTeam, LeaderboardEntry, SquadMember, TeamId, TeamTotal, Tournament, TournamentId,
    TournamentStatus,
};
