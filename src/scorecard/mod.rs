pub mod extract;
pub mod types;

pub use extract::{extract_player_points, extract_player_stats, PlayerPoints, Scorecard};
pub use types::{InningScore, MatchInfo, PlayerStats};
