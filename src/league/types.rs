use serde::{Deserialize, Serialize};

use crate::scoring::PointConfig;

pub type TournamentId = u32;
pub type TeamId = u32;

/// One real-world player picked by a fantasy team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SquadMember {
    #[serde(rename = "player")]
    pub player_name: String,
    #[serde(default, rename = "captain")]
    pub is_captain: bool,
    #[serde(default, rename = "vice_captain")]
    pub is_vice_captain: bool,
    /// Free-form label such as "batter" or "wicket-keeper"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SquadMember {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            ..Default::default()
        }
    }

    pub fn captain(player_name: impl Into<String>) -> Self {
        Self {
            is_captain: true,
            ..Self::new(player_name)
        }
    }

    pub fn vice_captain(player_name: impl Into<String>) -> Self {
        Self {
            is_vice_captain: true,
            ..Self::new(player_name)
        }
    }

    /// Apply this member's role multiplier to their match points.
    ///
    /// Captain takes precedence if both flags are set. The vice-captain ratio
    /// truncates after multiplying: 5 points at 3/2 is 7, not 8.
    /// `vice_mult_den` must be non-zero (see `validate_points`). Results
    /// saturate at the `i64` bounds.
    pub fn weighted_points(&self, points: i64, config: &PointConfig) -> i64 {
        if self.is_captain {
            points.saturating_mul(config.captain_mult)
        } else if self.is_vice_captain {
            points.saturating_mul(config.vice_mult_num) / config.vice_mult_den
        } else {
            points
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FantasyTeam {
    pub id: TeamId,
    pub series_id: String,
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub squad: Vec<SquadMember>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    #[default]
    Ongoing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub series_id: String,
    pub name: String,
    #[serde(default)]
    pub status: TournamentStatus,
}

/// Cumulative points for one team, before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TeamTotal {
    pub team_id: TeamId,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LeaderboardEntry {
    pub tournament_id: TournamentId,
    pub team_id: TeamId,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub team_owner: String,
    pub points: i64,
    pub rank: u32,
}

impl LeaderboardEntry {
    pub fn total(&self) -> TeamTotal {
        TeamTotal {
            team_id: self.team_id,
            points: self.points,
        }
    }
}
