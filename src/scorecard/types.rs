use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Strike rate only counts once a batter has faced this many balls.
pub const MIN_BALLS_FOR_STRIKE_RATE: i64 = 10;

/// Economy only counts once a bowler has bowled this many overs.
pub const MIN_OVERS_FOR_ECONOMY: f64 = 2.0;

/// Canonical per-player statistics for one match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStats {
    // Batting
    pub runs: i64,
    pub balls: i64,
    pub fours: i64,
    pub sixes: i64,
    pub dismissed: bool,
    // Bowling
    pub wickets: i64,
    pub maidens: i64,
    pub overs: f64, // Raw decimal as reported: 3.4 is 3 overs and 4 balls
    pub runs_conceded: i64,
    pub lbw_bowled: i64, // Dismissals of other batters credited to this bowler
    pub dot_balls: i64,
    // Fielding
    pub catches: i64,
    pub stumpings: i64,
    pub run_outs: i64,
}

impl PlayerStats {
    /// Runs per 100 balls, if enough balls were faced for it to count
    pub fn strike_rate(&self) -> Option<f64> {
        if self.balls >= MIN_BALLS_FOR_STRIKE_RATE {
            Some(self.runs as f64 / self.balls as f64 * 100.0)
        } else {
            None
        }
    }

    /// Runs conceded per over, if enough overs were bowled for it to count
    pub fn economy(&self) -> Option<f64> {
        if self.overs >= MIN_OVERS_FOR_ECONOMY {
            Some(self.runs_conceded as f64 / self.overs)
        } else {
            None
        }
    }

    /// True when the batter was dismissed without scoring
    pub fn is_duck(&self) -> bool {
        self.dismissed && self.runs == 0
    }
}

/// Match metadata as stored for a fixture.
///
/// The score block is team-level only. Player-level data lives in the
/// optional embedded scorecard, or in a separately stored scorecard.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MatchInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub score: Vec<InningScore>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<String>,
    #[serde(default, rename = "matchEnded")]
    pub match_ended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scorecard: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InningScore {
    #[serde(default)]
    pub r: i64,
    #[serde(default)]
    pub w: i64,
    #[serde(default)]
    pub o: f64,
    #[serde(default)]
    pub inning: String,
}

// Raw scorecard records. Every field is lenient: a value of the wrong type is
// treated as absent instead of failing the whole record.

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BattingRecord {
    #[serde(default, deserialize_with = "player_ref")]
    pub batsman: Option<String>,
    #[serde(default, deserialize_with = "player_ref")]
    pub bowler: Option<String>,
    #[serde(default, deserialize_with = "number")]
    pub r: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub b: Option<f64>,
    #[serde(default, rename = "4s", deserialize_with = "number")]
    pub fours: Option<f64>,
    #[serde(default, rename = "6s", deserialize_with = "number")]
    pub sixes: Option<f64>,
    #[serde(default, deserialize_with = "text")]
    pub dismissal: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BowlingRecord {
    #[serde(default, deserialize_with = "player_ref")]
    pub bowler: Option<String>,
    #[serde(default, deserialize_with = "number")]
    pub o: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub m: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub r: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub w: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CatchingRecord {
    #[serde(default, deserialize_with = "player_ref")]
    pub catcher: Option<String>,
    #[serde(default, deserialize_with = "number")]
    pub catch: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub stumped: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub runout: Option<f64>,
}

/// One player in the flat, pre-innings scorecard format.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LegacyRecord {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, rename = "playerName", deserialize_with = "text")]
    pub player_name: Option<String>,
    #[serde(default, deserialize_with = "number")]
    pub r: Option<f64>,
    #[serde(default, rename = "4s", deserialize_with = "number")]
    pub fours: Option<f64>,
    #[serde(default, rename = "6s", deserialize_with = "number")]
    pub sixes: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub w: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub catch: Option<f64>,
    #[serde(default, rename = "runOut", deserialize_with = "number")]
    pub run_out: Option<f64>,
}

impl LegacyRecord {
    /// `name`, falling back to `playerName` when `name` is missing or empty
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.player_name.as_deref().filter(|n| !n.is_empty()))
    }
}

/// Truncate a raw count toward zero; absent counts are zero.
pub(crate) fn count(value: Option<f64>) -> i64 {
    value.map(|n| n as i64).unwrap_or(0)
}

fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_str()
        .map(str::to_string))
}

/// Player references are nested objects: `{"id": "...", "name": "..."}`
fn player_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .map(str::to_string))
}
