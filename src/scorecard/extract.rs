use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::types::{
    count, BattingRecord, BowlingRecord, CatchingRecord, LegacyRecord, PlayerStats,
};
use crate::scoring::{calculate_points, PointConfig};

/// Player name to match points. Names are matched exactly against squads.
pub type PlayerPoints = BTreeMap<String, i64>;

/// Dismissal text that leaves the batter not out.
const NOT_OUT: &str = "not out";

/// A raw scorecard payload, classified once by its outer shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Scorecard<'a> {
    /// No scorecard available yet
    Empty,
    /// Array of innings, each with `batting`, `bowling` and `catching` lists.
    /// Stats for a player accumulate across innings and roles.
    Structured(&'a [Value]),
    /// Object of category label to flat player records. Each record replaces
    /// any earlier record for the same name, and carries no balls faced,
    /// dismissal or bowling figures, so strike rate, duck and economy rules
    /// never apply.
    Legacy(&'a Map<String, Value>),
    /// Anything else; carries the JSON kind for diagnostics
    Unrecognized(&'static str),
}

impl<'a> Scorecard<'a> {
    pub fn classify(raw: Option<&'a Value>) -> Self {
        match raw {
            None | Some(Value::Null) => Scorecard::Empty,
            Some(Value::Array(innings)) => Scorecard::Structured(innings),
            Some(Value::Object(categories)) => Scorecard::Legacy(categories),
            Some(Value::String(_)) => Scorecard::Unrecognized("string"),
            Some(Value::Number(_)) => Scorecard::Unrecognized("number"),
            Some(Value::Bool(_)) => Scorecard::Unrecognized("bool"),
        }
    }

    /// Canonical stats per player, keyed by name
    pub fn player_stats(&self) -> BTreeMap<String, PlayerStats> {
        match self {
            Scorecard::Empty => BTreeMap::new(),
            Scorecard::Structured(innings) => structured_stats(innings),
            Scorecard::Legacy(categories) => legacy_stats(categories),
            Scorecard::Unrecognized(kind) => {
                warn!(
                    kind = *kind,
                    "Unrecognized scorecard shape; no player points extracted"
                );
                BTreeMap::new()
            }
        }
    }
}

/// Extract player stats from a raw scorecard payload.
pub fn extract_player_stats(raw: Option<&Value>) -> BTreeMap<String, PlayerStats> {
    Scorecard::classify(raw).player_stats()
}

/// Extract match points per player from a raw scorecard payload.
///
/// An absent, empty or unrecognized scorecard yields an empty map.
pub fn extract_player_points(raw: Option<&Value>, config: &PointConfig) -> PlayerPoints {
    extract_player_stats(raw)
        .into_iter()
        .map(|(name, stats)| {
            let points = calculate_points(&stats, config).points;
            (name, points)
        })
        .collect()
}

fn stats_for<'m>(acc: &'m mut BTreeMap<String, PlayerStats>, name: &str) -> &'m mut PlayerStats {
    acc.entry(name.to_string()).or_default()
}

/// Deserialize each object in `list`, skipping anything that is not a record.
fn records<'v, T>(innings: &'v Value, list: &str) -> impl Iterator<Item = T> + 'v
where
    T: Deserialize<'v> + 'v,
{
    innings
        .get(list)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|item| item.is_object())
        .filter_map(|item| T::deserialize(item).ok())
}

fn structured_stats(innings: &[Value]) -> BTreeMap<String, PlayerStats> {
    let mut acc = BTreeMap::new();

    for inning in innings.iter().filter(|i| i.is_object()) {
        // Batting: runs, balls, boundaries, dismissal. lbw/bowled is also
        // credited to the bowler named on the batting record.
        for rec in records::<BattingRecord>(inning, "batting") {
            let Some(name) = rec.batsman.as_deref() else {
                continue;
            };
            let stats = stats_for(&mut acc, name);
            stats.runs = stats.runs.saturating_add(count(rec.r));
            stats.balls = stats.balls.saturating_add(count(rec.b));
            stats.fours = stats.fours.saturating_add(count(rec.fours));
            stats.sixes = stats.sixes.saturating_add(count(rec.sixes));

            let dismissal = rec.dismissal.as_deref().unwrap_or("");
            if !dismissal.is_empty() && dismissal != NOT_OUT {
                stats.dismissed = true;
                if let Some(bowler) = rec.bowler.as_deref() {
                    if dismissal == "lbw" || dismissal == "bowled" {
                        let bowler = stats_for(&mut acc, bowler);
                        bowler.lbw_bowled = bowler.lbw_bowled.saturating_add(1);
                    }
                }
            }
        }

        for rec in records::<BowlingRecord>(inning, "bowling") {
            let Some(name) = rec.bowler.as_deref() else {
                continue;
            };
            let stats = stats_for(&mut acc, name);
            stats.overs += rec.o.unwrap_or(0.0);
            stats.maidens = stats.maidens.saturating_add(count(rec.m));
            stats.runs_conceded = stats.runs_conceded.saturating_add(count(rec.r));
            stats.wickets = stats.wickets.saturating_add(count(rec.w));
        }

        for rec in records::<CatchingRecord>(inning, "catching") {
            let Some(name) = rec.catcher.as_deref() else {
                continue;
            };
            let stats = stats_for(&mut acc, name);
            stats.catches = stats.catches.saturating_add(count(rec.catch));
            stats.stumpings = stats.stumpings.saturating_add(count(rec.stumped));
            stats.run_outs = stats.run_outs.saturating_add(count(rec.runout));
        }
    }

    debug!(
        players = acc.len(),
        innings = innings.len(), "Extracted structured scorecard"
    );
    acc
}

fn legacy_stats(categories: &Map<String, Value>) -> BTreeMap<String, PlayerStats> {
    let mut acc = BTreeMap::new();

    for (category, players) in categories {
        let Some(players) = players.as_array() else {
            debug!(category = %category, "Skipping non-list scorecard category");
            continue;
        };
        for rec in players
            .iter()
            .filter(|p| p.is_object())
            .filter_map(|p| LegacyRecord::deserialize(p).ok())
        {
            let Some(name) = rec.display_name() else {
                continue;
            };
            // Last record seen for a name wins
            let stats = PlayerStats {
                runs: count(rec.r),
                fours: count(rec.fours),
                sixes: count(rec.sixes),
                wickets: count(rec.w),
                catches: count(rec.catch),
                run_outs: count(rec.run_out),
                ..Default::default()
            };
            acc.insert(name.to_string(), stats);
        }
    }

    debug!(players = acc.len(), "Extracted legacy scorecard");
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn cfg() -> PointConfig {
        PointConfig::standard()
    }

    #[test]
    fn test_absent_scorecard_is_empty() {
        assert!(extract_player_points(None, &cfg()).is_empty());
        assert!(extract_player_points(Some(&Value::Null), &cfg()).is_empty());
        assert!(extract_player_points(Some(&json!([])), &cfg()).is_empty());
        assert!(extract_player_points(Some(&json!({})), &cfg()).is_empty());
    }

    /// Collects formatted log output for one closure
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn with_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        (value, logs)
    }

    #[test]
    fn test_unrecognized_shape_is_empty() {
        let raw = json!("scorecard pending");
        assert_eq!(
            Scorecard::classify(Some(&raw)),
            Scorecard::Unrecognized("string")
        );
        assert!(extract_player_points(Some(&json!(42)), &cfg()).is_empty());

        let (points, logs) = with_logs(|| extract_player_points(Some(&raw), &cfg()));
        assert!(points.is_empty());
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Unrecognized scorecard shape"));
        assert!(logs.contains("kind=\"string\""));
    }

    #[test]
    fn test_known_shapes_do_not_warn() {
        let raw = json!([{"batting": []}]);
        let (_, logs) = with_logs(|| extract_player_points(Some(&raw), &cfg()));
        assert!(!logs.contains("WARN"));
    }

    #[test]
    fn test_classify() {
        let innings = json!([{"batting": []}]);
        let structured = Scorecard::classify(Some(&innings));
        assert!(matches!(structured, Scorecard::Structured(_)));
        let flat = json!({"batsmen": []});
        let legacy = Scorecard::classify(Some(&flat));
        assert!(matches!(legacy, Scorecard::Legacy(_)));
        assert_eq!(Scorecard::classify(None), Scorecard::Empty);
    }

    #[test]
    fn test_structured_batting() {
        let raw = json!([{
            "batting": [{
                "batsman": {"name": "Kohli"},
                "r": 50, "b": 40, "4s": 0, "6s": 0,
                "dismissal": "not out"
            }]
        }]);
        let stats = extract_player_stats(Some(&raw));
        let kohli = &stats["Kohli"];
        assert_eq!(kohli.runs, 50);
        assert_eq!(kohli.balls, 40);
        assert!(!kohli.dismissed);

        // 50 runs, SR 125 (no band), +8 runs bonus
        assert_eq!(extract_player_points(Some(&raw), &cfg())["Kohli"], 58);
    }

    #[test]
    fn test_structured_duck() {
        let raw = json!([{
            "batting": [{
                "batsman": {"name": "Opener"},
                "r": 0, "b": 3,
                "dismissal": "caught"
            }]
        }]);
        let stats = extract_player_stats(Some(&raw));
        assert!(stats["Opener"].dismissed);
        assert_eq!(extract_player_points(Some(&raw), &cfg())["Opener"], -2);
    }

    #[test]
    fn test_lbw_and_bowled_credit_bowler() {
        let raw = json!([{
            "batting": [
                {"batsman": {"name": "A"}, "bowler": {"name": "Bumrah"}, "dismissal": "lbw"},
                {"batsman": {"name": "B"}, "bowler": {"name": "Bumrah"}, "dismissal": "bowled"},
                {"batsman": {"name": "C"}, "bowler": {"name": "Bumrah"}, "dismissal": "catch"}
            ],
            "bowling": [
                {"bowler": {"name": "Bumrah"}, "o": 4, "m": 0, "r": 24, "w": 3}
            ]
        }]);
        let stats = extract_player_stats(Some(&raw));
        let bumrah = &stats["Bumrah"];
        assert_eq!(bumrah.lbw_bowled, 2);
        // Wicket count comes from the bowling record only
        assert_eq!(bumrah.wickets, 3);
    }

    #[test]
    fn test_dismissal_without_bowler_still_marks_out() {
        let raw = json!([{
            "batting": [{"batsman": {"name": "A"}, "r": 0, "b": 1, "dismissal": "bowled"}]
        }]);
        let stats = extract_player_stats(Some(&raw));
        assert_eq!(stats.len(), 1);
        assert!(stats["A"].dismissed);
    }

    #[test]
    fn test_structured_accumulates_across_innings_and_roles() {
        let raw = json!([
            {
                "batting": [{"batsman": {"name": "Jadeja"}, "r": 20, "b": 15, "4s": 2}],
                "catching": [{"catcher": {"name": "Jadeja"}, "catch": 1, "stumped": 0, "runout": 1}]
            },
            {
                "bowling": [{"bowler": {"name": "Jadeja"}, "o": 2.4, "m": 1, "r": 14, "w": 2}],
                "catching": [{"catcher": {"name": "Jadeja"}, "catch": 1}]
            }
        ]);
        let stats = extract_player_stats(Some(&raw));
        assert_eq!(stats.len(), 1);
        let jadeja = &stats["Jadeja"];
        assert_eq!(jadeja.runs, 20);
        assert_eq!(jadeja.fours, 2);
        assert_eq!(jadeja.wickets, 2);
        assert_eq!(jadeja.maidens, 1);
        assert_eq!(jadeja.overs, 2.4);
        assert_eq!(jadeja.runs_conceded, 14);
        assert_eq!(jadeja.catches, 2);
        assert_eq!(jadeja.run_outs, 1);
    }

    #[test]
    fn test_huge_counts_saturate() {
        let raw = json!([
            {"batting": [{"batsman": {"name": "Slogger"}, "r": 9e18, "6s": 9e18}]},
            {"batting": [{"batsman": {"name": "Slogger"}, "r": 9e18, "6s": 9e18}]}
        ]);
        let stats = extract_player_stats(Some(&raw));
        assert_eq!(stats["Slogger"].runs, i64::MAX);
        assert_eq!(stats["Slogger"].sixes, i64::MAX);
        let points = extract_player_points(Some(&raw), &cfg());
        assert_eq!(points["Slogger"], i64::MAX);
    }

    #[test]
    fn test_structured_skips_malformed_entries() {
        let raw = json!([
            "not an innings",
            {
                "batting": [
                    "not a record",
                    {"r": 10},
                    {"batsman": {"name": ""}, "r": 10},
                    {"batsman": {"name": "Valid"}, "r": "ten", "b": 5}
                ],
                "bowling": {"not": "a list"}
            }
        ]);
        let stats = extract_player_stats(Some(&raw));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats["Valid"].runs, 0);
        assert_eq!(stats["Valid"].balls, 5);
    }

    #[test]
    fn test_legacy_flat_scorecard() {
        let raw = json!({
            "batsmen": [
                {"name": "Player A", "r": 50, "w": 0, "catch": 0, "runOut": 0}
            ]
        });
        let points = extract_player_points(Some(&raw), &cfg());
        // 50 runs + runs bonus 8
        assert_eq!(points["Player A"], 58);
    }

    #[test]
    fn test_legacy_player_name_fallback() {
        let raw = json!({
            "bowlers": [{"playerName": "Chahal", "w": 2}]
        });
        assert_eq!(extract_player_points(Some(&raw), &cfg())["Chahal"], 50);
    }

    #[test]
    fn test_legacy_last_record_wins() {
        // Categories are visited in key order: "batting" before "fielding"
        let raw = json!({
            "batting": [{"name": "Pant", "r": 30}],
            "fielding": [{"name": "Pant", "catch": 1}]
        });
        let stats = extract_player_stats(Some(&raw));
        let pant = &stats["Pant"];
        // Not additive: the fielding record replaced the batting one
        assert_eq!(pant.runs, 0);
        assert_eq!(pant.catches, 1);
        assert_eq!(extract_player_points(Some(&raw), &cfg())["Pant"], 8);
    }

    #[test]
    fn test_legacy_skips_bad_entries() {
        let raw = json!({
            "note": "not a list",
            "batsmen": [42, {"r": 10}, {"name": "Ok", "r": 5}]
        });
        let stats = extract_player_stats(Some(&raw));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats["Ok"].runs, 5);
    }

    #[test]
    fn test_legacy_ignores_rate_rules() {
        // Flat records carry no balls or overs, so no strike-rate or economy bands
        let raw = json!({"all": [{"name": "X", "r": 0}]});
        let stats = extract_player_stats(Some(&raw));
        assert!(!stats["X"].dismissed);
        assert_eq!(extract_player_points(Some(&raw), &cfg())["X"], 0);
    }
}
