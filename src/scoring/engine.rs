use super::bands::BandTable;
use super::config::PointConfig;
use crate::scorecard::PlayerStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContribution {
    pub label: String,       // e.g. "Runs", "Strike rate", "Catch bonus"
    pub description: String, // e.g. "50 x 1", "125.0 matched '>=130'"
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsResult {
    pub points: i64,
    /// Non-zero contributions in rule order; they sum to `points`
    pub breakdown: Vec<RuleContribution>,
}

pub fn calculate_points(stats: &PlayerStats, config: &PointConfig) -> PointsResult {
    let mut b = Breakdown::default();

    // Batting
    b.per_unit("Runs", stats.runs, config.run);
    b.per_unit("Fours", stats.fours, config.four);
    b.per_unit("Sixes", stats.sixes, config.six);

    if stats.is_duck() {
        b.push("Duck", "out for 0".to_string(), config.duck_penalty);
    }

    if let Some(sr) = stats.strike_rate() {
        if let Some(band) = BandTable::strike_rate(config).lookup(sr) {
            let description = format!("{:.1} matched '{}'", sr, band.range);
            b.push("Strike rate", description, band.points);
        }
    }

    let runs_milestones = [
        (100, config.runs_bonus_100),
        (75, config.runs_bonus_75),
        (50, config.runs_bonus_50),
        (25, config.runs_bonus_25),
    ];
    if let Some((threshold, points)) = highest_milestone(stats.runs, &runs_milestones) {
        let description = format!("{} runs >= {}", stats.runs, threshold);
        b.push("Runs bonus", description, points);
    }

    // Bowling
    b.per_unit("Wickets", stats.wickets, config.wicket);
    b.per_unit("Dot balls", stats.dot_balls, config.dot_ball);

    let wicket_milestones = [
        (5, config.wicket_milestone_5),
        (4, config.wicket_milestone_4),
        (3, config.wicket_milestone_3),
    ];
    if let Some((threshold, points)) = highest_milestone(stats.wickets, &wicket_milestones) {
        let description = format!("{} wickets >= {}", stats.wickets, threshold);
        b.push("Wicket bonus", description, points);
    }

    b.per_unit("LBW/bowled", stats.lbw_bowled, config.lbw_bowled_bonus);
    b.per_unit("Maidens", stats.maidens, config.maiden_bonus);

    if let Some(eco) = stats.economy() {
        if let Some(band) = BandTable::economy(config).lookup(eco) {
            let description = format!("{:.2} matched '{}'", eco, band.range);
            b.push("Economy", description, band.points);
        }
    }

    // Fielding
    b.per_unit("Catches", stats.catches, config.catch);
    b.per_unit("Stumpings", stats.stumpings, config.stumping);
    b.per_unit("Run outs", stats.run_outs, config.run_out);

    if stats.catches >= 3 {
        let description = format!("{} catches >= 3", stats.catches);
        b.push("Catch bonus", description, config.catch_bonus_3);
    }

    b.into_result()
}

/// First milestone (ordered highest threshold first) that `value` reaches
fn highest_milestone(value: i64, milestones: &[(i64, i64)]) -> Option<(i64, i64)> {
    milestones
        .iter()
        .copied()
        .find(|(threshold, _)| value >= *threshold)
}

/// Collects non-zero contributions. Arithmetic saturates so that absurd
/// scorecard counts cannot overflow.
#[derive(Default)]
struct Breakdown(Vec<RuleContribution>);

impl Breakdown {
    fn per_unit(&mut self, label: &str, count: i64, rate: i64) {
        let points = count.saturating_mul(rate);
        self.push(label, format!("{} x {}", count, rate), points);
    }

    fn push(&mut self, label: &str, description: String, points: i64) {
        if points != 0 {
            self.0.push(RuleContribution {
                label: label.to_string(),
                description,
                points,
            });
        }
    }

    fn into_result(self) -> PointsResult {
        let points = self
            .0
            .iter()
            .fold(0i64, |total, c| total.saturating_add(c.points));
        PointsResult {
            points,
            breakdown: self.0,
        }
    }
}
