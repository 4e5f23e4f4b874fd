use serde::{Deserialize, Serialize};

/// Fantasy point rule table.
///
/// Every rule is a plain integer so that the calculator never does anything
/// but integer arithmetic on the results. Fields missing from a YAML override
/// take their value from the default table.
///
/// Example YAML:
/// ```yaml
/// points:
///   wicket: 30
///   duck_penalty: -4
///   captain_mult: 2
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PointConfig {
    // Batting
    pub run: i64,
    pub four: i64,
    pub six: i64,
    /// Batter dismissed without scoring
    pub duck_penalty: i64,

    // Strike rate bands, only for innings of 10 balls or more
    pub strike_rate_bonus_170: i64,
    pub strike_rate_bonus_150: i64,
    pub strike_rate_bonus_130: i64,
    pub strike_rate_penalty_70: i64,
    pub strike_rate_penalty_60: i64,
    pub strike_rate_penalty_50: i64,

    // Runs milestones, highest reached wins
    pub runs_bonus_25: i64,
    pub runs_bonus_50: i64,
    pub runs_bonus_75: i64,
    pub runs_bonus_100: i64,

    // Bowling
    pub wicket: i64,
    pub dot_ball: i64,
    pub wicket_milestone_3: i64,
    pub wicket_milestone_4: i64,
    pub wicket_milestone_5: i64,
    /// Per wicket taken lbw or bowled
    pub lbw_bowled_bonus: i64,
    pub maiden_bonus: i64,

    // Economy bands, only for spells of 2 overs or more
    pub economy_bonus_low: i64,
    pub economy_bonus_5: i64,
    pub economy_bonus_6: i64,
    pub economy_penalty_10: i64,
    pub economy_penalty_11: i64,
    pub economy_penalty_12: i64,

    // Fielding
    pub catch: i64,
    pub stumping: i64,
    pub run_out: i64,
    /// Awarded once for 3 or more catches in a match
    pub catch_bonus_3: i64,

    // Captain and vice-captain multipliers. Vice is a ratio applied as
    // (points * num) / den with integer truncation.
    pub captain_mult: i64,
    pub vice_mult_num: i64,
    pub vice_mult_den: i64,
}

impl PointConfig {
    /// The standard rule table.
    pub fn standard() -> Self {
        Self {
            run: 1,
            four: 4,
            six: 6,
            duck_penalty: -2,
            strike_rate_bonus_170: 6,
            strike_rate_bonus_150: 4,
            strike_rate_bonus_130: 2,
            strike_rate_penalty_70: -2,
            strike_rate_penalty_60: -4,
            strike_rate_penalty_50: -6,
            runs_bonus_25: 4,
            runs_bonus_50: 8,
            runs_bonus_75: 12,
            runs_bonus_100: 16,
            wicket: 25,
            dot_ball: 1,
            wicket_milestone_3: 4,
            wicket_milestone_4: 8,
            wicket_milestone_5: 12,
            lbw_bowled_bonus: 0,
            maiden_bonus: 8,
            economy_bonus_low: 6,
            economy_bonus_5: 4,
            economy_bonus_6: 2,
            economy_penalty_10: -2,
            economy_penalty_11: -4,
            economy_penalty_12: -6,
            catch: 8,
            stumping: 12,
            run_out: 6,
            catch_bonus_3: 4,
            captain_mult: 2,
            vice_mult_num: 3,
            vice_mult_den: 2,
        }
    }
}

impl Default for PointConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_point_config() {
        let config = PointConfig::standard();

        assert_eq!(config.run, 1);
        assert_eq!(config.four, 4);
        assert_eq!(config.six, 6);
        assert_eq!(config.wicket, 25);
        assert_eq!(config.run_out, 6);
        assert_eq!(config.captain_mult, 2);
        assert_eq!((config.vice_mult_num, config.vice_mult_den), (3, 2));
        assert_eq!(config, PointConfig::default());
    }

    #[test]
    fn test_point_config_serde_roundtrip() {
        let config = PointConfig::standard();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: PointConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_point_config_parse() {
        let yaml = r#"
wicket: 30
duck_penalty: -4
"#;
        let config: PointConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.wicket, 30);
        assert_eq!(config.duck_penalty, -4);
        // Everything else keeps the standard value
        assert_eq!(config.run, 1);
        assert_eq!(config.catch, 8);
    }

    #[test]
    fn test_empty_point_config_parse() {
        let config: PointConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, PointConfig::standard());
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let yaml = "wickets: 30";
        let result: Result<PointConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
