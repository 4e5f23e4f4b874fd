use super::config::PointConfig;

/// Validate a point table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_points(config: &PointConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Multipliers
    if config.captain_mult < 1 {
        errors.push(format!(
            "points.captain_mult: must be at least 1, got {}",
            config.captain_mult
        ));
    }
    if config.vice_mult_den <= 0 {
        errors.push(format!(
            "points.vice_mult_den: must be positive, got {}",
            config.vice_mult_den
        ));
    }
    if config.vice_mult_num <= 0 {
        errors.push(format!(
            "points.vice_mult_num: must be positive, got {}",
            config.vice_mult_num
        ));
    }

    // Per-event rates can't be negative; bands and penalties can
    let rates = [
        ("run", config.run),
        ("four", config.four),
        ("six", config.six),
        ("wicket", config.wicket),
        ("dot_ball", config.dot_ball),
        ("maiden_bonus", config.maiden_bonus),
        ("catch", config.catch),
        ("stumping", config.stumping),
        ("run_out", config.run_out),
    ];
    for (name, value) in rates {
        if value < 0 {
            errors.push(format!(
                "points.{}: must be non-negative, got {}",
                name, value
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_config_is_valid() {
        assert!(validate_points(&PointConfig::standard()).is_ok());
    }

    #[test]
    fn test_negative_penalties_allowed() {
        let config = PointConfig {
            duck_penalty: -10,
            economy_penalty_12: -20,
            ..PointConfig::standard()
        };
        assert!(validate_points(&config).is_ok());
    }

    #[test]
    fn test_zero_vice_denominator() {
        let config = PointConfig {
            vice_mult_den: 0,
            ..PointConfig::standard()
        };
        let errors = validate_points(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("points.vice_mult_den"));
    }

    #[test]
    fn test_captain_multiplier_below_one() {
        let config = PointConfig {
            captain_mult: 0,
            ..PointConfig::standard()
        };
        let errors = validate_points(&config).unwrap_err();
        assert!(errors[0].contains("points.captain_mult"));
    }

    #[test]
    fn test_negative_rate() {
        let config = PointConfig {
            wicket: -25,
            ..PointConfig::standard()
        };
        let errors = validate_points(&config).unwrap_err();
        assert!(errors[0].contains("points.wicket"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = PointConfig {
            captain_mult: 0,  // Error 1
            vice_mult_den: 0, // Error 2
            catch: -1,        // Error 3
            ..PointConfig::standard()
        };
        let errors = validate_points(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
