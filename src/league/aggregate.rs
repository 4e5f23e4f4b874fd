use std::collections::BTreeMap;

use super::types::{SquadMember, TeamId, TeamTotal};
use crate::scorecard::PlayerPoints;
use crate::scoring::PointConfig;

/// Points a squad earns from one match.
///
/// Members who did not appear in the match contribute nothing.
pub fn team_match_points(
    squad: &[SquadMember],
    player_points: &PlayerPoints,
    config: &PointConfig,
) -> i64 {
    squad
        .iter()
        .filter_map(|member| {
            player_points
                .get(&member.player_name)
                .map(|&points| member.weighted_points(points, config))
        })
        .fold(0, |total: i64, points| total.saturating_add(points))
}

/// Add one match's points to the prior cumulative totals.
///
/// Every team in `squads` gets its match delta added to its prior total (0
/// when it has none). Teams only present in `prior` keep their total.
///
/// Not idempotent: applying the same match twice adds its points twice.
/// Callers must apply each (tournament, match) pair at most once.
pub fn apply_match(
    prior: &[TeamTotal],
    squads: &BTreeMap<TeamId, Vec<SquadMember>>,
    player_points: &PlayerPoints,
    config: &PointConfig,
) -> Vec<TeamTotal> {
    let mut totals: BTreeMap<TeamId, i64> = prior.iter().map(|t| (t.team_id, t.points)).collect();

    for (&team_id, squad) in squads {
        let delta = team_match_points(squad, player_points, config);
        let total = totals.entry(team_id).or_insert(0);
        *total = total.saturating_add(delta);
    }

    totals
        .into_iter()
        .map(|(team_id, points)| TeamTotal { team_id, points })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(team_id: TeamId, points: i64) -> TeamTotal {
        TeamTotal { team_id, points }
    }

    fn player_points(pairs: &[(&str, i64)]) -> PlayerPoints {
        pairs.iter().map(|(n, p)| (n.to_string(), *p)).collect()
    }

    #[test]
    fn test_team_match_points_with_roles() {
        let squad = vec![
            SquadMember::captain("Captain"),
            SquadMember::vice_captain("Vice"),
            SquadMember::new("Other"),
        ];
        let points = player_points(&[("Captain", 50), ("Vice", 30), ("Other", 10)]);
        let config = PointConfig::standard();
        assert_eq!(team_match_points(&squad, &points, &config), 100 + 45 + 10);
    }

    #[test]
    fn test_absent_members_contribute_zero() {
        let squad = vec![SquadMember::captain("Benched"), SquadMember::new("Played")];
        let points = player_points(&[("Played", 12)]);
        let config = PointConfig::standard();
        assert_eq!(team_match_points(&squad, &points, &config), 12);
    }

    #[test]
    fn test_names_match_exactly() {
        let squad = vec![SquadMember::new("ms dhoni")];
        let points = player_points(&[("MS Dhoni", 40)]);
        let config = PointConfig::standard();
        assert_eq!(team_match_points(&squad, &points, &config), 0);
    }

    #[test]
    fn test_huge_points_saturate() {
        let squad = vec![
            SquadMember::captain("Slogger"),
            SquadMember::vice_captain("Slogger"),
        ];
        let points = player_points(&[("Slogger", i64::MAX)]);
        let config = PointConfig::standard();
        assert_eq!(team_match_points(&squad, &points, &config), i64::MAX);

        let squads = BTreeMap::from([(1, squad)]);
        let totals = apply_match(&[total(1, 1)], &squads, &points, &config);
        assert_eq!(totals, vec![total(1, i64::MAX)]);
    }

    #[test]
    fn test_negative_delta() {
        let squad = vec![SquadMember::captain("Duck")];
        let points = player_points(&[("Duck", -2)]);
        let prior = [total(1, 10)];
        let squads = BTreeMap::from([(1, squad)]);
        let totals = apply_match(&prior, &squads, &points, &PointConfig::standard());
        assert_eq!(totals, vec![total(1, 6)]);
    }

    #[test]
    fn test_apply_match_adds_to_prior() {
        let squads = BTreeMap::from([
            (1, vec![SquadMember::new("A")]),
            (2, vec![SquadMember::new("B")]),
        ]);
        let points = player_points(&[("A", 10), ("B", 20)]);
        let prior = [total(1, 100), total(3, 7)];

        let totals = apply_match(&prior, &squads, &points, &PointConfig::standard());
        assert_eq!(
            totals,
            vec![
                total(1, 110),
                total(2, 20), // no prior entry
                total(3, 7),  // not in this series any more
            ]
        );
    }

    #[test]
    fn test_apply_match_twice_is_additive() {
        let squads = BTreeMap::from([(1, vec![SquadMember::captain("A")])]);
        let points = player_points(&[("A", 25)]);
        let config = PointConfig::standard();

        let once = apply_match(&[], &squads, &points, &config);
        let twice = apply_match(&once, &squads, &points, &config);
        assert_eq!(once[0].points, 50);
        assert_eq!(twice[0].points, 100);
    }
}
