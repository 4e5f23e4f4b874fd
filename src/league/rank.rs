use super::types::{LeaderboardEntry, TeamTotal, TournamentId};

/// Sort teams by points descending and assign 1-based ranks.
///
/// Equal points are ordered by team id ascending, so ranks are always
/// distinct and stable from run to run. Team names are left empty for the
/// caller to fill in.
pub fn rank_teams(
    tournament_id: TournamentId,
    mut totals: Vec<TeamTotal>,
) -> Vec<LeaderboardEntry> {
    totals.sort_by(|a, b| {
        // Primary: points descending
        // Tie-breaker: team id ascending
        b.points.cmp(&a.points).then(a.team_id.cmp(&b.team_id))
    });

    totals
        .into_iter()
        .enumerate()
        .map(|(idx, total)| LeaderboardEntry {
            tournament_id,
            team_id: total.team_id,
            team_name: String::new(),
            team_owner: String::new(),
            points: total.points,
            rank: idx as u32 + 1,
        })
        .collect()
}
