use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use super::state::LeaderboardState;
use super::{LeaderboardStore, MatchRecord, MatchSource, SquadProvider, TournamentSource};
use crate::league::{
    FantasyTeam, LeaderboardEntry, SquadMember, TeamId, Tournament, TournamentId,
};
use crate::snapshot::Snapshot;

/// All four collaborators in memory, with switches to make individual
/// lookups fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub tournaments: Vec<Tournament>,
    pub teams: Vec<FantasyTeam>,
    pub matches: BTreeMap<(String, String), MatchRecord>,
    pub state: LeaderboardState,
    pub broken_squads: BTreeSet<TeamId>,
    pub fail_teams: bool,
    pub fail_leaderboard: bool,
}

impl MemoryStore {
    pub fn add_match(
        &mut self,
        series_id: &str,
        match_id: &str,
        match_info: &str,
        scorecard: Option<&str>,
    ) {
        self.matches.insert(
            (series_id.to_string(), match_id.to_string()),
            MatchRecord {
                series_id: series_id.to_string(),
                match_id: match_id.to_string(),
                match_info: match_info.to_string(),
                scorecard: scorecard.map(str::to_string),
            },
        );
    }
}

impl TournamentSource for MemoryStore {
    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>> {
        Ok(self.tournaments.iter().find(|t| t.id == id).cloned())
    }

    fn tournaments(&self) -> Result<Vec<Tournament>> {
        let mut tournaments = self.tournaments.clone();
        tournaments.sort_by_key(|t| t.id);
        Ok(tournaments)
    }
}

impl SquadProvider for MemoryStore {
    fn teams(&self, series_id: &str) -> Result<Vec<FantasyTeam>> {
        if self.fail_teams {
            bail!("team lookup failed");
        }
        Ok(self
            .teams
            .iter()
            .filter(|t| t.series_id == series_id)
            .cloned()
            .collect())
    }

    fn squad(&self, team_id: TeamId) -> Result<Vec<SquadMember>> {
        if self.broken_squads.contains(&team_id) {
            bail!("squad for team {} unavailable", team_id);
        }
        Ok(self
            .teams
            .iter()
            .find(|t| t.id == team_id)
            .map(|t| t.squad.clone())
            .unwrap_or_default())
    }
}

impl MatchSource for MemoryStore {
    fn match_record(&self, series_id: &str, match_id: &str) -> Result<Option<MatchRecord>> {
        Ok(self
            .matches
            .get(&(series_id.to_string(), match_id.to_string()))
            .cloned())
    }

    fn match_ids(&self, series_id: &str) -> Result<Vec<String>> {
        Ok(self
            .matches
            .keys()
            .filter(|(series, _)| series == series_id)
            .map(|(_, id)| id.clone())
            .collect())
    }
}

impl LeaderboardStore for MemoryStore {
    fn leaderboard(&self, tournament_id: TournamentId) -> Result<Vec<LeaderboardEntry>> {
        if self.fail_leaderboard {
            bail!("leaderboard unavailable");
        }
        Ok(self.state.entries(tournament_id))
    }

    fn replace_leaderboard(
        &mut self,
        tournament_id: TournamentId,
        entries: &[LeaderboardEntry],
    ) -> Result<()> {
        self.state.replace_entries(tournament_id, entries);
        Ok(())
    }

    fn is_applied(&self, tournament_id: TournamentId, match_id: &str) -> Result<bool> {
        Ok(self.state.is_applied(tournament_id, match_id))
    }

    fn record_match(
        &mut self,
        tournament_id: TournamentId,
        match_id: &str,
        entries: &[LeaderboardEntry],
    ) -> Result<()> {
        self.state.replace_entries(tournament_id, entries);
        self.state.mark_applied(tournament_id, match_id);
        Ok(())
    }

    fn snapshot(&self, tournament_id: TournamentId, date: NaiveDate) -> Result<Option<Snapshot>> {
        Ok(self.state.snapshot(tournament_id, date).cloned())
    }

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        if !self.state.add_snapshot(snapshot) {
            bail!("snapshot already exists");
        }
        Ok(())
    }

    fn snapshots(&self, tournament_id: TournamentId) -> Result<Vec<Snapshot>> {
        Ok(self.state.snapshots(tournament_id))
    }
}
