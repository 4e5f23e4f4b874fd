use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::league::{LeaderboardEntry, TournamentId};
use crate::snapshot::Snapshot;

pub const STATE_VERSION: u32 = 1;

/// Everything persisted between runs: standings, applied matches, snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardState {
    pub version: u32,
    #[serde(default)]
    pub tournaments: BTreeMap<TournamentId, TournamentState>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TournamentState {
    #[serde(default)]
    pub entries: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub applied_matches: BTreeSet<String>,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

impl Default for LeaderboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaderboardState {
    /// Create a new empty state at the current version
    pub fn new() -> Self {
        Self {
            version: STATE_VERSION,
            tournaments: BTreeMap::new(),
        }
    }

    fn tournament_mut(&mut self, tournament_id: TournamentId) -> &mut TournamentState {
        self.tournaments.entry(tournament_id).or_default()
    }

    /// Leaderboard entries ordered by rank
    pub fn entries(&self, tournament_id: TournamentId) -> Vec<LeaderboardEntry> {
        let mut entries = self
            .tournaments
            .get(&tournament_id)
            .map(|t| t.entries.clone())
            .unwrap_or_default();
        entries.sort_by_key(|e| e.rank);
        entries
    }

    pub fn replace_entries(&mut self, tournament_id: TournamentId, entries: &[LeaderboardEntry]) {
        self.tournament_mut(tournament_id).entries = entries.to_vec();
    }

    pub fn is_applied(&self, tournament_id: TournamentId, match_id: &str) -> bool {
        self.tournaments
            .get(&tournament_id)
            .is_some_and(|t| t.applied_matches.contains(match_id))
    }

    pub fn mark_applied(&mut self, tournament_id: TournamentId, match_id: &str) {
        self.tournament_mut(tournament_id)
            .applied_matches
            .insert(match_id.to_string());
    }

    pub fn snapshot(&self, tournament_id: TournamentId, date: NaiveDate) -> Option<&Snapshot> {
        self.tournaments
            .get(&tournament_id)?
            .snapshots
            .iter()
            .find(|s| s.date == date)
    }

    /// Store a snapshot unless one already exists for that tournament and date.
    /// Returns false (and leaves the existing snapshot untouched) otherwise.
    pub fn add_snapshot(&mut self, snapshot: &Snapshot) -> bool {
        let tournament_id = snapshot.tournament_id;
        if self.snapshot(tournament_id, snapshot.date).is_some() {
            return false;
        }
        self.tournament_mut(tournament_id)
            .snapshots
            .push(snapshot.clone());
        true
    }

    /// Snapshots for a tournament, newest first
    pub fn snapshots(&self, tournament_id: TournamentId) -> Vec<Snapshot> {
        let mut snapshots = self
            .tournaments
            .get(&tournament_id)
            .map(|t| t.snapshots.clone())
            .unwrap_or_default();
        snapshots.sort_by(|a, b| b.date.cmp(&a.date));
        snapshots
    }
}
