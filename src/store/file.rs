use anyhow::{bail, Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::state::{LeaderboardState, STATE_VERSION};
use super::{LeaderboardStore, MatchRecord, MatchSource, SquadProvider, TournamentSource};
use crate::league::{
    FantasyTeam, LeaderboardEntry, SquadMember, TeamId, Tournament, TournamentId,
};
use crate::snapshot::Snapshot;

/// Tournaments and fantasy teams, maintained by hand as YAML.
///
/// Example:
/// ```yaml
/// tournaments:
///   - { id: 1, series_id: t20wc-2026, name: T20 World Cup 2026 }
/// teams:
///   - id: 10
///     series_id: t20wc-2026
///     name: Deep Point
///     owner: asha
///     squad:
///       - { player: Virat Kohli, captain: true }
///       - { player: Jasprit Bumrah, vice_captain: true }
///       - { player: Rishabh Pant }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeagueFile {
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
    #[serde(default)]
    pub teams: Vec<FantasyTeam>,
}

impl LeagueFile {
    /// Load the league from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a
    /// tournament or team id is used twice.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| {
            format!("Failed to read league file at {}", path.display())
        })?;

        let league: LeagueFile = serde_saphyr::from_str(&content).with_context(|| {
            format!("Failed to parse league: invalid YAML in {}", path.display())
        })?;

        league.check_unique_ids()?;
        Ok(league)
    }

    fn check_unique_ids(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for t in &self.tournaments {
            if !seen.insert(t.id) {
                bail!("Duplicate tournament id {} in league file", t.id);
            }
        }
        let mut seen = HashSet::new();
        for team in &self.teams {
            if !seen.insert(team.id) {
                bail!("Duplicate team id {} in league file", team.id);
            }
        }
        Ok(())
    }
}

impl TournamentSource for LeagueFile {
    fn tournament(&self, id: TournamentId) -> Result<Option<Tournament>> {
        Ok(self.tournaments.iter().find(|t| t.id == id).cloned())
    }

    fn tournaments(&self) -> Result<Vec<Tournament>> {
        let mut tournaments = self.tournaments.clone();
        tournaments.sort_by_key(|t| t.id);
        Ok(tournaments)
    }
}

impl SquadProvider for LeagueFile {
    fn teams(&self, series_id: &str) -> Result<Vec<FantasyTeam>> {
        Ok(self
            .teams
            .iter()
            .filter(|t| t.series_id == series_id)
            .cloned()
            .collect())
    }

    fn squad(&self, team_id: TeamId) -> Result<Vec<SquadMember>> {
        match self.teams.iter().find(|t| t.id == team_id) {
            Some(team) => Ok(team.squad.clone()),
            None => bail!("Unknown team {}", team_id),
        }
    }
}

/// Match files laid out as `<root>/<series_id>/<match_id>.json`, with an
/// optional `<match_id>.scorecard.json` beside it.
#[derive(Debug, Clone)]
pub struct MatchDir {
    root: PathBuf,
}

impl MatchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn series_dir(&self, series_id: &str) -> Result<PathBuf> {
        check_path_component(series_id)?;
        Ok(self.root.join(series_id))
    }
}

const SCORECARD_SUFFIX: &str = ".scorecard.json";

/// Ids become file names, so they must not reach outside the directory
fn check_path_component(id: &str) -> Result<()> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
        bail!("Invalid id for a match file: '{}'", id);
    }
    Ok(())
}

impl MatchSource for MatchDir {
    fn match_record(&self, series_id: &str, match_id: &str) -> Result<Option<MatchRecord>> {
        check_path_component(match_id)?;
        let dir = self.series_dir(series_id)?;

        let info_path = dir.join(format!("{}.json", match_id));
        if !info_path.exists() {
            return Ok(None);
        }
        let match_info = fs::read_to_string(&info_path).with_context(|| {
            format!("Failed to read match file at {}", info_path.display())
        })?;

        let scorecard_path = dir.join(format!("{}{}", match_id, SCORECARD_SUFFIX));
        let scorecard = if scorecard_path.exists() {
            Some(fs::read_to_string(&scorecard_path).with_context(|| {
                format!(
                    "Failed to read scorecard file at {}",
                    scorecard_path.display()
                )
            })?)
        } else {
            None
        };

        Ok(Some(MatchRecord {
            series_id: series_id.to_string(),
            match_id: match_id.to_string(),
            match_info,
            scorecard,
        }))
    }

    fn match_ids(&self, series_id: &str) -> Result<Vec<String>> {
        let dir = self.series_dir(series_id)?;
        let context = || format!("Failed to list matches in {}", dir.display());
        let listing = match fs::read_dir(&dir) {
            Ok(listing) => listing,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).with_context(context),
        };

        let mut ids = Vec::new();
        for entry in listing {
            let file_name = entry.with_context(context)?.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if name.ends_with(SCORECARD_SUFFIX) {
                continue;
            }
            if let Some(id) = name.strip_suffix(".json") {
                if check_path_component(id).is_ok() {
                    ids.push(id.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Load leaderboard state from a JSON file
///
/// If the file doesn't exist, returns a new empty state.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_state(path: &Path) -> Result<LeaderboardState> {
    if !path.exists() {
        return Ok(LeaderboardState::new());
    }

    let file = File::open(path).with_context(|| {
        format!("Failed to open state file at {}", path.display())
    })?;

    let state: LeaderboardState =
        serde_json::from_reader(file).context("Failed to load leaderboard state")?;

    // Version check
    if state.version != STATE_VERSION {
        anyhow::bail!("Unsupported leaderboard state version: {}", state.version);
    }

    Ok(state)
}

/// Save leaderboard state to a JSON file atomically
///
/// Uses atomic-write-file so the file is never left half-written.
/// Creates the parent directory if it doesn't exist.
pub fn save_state(path: &Path, state: &LeaderboardState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create state directory at {}", parent.display())
        })?;
    }

    let mut file = AtomicWriteFile::open(path).with_context(|| {
        format!("Failed to open atomic write file at {}", path.display())
    })?;

    serde_json::to_writer_pretty(&mut file, state)
        .context("Failed to serialize leaderboard state")?;

    file.commit().context("Failed to save leaderboard state")?;

    Ok(())
}

/// Leaderboard store backed by a single JSON file. Every mutation is written
/// through immediately.
#[derive(Debug)]
pub struct StateFile {
    path: PathBuf,
    state: LeaderboardState,
}

impl StateFile {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = load_state(&path)?;
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        save_state(&self.path, &self.state)
    }
}

impl LeaderboardStore for StateFile {
    fn leaderboard(&self, tournament_id: TournamentId) -> Result<Vec<LeaderboardEntry>> {
        Ok(self.state.entries(tournament_id))
    }

    fn replace_leaderboard(
        &mut self,
        tournament_id: TournamentId,
        entries: &[LeaderboardEntry],
    ) -> Result<()> {
        self.state.replace_entries(tournament_id, entries);
        self.save()
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
        self.save()
    }

    fn snapshot(&self, tournament_id: TournamentId, date: NaiveDate) -> Result<Option<Snapshot>> {
        Ok(self.state.snapshot(tournament_id, date).cloned())
    }

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        if !self.state.add_snapshot(snapshot) {
            bail!(
                "Snapshot for tournament {} on {} already exists",
                snapshot.tournament_id,
                snapshot.date
            );
        }
        self.save()
    }

    fn snapshots(&self, tournament_id: TournamentId) -> Result<Vec<Snapshot>> {
        Ok(self.state.snapshots(tournament_id))
    }
}
