use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::league::{
    apply_match, rank_teams, LeaderboardEntry, TeamTotal, Tournament, TournamentId,
    TournamentStatus,
};
use crate::scorecard::{extract_player_points, MatchInfo};
use crate::scoring::PointConfig;
use crate::snapshot::Snapshot;
use crate::store::{LeaderboardStore, MatchRecord, MatchSource, SquadProvider, TournamentSource};

/// Compute the leaderboard a tournament would have after applying one match.
///
/// Reads everything through the collaborators and writes nothing. The match
/// is added on top of the stored leaderboard, so the result is only correct
/// if the match has not been applied yet.
pub fn compute_leaderboard_for_match<L, M, S>(
    tournament_id: TournamentId,
    match_id: &str,
    league: &L,
    matches: &M,
    store: &S,
    config: &PointConfig,
) -> Result<Vec<LeaderboardEntry>>
where
    L: TournamentSource + SquadProvider,
    M: MatchSource,
    S: LeaderboardStore,
{
    let tournament = league
        .tournament(tournament_id)?
        .ok_or(EngineError::TournamentNotFound(tournament_id))?;

    let record = matches
        .match_record(&tournament.series_id, match_id)?
        .ok_or_else(|| EngineError::MatchNotFound {
            series_id: tournament.series_id.clone(),
            match_id: match_id.to_string(),
        })?;

    let info = parse_match_info(&record)?;
    let scorecard = select_scorecard(&record, info.scorecard);
    let player_points = extract_player_points(scorecard.as_ref(), config);
    debug!(
        tournament_id,
        match_id, players = player_points.len(), "Computed player points"
    );

    let teams = league.teams(&tournament.series_id)?;
    let prior: Vec<TeamTotal> = store
        .leaderboard(tournament_id)?
        .iter()
        .map(LeaderboardEntry::total)
        .collect();

    let mut squads = BTreeMap::new();
    for team in &teams {
        match league.squad(team.id) {
            Ok(squad) => {
                squads.insert(team.id, squad);
            }
            Err(e) => {
                warn!(
                    team_id = team.id,
                    error = %e,
                    "Skipping team: squad could not be loaded"
                );
            }
        }
    }

    let totals = apply_match(&prior, &squads, &player_points, config);
    let mut entries = rank_teams(tournament_id, totals);

    // Names and owners come from the current team list
    let names: HashMap<_, _> = teams.iter().map(|t| (t.id, (&t.name, &t.owner))).collect();
    for entry in &mut entries {
        if let Some((name, owner)) = names.get(&entry.team_id) {
            entry.team_name = name.to_string();
            entry.team_owner = owner.to_string();
        }
    }

    Ok(entries)
}

fn parse_match_info(record: &MatchRecord) -> Result<MatchInfo> {
    serde_json::from_str(&record.match_info).map_err(|source| EngineError::DataCorruption {
        match_id: record.match_id.clone(),
        source,
    })
}

/// A dedicated scorecard wins over the one embedded in the match metadata,
/// unless it is empty or cannot be decoded.
fn select_scorecard(record: &MatchRecord, embedded: Option<Value>) -> Option<Value> {
    let dedicated = record.scorecard.as_deref().map(str::trim);
    let Some(raw) = dedicated.filter(|s| !s.is_empty()) else {
        return embedded;
    };
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(
                match_id = %record.match_id,
                error = %e,
                "Dedicated scorecard is not valid JSON; using the embedded scorecard"
            );
            embedded
        }
    }
}

/// Replace the stored leaderboard for a tournament.
pub fn update_leaderboard<S: LeaderboardStore>(
    store: &mut S,
    tournament_id: TournamentId,
    entries: &[LeaderboardEntry],
) -> Result<()> {
    store.replace_leaderboard(tournament_id, entries)?;
    Ok(())
}

/// Apply one match to a tournament's leaderboard and persist the result.
///
/// A match already recorded for the tournament is refused with
/// `AlreadyApplied` unless `force` is set, in which case its points are
/// added again.
pub fn process_match<L, M, S>(
    tournament_id: TournamentId,
    match_id: &str,
    league: &L,
    matches: &M,
    store: &mut S,
    config: &PointConfig,
    force: bool,
) -> Result<Vec<LeaderboardEntry>>
where
    L: TournamentSource + SquadProvider,
    M: MatchSource,
    S: LeaderboardStore,
{
    if store.is_applied(tournament_id, match_id)? {
        if !force {
            return Err(EngineError::AlreadyApplied {
                tournament_id,
                match_id: match_id.to_string(),
            });
        }
        warn!(
            tournament_id,
            match_id, "Re-applying a match that was already applied"
        );
    }

    let entries =
        compute_leaderboard_for_match(tournament_id, match_id, league, matches, store, config)?;
    store.record_match(tournament_id, match_id, &entries)?;

    info!(
        tournament_id,
        match_id, teams = entries.len(), "Leaderboard updated"
    );
    Ok(entries)
}

/// Snapshot the current leaderboard for a date.
///
/// At most one snapshot exists per tournament and date: if one is already
/// stored it is returned as is.
pub fn create_snapshot<S: LeaderboardStore>(
    store: &mut S,
    tournament_id: TournamentId,
    date: NaiveDate,
) -> Result<Snapshot> {
    if let Some(existing) = store.snapshot(tournament_id, date)? {
        debug!(tournament_id, %date, "Snapshot already exists");
        return Ok(existing);
    }

    let snapshot = Snapshot::new(tournament_id, date, store.leaderboard(tournament_id)?);
    store.save_snapshot(&snapshot)?;
    Ok(snapshot)
}

/// What one batch run did for one ongoing tournament.
#[derive(Debug)]
pub struct TournamentSync {
    pub tournament: Tournament,
    /// Matches applied by this run, in id order
    pub applied: Vec<String>,
    /// Matches that could not be applied; they stay pending for the next run
    pub failed: Vec<(String, EngineError)>,
    /// Leaderboard after the run
    pub entries: Vec<LeaderboardEntry>,
    /// Date of the snapshot taken (or already present) for this run
    pub snapshot: Option<NaiveDate>,
}

/// Apply every stored match not yet applied to each ongoing tournament.
///
/// Finished tournaments are left alone. A match, listing, leaderboard or
/// snapshot failure is logged and recorded, and the run moves on to the next
/// match or tournament. Only failing to list the tournaments aborts the run.
///
/// With `snapshot_date`, each ongoing tournament's leaderboard is snapshotted
/// for that date after its matches are applied.
pub fn process_pending<L, M, S>(
    league: &L,
    matches: &M,
    store: &mut S,
    config: &PointConfig,
    snapshot_date: Option<NaiveDate>,
) -> Result<Vec<TournamentSync>>
where
    L: TournamentSource + SquadProvider,
    M: MatchSource,
    S: LeaderboardStore,
{
    let mut reports = Vec::new();

    for tournament in league.tournaments()? {
        if tournament.status != TournamentStatus::Ongoing {
            debug!(tournament_id = tournament.id, "Tournament is done");
            continue;
        }

        let mut report = TournamentSync {
            tournament,
            applied: Vec::new(),
            failed: Vec::new(),
            entries: Vec::new(),
            snapshot: None,
        };
        let tournament_id = report.tournament.id;

        let match_ids = match matches.match_ids(&report.tournament.series_id) {
            Ok(ids) => ids,
            Err(e) => {
                warn!(tournament_id, error = %e, "Could not list matches");
                Vec::new()
            }
        };

        for match_id in match_ids {
            match apply_pending(tournament_id, &match_id, league, matches, store, config) {
                Ok(true) => report.applied.push(match_id),
                Ok(false) => {}
                Err(e) => {
                    warn!(tournament_id, match_id, error = %e, "Match not applied");
                    report.failed.push((match_id, e));
                }
            }
        }

        if let Some(date) = snapshot_date {
            match create_snapshot(store, tournament_id, date) {
                Ok(snapshot) => report.snapshot = Some(snapshot.date),
                Err(e) => warn!(tournament_id, error = %e, "Snapshot not taken"),
            }
        }

        match store.leaderboard(tournament_id) {
            Ok(entries) => report.entries = entries,
            Err(e) => warn!(tournament_id, error = %e, "Could not read leaderboard"),
        }

        if !report.applied.is_empty() {
            info!(tournament_id, applied = report.applied.len(), "Synced");
        }
        reports.push(report);
    }

    Ok(reports)
}

/// Apply one match unless it already was. Returns whether it was applied.
fn apply_pending<L, M, S>(
    tournament_id: TournamentId,
    match_id: &str,
    league: &L,
    matches: &M,
    store: &mut S,
    config: &PointConfig,
) -> Result<bool>
where
    L: TournamentSource + SquadProvider,
    M: MatchSource,
    S: LeaderboardStore,
{
    if store.is_applied(tournament_id, match_id)? {
        return Ok(false);
    }
    process_match(
        tournament_id,
        match_id,
        league,
        matches,
        store,
        config,
        false,
    )?;
    Ok(true)
}
