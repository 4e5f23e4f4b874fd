use owo_colors::OwoColorize;
use std::cmp::Reverse;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::league::LeaderboardEntry;
use crate::pipeline::TournamentSync;
use crate::scoring::PointsResult;
use crate::snapshot::Snapshot;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// A player with the points they earned in one match
pub struct ScoredPlayer<'a> {
    pub name: &'a str,
    pub result: &'a PointsResult,
}

/// Format a rule contribution with an explicit sign ("+8", "-2", "0")
pub fn format_delta(points: i64) -> String {
    if points > 0 {
        format!("+{}", points)
    } else {
        points.to_string()
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the leaderboard with columns: Rank, Points, Team, Owner
/// Rank column: 3 chars (fits "99."), right-aligned
/// Points column: 7 chars, right-aligned
pub fn format_leaderboard(entries: &[LeaderboardEntry], use_colors: bool) -> String {
    format_leaderboard_for_width(entries, use_colors, get_terminal_width())
}

fn format_leaderboard_for_width(
    entries: &[LeaderboardEntry],
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    if entries.is_empty() {
        return "No teams on the leaderboard yet.".to_string();
    }

    let rank_width = 3;
    let points_width = 7;
    let separator = "  ";

    entries
        .iter()
        .map(|entry| {
            let rank_str = format!("{:>2}.", entry.rank);
            let points_padded = format!("{:>width$}", entry.points, width = points_width);
            let owner = if entry.team_owner.is_empty() {
                String::new()
            } else {
                format!("({})", entry.team_owner)
            };

            // Widths are in chars, not bytes
            let owner_width = owner.chars().count();
            let fixed_width = rank_width + 1 + points_width + separator.len() * 2 + owner_width;
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&entry.team_name, width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_name(&entry.team_name, 20),
                // No terminal (pipe), don't truncate
                None => entry.team_name.clone(),
            };

            let line = if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str.dimmed(),
                    points_padded.bold(),
                    separator,
                    name,
                    separator,
                    owner.yellow()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str, points_padded, separator, name, separator, owner
                )
            };
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the leaderboard as tab-separated values for scripting
/// Columns: rank, points, team_id, team_name, team_owner (no headers, no colors)
pub fn format_leaderboard_tsv(entries: &[LeaderboardEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                e.rank, e.points, e.team_id, e.team_name, e.team_owner
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format per-player match points, highest first, ties by name
pub fn format_player_table(players: &[ScoredPlayer], use_colors: bool) -> String {
    if players.is_empty() {
        return "No player statistics in scorecard.".to_string();
    }

    let mut sorted: Vec<&ScoredPlayer> = players.iter().collect();
    sorted.sort_by_key(|p| (Reverse(p.result.points), p.name));

    sorted
        .iter()
        .map(|p| {
            let points = format!("{:>5}", p.result.points);
            if use_colors {
                format!("{}  {}", points.bold(), p.name)
            } else {
                format!("{}  {}", points, p.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one player's points with the rule-by-rule breakdown (for verbose mode)
pub fn format_player_detail(player: &ScoredPlayer, use_colors: bool) -> String {
    let points = player.result.points;
    let header = if use_colors {
        format!("{}: {} pts", player.name.bold(), points.bold())
    } else {
        format!("{}: {} pts", player.name, points)
    };

    let mut lines = vec![header];
    for c in &player.result.breakdown {
        let delta = format!("{:>5}", format_delta(c.points));
        let delta = if !use_colors {
            delta
        } else if c.points < 0 {
            delta.red().to_string()
        } else {
            delta.green().to_string()
        };
        lines.push(format!("  {}  {} ({})", delta, c.label, c.description));
    }
    lines.join("\n")
}

/// Format stored snapshots, one line per date
pub fn format_snapshot_list(snapshots: &[Snapshot], use_colors: bool) -> String {
    if snapshots.is_empty() {
        return "No snapshots.".to_string();
    }

    snapshots
        .iter()
        .map(|s| {
            let date = s.date.format("%Y-%m-%d").to_string();
            let leader = s
                .entries
                .iter()
                .find(|e| e.rank == 1)
                .map(|e| format!("  leader: {} ({})", e.team_name, e.points))
                .unwrap_or_default();
            let date = if use_colors {
                date.cyan().to_string()
            } else {
                date
            };
            format!("{}  {} teams{}", date, s.entries.len(), leader)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a batch run: one block per ongoing tournament with what was
/// applied and the resulting leaderboard
pub fn format_sync_report(reports: &[TournamentSync], use_colors: bool) -> String {
    if reports.is_empty() {
        return "No ongoing tournaments.".to_string();
    }

    reports
        .iter()
        .map(|r| {
            let mut summary = format!("{} ({} applied", r.tournament.name, r.applied.len());
            if !r.failed.is_empty() {
                summary.push_str(&format!(", {} failed", r.failed.len()));
            }
            if let Some(date) = r.snapshot {
                summary.push_str(&format!(", snapshot {}", date.format("%Y-%m-%d")));
            }
            summary.push(')');

            let header = if use_colors {
                summary.bold().to_string()
            } else {
                summary
            };
            format!("{}\n{}", header, format_leaderboard(&r.entries, use_colors))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
