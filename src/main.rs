use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use kirkit::config::{get_config_path, get_state_path, load_config, Config};
use kirkit::league::TournamentId;
use kirkit::output::{self, ScoredPlayer};
use kirkit::pipeline::{self, TournamentSync};
use kirkit::scoring::{calculate_points, validate_points, PointConfig};
use kirkit::store::{LeaderboardStore, LeagueFile, MatchDir, StateFile, TournamentSource};
use kirkit::EngineError;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_NOT_FOUND: i32 = 1;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show match points per player for a scorecard JSON file
    Points {
        /// Scorecard file (innings array or flat legacy object)
        scorecard: PathBuf,
    },
    /// Apply a finished match to a tournament leaderboard
    Apply {
        #[arg(short, long)]
        tournament: TournamentId,
        /// Match id, as in <matches_dir>/<series_id>/<match>.json
        #[arg(short, long = "match")]
        match_id: String,
        /// Apply even if this match was already applied (points are added again)
        #[arg(long)]
        force: bool,
    },
    /// Print the current leaderboard
    Leaderboard {
        #[arg(short, long)]
        tournament: TournamentId,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Take the daily snapshot of a leaderboard
    Snapshot {
        #[arg(short, long)]
        tournament: TournamentId,
        /// Calendar date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List stored snapshots, newest first
    Snapshots {
        #[arg(short, long)]
        tournament: TournamentId,
    },
    /// Apply every stored match not yet applied to each ongoing tournament
    Sync {
        /// Also take today's snapshot of each ongoing tournament
        #[arg(long)]
        snapshot: bool,
    },
    /// Print the effective point rules as YAML
    Rules,
}

#[derive(Parser, Debug)]
#[command(name = "kirkit")]
#[command(about = "Fantasy cricket scoring and leaderboards", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/kirkit/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Diagnostics go to stderr. RUST_LOG wins over --verbose.
fn init_logging(verbose: bool) {
    let default = if verbose { "warn,kirkit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cli.command {
        Commands::Points { ref scorecard } => {
            let points = load_points(cli.config.clone());
            run_points(scorecard, &points, cli.verbose)
        }
        Commands::Rules => {
            let points = load_points(cli.config.clone());
            match serde_saphyr::to_string(&points) {
                Ok(yaml) => {
                    print!("{}", yaml);
                    EXIT_SUCCESS
                }
                Err(e) => {
                    eprintln!("Failed to render point rules: {}", e);
                    EXIT_CONFIG
                }
            }
        }
        ref command => {
            let config = require_config(cli.config.clone());
            run_league_command(command, &config)
        }
    };

    std::process::exit(code);
}

/// Load the config file or exit with the config error code
fn require_config(path: Option<PathBuf>) -> Config {
    let config = match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    check_points(&config.points());
    config
}

/// Point rules for commands that work without a league: the config file's
/// override when one is given or present, otherwise the standard table.
fn load_points(path: Option<PathBuf>) -> PointConfig {
    let has_default = get_config_path().map(|p| p.exists()).unwrap_or(false);
    let points = if path.is_some() || has_default {
        require_config(path).points()
    } else {
        PointConfig::standard()
    };
    check_points(&points);
    points
}

// Validate point rules at startup
fn check_points(points: &PointConfig) {
    if let Err(errors) = validate_points(points) {
        eprintln!("Point config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
}

fn run_points(path: &Path, points: &PointConfig, verbose: bool) -> i32 {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path.display(), e);
            return EXIT_NOT_FOUND;
        }
    };
    let scorecard: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid scorecard JSON in {}: {}", path.display(), e);
            return EXIT_DATA;
        }
    };

    let results: Vec<_> = kirkit::scorecard::extract_player_stats(Some(&scorecard))
        .into_iter()
        .map(|(name, stats)| (name, calculate_points(&stats, points)))
        .collect();
    let players: Vec<ScoredPlayer> = results
        .iter()
        .map(|(name, result)| ScoredPlayer { name, result })
        .collect();

    let use_colors = output::should_use_colors();
    if verbose && !players.is_empty() {
        for player in &players {
            println!("{}", output::format_player_detail(player, use_colors));
            println!();
        }
    } else {
        println!("{}", output::format_player_table(&players, use_colors));
    }
    EXIT_SUCCESS
}

fn run_league_command(command: &Commands, config: &Config) -> i32 {
    let state_path = match get_state_path(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };
    let mut store = match StateFile::open(&state_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("State error: {:#}", e);
            return EXIT_DATA;
        }
    };
    let league = match LeagueFile::load(&config.league) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("League error: {:#}", e);
            return EXIT_DATA;
        }
    };

    let use_colors = output::should_use_colors();

    let result = match command {
        Commands::Apply {
            tournament,
            match_id,
            force,
        } => {
            let matches = MatchDir::new(&config.matches_dir);
            pipeline::process_match(
                *tournament,
                match_id,
                &league,
                &matches,
                &mut store,
                &config.points(),
                *force,
            )
            .map(|entries| {
                println!("Applied match {} to tournament {}", match_id, tournament);
                println!("{}", output::format_leaderboard(&entries, use_colors));
            })
        }
        Commands::Leaderboard { tournament, format } => {
            known_tournament(&league, *tournament).and_then(|()| {
                let entries = store.leaderboard(*tournament)?;
                match format {
                    Format::Table => {
                        println!("{}", output::format_leaderboard(&entries, use_colors))
                    }
                    Format::Tsv if entries.is_empty() => {}
                    Format::Tsv => println!("{}", output::format_leaderboard_tsv(&entries)),
                }
                Ok(())
            })
        }
        Commands::Snapshot { tournament, date } => {
            let date = date.unwrap_or_else(today);
            known_tournament(&league, *tournament).and_then(|()| {
                let snapshot = pipeline::create_snapshot(&mut store, *tournament, date)?;
                let teams = snapshot.entries.len();
                println!("Snapshot for {} ({} teams)", snapshot.date, teams);
                Ok(())
            })
        }
        Commands::Snapshots { tournament } => {
            known_tournament(&league, *tournament).and_then(|()| {
                let snapshots = store.snapshots(*tournament)?;
                println!("{}", output::format_snapshot_list(&snapshots, use_colors));
                Ok(())
            })
        }
        Commands::Sync { snapshot } => {
            let matches = MatchDir::new(&config.matches_dir);
            let points = config.points();
            let date = snapshot.then(today);
            let pending =
                pipeline::process_pending(&league, &matches, &mut store, &points, date);
            return match pending {
                Ok(reports) => report_sync(&reports, use_colors),
                Err(e) => report_error(e),
            };
        }
        Commands::Points { .. } | Commands::Rules => Ok(()),
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(e),
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Print the batch summary. Any failed match makes the run exit with the data
/// error code, after every tournament has been reported.
fn report_sync(reports: &[TournamentSync], use_colors: bool) -> i32 {
    println!("{}", output::format_sync_report(reports, use_colors));

    let mut code = EXIT_SUCCESS;
    for report in reports {
        for (match_id, e) in &report.failed {
            eprintln!(
                "Error: tournament {} match {}: {}",
                report.tournament.id, match_id, e
            );
            code = EXIT_DATA;
        }
    }
    code
}

fn report_error(e: EngineError) -> i32 {
    let code = exit_code(&e);
    eprintln!("Error: {:#}", anyhow::Error::from(e));
    code
}

fn known_tournament(league: &LeagueFile, id: TournamentId) -> kirkit::Result<()> {
    match league.tournament(id)? {
        Some(_) => Ok(()),
        None => Err(EngineError::TournamentNotFound(id)),
    }
}

fn exit_code(err: &EngineError) -> i32 {
    if err.is_not_found() {
        EXIT_NOT_FOUND
    } else {
        EXIT_DATA
    }
}
