pub mod formatter;

pub use formatter::{
    format_delta, format_leaderboard, format_leaderboard_tsv, format_player_detail,
    format_player_table, format_snapshot_list, format_sync_report, should_use_colors,
    ScoredPlayer,
};
