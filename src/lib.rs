//! Fantasy cricket scoring.
//!
//! Scorecards go in, per-player match points and ranked team leaderboards
//! come out. The scoring and ranking code is pure; reading and writing
//! tournaments, matches and standings goes through the traits in [`store`].

pub mod config;
pub mod error;
pub mod league;
pub mod output;
pub mod pipeline;
pub mod scorecard;
pub mod scoring;
pub mod snapshot;
pub mod store;

pub use error::{EngineError, Result};
