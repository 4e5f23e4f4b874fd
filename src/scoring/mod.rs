pub mod bands;
pub mod config;
pub mod engine;
pub mod validation;

pub use bands::{Band, BandTable, RangeOp};
pub use config::PointConfig;
pub use engine::{calculate_points, PointsResult, RuleContribution};
pub use validation::validate_points;
