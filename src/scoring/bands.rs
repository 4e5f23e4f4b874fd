use std::fmt;

use super::config::PointConfig;

/// Comparison used by a single band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    /// Inclusive on both ends: N-M
    Between(f64, f64),
    /// Inclusive low, exclusive high: [N, M)
    HalfOpen(f64, f64),
    /// Exclusive low, inclusive high: (N, M]
    OpenClosed(f64, f64),
}

impl RangeOp {
    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
            RangeOp::HalfOpen(low, high) => value >= *low && value < *high,
            RangeOp::OpenClosed(low, high) => value > *low && value <= *high,
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeOp::LessThan(n) => write!(f, "<{}", n),
            RangeOp::LessEqual(n) => write!(f, "<={}", n),
            RangeOp::GreaterThan(n) => write!(f, ">{}", n),
            RangeOp::GreaterEqual(n) => write!(f, ">={}", n),
            RangeOp::Between(low, high) => write!(f, "{}-{}", low, high),
            RangeOp::HalfOpen(low, high) => write!(f, "{}-<{}", low, high),
            RangeOp::OpenClosed(low, high) => write!(f, ">{}-{}", low, high),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub range: RangeOp,
    pub points: i64,
}

impl Band {
    pub fn new(range: RangeOp, points: i64) -> Self {
        Self { range, points }
    }
}

/// Ordered list of bands where the first matching band wins.
///
/// Values that match no band get no adjustment, which is how the dead zones
/// (strike rate 70-130, economy 7-10) are expressed.
#[derive(Debug, Clone)]
pub struct BandTable {
    bands: Vec<Band>,
}

impl BandTable {
    pub fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    /// Strike-rate bands (runs per 100 balls).
    pub fn strike_rate(config: &PointConfig) -> Self {
        Self::new(vec![
            Band::new(RangeOp::GreaterThan(170.0), config.strike_rate_bonus_170),
            Band::new(RangeOp::GreaterEqual(150.0), config.strike_rate_bonus_150),
            Band::new(RangeOp::GreaterEqual(130.0), config.strike_rate_bonus_130),
            Band::new(RangeOp::Between(60.0, 70.0), config.strike_rate_penalty_70),
            Band::new(RangeOp::HalfOpen(50.0, 60.0), config.strike_rate_penalty_60),
            Band::new(RangeOp::LessThan(50.0), config.strike_rate_penalty_50),
        ])
    }

    /// Economy bands (runs conceded per over).
    pub fn economy(config: &PointConfig) -> Self {
        Self::new(vec![
            Band::new(RangeOp::LessThan(5.0), config.economy_bonus_low),
            Band::new(RangeOp::LessThan(6.0), config.economy_bonus_5),
            Band::new(RangeOp::LessEqual(7.0), config.economy_bonus_6),
            Band::new(RangeOp::Between(10.0, 11.0), config.economy_penalty_10),
            Band::new(RangeOp::OpenClosed(11.0, 12.0), config.economy_penalty_11),
            Band::new(RangeOp::GreaterThan(12.0), config.economy_penalty_12),
        ])
    }

    pub fn lookup(&self, value: f64) -> Option<&Band> {
        self.bands.iter().find(|band| band.range.matches(value))
    }
}
