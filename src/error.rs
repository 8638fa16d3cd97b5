//! Error types.

use thiserror::Error;

/// The reasons a path cannot be turned into a [Trajectory](crate::Trajectory).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("a trajectory needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("arc length does not increase at point {index}")]
    NonMonotonic { index: usize },
    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// The reasons a [PlannerParam](crate::PlannerParam) set is rejected.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("parameter `{name}` must be finite and non-negative, got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[cfg(feature = "serde")]
    #[error("malformed parameters: {0}")]
    Parse(#[from] serde_json::Error),
}
