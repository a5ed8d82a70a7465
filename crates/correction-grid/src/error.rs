//! Error types for correction grid construction.

use thiserror::Error;

/// Errors raised while building a [`CorrectionGrid`](crate::CorrectionGrid).
///
/// Lookups never fail; every variant here is a configuration problem that
/// must be caught before the grid is put into service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// An axis has an empty, inverted or non-finite domain, or a span too
    /// wide to represent.
    #[error("invalid bounds on {axis} axis: min {min} must be finite, below max {max}, with a finite span")]
    InvalidBounds { axis: &'static str, min: f64, max: f64 },

    /// An axis has fewer than two sample points.
    #[error("invalid resolution on {axis} axis: {points} points (need at least 2)")]
    InvalidResolution { axis: &'static str, points: usize },

    /// `points_x * points_y` does not fit in memory addressing.
    #[error("resolution {points_x}x{points_y} is too large")]
    ResolutionOverflow { points_x: usize, points_y: usize },

    /// The sample table does not hold `points_x * points_y` values.
    #[error("sample count mismatch: expected {expected} values, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// A sample value is NaN or infinite.
    #[error("sample {index} is not a finite number")]
    NonFiniteSample { index: usize },
}

impl GridError {
    /// Create an InvalidBounds error.
    pub fn invalid_bounds(axis: &'static str, min: f64, max: f64) -> Self {
        Self::InvalidBounds { axis, min, max }
    }

    /// Create an InvalidResolution error.
    pub fn invalid_resolution(axis: &'static str, points: usize) -> Self {
        Self::InvalidResolution { axis, points }
    }
}

/// Result type for grid construction.
pub type Result<T> = std::result::Result<T, GridError>;
