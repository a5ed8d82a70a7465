//! Shared test utilities for the extruder-mesh workspace.
//!
//! This crate provides common testing infrastructure including:
//! - A recording planner to sit at the bottom of a transform chain
//! - Sample table generators with easily verified values
//! - Reference grids used across the test suite
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod recording;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use recording::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f64, 1.0_f64, 0.001_f64);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Approximate equality of every field of two positions.
///
/// ```ignore
/// assert_position_approx_eq!(moved, Position::new(5.0, 5.0, 0.0, 31.0), 1e-9);
/// ```
#[macro_export]
macro_rules! assert_position_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: extruder_mesh::Position = $left;
        let right: extruder_mesh::Position = $right;
        $crate::assert_approx_eq!(left.x, right.x, $epsilon);
        $crate::assert_approx_eq!(left.y, right.y, $epsilon);
        $crate::assert_approx_eq!(left.z, right.z, $epsilon);
        $crate::assert_approx_eq!(left.e, right.e, $epsilon);
    }};
}
