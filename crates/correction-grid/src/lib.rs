//! Planar correction surfaces with bilinear lookup.
//!
//! A [`CorrectionGrid`] holds a coarse table of calibration samples over a
//! rectangular domain and answers continuous-coordinate queries by blending
//! the four surrounding nodes.
//!
//! # Lookup
//!
//! ```text
//! lookup(x, y)
//!      │
//!      ├─► Clamp (x, y) onto the domain
//!      │
//!      ├─► Map to grid space: g = (v - min) / (max - min) * (points - 1)
//!      │
//!      ├─► Corner indices floor(g) and floor(g) + 1, pinned to the last node
//!      │
//!      └─► Blend s00, s01, s10, s11 by the fractional parts
//! ```
//!
//! # Example
//!
//! ```
//! use correction_grid::{CorrectionGrid, GridBounds, GridResolution};
//!
//! let grid = CorrectionGrid::new(
//!     GridBounds::new(0.0, 10.0, 0.0, 10.0),
//!     GridResolution::new(2, 2),
//!     vec![0.0, 10.0, 20.0, 30.0],
//! )
//! .unwrap();
//!
//! assert!((grid.lookup(5.0, 5.0) - 15.0).abs() < 1e-9);
//! assert_eq!(grid.lookup(0.0, 10.0), 10.0);
//! ```

pub mod error;
pub mod grid;
pub mod interpolation;
pub mod types;

pub use error::{GridError, Result};
pub use grid::{CorrectionGrid, GridLookup};
pub use interpolation::{axis_cell, bilinear_blend, AxisCell};
pub use types::{GridBounds, GridResolution};
