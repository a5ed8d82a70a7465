//! The immutable correction surface.

use serde::Serialize;
use tracing::trace;

use crate::error::{GridError, Result};
use crate::interpolation::{axis_cell, bilinear_blend};
use crate::types::{GridBounds, GridResolution};

/// A sampled scalar field over a rectangular domain.
///
/// Samples are stored flat with the x index varying slowest, so node
/// `(ix, iy)` lives at `ix * points_y + iy`. A table produced in the other
/// order yields a surface mirrored across the diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionGrid {
    bounds: GridBounds,
    resolution: GridResolution,
    samples: Box<[f64]>,
}

/// Intermediate values of a single lookup, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLookup {
    /// Input after saturation onto the domain.
    pub clamped: (f64, f64),
    /// Continuous grid-space coordinate.
    pub grid_position: (f64, f64),
    /// Corner indices `(ix0, ix1, iy0, iy1)`.
    pub indices: (usize, usize, usize, usize),
    /// Corner samples `(s00, s01, s10, s11)`.
    pub corners: (f64, f64, f64, f64),
    /// Interpolated, unscaled correction.
    pub value: f64,
}

impl CorrectionGrid {
    /// Build a grid, rejecting any table that could misbehave during lookup.
    pub fn new(bounds: GridBounds, resolution: GridResolution, samples: Vec<f64>) -> Result<Self> {
        bounds.validate()?;
        resolution.validate()?;

        if samples.len() != resolution.len() {
            return Err(GridError::SampleCountMismatch {
                expected: resolution.len(),
                actual: samples.len(),
            });
        }

        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(GridError::NonFiniteSample { index });
        }

        Ok(Self {
            bounds,
            resolution,
            samples: samples.into_boxed_slice(),
        })
    }

    /// Interpolated correction at `(x, y)`.
    ///
    /// Coordinates outside the domain saturate to the nearest edge.
    pub fn lookup(&self, x: f64, y: f64) -> f64 {
        self.lookup_detailed(x, y).value
    }

    /// Same as [`lookup`](Self::lookup), returning every intermediate value.
    pub fn lookup_detailed(&self, x: f64, y: f64) -> GridLookup {
        let (cx, cy) = self.bounds.clamp(x, y);
        let col = axis_cell(cx, self.bounds.min_x, self.bounds.width(), self.resolution.points_x);
        let row = axis_cell(cy, self.bounds.min_y, self.bounds.height(), self.resolution.points_y);

        let s00 = self.sample_unchecked(col.lower, row.lower);
        let s01 = self.sample_unchecked(col.lower, row.upper);
        let s10 = self.sample_unchecked(col.upper, row.lower);
        let s11 = self.sample_unchecked(col.upper, row.upper);

        let value = bilinear_blend(s00, s01, s10, s11, col.fraction, row.fraction);

        trace!(
            x = cx,
            y = cy,
            gx = col.position,
            gy = row.position,
            ix0 = col.lower,
            ix1 = col.upper,
            iy0 = row.lower,
            iy1 = row.upper,
            value,
            "grid lookup"
        );

        GridLookup {
            clamped: (cx, cy),
            grid_position: (col.position, row.position),
            indices: (col.lower, col.upper, row.lower, row.upper),
            corners: (s00, s01, s10, s11),
            value,
        }
    }

    fn sample_unchecked(&self, ix: usize, iy: usize) -> f64 {
        self.samples[self.resolution.offset(ix, iy)]
    }

    /// Stored sample at node `(ix, iy)`, if it exists.
    pub fn sample(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix >= self.resolution.points_x || iy >= self.resolution.points_y {
            return None;
        }
        Some(self.sample_unchecked(ix, iy))
    }

    /// Planar coordinate of node `(ix, iy)`.
    pub fn node_coordinate(&self, ix: usize, iy: usize) -> Option<(f64, f64)> {
        if ix >= self.resolution.points_x || iy >= self.resolution.points_y {
            return None;
        }
        let step_x = self.bounds.width() / (self.resolution.points_x - 1) as f64;
        let step_y = self.bounds.height() / (self.resolution.points_y - 1) as f64;
        Some((
            self.bounds.min_x + ix as f64 * step_x,
            self.bounds.min_y + iy as f64 * step_y,
        ))
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn resolution(&self) -> GridResolution {
        self.resolution
    }

    /// The flat sample table in storage order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Smallest stored sample.
    pub fn min_sample(&self) -> f64 {
        self.samples.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest stored sample.
    pub fn max_sample(&self) -> f64 {
        self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}
