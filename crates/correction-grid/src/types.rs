//! Domain types for correction grids.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Rectangular planar domain covered by a correction grid, in machine units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl GridBounds {
    /// Create new bounds.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Check that both axes are finite, non-empty and have a finite span.
    pub fn validate(&self) -> Result<()> {
        check_axis("x", self.min_x, self.max_x)?;
        check_axis("y", self.min_y, self.max_y)
    }

    /// Get the extent along x.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the extent along y.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point lies inside the domain (edges included).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Saturate a point onto the domain.
    ///
    /// NaN coordinates collapse onto the lower edge of their axis.
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (
            clamp_axis(x, self.min_x, self.max_x),
            clamp_axis(y, self.min_y, self.max_y),
        )
    }
}

fn check_axis(axis: &'static str, min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() || min >= max || !(max - min).is_finite() {
        return Err(GridError::invalid_bounds(axis, min, max));
    }
    Ok(())
}

fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Number of sample points along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridResolution {
    pub points_x: usize,
    pub points_y: usize,
}

impl GridResolution {
    /// Create a new resolution.
    pub fn new(points_x: usize, points_y: usize) -> Self {
        Self { points_x, points_y }
    }

    /// Check that each axis has at least two points and the total fits in
    /// a `usize`.
    pub fn validate(&self) -> Result<()> {
        if self.points_x < 2 {
            return Err(GridError::invalid_resolution("x", self.points_x));
        }
        if self.points_y < 2 {
            return Err(GridError::invalid_resolution("y", self.points_y));
        }
        if self.points_x.checked_mul(self.points_y).is_none() {
            return Err(GridError::ResolutionOverflow {
                points_x: self.points_x,
                points_y: self.points_y,
            });
        }
        Ok(())
    }

    /// Total number of samples the table must hold.
    ///
    /// Saturates for resolutions that [`validate`](Self::validate) rejects.
    pub fn len(&self) -> usize {
        self.points_x.saturating_mul(self.points_y)
    }

    /// Always false for a validated resolution.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat table offset of node `(ix, iy)`. The x index varies slowest.
    pub fn offset(&self, ix: usize, iy: usize) -> usize {
        ix * self.points_y + iy
    }
}
