//! Common grids and configurations used across tests.

use correction_grid::{CorrectionGrid, GridBounds, GridResolution};
use extruder_mesh::MeshConfig;

/// Domain of the 2x2 reference grid.
pub const REFERENCE_BOUNDS: GridBounds = GridBounds {
    min_x: 0.0,
    max_x: 10.0,
    min_y: 0.0,
    max_y: 10.0,
};

/// Samples of the 2x2 reference grid: `[x0y0, x0y1, x1y0, x1y1]`.
pub const REFERENCE_SAMPLES: [f64; 4] = [0.0, 10.0, 20.0, 30.0];

/// The 2x2 grid over `[0,10]x[0,10]` with corners 0, 10, 20, 30.
///
/// Lookups: `(5,5) = 15`, `(0,0) = 0`, `(10,10) = 30`, `(0,10) = 10`.
pub fn reference_grid() -> CorrectionGrid {
    CorrectionGrid::new(
        REFERENCE_BOUNDS,
        GridResolution::new(2, 2),
        REFERENCE_SAMPLES.to_vec(),
    )
    .expect("reference grid is valid")
}

/// Mesh configuration wrapping [`reference_grid`].
pub fn reference_config() -> MeshConfig {
    MeshConfig {
        min_x: REFERENCE_BOUNDS.min_x,
        max_x: REFERENCE_BOUNDS.max_x,
        min_y: REFERENCE_BOUNDS.min_y,
        max_y: REFERENCE_BOUNDS.max_y,
        points_x: 2,
        points_y: 2,
        points: REFERENCE_SAMPLES.to_vec(),
        ..MeshConfig::default()
    }
}

/// A grid over `bounds` filled from `samples`.
pub fn grid_with(bounds: GridBounds, points_x: usize, points_y: usize, samples: Vec<f64>) -> CorrectionGrid {
    CorrectionGrid::new(bounds, GridResolution::new(points_x, points_y), samples)
        .expect("fixture grid is valid")
}
