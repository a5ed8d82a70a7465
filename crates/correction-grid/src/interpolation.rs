//! Index arithmetic and blending for bilinear lookups.

/// Position of a clamped coordinate between two neighbouring grid nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCell {
    /// Continuous grid-space coordinate, in `[0, points - 1]`.
    pub position: f64,
    /// Index of the node at or below `position`.
    pub lower: usize,
    /// Index of the next node, pinned to the last node at the upper edge.
    pub upper: usize,
    /// Distance from `lower` towards `upper`, in `[0, 1)`.
    pub fraction: f64,
}

/// Locate an already clamped coordinate along one axis.
///
/// `points` must be at least 2 and `coord` must lie in `[min, min + span]`.
pub fn axis_cell(coord: f64, min: f64, span: f64, points: usize) -> AxisCell {
    let last = points - 1;
    let position = (coord - min) / span * last as f64;
    let floor = position.floor();

    let lower = (floor.max(0.0) as usize).min(last);
    let upper = (lower + 1).min(last);

    AxisCell {
        position,
        lower,
        upper,
        fraction: position - floor,
    }
}

/// Bilinear blend of four corner samples.
///
/// Corners are named `s<x><y>`: `s10` sits one node further along x than
/// `s00`, `s01` one node further along y.
pub fn bilinear_blend(s00: f64, s01: f64, s10: f64, s11: f64, fx: f64, fy: f64) -> f64 {
    let a = s00 * (1.0 - fx) + s10 * fx;
    let b = s01 * (1.0 - fx) + s11 * fx;
    a * (1.0 - fy) + b * fy
}
