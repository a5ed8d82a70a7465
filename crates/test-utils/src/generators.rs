//! Sample table generators with predictable values.
//!
//! Tables are returned flat in correction-grid storage order: the x index
//! varies slowest, so node `(ix, iy)` sits at `ix * points_y + iy`.

/// Creates a table where each node holds `ix * 1000 + iy`.
///
/// This makes it easy to spot a transposed lookup: reading node `(ix, iy)`
/// back as `(iy, ix)` produces an obviously wrong value.
///
/// # Example
///
/// ```
/// use test_utils::ramp_samples;
///
/// let samples = ramp_samples(3, 2);
/// assert_eq!(samples, vec![0.0, 1.0, 1000.0, 1001.0, 2000.0, 2001.0]);
/// ```
pub fn ramp_samples(points_x: usize, points_y: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(points_x * points_y);
    for ix in 0..points_x {
        for iy in 0..points_y {
            data.push((ix * 1000 + iy) as f64);
        }
    }
    data
}

/// Creates a table sampled from the plane `base + slope_x * ix + slope_y * iy`.
///
/// Bilinear interpolation reproduces a plane exactly, so any lookup against
/// such a grid has a closed-form expected value.
pub fn plane_samples(
    points_x: usize,
    points_y: usize,
    base: f64,
    slope_x: f64,
    slope_y: f64,
) -> Vec<f64> {
    let mut data = Vec::with_capacity(points_x * points_y);
    for ix in 0..points_x {
        for iy in 0..points_y {
            data.push(base + slope_x * ix as f64 + slope_y * iy as f64);
        }
    }
    data
}

/// Creates a table holding `value` at every node.
pub fn constant_samples(points_x: usize, points_y: usize, value: f64) -> Vec<f64> {
    vec![value; points_x * points_y]
}
