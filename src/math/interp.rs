//! Clamped piecewise-linear interpolation.
//!
//! `interp` follows the usual numerics-library contract: knots must be sorted
//! ascending, queries left of the first knot return the first value, queries
//! right of the last knot return the last value, and a query landing exactly
//! on a knot returns that knot's value unchanged.

/// Linear interpolation between two points.
pub fn linear_interp(a: (f64, f64), b: (f64, f64), x: f64) -> f64 {
    let (x0, y0) = a;
    let (x1, y1) = b;
    if (x1 - x0).abs() < 1e-12 {
        return y0;
    }
    let u = (x - x0) / (x1 - x0);
    y0 + u * (y1 - y0)
}

/// Interpolate `fp(xp)` at `x`, clamping at both ends.
///
/// Returns `None` when there are no knots, the slices disagree in length, or
/// `x` is NaN.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> Option<f64> {
    if xp.is_empty() || xp.len() != fp.len() || x.is_nan() {
        return None;
    }
    let last = xp.len() - 1;
    if x <= xp[0] {
        return Some(fp[0]);
    }
    if x >= xp[last] {
        return Some(fp[last]);
    }

    // First knot strictly greater than x; it exists because x < xp[last].
    let hi = xp.partition_point(|&k| k <= x);
    let lo = hi - 1;
    if xp[lo] == x {
        return Some(fp[lo]);
    }
    Some(linear_interp((xp[lo], fp[lo]), (xp[hi], fp[hi]), x))
}
