//! Polynomial basis for the baseline regressions.
//!
//! Driver readings are rescaled before entering the basis:
//!
//! - `x = 0.01 * driver`
//!
//! which keeps gamma-ray values (typically 5–180 API) near unit magnitude so
//! that `x^3` stays well conditioned next to the intercept column.

/// Fixed driver rescaling factor.
pub const DRIVER_SCALE: f64 = 0.01;

/// Number of basis terms, intercept included.
pub const CUBIC_TERMS: usize = 4;

/// Rescaled predictor for a raw driver reading.
pub fn scaled(driver: f64) -> f64 {
    DRIVER_SCALE * driver
}

/// Fill `[1, x, x^2, x^3]`.
///
/// # Panics
/// Panics if `out` is shorter than [`CUBIC_TERMS`].
pub fn fill_powers(x: f64, out: &mut [f64]) {
    out[0] = 1.0;
    out[1] = x;
    out[2] = x * x;
    out[3] = x * x * x;
}
