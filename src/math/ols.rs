//! Ordinary least squares solver.
//!
//! Every window fit solves a small problem of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! with a 4-column design (intercept plus three polynomial terms).
//!
//! Implementation choices:
//! - SVD solve, because the design is tall (more rows than columns) and
//!   nalgebra's `QR::solve` only handles square systems.
//! - Rank-deficient designs are rejected instead of returning the minimum-norm
//!   solution. A window whose driver is constant cannot identify a cubic, and
//!   a silently-regularised fit would produce a meaningless baseline there.

use nalgebra::{DMatrix, DVector};

/// Singular values below `RANK_TOL * σ_max` count as zero.
const RANK_TOL: f64 = 1e-10;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is underdetermined, rank deficient, or yields a
/// non-finite solution.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() < x.ncols() || x.nrows() != y.len() || x.ncols() == 0 {
        return None;
    }
    if x.iter().any(|v| !v.is_finite()) || y.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let svd = x.clone().svd(true, true);
    let sigma_max = svd.singular_values.max();
    if !(sigma_max.is_finite() && sigma_max > 0.0) {
        return None;
    }

    let eps = RANK_TOL * sigma_max;
    if svd.rank(eps) < x.ncols() {
        return None;
    }

    let beta = svd.solve(y, eps).ok()?;
    if beta.iter().all(|v| v.is_finite()) {
        Some(beta)
    } else {
        None
    }
}

/// Coefficient of determination of a fitted design.
///
/// A constant response is explained perfectly when the residuals vanish and
/// not at all otherwise.
pub fn r_squared(x: &DMatrix<f64>, y: &DVector<f64>, beta: &DVector<f64>) -> f64 {
    let n = y.len();
    if n == 0 {
        return f64::NAN;
    }
    let fitted = x * beta;
    let mean = y.sum() / n as f64;

    let ss_res: f64 = y.iter().zip(fitted.iter()).map(|(a, b)| (a - b).powi(2)).sum();
    let ss_tot: f64 = y.iter().map(|a| (a - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}
