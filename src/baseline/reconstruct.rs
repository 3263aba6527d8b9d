//! Evaluate a fitted baseline at every row of a table.

use crate::domain::{ValueRange, WellTable};
use crate::fit::CoefficientSource;
use crate::models::{Transform, predict};

/// Baseline value per table row.
///
/// Only rows listed in `rows` are evaluated; all others stay `None`. A listed
/// row is also `None` when its depth or driver is missing, when the driver
/// lies outside `driver_range` (if given), or when the evaluated baseline is
/// not finite.
pub fn reconstruct<S>(
    table: &WellTable,
    rows: &[usize],
    driver_col: &str,
    source: &S,
    transform: Transform,
    driver_range: Option<ValueRange>,
) -> Vec<Option<f64>>
where
    S: CoefficientSource + ?Sized,
{
    let mut out = vec![None; table.len()];
    let Some(driver) = table.numeric(driver_col) else {
        return out;
    };
    let depth = table.depth();

    for &i in rows {
        let (Some(d), Some(gr)) = (depth[i], driver[i]) else {
            continue;
        };
        if driver_range.is_some_and(|r| !r.contains(gr)) {
            continue;
        }
        let Some(c) = source.coefficients_at(d) else {
            continue;
        };
        let value = predict(&c, gr, transform);
        if value.is_finite() {
            out[i] = Some(value);
        }
    }
    out
}
