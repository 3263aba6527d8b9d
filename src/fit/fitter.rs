//! Windowed cubic regression.
//!
//! Given:
//! - a depth-ordered operating set of `(depth, driver, target)` samples
//! - a window plan (sliding or tumbling)
//! - value ranges for outlier rejection
//!
//! we solve, for each window:
//! - an OLS problem of `transform(target)` on `[1, x, x^2, x^3]`, `x = 0.01 * driver`
//! - the resulting R²
//!
//! and emit one `CoefficientRecord` per accepted window. Windows with too few
//! in-range points are skipped quietly; windows whose regression is degenerate
//! are skipped with a warning. Neither aborts the scan.

use std::ops::Range;

use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

use crate::domain::{
    CoefficientRecord, CubicCoefficients, GsaConfig, RecordDepth, ValueRange, WellTable,
};
use crate::error::GsaError;
use crate::fit::windows::sliding_windows;
use crate::math::{CUBIC_TERMS, mean, r_squared, solve_least_squares};
use crate::models::{Transform, fill_design_row};

/// Depth-sorted samples eligible for regression, with their source rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatingSet {
    /// Source row index in the input table, per position.
    pub rows: Vec<usize>,
    pub depth: Vec<f64>,
    pub driver: Vec<f64>,
    pub target: Vec<f64>,
}

impl OperatingSet {
    /// Rows in `mask` whose depth, driver and target are all present, sorted by
    /// depth ascending. Ties keep their table order.
    pub fn build(table: &WellTable, mask: &[bool], driver_col: &str, target_col: &str) -> Self {
        let (Some(driver), Some(target)) = (table.numeric(driver_col), table.numeric(target_col))
        else {
            return Self::default();
        };
        let candidates = (0..table.len())
            .filter(|&i| mask.get(i).copied().unwrap_or(false))
            .filter(|&i| driver[i].is_some() && target[i].is_some());
        let order = table.depth_order(candidates);

        let depth = table.depth();
        let mut set = Self::default();
        for i in order {
            if let (Some(d), Some(x), Some(y)) = (depth[i], driver[i], target[i]) {
                set.rows.push(i);
                set.depth.push(d);
                set.driver.push(x);
                set.target.push(y);
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Options controlling how each window is filtered and fit.
#[derive(Debug, Clone)]
pub struct WindowFitOptions {
    /// Open driver range; `None` when the operating set is already screened.
    pub driver_range: Option<ValueRange>,
    pub target_range: Option<ValueRange>,
    pub min_points: usize,
    pub transform: Transform,
    pub record_depth: RecordDepth,
}

impl From<&GsaConfig> for WindowFitOptions {
    fn from(config: &GsaConfig) -> Self {
        Self {
            driver_range: Some(config.driver_range),
            target_range: Some(config.target_range),
            min_points: config.min_points,
            transform: config.transform,
            record_depth: config.record_depth,
        }
    }
}

/// Fit the cubic baseline regression on paired samples.
///
/// Returns the coefficients and R², or a human-readable reason on failure.
pub fn fit_cubic(
    driver: &[f64],
    target: &[f64],
    transform: Transform,
) -> Result<(CubicCoefficients, f64), String> {
    let n = driver.len();
    if n != target.len() {
        return Err(format!("driver/target length mismatch ({n} vs {})", target.len()));
    }

    let mut x = DMatrix::<f64>::zeros(n, CUBIC_TERMS);
    let mut y = DVector::<f64>::zeros(n);
    let mut row = [0.0; CUBIC_TERMS];

    for i in 0..n {
        fill_design_row(driver[i], &mut row);
        for (j, v) in row.iter().enumerate() {
            x[(i, j)] = *v;
        }
        y[i] = transform
            .forward(target[i])
            .ok_or_else(|| format!("target {} undefined under {transform:?}", target[i]))?;
    }

    let beta =
        solve_least_squares(&x, &y).ok_or_else(|| "singular or ill-posed design".to_string())?;
    let coefficients = CubicCoefficients::from_slice(beta.as_slice())
        .ok_or_else(|| format!("expected {CUBIC_TERMS} coefficients, got {}", beta.len()))?;
    Ok((coefficients, r_squared(&x, &y, &beta)))
}

/// Fit a single window of the operating set.
///
/// `Ok(None)` means the window had fewer than `min_points` in-range samples.
pub fn fit_window(
    set: &OperatingSet,
    span: Range<usize>,
    opts: &WindowFitOptions,
) -> Result<Option<CoefficientRecord>, GsaError> {
    let depths = &set.depth[span.clone()];
    let record_depth = match opts.record_depth {
        RecordDepth::WindowMean => mean(depths),
        RecordDepth::WindowStart => depths.first().copied(),
    };
    let Some(record_depth) = record_depth else {
        return Ok(None);
    };

    let mut driver = Vec::with_capacity(span.len());
    let mut target = Vec::with_capacity(span.len());
    for i in span.clone() {
        let (x, y) = (set.driver[i], set.target[i]);
        let driver_ok = opts.driver_range.is_none_or(|r| r.contains(x));
        let target_ok = opts.target_range.is_none_or(|r| r.contains(y));
        if driver_ok && target_ok {
            driver.push(x);
            target.push(y);
        }
    }

    if driver.len() < opts.min_points {
        debug!(
            start = span.start,
            kept = driver.len(),
            min_points = opts.min_points,
            "Window skipped: too few in-range points"
        );
        return Ok(None);
    }

    let (coefficients, r2) =
        fit_cubic(&driver, &target, opts.transform).map_err(|reason| GsaError::WindowFit {
            start: span.start,
            reason,
        })?;

    Ok(Some(CoefficientRecord {
        depth: record_depth,
        coefficients,
        n_points: driver.len(),
        r_squared: r2,
    }))
}

/// Fit every window in `plan`, skipping the ones that cannot be fit.
pub fn fit_windows(
    set: &OperatingSet,
    plan: &[Range<usize>],
    opts: &WindowFitOptions,
) -> Vec<CoefficientRecord> {
    let mut records = Vec::new();
    for span in plan {
        match fit_window(set, span.clone(), opts) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => {
                let depth = set.depth.get(span.start).copied().unwrap_or(f64::NAN);
                warn!(depth, error = %e, "Window regression failed, skipping");
            }
        }
    }
    records
}

/// Sliding-window fit of one baseline over the rows selected by `mask`.
///
/// Errors:
/// - `InsufficientData` when fewer than `config.min_valid_rows` rows are usable
/// - `NoCoefficients` when no window produced a record
pub fn fit_sliding(
    table: &WellTable,
    mask: &[bool],
    config: &GsaConfig,
) -> Result<(OperatingSet, Vec<CoefficientRecord>), GsaError> {
    config.validate()?;

    let set = OperatingSet::build(table, mask, &config.driver_col, &config.target_col);
    if set.len() < config.min_valid_rows {
        return Err(GsaError::InsufficientData {
            rows: set.len(),
            required: config.min_valid_rows,
        });
    }

    let plan = sliding_windows(set.len(), config.window_size, config.step)?;
    let records = fit_windows(&set, &plan, &WindowFitOptions::from(config));
    debug!(
        kind = %config.kind,
        windows = plan.len(),
        records = records.len(),
        "Sliding-window regression finished"
    );

    if records.is_empty() {
        return Err(GsaError::NoCoefficients);
    }
    Ok((set, records))
}
