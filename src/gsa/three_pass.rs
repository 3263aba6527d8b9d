//! 3-pass RGSA with a dynamic driver cap.
//!
//! - Pass 1: split the in-range driver samples into non-overlapping chunks of
//!   `chunk_size` rows and record the `cap_quantile` of each chunk at the
//!   chunk's median depth. Chunks shorter than half a chunk are ignored.
//! - Pass 2: keep rows whose driver is below the cap interpolated at their
//!   depth, whose resistivity is inside the target range and whose lithology
//!   is not excluded; fit `log10(RT)` on tumbling windows of `chunk_size` rows,
//!   tagging each record with the window's first depth.
//! - Pass 3: interpolate each coefficient linearly over depth (clamped at the
//!   ends) and evaluate `10^cubic` at every selected row with a driver reading.
//!
//! Any pass that produces nothing aborts the run as a pass-through.

use tracing::{debug, info};

use crate::baseline::{merge_baseline, reconstruct};
use crate::domain::{
    CoefficientRecord, FilterSpec, GsaKind, GsaParams, GsaRun, RunStatus, ThreePassConfig,
    WellTable,
};
use crate::error::GsaError;
use crate::fit::{
    LinearProfile, OperatingSet, WindowFitOptions, fit_windows, select, selected_rows,
    tumbling_windows,
};
use crate::gsa::{pass_through, require_columns};
use crate::math::{interp, median, quantile};
use crate::models::Transform;
use crate::report::format_coefficient_table;

/// One Pass-1 knot: the driver cap at a chunk's median depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapKnot {
    pub depth: f64,
    pub cap: f64,
}

/// Pass 1: depth-varying driver cap.
pub fn driver_cap_profile(
    table: &WellTable,
    mask: &[bool],
    config: &ThreePassConfig,
) -> Result<Vec<CapKnot>, GsaError> {
    let Some(driver) = table.numeric(&config.driver_col) else {
        return Err(GsaError::NoDriverCap);
    };
    let depth = table.depth();

    let candidates = (0..table.len()).filter(|&i| {
        mask.get(i).copied().unwrap_or(false)
            && driver[i].is_some_and(|g| config.driver_range.contains(g))
    });
    let order = table.depth_order(candidates);

    let mut knots = Vec::new();
    for span in tumbling_windows(order.len(), config.chunk_size)? {
        if span.len() * 2 < config.chunk_size {
            continue;
        }
        let rows = &order[span];
        let values: Vec<f64> = rows.iter().filter_map(|&i| driver[i]).collect();
        let depths: Vec<f64> = rows.iter().filter_map(|&i| depth[i]).collect();
        let (Some(cap), Some(mid)) = (quantile(&values, config.cap_quantile), median(&depths))
        else {
            continue;
        };
        debug!(depth = mid, cap, "Driver cap");
        knots.push(CapKnot { depth: mid, cap });
    }

    if knots.is_empty() {
        return Err(GsaError::NoDriverCap);
    }
    Ok(knots)
}

/// Pass 2: tumbling-window regression under the driver cap.
pub fn fit_capped_windows(
    table: &WellTable,
    mask: &[bool],
    caps: &[CapKnot],
    config: &ThreePassConfig,
) -> Result<Vec<CoefficientRecord>, GsaError> {
    let (Some(driver), Some(target)) = (
        table.numeric(&config.driver_col),
        table.numeric(&config.target_col),
    ) else {
        return Err(GsaError::NoCoefficients);
    };
    let lithology = table.text(&config.lithology_col);
    let depth = table.depth();

    let cap_depths: Vec<f64> = caps.iter().map(|k| k.depth).collect();
    let cap_values: Vec<f64> = caps.iter().map(|k| k.cap).collect();

    let is_excluded = |i: usize| {
        lithology
            .and_then(|l| l[i].as_deref())
            .is_some_and(|l| config.excluded_lithologies.contains(&l.to_uppercase()))
    };

    let mut set = OperatingSet::default();
    for i in table.depth_order(selected_rows(mask)) {
        let (Some(d), Some(gr), Some(rt)) = (depth[i], driver[i], target[i]) else {
            continue;
        };
        let Some(cap) = interp(d, &cap_depths, &cap_values) else {
            continue;
        };
        if gr < cap && config.target_range.contains(rt) && !is_excluded(i) {
            set.rows.push(i);
            set.depth.push(d);
            set.driver.push(gr);
            set.target.push(rt);
        }
    }

    let opts = WindowFitOptions {
        driver_range: None,
        target_range: None,
        min_points: config.min_points,
        transform: Transform::Log10,
        record_depth: config.record_depth,
    };
    let plan = tumbling_windows(set.len(), config.chunk_size)?;
    let records = fit_windows(&set, &plan, &opts);

    if records.is_empty() {
        return Err(GsaError::NoCoefficients);
    }
    debug!(
        rows = set.len(),
        "Capped regression results\n{}",
        format_coefficient_table(&records)
    );
    Ok(records)
}

/// Pass 3: evaluate the baseline from linearly interpolated coefficients.
pub fn reconstruct_capped(
    table: &WellTable,
    mask: &[bool],
    records: &[CoefficientRecord],
    config: &ThreePassConfig,
) -> Result<WellTable, GsaError> {
    let profile = LinearProfile::new(records).ok_or(GsaError::NoCoefficients)?;
    let curve = reconstruct(
        table,
        &selected_rows(mask),
        &config.driver_col,
        &profile,
        Transform::Log10,
        None,
    );
    merge_baseline(table, GsaKind::Resistivity, &config.target_col, curve)
}

/// Run the 3-pass RGSA on one well.
pub fn run_rgsa_three_pass(
    table: &WellTable,
    params: &GsaParams,
    filter: &FilterSpec,
) -> Result<GsaRun, GsaError> {
    let kind = GsaKind::Resistivity;
    let config = params.three_pass_config()?;
    require_columns(table, kind, &config.required_columns())?;

    info!(
        rows = table.len(),
        chunk = config.chunk_size,
        "Computing 3-pass RGSA"
    );

    let mask = select(table, filter);
    if !mask.iter().any(|&m| m) {
        return Ok(pass_through(table, kind, GsaError::EmptyFilterResult));
    }

    let caps = match driver_cap_profile(table, &mask, &config) {
        Ok(caps) => caps,
        Err(e) if e.is_recoverable() => return Ok(pass_through(table, kind, e)),
        Err(e) => return Err(e),
    };

    let records = match fit_capped_windows(table, &mask, &caps, &config) {
        Ok(records) => records,
        Err(e) if e.is_recoverable() => return Ok(pass_through(table, kind, e)),
        Err(e) => return Err(e),
    };

    let out = reconstruct_capped(table, &mask, &records, &config)?;
    info!(caps = caps.len(), records = records.len(), "3-pass RGSA complete");

    Ok(GsaRun {
        kind,
        table: out,
        status: RunStatus::Completed { records },
    })
}
