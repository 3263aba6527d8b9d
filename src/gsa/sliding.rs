//! Single-pass sliding-window baselines (RGSA / NGSA / DGSA).

use tracing::info;

use crate::baseline::{merge_baseline, reconstruct};
use crate::domain::{
    FilterSpec, GsaConfig, GsaKind, GsaParams, GsaRun, RgsaMode, RunStatus, WellTable,
};
use crate::error::GsaError;
use crate::fit::{CoefficientTable, fit_sliding, select};
use crate::gsa::three_pass::run_rgsa_three_pass;
use crate::gsa::{pass_through, require_columns};

/// Compute one baseline for a well.
///
/// Resistivity uses the sliding-window path unless `params` selects the
/// 3-pass mode.
pub fn run_gsa(
    table: &WellTable,
    kind: GsaKind,
    params: &GsaParams,
    filter: &FilterSpec,
) -> Result<GsaRun, GsaError> {
    if kind == GsaKind::Resistivity && params.rgsa_mode() == RgsaMode::ThreePass {
        return run_rgsa_three_pass(table, params, filter);
    }
    let config = params.config_for(kind)?;
    run_sliding(table, &config, filter)
}

pub fn run_rgsa(
    table: &WellTable,
    params: &GsaParams,
    filter: &FilterSpec,
) -> Result<GsaRun, GsaError> {
    run_gsa(table, GsaKind::Resistivity, params, filter)
}

pub fn run_ngsa(
    table: &WellTable,
    params: &GsaParams,
    filter: &FilterSpec,
) -> Result<GsaRun, GsaError> {
    run_gsa(table, GsaKind::Neutron, params, filter)
}

pub fn run_dgsa(
    table: &WellTable,
    params: &GsaParams,
    filter: &FilterSpec,
) -> Result<GsaRun, GsaError> {
    run_gsa(table, GsaKind::Density, params, filter)
}

/// Sliding-window baseline with an explicit configuration.
pub fn run_sliding(
    table: &WellTable,
    config: &GsaConfig,
    filter: &FilterSpec,
) -> Result<GsaRun, GsaError> {
    let kind = config.kind;
    config.validate()?;
    require_columns(table, kind, &config.required_columns())?;

    info!(
        kind = %kind,
        rows = table.len(),
        window = config.window_size,
        step = config.step,
        "Computing baseline"
    );

    let mask = select(table, filter);
    if !mask.iter().any(|&m| m) {
        return Ok(pass_through(table, kind, GsaError::EmptyFilterResult));
    }

    let (set, records) = match fit_sliding(table, &mask, config) {
        Ok(fit) => fit,
        Err(e) if e.is_recoverable() => return Ok(pass_through(table, kind, e)),
        Err(e) => return Err(e),
    };

    let Some(coefficients) = CoefficientTable::new(&records) else {
        return Ok(pass_through(table, kind, GsaError::NoCoefficients));
    };

    let curve = reconstruct(
        table,
        &set.rows,
        &config.driver_col,
        &coefficients,
        config.transform,
        Some(config.driver_range),
    );
    let evaluated = curve.iter().filter(|v| v.is_some()).count();
    let out = merge_baseline(table, kind, &config.target_col, curve)?;

    info!(
        kind = %kind,
        records = records.len(),
        evaluated,
        "Baseline complete"
    );

    Ok(GsaRun {
        kind,
        table: out,
        status: RunStatus::Completed { records },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MARKER, ZONE};

    fn well(n: usize) -> WellTable {
        let depth: Vec<f64> = (0..n).map(|i| 1000.0 + 0.5 * i as f64).collect();
        let gr: Vec<Option<f64>> = (0..n)
            .map(|i| Some(60.0 + 30.0 * (i as f64 / 12.0).sin()))
            .collect();
        let nphi: Vec<Option<f64>> = gr.iter().map(|g| g.map(|g| 0.05 + 0.003 * g)).collect();
        let rhob: Vec<Option<f64>> = gr.iter().map(|g| g.map(|g| 2.7 - 0.003 * g)).collect();
        WellTable::from_depths(&depth)
            .with_numeric("GR", gr)
            .unwrap()
            .with_numeric("NPHI", nphi)
            .unwrap()
            .with_numeric("RHOB", rhob)
            .unwrap()
    }

    #[test]
    fn neutron_baseline_reproduces_linear_relation() {
        let t = well(300);
        let run = run_ngsa(&t, &GsaParams::default(), &FilterSpec::all()).unwrap();
        assert!(run.is_completed());
        let ngsa = run.table.numeric("NGSA").unwrap();
        let nphi = t.numeric("NPHI").unwrap();
        for (b, r) in ngsa.iter().zip(nphi) {
            assert!((b.unwrap() - r.unwrap()).abs() < 1e-8);
        }
        assert!(run.table.flag("GAS_EFFECT_NPHI").unwrap().iter().all(|f| !f));
    }

    #[test]
    fn missing_target_column_is_a_configuration_error() {
        let t = WellTable::from_depths(&[1.0, 2.0])
            .with_numeric("GR", vec![Some(1.0), Some(2.0)])
            .unwrap();
        let err = run_dgsa(&t, &GsaParams::default(), &FilterSpec::all()).unwrap_err();
        assert_eq!(
            err,
            GsaError::MissingColumns {
                kind: "DGSA".into(),
                missing: vec!["RHOB".into()]
            }
        );
    }

    #[test]
    fn empty_filter_passes_through() {
        let n = 200;
        let t = well(n)
            .with_text(MARKER, vec![Some("A".to_string()); n])
            .unwrap()
            .with_text(ZONE, vec![Some("Z".to_string()); n])
            .unwrap();
        let run = run_dgsa(&t, &GsaParams::default(), &FilterSpec::intervals(["B"])).unwrap();
        assert_eq!(run.status, RunStatus::PassThrough(GsaError::EmptyFilterResult));
        assert_eq!(run.table, t);
    }

    #[test]
    fn rows_outside_the_filter_get_no_baseline() {
        let n = 400;
        let markers = (0..n)
            .map(|i| Some(if i < 250 { "UPPER" } else { "LOWER" }.to_string()))
            .collect();
        let t = well(n).with_text(MARKER, markers).unwrap();
        let run = run_dgsa(&t, &GsaParams::default(), &FilterSpec::intervals(["UPPER"])).unwrap();
        let dgsa = run.table.numeric("DGSA").unwrap();
        assert!(dgsa[..250].iter().all(Option::is_some));
        assert!(dgsa[250..].iter().all(Option::is_none));
    }
}
