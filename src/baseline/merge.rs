//! Attach a baseline and its companion columns to a table.
//!
//! Columns written per kind:
//!
//! | kind | baseline | flag              | companions                       |
//! |------|----------|-------------------|----------------------------------|
//! | RGSA | `RGSA`   | `GAS_EFFECT_RT`   | `RT_RATIO` = raw / base, `RT_DIFF` = raw − base |
//! | NGSA | `NGSA`   | `GAS_EFFECT_NPHI` | `NPHI_DIFF` = base − raw         |
//! | DGSA | `DGSA`   | `GAS_EFFECT_RHOB` | `DENS_DIFF` = base − raw         |
//!
//! Existing columns with these names are dropped and re-appended, so a rerun
//! leaves the column count unchanged.

use crate::domain::{AnomalyDirection, ColumnData, GsaKind, WellTable};
use crate::error::GsaError;

/// Relative band inside which raw and baseline count as equal.
pub const ANOMALY_REL_TOL: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Companion {
    /// raw / baseline
    Ratio(&'static str),
    /// raw - baseline
    RawMinusBaseline(&'static str),
    /// baseline - raw
    BaselineMinusRaw(&'static str),
}

impl Companion {
    fn name(self) -> &'static str {
        match self {
            Companion::Ratio(n)
            | Companion::RawMinusBaseline(n)
            | Companion::BaselineMinusRaw(n) => n,
        }
    }

    fn apply(self, raw: f64, base: f64) -> Option<f64> {
        let v = match self {
            Companion::Ratio(_) => {
                if base == 0.0 {
                    return None;
                }
                raw / base
            }
            Companion::RawMinusBaseline(_) => raw - base,
            Companion::BaselineMinusRaw(_) => base - raw,
        };
        v.is_finite().then_some(v)
    }
}

fn companions(kind: GsaKind) -> &'static [Companion] {
    match kind {
        GsaKind::Resistivity => &[
            Companion::Ratio("RT_RATIO"),
            Companion::RawMinusBaseline("RT_DIFF"),
        ],
        GsaKind::Neutron => &[Companion::BaselineMinusRaw("NPHI_DIFF")],
        GsaKind::Density => &[Companion::BaselineMinusRaw("DENS_DIFF")],
    }
}

/// Every column name `merge_baseline` writes for `kind`, in write order.
pub fn output_columns(kind: GsaKind) -> Vec<&'static str> {
    let mut names = vec![kind.output_name(), kind.flag_name()];
    names.extend(companions(kind).iter().map(|c| c.name()));
    names
}

/// Whether `raw` departs from `base` in the gas direction.
pub fn is_anomalous(direction: AnomalyDirection, raw: f64, base: f64) -> bool {
    let band = ANOMALY_REL_TOL * base.abs();
    match direction {
        AnomalyDirection::Above => raw > base + band,
        AnomalyDirection::Below => raw < base - band,
    }
}

/// Return a copy of `table` with the baseline and companion columns attached.
///
/// `baseline` must have one entry per table row. Flags are `false` and
/// companions are missing wherever either the raw target or the baseline is
/// missing. Companions are skipped entirely if `target_col` is absent.
pub fn merge_baseline(
    table: &WellTable,
    kind: GsaKind,
    target_col: &str,
    baseline: Vec<Option<f64>>,
) -> Result<WellTable, GsaError> {
    let mut out = table.clone();
    let raw: Option<Vec<Option<f64>>> = table.numeric(target_col).map(<[_]>::to_vec);

    out.replace_column(kind.output_name(), ColumnData::Numeric(baseline.clone()))?;

    let Some(raw) = raw else {
        return Ok(out);
    };

    let pairs: Vec<Option<(f64, f64)>> = raw
        .iter()
        .zip(&baseline)
        .map(|(r, b)| Some(((*r)?, (*b)?)))
        .collect();

    let flags = pairs
        .iter()
        .map(|p| p.is_some_and(|(r, b)| is_anomalous(kind.anomaly(), r, b)))
        .collect();
    out.replace_column(kind.flag_name(), ColumnData::Flag(flags))?;

    for &companion in companions(kind) {
        let values = pairs
            .iter()
            .map(|p| p.and_then(|(r, b)| companion.apply(r, b)))
            .collect();
        out.replace_column(companion.name(), ColumnData::Numeric(values))?;
    }
    Ok(out)
}
