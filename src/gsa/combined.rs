//! All three baselines on one well, plus a per-row prospect score.

use tracing::info;

use crate::domain::{ColumnData, FilterSpec, GsaKind, GsaParams, RunStatus, WellTable};
use crate::error::GsaError;
use crate::gsa::sliding::run_gsa;

pub const SCORE_COLUMN: &str = "GSA_SCORE";
pub const ZONE_COLUMN: &str = "GSA_ZONE";

/// Prospect class derived from how many gas-effect flags a row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProspectZone {
    NonProspect,
    Weak,
    Attractive,
    Strong,
}

impl ProspectZone {
    pub fn from_score(score: usize) -> Self {
        match score {
            0 => ProspectZone::NonProspect,
            1 => ProspectZone::Weak,
            2 => ProspectZone::Attractive,
            _ => ProspectZone::Strong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProspectZone::NonProspect => "Non Prospect",
            ProspectZone::Weak => "Weak Zone",
            ProspectZone::Attractive => "Attractive Zone",
            ProspectZone::Strong => "Strong Prospect",
        }
    }
}

/// Result of [`run_all`] (or a single-kind batch job).
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRun {
    pub table: WellTable,
    /// One entry per kind attempted, in run order.
    pub statuses: Vec<(GsaKind, RunStatus)>,
}

impl CombinedRun {
    pub fn status(&self, kind: GsaKind) -> Option<&RunStatus> {
        self.statuses.iter().find(|(k, _)| *k == kind).map(|(_, s)| s)
    }

    pub fn completed_kinds(&self) -> Vec<GsaKind> {
        self.statuses
            .iter()
            .filter(|(_, s)| matches!(s, RunStatus::Completed { .. }))
            .map(|(k, _)| *k)
            .collect()
    }
}

/// Run RGSA, NGSA and DGSA in sequence, each on the previous output.
///
/// A pass-through in one kind does not stop the others. When at least one
/// kind completed, `GSA_SCORE` (number of raised flags among the completed
/// kinds) and `GSA_ZONE` are attached.
pub fn run_all(
    table: &WellTable,
    params: &GsaParams,
    filter: &FilterSpec,
) -> Result<CombinedRun, GsaError> {
    let mut current = table.clone();
    let mut statuses = Vec::with_capacity(GsaKind::ALL.len());

    for kind in GsaKind::ALL {
        let run = run_gsa(&current, kind, params, filter)?;
        statuses.push((kind, run.status));
        current = run.table;
    }

    let mut combined = CombinedRun {
        table: current,
        statuses,
    };
    let completed = combined.completed_kinds();
    if !completed.is_empty() {
        score_zones(&mut combined.table, &completed)?;
    }
    info!(completed = completed.len(), "Combined GSA finished");
    Ok(combined)
}

/// Attach `GSA_SCORE` and `GSA_ZONE` from the flags of `kinds`.
pub fn score_zones(table: &mut WellTable, kinds: &[GsaKind]) -> Result<(), GsaError> {
    let mut scores = vec![0usize; table.len()];
    for kind in kinds {
        if let Some(flags) = table.flag(kind.flag_name()) {
            for (s, &f) in scores.iter_mut().zip(flags) {
                if f {
                    *s += 1;
                }
            }
        }
    }

    let score_col = scores.iter().map(|&s| Some(s as f64)).collect();
    let zone_col = scores
        .iter()
        .map(|&s| Some(ProspectZone::from_score(s).label().to_string()))
        .collect();
    table.replace_column(SCORE_COLUMN, ColumnData::Numeric(score_col))?;
    table.replace_column(ZONE_COLUMN, ColumnData::Text(zone_col))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_labels_follow_score() {
        assert_eq!(ProspectZone::from_score(0).label(), "Non Prospect");
        assert_eq!(ProspectZone::from_score(1).label(), "Weak Zone");
        assert_eq!(ProspectZone::from_score(2).label(), "Attractive Zone");
        assert_eq!(ProspectZone::from_score(3).label(), "Strong Prospect");
    }

    #[test]
    fn score_counts_only_requested_kinds() {
        let mut t = WellTable::from_depths(&[1.0, 2.0, 3.0]);
        t.replace_column("GAS_EFFECT_RT", ColumnData::Flag(vec![true, true, false]))
            .unwrap();
        t.replace_column("GAS_EFFECT_NPHI", ColumnData::Flag(vec![true, false, false]))
            .unwrap();
        t.replace_column("GAS_EFFECT_RHOB", ColumnData::Flag(vec![true, true, true]))
            .unwrap();

        score_zones(&mut t, &[GsaKind::Resistivity, GsaKind::Neutron]).unwrap();
        assert_eq!(t.numeric(SCORE_COLUMN).unwrap(), &[Some(2.0), Some(1.0), Some(0.0)]);
        let zones = t.text(ZONE_COLUMN).unwrap();
        assert_eq!(zones[0].as_deref(), Some("Attractive Zone"));
        assert_eq!(zones[2].as_deref(), Some("Non Prospect"));
    }

    #[test]
    fn all_pass_through_adds_no_score() {
        let t = WellTable::from_depths(&[1.0, 2.0])
            .with_numeric("GR", vec![Some(50.0), Some(60.0)])
            .unwrap()
            .with_numeric("RT", vec![Some(10.0), Some(12.0)])
            .unwrap()
            .with_numeric("NPHI", vec![Some(0.2), Some(0.21)])
            .unwrap()
            .with_numeric("RHOB", vec![Some(2.4), Some(2.41)])
            .unwrap();
        let run = run_all(&t, &GsaParams::default(), &FilterSpec::all()).unwrap();
        assert!(run.completed_kinds().is_empty());
        assert_eq!(run.table, t);
        assert!(matches!(
            run.status(GsaKind::Neutron),
            Some(RunStatus::PassThrough(GsaError::InsufficientData { .. }))
        ));
    }
}
