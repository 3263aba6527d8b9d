//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - handed to plotting/persistence collaborators unchanged
//! - logged or exported as JSON for diagnostics

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::table::WellTable;
use crate::error::GsaError;

/// Interval/zone restriction for a calculation.
///
/// Empty sets mean "no restriction from this criterion".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub target_intervals: BTreeSet<String>,
    #[serde(default)]
    pub target_zones: BTreeSet<String>,
}

impl FilterSpec {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn intervals<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_intervals: names.into_iter().map(Into::into).collect(),
            target_zones: BTreeSet::new(),
        }
    }

    pub fn zones<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_intervals: BTreeSet::new(),
            target_zones: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_zones<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_zones.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Open interval `(lo, hi)` used for value-range rejection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub lo: f64,
    pub hi: f64,
}

impl ValueRange {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Exclusive on both ends.
    pub fn contains(&self, v: f64) -> bool {
        v > self.lo && v < self.hi
    }

    pub fn validate(&self, what: &str) -> Result<(), GsaError> {
        if !(self.lo.is_finite() && self.hi.is_finite() && self.hi > self.lo) {
            return Err(GsaError::InvalidConfig(format!(
                "{what} range ({}, {}) must be finite with hi > lo",
                self.lo, self.hi
            )));
        }
        Ok(())
    }
}

/// Which baseline is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GsaKind {
    /// RGSA: resistivity baseline, log10 regression.
    Resistivity,
    /// NGSA: neutron porosity baseline.
    Neutron,
    /// DGSA: bulk density baseline.
    Density,
}

impl GsaKind {
    pub const ALL: [GsaKind; 3] = [GsaKind::Resistivity, GsaKind::Neutron, GsaKind::Density];

    pub fn output_name(self) -> &'static str {
        match self {
            GsaKind::Resistivity => "RGSA",
            GsaKind::Neutron => "NGSA",
            GsaKind::Density => "DGSA",
        }
    }

    pub fn flag_name(self) -> &'static str {
        match self {
            GsaKind::Resistivity => "GAS_EFFECT_RT",
            GsaKind::Neutron => "GAS_EFFECT_NPHI",
            GsaKind::Density => "GAS_EFFECT_RHOB",
        }
    }

    /// Parameter-mapping key that renames the target column.
    pub fn target_key(self) -> &'static str {
        match self {
            GsaKind::Resistivity => "RES",
            GsaKind::Neutron => "NEUT",
            GsaKind::Density => "DENS",
        }
    }

    pub fn default_target(self) -> &'static str {
        match self {
            GsaKind::Resistivity => "RT",
            GsaKind::Neutron => "NPHI",
            GsaKind::Density => "RHOB",
        }
    }

    pub fn default_target_range(self) -> ValueRange {
        match self {
            GsaKind::Resistivity => ValueRange::new(0.1, 1000.0),
            GsaKind::Neutron => ValueRange::new(0.05, 0.6),
            GsaKind::Density => ValueRange::new(1.5, 3.0),
        }
    }

    /// Direction in which the raw curve departs from the baseline under gas.
    pub fn anomaly(self) -> AnomalyDirection {
        match self {
            GsaKind::Resistivity => AnomalyDirection::Above,
            GsaKind::Neutron | GsaKind::Density => AnomalyDirection::Below,
        }
    }
}

impl std::fmt::Display for GsaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.output_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyDirection {
    /// raw > baseline
    Above,
    /// raw < baseline
    Below,
}

/// Which depth tags a window's coefficient record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordDepth {
    /// Arithmetic mean of all depths in the window.
    WindowMean,
    /// Depth of the window's first row.
    WindowStart,
}

/// The four cubic coefficients `b0 + b1 x + b2 x^2 + b3 x^3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub b3: f64,
}

impl CubicCoefficients {
    pub fn from_slice(beta: &[f64]) -> Option<Self> {
        match beta {
            [b0, b1, b2, b3] => Some(Self {
                b0: *b0,
                b1: *b1,
                b2: *b2,
                b3: *b3,
            }),
            _ => None,
        }
    }

    /// `self + w * (other - self)`, coefficient-wise.
    pub fn lerp(&self, other: &Self, w: f64) -> Self {
        Self {
            b0: self.b0 + w * (other.b0 - self.b0),
            b1: self.b1 + w * (other.b1 - self.b1),
            b2: self.b2 + w * (other.b2 - self.b2),
            b3: self.b3 + w * (other.b3 - self.b3),
        }
    }
}

/// One accepted window fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRecord {
    pub depth: f64,
    pub coefficients: CubicCoefficients,
    /// Rows that survived value-range rejection and entered the regression.
    pub n_points: usize,
    pub r_squared: f64,
}

/// How an orchestrator run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    Completed { records: Vec<CoefficientRecord> },
    /// Input returned unchanged; the reason is a recoverable `GsaError`.
    PassThrough(GsaError),
}

/// Output of a single orchestrator call.
#[derive(Debug, Clone, PartialEq)]
pub struct GsaRun {
    pub kind: GsaKind,
    pub table: WellTable,
    pub status: RunStatus,
}

impl GsaRun {
    pub fn is_completed(&self) -> bool {
        matches!(self.status, RunStatus::Completed { .. })
    }

    pub fn records(&self) -> &[CoefficientRecord] {
        match &self.status {
            RunStatus::Completed { records } => records,
            RunStatus::PassThrough(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_range_is_exclusive() {
        let r = ValueRange::new(5.0, 180.0);
        assert!(!r.contains(5.0));
        assert!(r.contains(5.000001));
        assert!(!r.contains(180.0));
        assert!(!r.contains(f64::NAN));
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = CubicCoefficients {
            b0: 1.0,
            b1: 2.0,
            b2: 3.0,
            b3: 4.0,
        };
        let b = CubicCoefficients {
            b0: 5.0,
            b1: -2.0,
            b2: 0.5,
            b3: 9.0,
        };
        assert_eq!(a.lerp(&b, 0.0), a);
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.b0, 3.0);
        assert_eq!(mid.b1, 0.0);
    }

    #[test]
    fn kinds_name_their_outputs() {
        assert_eq!(GsaKind::Resistivity.output_name(), "RGSA");
        assert_eq!(GsaKind::Density.flag_name(), "GAS_EFFECT_RHOB");
        assert_eq!(GsaKind::Neutron.anomaly(), AnomalyDirection::Below);
    }
}
