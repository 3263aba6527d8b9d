//! Parameter mapping and validated run configuration.
//!
//! Hosts hand us a loose key/value mapping (`GR`, `RES`, `SLIDING_WINDOW`, ...).
//! `GsaParams` captures it as-is; `GsaParams::config_for` resolves defaults and
//! validates everything up front so the fitting loops never see a zero step or
//! an inverted range.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::types::{GsaKind, RecordDepth, ValueRange};
use crate::error::GsaError;
use crate::models::Transform;

pub const DEFAULT_DRIVER: &str = "GR";
pub const DEFAULT_LITHOLOGY: &str = "LITHOLOGY";
pub const DEFAULT_WINDOW: usize = 100;
pub const DEFAULT_STEP: usize = 20;
pub const DEFAULT_MIN_POINTS: usize = 30;
/// Below this many valid (driver, target) pairs a well is not fitted at all.
pub const MIN_VALID_ROWS: usize = 100;
pub const DRIVER_RANGE: ValueRange = ValueRange::new(5.0, 180.0);
pub const DRIVER_CAP_QUANTILE: f64 = 0.98;
pub const DEFAULT_EXCLUDED_LITHOLOGIES: [&str; 4] = ["COAL", "CA", "CAOO", "ORG"];

/// RGSA has two implementations; this selects which one `run_gsa` uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RgsaMode {
    #[default]
    Sliding,
    ThreePass,
}

/// Raw parameter mapping. Every key is optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GsaParams {
    #[serde(rename = "GR", default)]
    pub gr: Option<String>,
    #[serde(rename = "RES", default)]
    pub res: Option<String>,
    #[serde(rename = "NEUT", default)]
    pub neut: Option<String>,
    #[serde(rename = "DENS", default)]
    pub dens: Option<String>,
    #[serde(rename = "LITH", default)]
    pub lith: Option<String>,
    #[serde(rename = "SLIDING_WINDOW", default, deserialize_with = "lenient_usize")]
    pub sliding_window: Option<usize>,
    #[serde(rename = "STEP", default, deserialize_with = "lenient_usize")]
    pub step: Option<usize>,
    #[serde(rename = "MIN_POINTS_IN_WINDOW", default, deserialize_with = "lenient_usize")]
    pub min_points_in_window: Option<usize>,
    #[serde(rename = "RES_MIN", default)]
    pub res_min: Option<f64>,
    #[serde(rename = "RES_MAX", default)]
    pub res_max: Option<f64>,
    #[serde(rename = "RGSA_MODE", default)]
    pub rgsa_mode: Option<RgsaMode>,
    #[serde(rename = "EXCLUDED_LITHOLOGIES", default)]
    pub excluded_lithologies: Option<Vec<String>>,
}

/// Window sizes arrive as numbers or numeric strings depending on the host.
/// Floats must be whole (`100.0` is accepted, `100.7` is an error).
fn lenient_usize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(usize),
        Float(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(v)) => Ok(Some(v)),
        Some(Raw::Float(v)) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => {
            Ok(Some(v as usize))
        }
        Some(Raw::Float(v)) => Err(serde::de::Error::custom(format!("invalid count {v}"))),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid count '{s}': {e}"))),
    }
}

impl GsaParams {
    pub fn from_json_str(s: &str) -> Result<Self, GsaError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, GsaError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn rgsa_mode(&self) -> RgsaMode {
        self.rgsa_mode.unwrap_or_default()
    }

    pub fn driver_column(&self) -> String {
        self.gr.clone().unwrap_or_else(|| DEFAULT_DRIVER.to_string())
    }

    pub fn target_column(&self, kind: GsaKind) -> String {
        let alias = match kind {
            GsaKind::Resistivity => &self.res,
            GsaKind::Neutron => &self.neut,
            GsaKind::Density => &self.dens,
        };
        alias
            .clone()
            .unwrap_or_else(|| kind.default_target().to_string())
    }

    fn target_range(&self, kind: GsaKind) -> ValueRange {
        let default = kind.default_target_range();
        match kind {
            GsaKind::Resistivity => ValueRange::new(
                self.res_min.unwrap_or(default.lo),
                self.res_max.unwrap_or(default.hi),
            ),
            _ => default,
        }
    }

    /// Resolved single-pass configuration for one baseline kind.
    pub fn config_for(&self, kind: GsaKind) -> Result<GsaConfig, GsaError> {
        let config = GsaConfig {
            kind,
            driver_col: self.driver_column(),
            target_col: self.target_column(kind),
            window_size: self.sliding_window.unwrap_or(DEFAULT_WINDOW),
            step: self.step.unwrap_or(DEFAULT_STEP),
            min_points: self.min_points_in_window.unwrap_or(DEFAULT_MIN_POINTS),
            min_valid_rows: MIN_VALID_ROWS,
            driver_range: DRIVER_RANGE,
            target_range: self.target_range(kind),
            transform: Transform::for_kind(kind),
            record_depth: RecordDepth::WindowMean,
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolved configuration for the 3-pass RGSA variant.
    pub fn three_pass_config(&self) -> Result<ThreePassConfig, GsaError> {
        let window = self.sliding_window.unwrap_or(DEFAULT_WINDOW);
        let config = ThreePassConfig {
            driver_col: self.driver_column(),
            target_col: self.target_column(GsaKind::Resistivity),
            lithology_col: self
                .lith
                .clone()
                .unwrap_or_else(|| DEFAULT_LITHOLOGY.to_string()),
            chunk_size: window.saturating_mul(2),
            min_points: self.min_points_in_window.unwrap_or(DEFAULT_MIN_POINTS),
            driver_range: DRIVER_RANGE,
            target_range: self.target_range(GsaKind::Resistivity),
            cap_quantile: DRIVER_CAP_QUANTILE,
            excluded_lithologies: self
                .excluded_lithologies
                .clone()
                .unwrap_or_else(|| {
                    DEFAULT_EXCLUDED_LITHOLOGIES
                        .iter()
                        .map(|s| s.to_string())
                        .collect()
                })
                .into_iter()
                .map(|s| s.to_uppercase())
                .collect(),
            record_depth: RecordDepth::WindowStart,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Immutable, validated settings for one sliding-window baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GsaConfig {
    pub kind: GsaKind,
    pub driver_col: String,
    pub target_col: String,
    pub window_size: usize,
    pub step: usize,
    pub min_points: usize,
    pub min_valid_rows: usize,
    pub driver_range: ValueRange,
    pub target_range: ValueRange,
    pub transform: Transform,
    pub record_depth: RecordDepth,
}

impl GsaConfig {
    pub fn validate(&self) -> Result<(), GsaError> {
        if self.window_size == 0 {
            return Err(GsaError::InvalidConfig("window size must be >= 1".into()));
        }
        if self.step == 0 {
            return Err(GsaError::InvalidConfig("window step must be >= 1".into()));
        }
        if self.min_points == 0 {
            return Err(GsaError::InvalidConfig(
                "minimum points per window must be >= 1".into(),
            ));
        }
        if self.driver_col.is_empty() || self.target_col.is_empty() {
            return Err(GsaError::InvalidConfig("column names must be non-empty".into()));
        }
        self.driver_range.validate("driver")?;
        self.target_range.validate("target")?;
        if self.transform == Transform::Log10 && self.target_range.lo < 0.0 {
            return Err(GsaError::InvalidConfig(
                "log10 baselines need a non-negative target range".into(),
            ));
        }
        Ok(())
    }

    pub fn required_columns(&self) -> [&str; 3] {
        [crate::domain::table::DEPTH, &self.driver_col, &self.target_col]
    }
}

/// Immutable, validated settings for the 3-pass RGSA variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreePassConfig {
    pub driver_col: String,
    pub target_col: String,
    pub lithology_col: String,
    /// Rows per cap chunk (Pass 1) and per tumbling window (Pass 2).
    pub chunk_size: usize,
    pub min_points: usize,
    pub driver_range: ValueRange,
    pub target_range: ValueRange,
    pub cap_quantile: f64,
    /// Upper-cased lithology names left out of the regression.
    pub excluded_lithologies: Vec<String>,
    pub record_depth: RecordDepth,
}

impl ThreePassConfig {
    pub fn validate(&self) -> Result<(), GsaError> {
        if self.chunk_size == 0 {
            return Err(GsaError::InvalidConfig("chunk size must be >= 1".into()));
        }
        if self.min_points == 0 {
            return Err(GsaError::InvalidConfig(
                "minimum points per window must be >= 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.cap_quantile) {
            return Err(GsaError::InvalidConfig(format!(
                "cap quantile {} outside [0, 1]",
                self.cap_quantile
            )));
        }
        self.driver_range.validate("driver")?;
        self.target_range.validate("target")?;
        if self.target_range.lo < 0.0 {
            return Err(GsaError::InvalidConfig(
                "log10 baselines need a non-negative target range".into(),
            ));
        }
        Ok(())
    }

    pub fn required_columns(&self) -> [&str; 3] {
        [crate::domain::table::DEPTH, &self.driver_col, &self.target_col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain_constants() {
        let cfg = GsaParams::default().config_for(GsaKind::Neutron).unwrap();
        assert_eq!(cfg.driver_col, "GR");
        assert_eq!(cfg.target_col, "NPHI");
        assert_eq!(cfg.window_size, 100);
        assert_eq!(cfg.step, 20);
        assert_eq!(cfg.min_points, 30);
        assert_eq!(cfg.target_range, ValueRange::new(0.05, 0.6));
        assert_eq!(cfg.transform, Transform::Identity);
        assert_eq!(cfg.record_depth, RecordDepth::WindowMean);
    }

    #[test]
    fn parses_host_mapping_with_string_window() {
        let params = GsaParams::from_json_str(
            r#"{"GR": "GR_NORM", "RES": "ILD", "SLIDING_WINDOW": "120", "PLOT_TITLE": "ignored"}"#,
        )
        .unwrap();
        let cfg = params.config_for(GsaKind::Resistivity).unwrap();
        assert_eq!(cfg.driver_col, "GR_NORM");
        assert_eq!(cfg.target_col, "ILD");
        assert_eq!(cfg.window_size, 120);
        assert_eq!(cfg.transform, Transform::Log10);
    }

    #[test]
    fn zero_step_is_rejected_before_fitting() {
        let params = GsaParams {
            step: Some(0),
            ..GsaParams::default()
        };
        let err = params.config_for(GsaKind::Density).unwrap_err();
        assert!(matches!(err, GsaError::InvalidConfig(_)));
    }

    #[test]
    fn three_pass_uses_double_window_chunks() {
        let json = r#"{
            "SLIDING_WINDOW": 50,
            "RGSA_MODE": "three_pass",
            "EXCLUDED_LITHOLOGIES": ["coal"]
        }"#;
        let params = GsaParams::from_json_str(json).unwrap();
        assert_eq!(params.rgsa_mode(), RgsaMode::ThreePass);
        let cfg = params.three_pass_config().unwrap();
        assert_eq!(cfg.chunk_size, 100);
        assert_eq!(cfg.excluded_lithologies, vec!["COAL".to_string()]);
        assert_eq!(cfg.record_depth, RecordDepth::WindowStart);
    }

    #[test]
    fn inverted_resistivity_range_is_rejected() {
        let params = GsaParams {
            res_min: Some(10.0),
            res_max: Some(1.0),
            ..GsaParams::default()
        };
        assert!(params.config_for(GsaKind::Resistivity).is_err());
    }

    #[test]
    fn bad_window_text_is_a_params_error() {
        let err = GsaParams::from_json_str(r#"{"SLIDING_WINDOW": "wide"}"#).unwrap_err();
        assert!(matches!(err, GsaError::Params(_)));
    }

    #[test]
    fn fractional_window_is_rejected() {
        let err = GsaParams::from_json_str(r#"{"SLIDING_WINDOW": 100.7}"#).unwrap_err();
        assert!(matches!(err, GsaError::Params(_)));

        let params = GsaParams::from_json_str(r#"{"SLIDING_WINDOW": 100.0}"#).unwrap();
        let cfg = params.config_for(GsaKind::Neutron).unwrap();
        assert_eq!(cfg.window_size, 100);
    }
}
