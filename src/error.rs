//! Error taxonomy for the GSA engine.
//!
//! Only [`GsaError::MissingColumns`], [`GsaError::InvalidConfig`],
//! [`GsaError::ColumnLength`], [`GsaError::InvalidTable`] and
//! [`GsaError::Params`] are ever returned as `Err` from a public entry point.
//! The data-dependent conditions
//! (`InsufficientData`, `NoCoefficients`, `EmptyFilterResult`, `NoDriverCap`)
//! are reported inside a pass-through run status, and `WindowFit` never leaves
//! the fitter.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GsaError {
    #[error("{kind}: required columns missing: {}", missing.join(", "))]
    MissingColumns { kind: String, missing: Vec<String> },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Column '{column}' has {actual} rows, table has {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid well table: {0}")]
    InvalidTable(String),

    #[error("Invalid parameter mapping: {0}")]
    Params(String),

    #[error("Not enough valid rows for regression: have {rows}, need {required}")]
    InsufficientData { rows: usize, required: usize },

    #[error("No regression coefficients could be computed")]
    NoCoefficients,

    #[error("No rows match the selected intervals/zones")]
    EmptyFilterResult,

    #[error("No driver cap could be computed")]
    NoDriverCap,

    #[error("Regression failed for window starting at row {start}: {reason}")]
    WindowFit { start: usize, reason: String },
}

impl GsaError {
    /// Whether this condition degrades to a pass-through rather than a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GsaError::InsufficientData { .. }
                | GsaError::NoCoefficients
                | GsaError::EmptyFilterResult
                | GsaError::NoDriverCap
                | GsaError::WindowFit { .. }
        )
    }
}

impl From<serde_json::Error> for GsaError {
    fn from(value: serde_json::Error) -> Self {
        GsaError::Params(value.to_string())
    }
}
