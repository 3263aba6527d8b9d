//! GSA orchestration.
//!
//! Each baseline runs as a fixed pipeline:
//!
//! ```text
//! FILTERING -> FITTING -> RECONSTRUCTING -> DONE
//!                  \-> ABORT (pass-through)
//! ```
//!
//! Missing required columns and invalid configuration fail the call before
//! filtering starts. Every data-dependent failure (empty filter, too few rows,
//! no usable window) ends in a pass-through: the input table comes back
//! unchanged alongside the reason, and a warning is logged.

pub mod batch;
pub mod combined;
pub mod sliding;
pub mod three_pass;

pub use batch::*;
pub use combined::*;
pub use sliding::*;
pub use three_pass::*;

use tracing::warn;

use crate::domain::{GsaKind, GsaRun, RunStatus, WellTable};
use crate::error::GsaError;

fn require_columns(table: &WellTable, kind: GsaKind, required: &[&str]) -> Result<(), GsaError> {
    let missing = table.missing_columns(required);
    if missing.is_empty() {
        return Ok(());
    }
    Err(GsaError::MissingColumns {
        kind: kind.to_string(),
        missing: missing.into_iter().map(str::to_string).collect(),
    })
}

fn pass_through(table: &WellTable, kind: GsaKind, reason: GsaError) -> GsaRun {
    warn!(kind = %kind, reason = %reason, "Baseline not computed, returning input unchanged");
    GsaRun {
        kind,
        table: table.clone(),
        status: RunStatus::PassThrough(reason),
    }
}
