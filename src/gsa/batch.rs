//! Multi-well processing.
//!
//! Wells are independent: each job gets its own clone of the input table and
//! resolves its own configuration from the shared, read-only parameter map.
//! Jobs run on the rayon pool; results come back in input order.

use rayon::prelude::*;
use tracing::{info, info_span, warn};

use crate::domain::{FilterSpec, GsaKind, GsaParams, WellTable};
use crate::error::GsaError;
use crate::gsa::combined::{CombinedRun, run_all};
use crate::gsa::sliding::run_gsa;

/// One well to process.
#[derive(Debug, Clone, PartialEq)]
pub struct WellInput {
    pub name: String,
    pub table: WellTable,
    pub filter: FilterSpec,
}

/// Work to run per well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GsaJob {
    Single(GsaKind),
    /// RGSA, NGSA and DGSA plus the prospect score.
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WellResult {
    pub name: String,
    pub outcome: Result<CombinedRun, GsaError>,
}

/// Run `job` on one table.
pub fn run_job(
    table: &WellTable,
    params: &GsaParams,
    filter: &FilterSpec,
    job: GsaJob,
) -> Result<CombinedRun, GsaError> {
    match job {
        GsaJob::All => run_all(table, params, filter),
        GsaJob::Single(kind) => {
            let run = run_gsa(table, kind, params, filter)?;
            Ok(CombinedRun {
                table: run.table,
                statuses: vec![(kind, run.status)],
            })
        }
    }
}

/// Run `job` on every well in parallel.
pub fn process_wells(wells: &[WellInput], params: &GsaParams, job: GsaJob) -> Vec<WellResult> {
    info!(wells = wells.len(), ?job, "Processing wells");

    wells
        .par_iter()
        .map(|well| {
            let _span = info_span!("well", name = %well.name).entered();
            let outcome = run_job(&well.table, params, &well.filter, job);
            if let Err(e) = &outcome {
                warn!(error = %e, "Well failed");
            }
            WellResult {
                name: well.name.clone(),
                outcome,
            }
        })
        .collect()
}
