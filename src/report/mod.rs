//! Reporting utilities: run summaries and formatted coefficient tables.

pub mod format;

pub use format::*;

use crate::domain::{GsaKind, GsaRun, RunStatus};

/// Row counts describing one finished baseline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub kind: GsaKind,
    pub completed: bool,
    /// Pass-through reason, if any.
    pub reason: Option<String>,
    pub records: usize,
    pub rows: usize,
    /// Rows with a baseline value.
    pub evaluated: usize,
    /// Rows whose gas-effect flag is set.
    pub flagged: usize,
}

pub fn summarize(run: &GsaRun) -> RunSummary {
    let (completed, reason) = match &run.status {
        RunStatus::Completed { .. } => (true, None),
        RunStatus::PassThrough(e) => (false, Some(e.to_string())),
    };
    let evaluated = if completed {
        run.table
            .numeric(run.kind.output_name())
            .map(|v| v.iter().filter(|x| x.is_some()).count())
            .unwrap_or(0)
    } else {
        0
    };
    let flagged = if completed {
        run.table
            .flag(run.kind.flag_name())
            .map(|f| f.iter().filter(|&&x| x).count())
            .unwrap_or(0)
    } else {
        0
    };

    RunSummary {
        kind: run.kind,
        completed,
        reason,
        records: run.records().len(),
        rows: run.table.len(),
        evaluated,
        flagged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WellTable;
    use crate::error::GsaError;

    #[test]
    fn pass_through_summary_counts_nothing() {
        let table = WellTable::from_depths(&[1.0, 2.0])
            .with_numeric("RHOB", vec![Some(2.3), Some(2.4)])
            .unwrap();
        let run = GsaRun {
            kind: GsaKind::Density,
            table,
            status: RunStatus::PassThrough(GsaError::EmptyFilterResult),
        };
        let s = summarize(&run);
        assert!(!s.completed);
        assert_eq!(s.rows, 2);
        assert_eq!(s.evaluated, 0);
        assert_eq!(s.records, 0);
        assert!(s.reason.is_some());
    }
}
