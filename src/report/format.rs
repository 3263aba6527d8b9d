//! Formatted terminal output for runs and coefficient tables.
//!
//! Formatting lives here so the fitting code only deals in records.

use crate::domain::CoefficientRecord;
use crate::report::RunSummary;

/// Regression results, one line per record.
///
/// Columns: `N Points Depth R^2 Const GR GR^2 GR^3`.
pub fn format_coefficient_table(records: &[CoefficientRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:>6} {:>10} {:>8} {:>12} {:>12} {:>12} {:>12}\n",
        "N", "Points", "Depth", "R^2", "Const", "GR", "GR^2", "GR^3"
    ));
    for (i, r) in records.iter().enumerate() {
        let c = &r.coefficients;
        out.push_str(&format!(
            "{:>4} {:>6} {:>10.2} {:>8.4} {} {} {} {}\n",
            i + 1,
            r.n_points,
            r.depth,
            r.r_squared,
            fmt_coef(c.b0),
            fmt_coef(c.b1),
            fmt_coef(c.b2),
            fmt_coef(c.b3),
        ));
    }
    out
}

/// One-line status for a single baseline run.
pub fn format_run_summary(summary: &RunSummary) -> String {
    match &summary.reason {
        None => format!(
            "{:<5} completed: {} windows, {}/{} rows evaluated, {} flagged",
            summary.kind, summary.records, summary.evaluated, summary.rows, summary.flagged
        ),
        Some(reason) => format!("{:<5} passed through: {reason}", summary.kind),
    }
}

fn fmt_coef(v: f64) -> String {
    format!("{v:>12.6}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CubicCoefficients, GsaKind};

    #[test]
    fn coefficient_table_has_header_and_one_line_per_record() {
        let records = vec![
            CoefficientRecord {
                depth: 1000.0,
                coefficients: CubicCoefficients {
                    b0: 1.0,
                    b1: -0.5,
                    b2: 0.0,
                    b3: 0.0,
                },
                n_points: 95,
                r_squared: 0.99,
            },
            CoefficientRecord {
                depth: 1010.0,
                coefficients: CubicCoefficients {
                    b0: 1.1,
                    b1: -0.4,
                    b2: 0.0,
                    b3: 0.0,
                },
                n_points: 100,
                r_squared: 0.98,
            },
        ];
        let text = format_coefficient_table(&records);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Points"));
        assert!(lines[0].contains("GR^3"));
        assert!(lines[1].contains("1000.00"));
        assert!(lines[2].contains("-0.400000"));
    }

    #[test]
    fn summary_mentions_pass_through_reason() {
        let s = RunSummary {
            kind: GsaKind::Neutron,
            completed: false,
            reason: Some("filter selected no rows".into()),
            records: 0,
            rows: 10,
            evaluated: 0,
            flagged: 0,
        };
        let line = format_run_summary(&s);
        assert!(line.starts_with("NGSA"));
        assert!(line.contains("filter selected no rows"));
    }
}
