//! Interval/zone row selection.
//!
//! Selection rules:
//! 1. Non-empty `target_intervals` and a `MARKER` column: rows whose marker is listed.
//! 2. Non-empty `target_zones` and a `ZONE` column: rows whose zone is listed,
//!    OR-ed with rule 1 when it applied.
//! 3. Neither rule usable: every row.
//!
//! The two criteria combine by union, not intersection. An empty selection is
//! not an error here; orchestrators turn it into a pass-through.

use crate::domain::{FilterSpec, MARKER, WellTable, ZONE};

/// Boolean row mask for `filter` over `table`.
pub fn select(table: &WellTable, filter: &FilterSpec) -> Vec<bool> {
    let mut mask: Option<Vec<bool>> = None;

    if !filter.target_intervals.is_empty() {
        if let Some(markers) = table.text(MARKER) {
            mask = Some(
                markers
                    .iter()
                    .map(|m| m.as_ref().is_some_and(|m| filter.target_intervals.contains(m)))
                    .collect(),
            );
        }
    }

    if !filter.target_zones.is_empty() {
        if let Some(zones) = table.text(ZONE) {
            let zone_mask = zones
                .iter()
                .map(|z| z.as_ref().is_some_and(|z| filter.target_zones.contains(z)));
            mask = Some(match mask {
                Some(m) => m.into_iter().zip(zone_mask).map(|(a, b)| a || b).collect(),
                None => zone_mask.collect(),
            });
        }
    }

    mask.unwrap_or_else(|| vec![true; table.len()])
}

/// Indices of the rows set in `mask`.
pub fn selected_rows(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &keep)| keep.then_some(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled() -> WellTable {
        let s = |v: &str| Some(v.to_string());
        WellTable::from_depths(&[1.0, 2.0, 3.0, 4.0, 5.0])
            .with_text(MARKER, vec![s("A"), s("A"), s("B"), None, s("C")])
            .unwrap()
            .with_text(ZONE, vec![s("Z1"), s("Z2"), s("Z2"), s("Z2"), None])
            .unwrap()
    }

    #[test]
    fn no_filters_select_everything() {
        let t = labelled();
        assert_eq!(select(&t, &FilterSpec::all()), vec![true; 5]);
    }

    #[test]
    fn intervals_only() {
        let t = labelled();
        let mask = select(&t, &FilterSpec::intervals(["A"]));
        assert_eq!(mask, vec![true, true, false, false, false]);
    }

    #[test]
    fn zones_only() {
        let t = labelled();
        let mask = select(&t, &FilterSpec::zones(["Z1"]));
        assert_eq!(mask, vec![true, false, false, false, false]);
    }

    #[test]
    fn intervals_and_zones_take_the_union() {
        let t = labelled();
        let mask = select(&t, &FilterSpec::intervals(["C"]).with_zones(["Z1"]));
        // C matches row 4, Z1 matches row 0; intersection would be empty.
        assert_eq!(mask, vec![true, false, false, false, true]);
    }

    #[test]
    fn filters_on_absent_columns_fall_back_to_all_rows() {
        let t = WellTable::from_depths(&[1.0, 2.0]);
        let mask = select(&t, &FilterSpec::intervals(["A"]).with_zones(["Z1"]));
        assert_eq!(mask, vec![true, true]);
    }

    #[test]
    fn unmatched_filter_selects_nothing() {
        let t = labelled();
        let mask = select(&t, &FilterSpec::intervals(["NOPE"]));
        assert!(selected_rows(&mask).is_empty());
    }
}
