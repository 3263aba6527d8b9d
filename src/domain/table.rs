//! Depth-indexed well table.
//!
//! A `WellTable` is an ordered list of named columns of equal length. Every
//! table carries a numeric `DEPTH` column. Values may be absent (`None`);
//! absent values are never encoded as NaN.
//!
//! Tables are treated as immutable inputs: every computation clones the table
//! it augments and returns the clone.
//!
//! Deserialized tables go through the same checks as the builders: every
//! column has `rows` entries, names are unique, and `DEPTH` is numeric.

use serde::{Deserialize, Serialize};

use crate::error::GsaError;

pub const DEPTH: &str = "DEPTH";
pub const MARKER: &str = "MARKER";
pub const ZONE: &str = "ZONE";

/// Column payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Flag(Vec<bool>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Flag(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWellTable")]
pub struct WellTable {
    rows: usize,
    columns: Vec<Column>,
}

/// Unchecked wire form of [`WellTable`].
#[derive(Deserialize)]
struct RawWellTable {
    rows: usize,
    columns: Vec<Column>,
}

impl TryFrom<RawWellTable> for WellTable {
    type Error = GsaError;

    fn try_from(raw: RawWellTable) -> Result<Self, Self::Error> {
        let mut names = std::collections::HashSet::new();
        for col in &raw.columns {
            if !names.insert(col.name.as_str()) {
                return Err(GsaError::InvalidTable(format!(
                    "duplicate column '{}'",
                    col.name
                )));
            }
            if col.data.len() != raw.rows {
                return Err(GsaError::ColumnLength {
                    column: col.name.clone(),
                    expected: raw.rows,
                    actual: col.data.len(),
                });
            }
        }
        match raw.columns.iter().find(|c| c.name == DEPTH) {
            Some(Column {
                data: ColumnData::Numeric(_),
                ..
            }) => Ok(Self {
                rows: raw.rows,
                columns: raw.columns,
            }),
            Some(_) => Err(GsaError::InvalidTable("DEPTH column must be numeric".into())),
            None => Err(GsaError::InvalidTable("DEPTH column missing".into())),
        }
    }
}

impl WellTable {
    /// Create a table from its depth column.
    pub fn new(depth: Vec<Option<f64>>) -> Self {
        let rows = depth.len();
        Self {
            rows,
            columns: vec![Column {
                name: DEPTH.to_string(),
                data: ColumnData::Numeric(depth),
            }],
        }
    }

    /// Convenience constructor for fully-populated depth samples.
    pub fn from_depths(depths: &[f64]) -> Self {
        Self::new(depths.iter().copied().map(Some).collect())
    }

    /// Builder-style numeric column insert.
    pub fn with_numeric(
        mut self,
        name: &str,
        values: Vec<Option<f64>>,
    ) -> Result<Self, GsaError> {
        self.set_column(name, ColumnData::Numeric(values))?;
        Ok(self)
    }

    /// Builder-style text column insert.
    pub fn with_text(mut self, name: &str, values: Vec<Option<String>>) -> Result<Self, GsaError> {
        self.set_column(name, ColumnData::Text(values))?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.data)
    }

    pub fn numeric(&self, name: &str) -> Option<&[Option<f64>]> {
        match self.column(name)? {
            ColumnData::Numeric(v) => Some(v),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&[Option<String>]> {
        match self.column(name)? {
            ColumnData::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<&[bool]> {
        match self.column(name)? {
            ColumnData::Flag(v) => Some(v),
            _ => None,
        }
    }

    /// The depth column. Always present and numeric by construction.
    pub fn depth(&self) -> &[Option<f64>] {
        self.numeric(DEPTH).unwrap_or(&[])
    }

    /// Names from `required` that are absent from this table.
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.has_column(name))
            .collect()
    }

    /// Insert a column, replacing an existing one of the same name in place.
    ///
    /// `DEPTH` may only be replaced by numeric data.
    pub fn set_column(&mut self, name: &str, data: ColumnData) -> Result<(), GsaError> {
        self.check_column(name, &data)?;
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(col) => col.data = data,
            None => self.columns.push(Column {
                name: name.to_string(),
                data,
            }),
        }
        Ok(())
    }

    /// Drop any column of this name and append the new one at the end.
    ///
    /// Re-running a computation that writes the same set of columns in the
    /// same order therefore reproduces the same column layout. `DEPTH` keeps
    /// its position and is updated in place.
    pub fn replace_column(&mut self, name: &str, data: ColumnData) -> Result<(), GsaError> {
        if name == DEPTH {
            return self.set_column(name, data);
        }
        self.check_column(name, &data)?;
        self.drop_column(name);
        self.columns.push(Column {
            name: name.to_string(),
            data,
        });
        Ok(())
    }

    fn check_column(&self, name: &str, data: &ColumnData) -> Result<(), GsaError> {
        if data.len() != self.rows {
            return Err(GsaError::ColumnLength {
                column: name.to_string(),
                expected: self.rows,
                actual: data.len(),
            });
        }
        if name == DEPTH && !matches!(data, ColumnData::Numeric(_)) {
            return Err(GsaError::InvalidTable("DEPTH column must be numeric".into()));
        }
        Ok(())
    }

    pub fn drop_column(&mut self, name: &str) -> Option<ColumnData> {
        if name == DEPTH {
            return None;
        }
        let idx = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(idx).data)
    }

    /// Row indices with present depth, sorted by ascending depth (stable).
    pub fn depth_order(&self, rows: impl IntoIterator<Item = usize>) -> Vec<usize> {
        let depth = self.depth();
        let mut out: Vec<usize> = rows.into_iter().filter(|&i| depth[i].is_some()).collect();
        out.sort_by(|&a, &b| {
            let da = depth[a].unwrap_or(f64::NAN);
            let db = depth[b].unwrap_or(f64::NAN);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> WellTable {
        WellTable::from_depths(&[3.0, 1.0, 2.0])
            .with_numeric("GR", vec![Some(10.0), None, Some(30.0)])
            .unwrap()
    }

    #[test]
    fn depth_column_always_present() {
        let t = WellTable::from_depths(&[]);
        assert!(t.has_column(DEPTH));
        assert!(t.is_empty());
    }

    #[test]
    fn set_column_rejects_length_mismatch() {
        let mut t = small();
        let err = t
            .set_column("RT", ColumnData::Numeric(vec![Some(1.0)]))
            .unwrap_err();
        assert!(matches!(err, GsaError::ColumnLength { actual: 1, expected: 3, .. }));
    }

    #[test]
    fn replace_column_keeps_column_count() {
        let mut t = small();
        t.replace_column("OUT", ColumnData::Flag(vec![true; 3])).unwrap();
        let n = t.column_count();
        t.replace_column("OUT", ColumnData::Flag(vec![false; 3])).unwrap();
        assert_eq!(t.column_count(), n);
        assert_eq!(t.flag("OUT").unwrap(), &[false, false, false]);
    }

    #[test]
    fn depth_cannot_be_dropped() {
        let mut t = small();
        assert!(t.drop_column(DEPTH).is_none());
        assert!(t.has_column(DEPTH));
    }

    #[test]
    fn depth_order_sorts_and_skips_missing() {
        let t = WellTable::new(vec![Some(3.0), None, Some(1.0), Some(2.0)]);
        assert_eq!(t.depth_order(0..4), vec![2, 3, 0]);
    }

    #[test]
    fn depth_must_stay_numeric() {
        let t = small().with_text(DEPTH, vec![Some("a".into()); 3]);
        assert!(matches!(t, Err(GsaError::InvalidTable(_))));

        let mut t = small();
        let err = t
            .replace_column(DEPTH, ColumnData::Flag(vec![true; 3]))
            .unwrap_err();
        assert!(matches!(err, GsaError::InvalidTable(_)));
        assert_eq!(t, small());
    }

    #[test]
    fn replacing_depth_updates_it_in_place() {
        let mut t = small();
        let names_before: Vec<String> = t.column_names().map(str::to_string).collect();
        t.replace_column(DEPTH, ColumnData::Numeric(vec![Some(7.0), Some(8.0), Some(9.0)]))
            .unwrap();
        let names_after: Vec<String> = t.column_names().map(str::to_string).collect();
        assert_eq!(names_before, names_after);
        assert_eq!(t.depth(), &[Some(7.0), Some(8.0), Some(9.0)]);
    }

    #[test]
    fn deserialization_round_trips_a_valid_table() {
        let t = small();
        let json = serde_json::to_string(&t).unwrap();
        let back: WellTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn deserialization_rejects_short_columns() {
        let json = r#"{"rows": 3, "columns": [
            {"name": "DEPTH", "data": {"type": "numeric", "values": [1.0, 2.0]}},
            {"name": "GR", "data": {"type": "numeric", "values": [50.0]}}
        ]}"#;
        let err = serde_json::from_str::<WellTable>(json).unwrap_err();
        assert!(err.to_string().contains("DEPTH"));
    }

    #[test]
    fn deserialization_requires_numeric_depth() {
        let missing = r#"{"rows": 1, "columns": [
            {"name": "GR", "data": {"type": "numeric", "values": [50.0]}}
        ]}"#;
        assert!(serde_json::from_str::<WellTable>(missing).is_err());

        let text = r#"{"rows": 1, "columns": [
            {"name": "DEPTH", "data": {"type": "text", "values": ["x"]}}
        ]}"#;
        let err = serde_json::from_str::<WellTable>(text).unwrap_err();
        assert!(err.to_string().contains("numeric"));

        let dup = r#"{"rows": 1, "columns": [
            {"name": "DEPTH", "data": {"type": "numeric", "values": [1.0]}},
            {"name": "DEPTH", "data": {"type": "numeric", "values": [2.0]}}
        ]}"#;
        assert!(serde_json::from_str::<WellTable>(dup).is_err());
    }

    #[test]
    fn missing_columns_reports_absent_names() {
        let t = small();
        assert_eq!(t.missing_columns(&["DEPTH", "GR", "RT"]), vec!["RT"]);
    }
}
