//! Core data types shared by the summary pipeline
//!
//! A loaded file becomes a `RowSet`; everything downstream reads it through
//! column indexes resolved from a `ColumnMap`.

use serde::Serialize;

use crate::consts::{DEFAULT_AMOUNT_COLUMN, DEFAULT_CATEGORY_COLUMN, DEFAULT_DATE_COLUMN};

/// One decoded input record: cell text in header order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Row {
    cells: Vec<String>,
}

impl Row {
    pub(crate) fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell text at `index`, `None` when the record is shorter than the header
    pub(crate) fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub(crate) fn cells(&self) -> &[String] {
        &self.cells
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// The full loaded dataset: header row plus every record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RowSet {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl RowSet {
    pub(crate) fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    pub(crate) fn headers(&self) -> &[String] {
        &self.headers
    }

    pub(crate) fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name
    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub(crate) fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }
}

/// Names of the columns the pipeline reads
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ColumnMap {
    pub(crate) category: String,
    pub(crate) amount: String,
    pub(crate) timestamp: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY_COLUMN.to_string(),
            amount: DEFAULT_AMOUNT_COLUMN.to_string(),
            timestamp: DEFAULT_DATE_COLUMN.to_string(),
        }
    }
}

/// Per-category totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct AggregateRow {
    pub(crate) category: String,
    pub(crate) count: u64,
    /// Rounded to 2 decimals after summation
    pub(crate) total_amount: f64,
}

impl AggregateRow {
    /// Percentage of `grand_total` this category accounts for, rounded to 2 decimals
    pub(crate) fn share_of(&self, grand_total: f64) -> f64 {
        if grand_total == 0.0 {
            return 0.0;
        }
        round_cents(self.total_amount / grand_total * 100.0)
    }
}

/// Aggregate table of a result bundle.
///
/// `Empty` means a file was loaded but nothing survived filtering; it is not
/// the same thing as having no file at all.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AggregateTable {
    Empty,
    Categories(Vec<AggregateRow>),
}

impl AggregateTable {
    pub(crate) fn from_rows(rows: Vec<AggregateRow>) -> Self {
        if rows.is_empty() {
            AggregateTable::Empty
        } else {
            AggregateTable::Categories(rows)
        }
    }

    pub(crate) fn rows(&self) -> &[AggregateRow] {
        match self {
            AggregateTable::Empty => &[],
            AggregateTable::Categories(rows) => rows,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, AggregateTable::Empty)
    }
}

/// Round to 2 decimal places, ties to even
pub(crate) fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round_ties_even() / 100.0;
    // Collapse -0.0 so it sorts and prints like zero
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn sample() -> RowSet {
        RowSet::new(
            vec!["Transaction Category".into(), "Amount Paid".into()],
            vec![
                Row::from_iter(["Food", "10"]),
                Row::from_iter(["Rent"]),
            ],
        )
    }

    #[test]
    fn column_index_is_exact_match() {
        let rows = sample();
        assert_eq!(rows.column_index("Amount Paid"), Some(1));
        assert_eq!(rows.column_index("amount paid"), None);
        assert!(!rows.has_column("Created On"));
    }

    #[test]
    fn short_record_has_no_trailing_cell() {
        let rows = sample();
        assert_eq!(rows.rows()[1].cell(0), Some("Rent"));
        assert_eq!(rows.rows()[1].cell(1), None);
    }

    #[test]
    fn column_map_defaults() {
        let cols = ColumnMap::default();
        assert_eq!(cols.category, "Transaction Category");
        assert_eq!(cols.amount, "Amount Paid");
        assert_eq!(cols.timestamp, "Created On");
    }

    #[test]
    fn round_cents_ties_to_even() {
        assert_eq!(round_cents(10.0), 10.0);
        assert_eq!(round_cents(1.234), 1.23);
        assert_eq!(round_cents(1.236), 1.24);
        assert_eq!(round_cents(0.125), 0.12);
    }

    #[test]
    fn round_cents_normalizes_negative_zero() {
        let r = round_cents(-0.001);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn share_of_zero_total_is_zero() {
        let row = AggregateRow {
            category: "A".into(),
            count: 1,
            total_amount: 5.0,
        };
        assert_eq!(row.share_of(0.0), 0.0);
        assert_eq!(row.share_of(20.0), 25.0);
    }

    #[test]
    fn aggregate_table_empty_marker() {
        assert!(AggregateTable::from_rows(Vec::new()).is_empty());
        assert!(AggregateTable::Empty.rows().is_empty());
        let table = AggregateTable::from_rows(vec![AggregateRow {
            category: "A".into(),
            count: 1,
            total_amount: 1.0,
        }]);
        assert!(!table.is_empty());
        assert_eq!(table.rows().len(), 1);
    }
}
