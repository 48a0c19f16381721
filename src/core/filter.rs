//! Date-window filtering over a loaded row-set

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::period::DateWindow;
use crate::core::types::{Row, RowSet};
use crate::utils::parse_day;

/// Which policy produced a filtered row list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum FilterMode {
    /// Rows were tested against a bounded window
    Windowed,
    /// No window applied
    Unbounded,
    /// The timestamp column is absent, so every row passes
    MissingColumn,
}

/// Row counts for one filtering pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct FilterReport {
    pub(crate) mode: FilterMode,
    pub(crate) input: usize,
    pub(crate) kept: usize,
    /// Blank or unrecognized timestamps
    pub(crate) unparsable: usize,
    pub(crate) outside_window: usize,
    /// First and last parseable day in the whole input, whatever the window
    pub(crate) earliest: Option<NaiveDate>,
    pub(crate) latest: Option<NaiveDate>,
}

impl FilterReport {
    fn new(mode: FilterMode, input: usize) -> Self {
        Self {
            mode,
            input,
            kept: 0,
            unparsable: 0,
            outside_window: 0,
            earliest: None,
            latest: None,
        }
    }

    fn observe(&mut self, day: NaiveDate) {
        self.earliest = Some(self.earliest.map_or(day, |d| d.min(day)));
        self.latest = Some(self.latest.map_or(day, |d| d.max(day)));
    }
}

/// Rows that passed, borrowed from the source set
#[derive(Debug)]
pub(crate) struct FilterOutcome<'a> {
    pub(crate) rows: Vec<&'a Row>,
    pub(crate) report: FilterReport,
}

/// Keep rows whose timestamp falls inside `window`.
///
/// Unbounded windows and a missing column pass every row through untouched.
/// Otherwise rows with an absent or unparsable timestamp are dropped.
pub(crate) fn filter_rows<'a>(
    rows: &'a RowSet,
    timestamp_column: &str,
    window: &DateWindow,
) -> FilterOutcome<'a> {
    let Some(index) = rows.column_index(timestamp_column) else {
        return passthrough(rows, None);
    };
    if window.is_unbounded() {
        return passthrough(rows, Some(index));
    }
    scan(rows.rows(), index, window)
}

/// Like `filter_rows`, but rows with unparsable timestamps are dropped even
/// when the window is unbounded. The pipeline uses this once the timestamp
/// column is known to exist.
pub(crate) fn retain_dated<'a>(
    rows: &'a RowSet,
    timestamp_column: &str,
    window: &DateWindow,
) -> FilterOutcome<'a> {
    match rows.column_index(timestamp_column) {
        Some(index) if window.is_unbounded() => scan(rows.rows(), index, window),
        _ => filter_rows(rows, timestamp_column, window),
    }
}

/// Every row passes. With a timestamp column the date range is still
/// collected; without one the mode is `MissingColumn`.
fn passthrough(rows: &RowSet, index: Option<usize>) -> FilterOutcome<'_> {
    let mode = match index {
        Some(_) => FilterMode::Unbounded,
        None => FilterMode::MissingColumn,
    };
    let mut report = FilterReport::new(mode, rows.len());
    if let Some(index) = index {
        for day in rows.rows().iter().filter_map(|row| row.cell(index).and_then(parse_day)) {
            report.observe(day);
        }
    }
    report.kept = rows.len();
    FilterOutcome {
        rows: rows.rows().iter().collect(),
        report,
    }
}

fn scan<'a>(rows: &'a [Row], index: usize, window: &DateWindow) -> FilterOutcome<'a> {
    let mode = if window.is_unbounded() {
        FilterMode::Unbounded
    } else {
        FilterMode::Windowed
    };
    let mut report = FilterReport::new(mode, rows.len());

    let mut kept = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(day) = row.cell(index).and_then(parse_day) else {
            report.unparsable += 1;
            continue;
        };
        report.observe(day);
        if window.contains(day) {
            kept.push(row);
        } else {
            report.outside_window += 1;
        }
    }
    report.kept = kept.len();

    tracing::debug!(
        input = report.input,
        kept = report.kept,
        unparsable = report.unparsable,
        outside_window = report.outside_window,
        earliest = ?report.earliest,
        latest = ?report.latest,
        "filtered rows"
    );

    FilterOutcome { rows: kept, report }
}
