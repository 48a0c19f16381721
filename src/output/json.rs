use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::core::{
    DateWindow, FilterReport, Period, ResultBundle, Row, RowSet, UnboundedReason, resolve_period,
};
use crate::error::AppError;
use crate::output::summary::visible_rows;

#[derive(Serialize)]
struct WindowJson {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    days: Option<i64>,
    /// Set for unbounded windows: `all_time` or `unknown_period`
    unbounded: Option<&'static str>,
}

impl From<&DateWindow> for WindowJson {
    fn from(window: &DateWindow) -> Self {
        let bounds = window.bounds();
        WindowJson {
            start: bounds.map(|(start, _)| start),
            end: bounds.map(|(_, end)| end),
            days: window.days(),
            unbounded: match window {
                DateWindow::Bounded { .. } => None,
                DateWindow::Unbounded(UnboundedReason::AllTime) => Some("all_time"),
                DateWindow::Unbounded(UnboundedReason::UnknownPeriod(_)) => Some("unknown_period"),
            },
        }
    }
}

#[derive(Serialize)]
struct CategoryJson<'a> {
    category: &'a str,
    count: u64,
    total_amount: f64,
    share: f64,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    period: &'a str,
    window: WindowJson,
    categories: Vec<CategoryJson<'a>>,
    category_count: usize,
    grand_total: f64,
    grand_count: u64,
    total_rows: usize,
    filter: FilterReport,
    skipped_rows: usize,
    invalid_amounts: usize,
}

/// One object per requested period, in request order
pub(crate) fn output_summary_json(
    bundles: &[&ResultBundle],
    top: Option<usize>,
) -> Result<String, AppError> {
    let output: Vec<SummaryJson<'_>> = bundles
        .iter()
        .map(|bundle| SummaryJson {
            period: bundle.token.label(),
            window: WindowJson::from(&bundle.window),
            categories: visible_rows(bundle.table.rows(), top)
                .iter()
                .map(|row| CategoryJson {
                    category: &row.category,
                    count: row.count,
                    total_amount: row.total_amount,
                    share: row.share_of(bundle.grand_total),
                })
                .collect(),
            category_count: bundle.table.rows().len(),
            grand_total: bundle.grand_total,
            grand_count: bundle.grand_count,
            total_rows: bundle.original_rows.len(),
            filter: bundle.filter,
            skipped_rows: bundle.skipped_rows,
            invalid_amounts: bundle.invalid_amounts,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&output)?)
}

#[derive(Serialize)]
struct PeriodJson {
    period: &'static str,
    slug: &'static str,
    #[serde(flatten)]
    window: WindowJson,
}

pub(crate) fn output_periods_json(reference: NaiveDateTime) -> Result<String, AppError> {
    let output: Vec<PeriodJson> = Period::ALL
        .iter()
        .map(|&period| PeriodJson {
            period: period.label(),
            slug: period.slug(),
            window: WindowJson::from(&resolve_period(&period.into(), reference)),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&output)?)
}

/// A row as an object keyed by header. Keys keep file order and repeated
/// headers are written once per column.
struct RawRecord<'a> {
    headers: &'a [String],
    row: &'a Row,
}

impl Serialize for RawRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (i, header) in self.headers.iter().enumerate() {
            map.serialize_entry(header, self.row.cell(i).unwrap_or(""))?;
        }
        map.end()
    }
}

pub(crate) fn output_raw_json(rows: &RowSet, limit: usize) -> Result<String, AppError> {
    let output: Vec<RawRecord<'_>> = rows
        .rows()
        .iter()
        .take(limit)
        .map(|row| RawRecord {
            headers: rows.headers(),
            row,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&output)?)
}
