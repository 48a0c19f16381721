//! Pipeline: resolve period, filter, aggregate
//!
//! A pure function of its inputs. The window is resolved exactly once and
//! carried in the bundle for display.

use chrono::{Local, NaiveDateTime};
use std::rc::Rc;

use crate::core::aggregator::{AggregateFields, aggregate};
use crate::core::filter::{FilterMode, FilterReport, retain_dated};
use crate::core::period::{DateWindow, PeriodToken, resolve_period};
use crate::core::types::{AggregateTable, ColumnMap, RowSet};

/// Everything one (file, period) request produces
#[derive(Debug, Clone)]
pub(crate) struct ResultBundle {
    /// The full unfiltered input
    pub(crate) original_rows: Rc<RowSet>,
    pub(crate) table: AggregateTable,
    pub(crate) grand_total: f64,
    pub(crate) grand_count: u64,
    pub(crate) token: PeriodToken,
    pub(crate) window: DateWindow,
    pub(crate) filter: FilterReport,
    pub(crate) skipped_rows: usize,
    pub(crate) invalid_amounts: usize,
}

/// Run the full pipeline. `reference` defaults to the local clock.
pub(crate) fn run(
    rows: &Rc<RowSet>,
    columns: &ColumnMap,
    token: &PeriodToken,
    reference: Option<NaiveDateTime>,
) -> ResultBundle {
    let reference = reference.unwrap_or_else(|| Local::now().naive_local());
    let window = resolve_period(token, reference);

    let outcome = retain_dated(rows, &columns.timestamp, &window);
    if outcome.report.mode == FilterMode::MissingColumn {
        tracing::warn!(
            column = %columns.timestamp,
            "timestamp column not found, summarizing all rows"
        );
    }

    let fields = AggregateFields {
        category: rows.column_index(&columns.category),
        amount: rows.column_index(&columns.amount),
    };
    let result = aggregate(outcome.rows, fields);

    tracing::debug!(
        period = token.label(),
        categories = result.rows.len(),
        grand_count = result.grand_count,
        "pipeline finished"
    );

    ResultBundle {
        original_rows: Rc::clone(rows),
        table: AggregateTable::from_rows(result.rows),
        grand_total: result.grand_total,
        grand_count: result.grand_count,
        token: token.clone(),
        window,
        filter: outcome.report,
        skipped_rows: result.skipped_rows,
        invalid_amounts: result.invalid_amounts,
    }
}
