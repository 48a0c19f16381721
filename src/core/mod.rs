//! Core module - period resolution, filtering and aggregation
//!
//! Nothing in here performs I/O or returns errors.

mod aggregator;
mod cache;
mod filter;
mod period;
mod pipeline;
mod types;

pub(crate) use cache::SummaryCache;
pub(crate) use filter::{FilterMode, FilterReport};
pub(crate) use period::{DateWindow, Period, PeriodToken, UnboundedReason, resolve_period};
pub(crate) use pipeline::ResultBundle;
#[cfg(test)]
pub(crate) use pipeline::run;
pub(crate) use types::{AggregateRow, ColumnMap, Row, RowSet};
