mod csv_export;
mod format;
mod json;
mod periods;
mod raw;
mod summary;

pub(crate) use csv_export::{output_periods_csv, output_raw_csv, output_summary_csv};
pub(crate) use format::NumberFormat;
pub(crate) use json::{output_periods_json, output_raw_json, output_summary_json};
pub(crate) use periods::render_periods;
pub(crate) use raw::render_raw;
pub(crate) use summary::{SummaryOptions, render_summary};
