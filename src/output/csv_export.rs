use chrono::NaiveDateTime;

use crate::consts::DATE_FORMAT;
use crate::core::{Period, ResultBundle, RowSet, resolve_period};
use crate::error::AppError;
use crate::output::summary::visible_rows;

fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(mut writer: csv::Writer<Vec<u8>>) -> Result<String, AppError> {
    writer.flush().map_err(csv::Error::from)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::from(e.error().kind())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// One record per category per period; totals are left to the consumer
pub(crate) fn output_summary_csv(
    bundles: &[&ResultBundle],
    top: Option<usize>,
) -> Result<String, AppError> {
    let mut wtr = writer();
    wtr.write_record(["period", "start", "end", "category", "count", "total_amount", "share"])?;
    for bundle in bundles {
        let (start, end) = match bundle.window.bounds() {
            Some((start, end)) => (
                start.format(DATE_FORMAT).to_string(),
                end.format(DATE_FORMAT).to_string(),
            ),
            None => (String::new(), String::new()),
        };
        for row in visible_rows(bundle.table.rows(), top) {
            wtr.write_record([
                bundle.token.label(),
                start.as_str(),
                end.as_str(),
                row.category.as_str(),
                row.count.to_string().as_str(),
                format!("{:.2}", row.total_amount).as_str(),
                format!("{:.2}", row.share_of(bundle.grand_total)).as_str(),
            ])?;
        }
    }
    finish(wtr)
}

pub(crate) fn output_periods_csv(reference: NaiveDateTime) -> Result<String, AppError> {
    let mut wtr = writer();
    wtr.write_record(["period", "slug", "start", "end", "days"])?;
    for period in Period::ALL {
        let window = resolve_period(&period.into(), reference);
        let (start, end) = match window.bounds() {
            Some((start, end)) => (
                start.format(DATE_FORMAT).to_string(),
                end.format(DATE_FORMAT).to_string(),
            ),
            None => (String::new(), String::new()),
        };
        let days = window.days().map(|d| d.to_string()).unwrap_or_default();
        wtr.write_record([
            period.label(),
            period.slug(),
            start.as_str(),
            end.as_str(),
            days.as_str(),
        ])?;
    }
    finish(wtr)
}

pub(crate) fn output_raw_csv(rows: &RowSet, limit: usize) -> Result<String, AppError> {
    let mut wtr = writer();
    wtr.write_record(rows.headers())?;
    for row in rows.rows().iter().take(limit) {
        wtr.write_record(row.cells())?;
    }
    finish(wtr)
}
