use calamine::{Data, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::path::Path;

use crate::core::{Row, RowSet};
use crate::error::AppError;

/// Decode the first worksheet; its first row is the header
pub(super) fn decode(path: &Path) -> Result<RowSet, AppError> {
    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| AppError::Workbook(format!("{}: {e}", path.display())))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => return Err(AppError::Workbook(e.to_string())),
        None => {
            return Err(AppError::MissingHeader {
                path: path.to_path_buf(),
            });
        }
    };

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(cells) => cells.iter().map(|c| cell_text(c).trim().to_string()).collect(),
        None => {
            return Err(AppError::MissingHeader {
                path: path.to_path_buf(),
            });
        }
    };

    let width = headers.len();
    let rows = sheet_rows
        .filter(|cells| cells.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|cells| {
            let mut text: Vec<String> = cells.iter().map(cell_text).collect();
            text.resize(width, String::new());
            Row::new(text)
        })
        .collect();

    Ok(RowSet::new(headers, rows))
}

/// Render one cell as the text a CSV export would have carried
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => format_float(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => serial_to_datetime(dt.as_f64())
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        // Empty and error cells
        _ => String::new(),
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

/// Spreadsheet serial date to a wall-clock timestamp.
/// The epoch is 1899-12-30, which absorbs the 1900 leap year bug.
fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    base.checked_add_signed(Duration::try_seconds(seconds)?)
}
