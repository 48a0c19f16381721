use std::path::Path;

use crate::core::{Row, RowSet};
use crate::error::AppError;

const UTF8_BOM: char = '\u{feff}';

/// Decode CSV bytes. The first record is the header; ragged records are
/// padded or truncated to the header width.
pub(super) fn decode(path: &Path, bytes: &[u8]) -> Result<RowSet, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h };
            h.trim().to_string()
        })
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(AppError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let width = headers.len();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(width, String::new());
        rows.push(Row::new(cells));
    }

    Ok(RowSet::new(headers, rows))
}
