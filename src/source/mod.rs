//! Input decoding
//!
//! Turns a CSV or spreadsheet file into a `RowSet`. Format is picked from the
//! file extension; the core never sees the original bytes.

mod csv_file;
#[cfg(feature = "xlsx")]
mod workbook;

use sha2::{Digest, Sha256};
use std::path::Path;
use std::rc::Rc;

use crate::core::{ColumnMap, RowSet};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    Csv,
    #[cfg(feature = "xlsx")]
    Spreadsheet,
}

impl FileFormat {
    pub(crate) fn detect(path: &Path) -> Result<Self, AppError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Ok(FileFormat::Csv),
            #[cfg(feature = "xlsx")]
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(FileFormat::Spreadsheet),
            _ => Err(AppError::UnsupportedFormat { extension }),
        }
    }

    fn decode(self, path: &Path, bytes: &[u8]) -> Result<RowSet, AppError> {
        match self {
            FileFormat::Csv => csv_file::decode(path, bytes),
            #[cfg(feature = "xlsx")]
            FileFormat::Spreadsheet => workbook::decode(path),
        }
    }
}

/// A decoded input file
#[derive(Debug, Clone)]
pub(crate) struct LoadedFile {
    pub(crate) rows: Rc<RowSet>,
    /// SHA-256 of the file bytes, hex encoded
    pub(crate) identity: String,
    pub(crate) format: FileFormat,
}

/// Read and decode a file. Any failure here is fatal for the request.
pub(crate) fn load_file(path: &Path) -> Result<LoadedFile, AppError> {
    let format = FileFormat::detect(path)?;
    let bytes = std::fs::read(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let identity = content_identity(&bytes);
    let rows = format.decode(path, &bytes)?;

    tracing::debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = rows.headers().len(),
        ?format,
        "loaded input"
    );

    Ok(LoadedFile {
        rows: Rc::new(rows),
        identity,
        format,
    })
}

/// Check the columns that aggregation cannot do without. The timestamp
/// column is optional.
pub(crate) fn require_columns(rows: &RowSet, columns: &ColumnMap) -> Result<(), AppError> {
    for column in [&columns.category, &columns.amount] {
        if !rows.has_column(column) {
            return Err(AppError::MissingColumn {
                column: column.clone(),
                available: rows.headers().join(", "),
            });
        }
    }
    Ok(())
}

pub(crate) fn content_identity(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn detect_by_extension() {
        assert_eq!(FileFormat::detect(Path::new("a.csv")).unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::detect(Path::new("A.CSV")).unwrap(), FileFormat::Csv);
        let err = FileFormat::detect(Path::new("report.pdf")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat { ref extension } if extension == "pdf"));
        assert!(FileFormat::detect(Path::new("noext")).is_err());
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn detect_spreadsheet() {
        assert_eq!(
            FileFormat::detect(Path::new("export.xlsx")).unwrap(),
            FileFormat::Spreadsheet
        );
    }

    #[test]
    fn identity_is_content_hash() {
        assert_eq!(
            content_identity(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_ne!(content_identity(b"a"), content_identity(b"b"));
    }

    #[test]
    fn load_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.csv");
        fs::write(
            &path,
            "Transaction Category,Amount Paid,Created On\nFood,10,2024-01-01\n",
        )
        .unwrap();
        let loaded = load_file(&path).unwrap();
        assert_eq!(loaded.rows.len(), 1);
        assert_eq!(loaded.format, FileFormat::Csv);
        assert_eq!(loaded.identity.len(), 64);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn require_columns_reports_available() {
        let rows = RowSet::new(vec!["Category".into(), "Amount Paid".into()], Vec::new());
        let err = require_columns(&rows, &ColumnMap::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Required column "Transaction Category" not found (available: Category, Amount Paid)"#
        );
    }

    #[test]
    fn require_columns_ignores_timestamp() {
        let rows = RowSet::new(
            vec!["Transaction Category".into(), "Amount Paid".into()],
            Vec::new(),
        );
        assert!(require_columns(&rows, &ColumnMap::default()).is_ok());
    }
}
