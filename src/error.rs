use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read spreadsheet: {0}")]
    Workbook(String),

    #[error("Unsupported file type \"{extension}\" (expected .csv or .xlsx)")]
    UnsupportedFormat { extension: String },

    #[error("No header row found in {}", path.display())]
    MissingHeader { path: PathBuf },

    #[error("Required column \"{column}\" not found (available: {available})")]
    MissingColumn { column: String, available: String },

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
