//! Error types for schedule export.

use thiserror::Error;

/// Errors that can occur when rendering a schedule to a file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Output file could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer failure
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook writer failure
    #[error("XLSX write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// PDF writer failure
    #[error("PDF write error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The file extension is not a supported export format
    #[error("unsupported export format '{0}': use .csv, .xlsx, .pdf or .txt")]
    UnsupportedFormat(String),

    /// Too many rows or columns for a worksheet
    #[error("schedule does not fit in a worksheet: {0}")]
    OutOfRange(String),
}

/// Alias for `Result<T, ExportError>`.
pub type ExportResult<T> = Result<T, ExportError>;
