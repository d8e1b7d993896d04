//! Error types for cycle-table uploads.

use thiserror::Error;

/// Reasons an uploaded cycle table is rejected before it reaches the resolver.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The upload could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The upload is not valid CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The upload is not a readable Excel workbook
    #[error("Excel error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    /// The template workbook could not be written
    #[error("Excel write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    /// The workbook has no worksheets
    #[error("workbook has no worksheets")]
    NoSheet,

    /// The upload has no rows
    #[error("upload is empty")]
    Empty,

    /// Only a header row was found
    #[error("upload has a header but no cycle days")]
    NoDays,

    /// A row has a different number of cells than the header
    #[error("line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        /// 1-based row number in the upload
        line: u64,
        /// Cells in the header row
        expected: usize,
        /// Cells in this row
        found: usize,
    },

    /// A row has no cycle day name
    #[error("line {line}: cycle day name is blank")]
    BlankDayName {
        /// 1-based row number in the upload
        line: u64,
    },

    /// A cycle day name appears twice
    #[error("line {line}: duplicate cycle day '{name}'")]
    DuplicateDay {
        /// 1-based row number of the second occurrence
        line: u64,
        /// The repeated name
        name: String,
    },

    /// The file extension is not a supported table format
    #[error("unsupported table format '{0}': use .csv or .xlsx")]
    UnsupportedFormat(String),
}

/// Alias for `Result<T, SourceError>`.
pub type SourceResult<T> = Result<T, SourceError>;
