//! Schedule export
//!
//! Renders a resolved schedule as a CSV spreadsheet, an Excel workbook, or a
//! paginated PDF or text document. All formats share one column layout: Date,
//! Weekday, Cycle Day, then one column per period label.

pub mod csv;
pub mod error;
pub mod pages;
pub mod pdf;
pub mod xlsx;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::calendar::resolver::ScheduleResult;

pub use self::csv::write_csv;
pub use self::error::{ExportError, ExportResult};
pub use self::pages::{render_pages, write_pages, PageLayout};
pub use self::pdf::{pdf_bytes, write_pdf};
pub use self::xlsx::{write_xlsx, xlsx_bytes};

/// Output formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `.csv`
    Csv,
    /// `.xlsx`
    Xlsx,
    /// `.pdf`, paginated
    Pdf,
    /// `.txt`, paginated
    Pages,
}

impl ExportFormat {
    /// Pick the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> ExportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::Pages),
            _ => Err(ExportError::UnsupportedFormat(ext)),
        }
    }

    /// Short display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Xlsx => "Excel",
            Self::Pdf => "PDF",
            Self::Pages => "paginated text",
        }
    }
}

/// Write the schedule to `path` in the format its extension names.
pub fn export(
    schedule: &ScheduleResult,
    path: &Path,
    layout: &PageLayout,
) -> ExportResult<ExportFormat> {
    let format = ExportFormat::from_path(path)?;
    match format {
        ExportFormat::Csv => write_csv(schedule, BufWriter::new(File::create(path)?))?,
        ExportFormat::Xlsx => write_xlsx(schedule, path)?,
        ExportFormat::Pdf => write_pdf(schedule, layout, path)?,
        ExportFormat::Pages => write_pages(schedule, layout, BufWriter::new(File::create(path)?))?,
    }
    Ok(format)
}
