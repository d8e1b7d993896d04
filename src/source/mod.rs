//! Cycle-table sources
//!
//! Loads user-supplied cycle tables and normalizes them into a
//! [`CycleTable`]. Malformed uploads are rejected here, before they can
//! reach the resolver.

pub mod csv;
pub mod error;
mod rows;
pub mod xlsx;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::calendar::table::CycleTable;

pub use self::csv::{parse_table, write_template};
pub use self::error::{SourceError, SourceResult};
pub use self::xlsx::{parse_workbook, template_xlsx_bytes, write_template_xlsx};

/// Load and validate a cycle table from a `.csv` or `.xlsx` file.
pub fn load_table(path: &Path) -> Result<CycleTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ext != "csv" && ext != "xlsx" {
        return Err(SourceError::UnsupportedFormat(ext))
            .with_context(|| format!("Cannot load cycle table from {}", path.display()));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open cycle table: {}", path.display()))?;
    let parsed = if ext == "xlsx" {
        parse_workbook(BufReader::new(file))
    } else {
        parse_table(file)
    };
    let table =
        parsed.with_context(|| format!("Rejected cycle table upload: {}", path.display()))?;
    table
        .validate()
        .with_context(|| format!("Rejected cycle table upload: {}", path.display()))?;
    Ok(table)
}
