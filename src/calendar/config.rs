//! Timetable configuration parser
//!
//! Parses `timetable.toml` into a semester definition, an optional cycle
//! table (inline or from a CSV file), and output settings.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::holiday::HolidaySet;
use crate::calendar::resolver::ScheduleRequest;
use crate::calendar::table::CycleTable;
use crate::source;

/// Semester bounds, starting cycle day and explicit holidays
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SemesterConfig {
    /// First day of the semester, `DD-MM-YYYY`
    #[serde(with = "crate::calendar::holiday::date_format")]
    pub start: NaiveDate,
    /// Last day of the semester (inclusive), `DD-MM-YYYY`
    #[serde(with = "crate::calendar::holiday::date_format")]
    pub end: NaiveDate,
    /// Cycle day on the start date
    pub first_day: String,
    /// Government/institutional holidays, `DD-MM-YYYY`
    #[serde(default)]
    pub holidays: HolidaySet,
}

/// Rendering settings shared by the preview and the paginated export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Title printed at the top of each page (default: "College Timetable")
    #[serde(default = "default_title")]
    pub title: String,
    /// Rows per page in the paginated export (default: 40)
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
    /// Rows shown in the terminal preview (default: 15)
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

fn default_title() -> String {
    "College Timetable".to_string()
}

const fn default_rows_per_page() -> usize {
    40
}

const fn default_preview_rows() -> usize {
    15
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            rows_per_page: default_rows_per_page(),
            preview_rows: default_preview_rows(),
        }
    }
}

/// Top-level configuration parsed from timetable.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimetableConfig {
    /// Semester definition
    pub semester: SemesterConfig,
    /// CSV file holding the cycle table, relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_file: Option<PathBuf>,
    /// Inline cycle table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<CycleTable>,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Directory of the config file, for resolving `table_file`
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl TimetableConfig {
    /// Parse a timetable.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::parse(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parse timetable.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse timetable.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the cycle table: the inline table, the table file, or the
    /// built-in table when neither is configured.
    pub fn load_table(&self) -> Result<CycleTable> {
        if let Some(table) = &self.table {
            return Ok(table.clone());
        }
        match &self.table_file {
            Some(file) => {
                let path = self
                    .base_dir
                    .as_ref()
                    .map_or_else(|| file.clone(), |dir| dir.join(file));
                source::load_table(&path)
            }
            None => Ok(CycleTable::builtin()),
        }
    }

    /// Build a resolver request from this configuration and a cycle table.
    #[must_use]
    pub fn request(&self, table: CycleTable) -> ScheduleRequest {
        ScheduleRequest {
            start: self.semester.start,
            end: self.semester.end,
            table,
            first_day: self.semester.first_day.clone(),
            holidays: self.semester.holidays.clone(),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.semester.end < self.semester.start {
            bail!(
                "Semester end {} is before start {}",
                self.semester.end.format("%d-%m-%Y"),
                self.semester.start.format("%d-%m-%Y")
            );
        }

        if self.semester.first_day.trim().is_empty() {
            bail!("Semester first_day cannot be empty");
        }

        if self.table.is_some() && self.table_file.is_some() {
            bail!("Configure either [table] or table_file, not both");
        }

        if let Some(table) = &self.table {
            table.validate().context("in [table]")?;
            if table.position(&self.semester.first_day).is_none() {
                bail!(
                    "first_day '{}' is not a cycle day in [table]",
                    self.semester.first_day
                );
            }
        }

        if self.output.rows_per_page == 0 {
            bail!("output.rows_per_page must be at least 1");
        }

        Ok(())
    }
}
