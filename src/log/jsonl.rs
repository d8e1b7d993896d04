//! JSONL (JSON Lines) logging of generation runs
//!
//! Provides append-only logging of generated timetables to `.timetable/log.jsonl`

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::calendar::resolver::ScheduleSummary;

/// Represents the outcome of a single `generate` run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// ISO 8601 timestamp of when the schedule was generated
    pub timestamp: DateTime<Utc>,
    /// First day of the semester
    #[serde(with = "crate::calendar::holiday::date_format")]
    pub start: NaiveDate,
    /// Last day of the semester
    #[serde(with = "crate::calendar::holiday::date_format")]
    pub end: NaiveDate,
    /// Cycle day on the start date
    pub first_day: String,
    /// Calendar days covered
    pub total_days: usize,
    /// Days with a cycle day assigned
    pub instructional_days: usize,
    /// Days marked as holidays
    pub holidays: usize,
    /// Files the schedule was exported to
    #[serde(default)]
    pub exports: Vec<String>,
    /// Store id, if the schedule was saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_id: Option<i64>,
}

impl GenerationOutcome {
    /// Build an outcome from a run's range and summary, timestamped now.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate, first_day: &str, summary: &ScheduleSummary) -> Self {
        Self {
            timestamp: Utc::now(),
            start,
            end,
            first_day: first_day.to_string(),
            total_days: summary.total_days,
            instructional_days: summary.instructional_days,
            holidays: summary.holidays,
            exports: Vec::new(),
            saved_id: None,
        }
    }
}

/// JSONL logger for generation history
///
/// Provides append-only logging to `.timetable/log.jsonl`.
/// Each line is a JSON object representing a single run.
pub struct JsonlLogger {
    log_path: PathBuf,
}

impl JsonlLogger {
    /// Create a new JSONL logger
    ///
    /// # Arguments
    /// * `log_dir` - Directory where log.jsonl will be stored (typically `.timetable`)
    ///
    /// # Errors
    /// Returns an error if the log directory cannot be created
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_path = log_dir.join("log.jsonl");

        Ok(Self { log_path })
    }

    /// Append a run outcome to the log
    ///
    /// # Errors
    /// Returns an error if the log file cannot be opened, the outcome cannot
    /// be serialized, or writing fails
    pub fn append(&self, outcome: &GenerationOutcome) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open log file: {}", self.log_path.display()))?;

        let json = serde_json::to_string(outcome)
            .context("Failed to serialize generation outcome to JSON")?;

        writeln!(file, "{json}").context("Failed to write to log file")?;

        Ok(())
    }

    /// Read all run outcomes from the log, in chronological order
    ///
    /// # Errors
    /// Returns an error if the log file cannot be read or any line is not
    /// valid JSON
    pub fn read_all(&self) -> Result<Vec<GenerationOutcome>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)
            .with_context(|| format!("Failed to read log file: {}", self.log_path.display()))?;

        let mut outcomes = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let outcome: GenerationOutcome = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))?;

            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Get the path to the log file
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{date, make_test_outcome};
    use tempfile::TempDir;

    #[test]
    fn test_new_logger_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join(".timetable");

        let logger = JsonlLogger::new(&log_dir).unwrap();

        assert!(log_dir.exists());
        assert_eq!(logger.log_path(), log_dir.join("log.jsonl"));
    }

    #[test]
    fn test_append_writes_one_line_per_outcome() {
        let temp_dir = TempDir::new().unwrap();
        let logger = JsonlLogger::new(temp_dir.path()).unwrap();

        logger.append(&make_test_outcome("DAY 1")).unwrap();
        logger.append(&make_test_outcome("DAY 4")).unwrap();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("\"start\":\"04-08-2025\""));
    }

    #[test]
    fn test_read_all_empty_log() {
        let temp_dir = TempDir::new().unwrap();
        let logger = JsonlLogger::new(temp_dir.path()).unwrap();

        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_all_returns_outcomes_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let logger = JsonlLogger::new(temp_dir.path()).unwrap();

        let mut saved = make_test_outcome("DAY 2");
        saved.exports = vec!["Dynamic_Timetable.xlsx".to_string()];
        saved.saved_id = Some(7);

        logger.append(&make_test_outcome("DAY 1")).unwrap();
        logger.append(&saved).unwrap();

        let results = logger.read_all().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].first_day, "DAY 1");
        assert_eq!(results[0].saved_id, None);
        assert_eq!(results[1].first_day, "DAY 2");
        assert_eq!(results[1].exports, vec!["Dynamic_Timetable.xlsx"]);
        assert_eq!(results[1].saved_id, Some(7));
        assert_eq!(results[1].end, date(2025, 12, 1));
    }

    #[test]
    fn test_read_all_skips_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let logger = JsonlLogger::new(temp_dir.path()).unwrap();
        logger.append(&make_test_outcome("DAY 1")).unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(logger.log_path())
            .unwrap();
        writeln!(file, "\n   ").unwrap();

        assert_eq!(logger.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_read_all_reports_bad_line() {
        let temp_dir = TempDir::new().unwrap();
        let logger = JsonlLogger::new(temp_dir.path()).unwrap();
        logger.append(&make_test_outcome("DAY 1")).unwrap();
        fs::write(
            logger.log_path(),
            format!(
                "{}\nnot json\n",
                serde_json::to_string(&make_test_outcome("DAY 1")).unwrap()
            ),
        )
        .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }
}
