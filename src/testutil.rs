//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use chrono::{NaiveDate, Utc};

use crate::calendar::holiday::HolidaySet;
use crate::calendar::resolver::{resolve, ScheduleRequest, ScheduleResult};
use crate::calendar::table::{CycleDay, CycleTable};
use crate::log::jsonl::GenerationOutcome;

/// Shorthand for a valid calendar date.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// `DAY1: [A, B]`, `DAY2: [C, D]` under period labels `P1`, `P2`.
#[must_use]
pub fn two_day_table() -> CycleTable {
    CycleTable::new(
        vec!["P1".to_string(), "P2".to_string()],
        vec![
            CycleDay::new("DAY1", ["A", "B"]),
            CycleDay::new("DAY2", ["C", "D"]),
        ],
    )
}

/// The two-day table resolved over 01-08-2025 (Friday) to 10-08-2025
/// (Sunday) with no explicit holidays.
#[must_use]
pub fn sample_schedule() -> ScheduleResult {
    resolve(&ScheduleRequest {
        start: date(2025, 8, 1),
        end: date(2025, 8, 10),
        table: two_day_table(),
        first_day: "DAY1".to_string(),
        holidays: HolidaySet::new(),
    })
    .unwrap()
}

/// Create a minimal `GenerationOutcome` for testing with sensible defaults.
///
/// Covers 04-08-2025 to 01-12-2025 with no exports and nothing saved.
#[must_use]
pub fn make_test_outcome(first_day: &str) -> GenerationOutcome {
    GenerationOutcome {
        timestamp: Utc::now(),
        start: date(2025, 8, 4),
        end: date(2025, 12, 1),
        first_day: first_day.to_string(),
        total_days: 120,
        instructional_days: 95,
        holidays: 25,
        exports: vec![],
        saved_id: None,
    }
}
