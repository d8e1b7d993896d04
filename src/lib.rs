//! Timetable - Dynamic cycle timetable generator
//!
//! Maps a recurring N-day instructional cycle onto the calendar. Sundays,
//! odd Saturdays (except the 5th) and explicit holidays are skipped, and the
//! cycle only advances on instructional days. Results can be exported to
//! CSV, Excel or paginated text and saved per owner.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod calendar;
pub mod cli;
pub mod export;
pub mod log;
pub mod source;
pub mod store;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use calendar::config::{OutputConfig, SemesterConfig, TimetableConfig};
pub use calendar::error::ResolveError;
pub use calendar::holiday::{HolidayReason, HolidaySet};
pub use calendar::resolver::{resolve, DayRecord, ScheduleRequest, ScheduleResult, ScheduleSummary};
pub use calendar::table::{CycleDay, CycleTable};
pub use export::{export, ExportFormat, PageLayout};
pub use log::{GenerationOutcome, JsonlLogger};
pub use store::{CredentialStore, SqliteStore, TimetableStore};
