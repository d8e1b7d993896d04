//! CLI output formatting
//!
//! Provides human-readable terminal display for generated timetables and
//! saved-timetable listings.

pub mod display;

pub use display::render_saved_list;
pub use display::render_success;
pub use display::render_summary;
pub use display::ScheduleDisplay;
