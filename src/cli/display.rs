//! Terminal display for generated and saved timetables
//!
//! All output goes to stderr so stdout remains clean for piping.

use colored::Colorize;

use crate::calendar::resolver::{ScheduleResult, ScheduleSummary};
use crate::store::TimetableMeta;

const MAX_CELL_WIDTH: usize = 24;

/// Shorten a cell to `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

/// Plain-text preview rows: the header, then the first `rows` days.
/// Cells are truncated and padded so columns line up.
#[must_use]
pub fn preview_lines(schedule: &ScheduleResult, rows: usize) -> Vec<String> {
    let table: Vec<Vec<String>> = std::iter::once(schedule.header())
        .chain(schedule.rows().take(rows))
        .map(|cells| cells.iter().map(|c| truncate(c, MAX_CELL_WIDTH)).collect())
        .collect();

    let columns = table.first().map_or(0, Vec::len);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            table
                .iter()
                .filter_map(|row| row.get(col))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    table
        .iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Display handler for a generated schedule
pub struct ScheduleDisplay<'a> {
    schedule: &'a ScheduleResult,
}

impl<'a> ScheduleDisplay<'a> {
    /// Create a display handler for the given schedule
    #[must_use]
    pub const fn new(schedule: &'a ScheduleResult) -> Self {
        Self { schedule }
    }

    /// Print the header banner
    pub fn print_header(&self, title: &str) {
        eprintln!("\n{} {}", "===".bold().cyan(), title.bold().cyan());
        eprintln!("{}", "─".repeat(50).dimmed());
    }

    /// Print the first `rows` days, holidays highlighted
    pub fn print_preview(&self, rows: usize) {
        let lines = preview_lines(self.schedule, rows);
        let Some((header, body)) = lines.split_first() else {
            return;
        };
        eprintln!("  {}", header.bold());
        for (line, day) in body.iter().zip(self.schedule.days()) {
            if day.is_holiday() {
                eprintln!("  {}", line.yellow());
            } else {
                eprintln!("  {line}");
            }
        }
        let hidden = self.schedule.len().saturating_sub(body.len());
        if hidden > 0 {
            eprintln!("  {}", format!("... {hidden} more day(s)").dimmed());
        }
    }

    /// Print day counts
    pub fn print_summary(&self) {
        render_summary(&self.schedule.summary());
    }
}

/// "DAY 1: 4 | DAY 2: 3", in table order.
fn cycle_day_counts(summary: &ScheduleSummary) -> String {
    summary
        .per_cycle_day
        .iter()
        .map(|(name, count)| format!("{name}: {count}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Render day counts and per-cycle-day totals
pub fn render_summary(summary: &ScheduleSummary) {
    eprintln!("{}", "─".repeat(50).dimmed());
    eprintln!(
        "  {} {} days | {} instructional | {} holiday(s)",
        "Summary:".dimmed(),
        summary.total_days,
        summary.instructional_days.to_string().green(),
        summary.holidays.to_string().yellow()
    );
    if !summary.per_cycle_day.is_empty() {
        eprintln!("  {} {}", "Cycle days:".dimmed(), cycle_day_counts(summary));
    }
    eprintln!();
}

/// Render an owner's saved timetables
pub fn render_saved_list(saved: &[TimetableMeta]) {
    if saved.is_empty() {
        eprintln!("  {}", "No timetables saved yet.".dimmed());
        return;
    }
    for meta in saved {
        eprintln!(
            "  {} {} {}",
            format!("#{}", meta.id).bold(),
            meta.name,
            format!("({})", meta.created_at.format("%Y-%m-%d %H:%M UTC")).dimmed()
        );
    }
}

/// Print a one-line success message
pub fn render_success(message: &str) {
    eprintln!("  {} {message}", "✓".green().bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_schedule;
    use chrono::Utc;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("DAY 1", 10), "DAY 1");
    }

    #[test]
    fn test_truncate_long_text() {
        let result = truncate("PP LAB B1 & B2 (CD+HK) extended", 10);
        assert_eq!(result, "PP LAB ...");
        assert_eq!(result.chars().count(), 10);
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("9:00–9:55", 9), "9:00–9:55");
    }

    #[test]
    fn test_preview_lines_header_and_rows() {
        let lines = preview_lines(&sample_schedule(), 3);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[1].starts_with("01-08-2025  Friday"));
        assert!(lines[2].contains("1 Saturday - Holiday"));
    }

    #[test]
    fn test_preview_lines_columns_aligned() {
        let lines = preview_lines(&sample_schedule(), 5);
        let col = lines[0].find("Weekday").unwrap();
        for line in &lines[1..] {
            let weekday_start = line[col..].chars().next().unwrap();
            assert!(weekday_start.is_ascii_uppercase(), "misaligned: {line}");
        }
    }

    #[test]
    fn test_preview_more_rows_than_schedule() {
        let lines = preview_lines(&sample_schedule(), 100);
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn test_cycle_day_counts_in_table_order() {
        let summary = ScheduleSummary {
            per_cycle_day: vec![
                ("DAY 2".to_string(), 3),
                ("DAY 10".to_string(), 1),
                ("DAY 1".to_string(), 0),
            ],
            ..ScheduleSummary::default()
        };
        assert_eq!(cycle_day_counts(&summary), "DAY 2: 3 | DAY 10: 1 | DAY 1: 0");
    }

    #[test]
    fn test_render_functions_no_panic() {
        let schedule = sample_schedule();
        let display = ScheduleDisplay::new(&schedule);
        display.print_header("College Timetable");
        display.print_preview(3);
        display.print_preview(0);
        display.print_summary();

        render_saved_list(&[]);
        render_saved_list(&[TimetableMeta {
            id: 1,
            name: "My Timetable".to_string(),
            created_at: Utc::now(),
        }]);
        render_success("Saved");
    }
}
