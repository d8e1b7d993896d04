//! Calendar-to-cycle resolution
//!
//! Walks every calendar date of a semester, classifies holidays, and maps
//! each instructional date onto the next cycle day. The cycle pointer only
//! advances on instructional dates, so holidays shift the cycle rather than
//! consume it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::error::{ResolveError, ResolveResult};
use crate::calendar::holiday::{format_date, holiday_label, holiday_reasons, HolidayReason, HolidaySet};
use crate::calendar::table::CycleTable;

/// Leading columns of every rendered schedule, before the period labels
pub const FIXED_COLUMNS: [&str; 3] = ["Date", "Weekday", "Cycle Day"];

/// Everything needed to resolve one semester
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    /// First calendar date
    pub start: NaiveDate,
    /// Last calendar date (inclusive)
    pub end: NaiveDate,
    /// The repeating cycle
    pub table: CycleTable,
    /// Cycle day that the first instructional date maps to
    pub first_day: String,
    /// Explicit holiday dates
    pub holidays: HolidaySet,
}

/// One output row: a calendar date and what happens on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Calendar date
    #[serde(with = "crate::calendar::holiday::date_format")]
    pub date: NaiveDate,
    /// Resolved cycle day; `None` on holidays
    pub cycle_day: Option<String>,
    /// One cell per period label. On holidays every cell holds the reason text.
    pub periods: Vec<String>,
    /// Why this date is a holiday; empty on instructional days
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<HolidayReason>,
}

impl DayRecord {
    /// True if no cycle day was assigned
    #[must_use]
    pub fn is_holiday(&self) -> bool {
        self.cycle_day.is_none()
    }

    /// Full English weekday name, e.g. "Monday"
    #[must_use]
    pub fn weekday_name(&self) -> String {
        self.date.format("%A").to_string()
    }

    /// Cells in column order: date, weekday, cycle day (empty on holidays),
    /// then the period cells.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(FIXED_COLUMNS.len() + self.periods.len());
        cells.push(format_date(self.date));
        cells.push(self.weekday_name());
        cells.push(self.cycle_day.clone().unwrap_or_default());
        cells.extend(self.periods.iter().cloned());
        cells
    }
}

/// A resolved semester: one record per calendar date, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    period_labels: Vec<String>,
    #[serde(default)]
    cycle_days: Vec<String>,
    days: Vec<DayRecord>,
}

impl ScheduleResult {
    /// Period column labels
    #[must_use]
    pub fn period_labels(&self) -> &[String] {
        &self.period_labels
    }

    /// Cycle day names in table order
    #[must_use]
    pub fn cycle_days(&self) -> &[String] {
        &self.cycle_days
    }

    /// Day records in chronological order
    #[must_use]
    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    /// Number of calendar days covered
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True if no days were resolved
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Column headers: Date, Weekday, Cycle Day, then the period labels
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(ToString::to_string)
            .chain(self.period_labels.iter().cloned())
            .collect()
    }

    /// Rendered rows matching [`ScheduleResult::header`]
    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.days.iter().map(DayRecord::cells)
    }

    /// Count instructional and holiday days, and how often each cycle day
    /// ran, in table order.
    #[must_use]
    pub fn summary(&self) -> ScheduleSummary {
        let mut per_cycle_day: Vec<(String, usize)> =
            self.cycle_days.iter().map(|name| (name.clone(), 0)).collect();
        let mut holidays = 0;
        for day in &self.days {
            let Some(name) = &day.cycle_day else {
                holidays += 1;
                continue;
            };
            match per_cycle_day.iter_mut().find(|(n, _)| n == name) {
                Some((_, count)) => *count += 1,
                None => per_cycle_day.push((name.clone(), 1)),
            }
        }
        ScheduleSummary {
            total_days: self.days.len(),
            instructional_days: self.days.len() - holidays,
            holidays,
            per_cycle_day,
        }
    }
}

/// Aggregate counts over a resolved schedule
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleSummary {
    /// Calendar days in range
    pub total_days: usize,
    /// Days with a cycle day assigned
    pub instructional_days: usize,
    /// Days marked as holidays
    pub holidays: usize,
    /// Occurrences of each cycle day, in table order
    pub per_cycle_day: Vec<(String, usize)>,
}

/// Resolve a semester into one record per calendar date.
///
/// Fails without producing any rows if the range is inverted, the cycle
/// table is malformed, or the first cycle day is not in the table.
pub fn resolve(request: &ScheduleRequest) -> ResolveResult<ScheduleResult> {
    let ScheduleRequest {
        start,
        end,
        table,
        first_day,
        holidays,
    } = request;

    if end < start {
        return Err(ResolveError::InvalidRange {
            start: *start,
            end: *end,
        });
    }
    table.validate()?;
    let mut idx = table
        .position(first_day)
        .ok_or_else(|| ResolveError::UnknownCycleDay {
            name: first_day.clone(),
            available: table.day_names().collect::<Vec<_>>().join(", "),
        })?;

    let days = start
        .iter_days()
        .take_while(|d| d <= end)
        .map(|date| {
            let reasons = holiday_reasons(date, holidays);
            if let Some(label) = holiday_label(&reasons) {
                return DayRecord {
                    date,
                    cycle_day: None,
                    periods: vec![label; table.width()],
                    reasons,
                };
            }

            let day = table.day_at(idx);
            idx = (idx + 1) % table.len();
            DayRecord {
                date,
                cycle_day: Some(day.name.clone()),
                periods: day.slots.clone(),
                reasons,
            }
        })
        .collect();

    Ok(ScheduleResult {
        period_labels: table.period_labels.clone(),
        cycle_days: table.day_names().map(ToString::to_string).collect(),
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::table::CycleDay;
    use crate::testutil::{date, two_day_table};

    fn request(start: NaiveDate, end: NaiveDate) -> ScheduleRequest {
        ScheduleRequest {
            start,
            end,
            table: two_day_table(),
            first_day: "DAY1".to_string(),
            holidays: HolidaySet::new(),
        }
    }

    fn cycle_names(result: &ScheduleResult) -> Vec<&str> {
        result
            .days()
            .iter()
            .map(|d| d.cycle_day.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_three_weekdays_alternate() {
        let result = resolve(&request(date(2025, 8, 4), date(2025, 8, 6))).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(cycle_names(&result), vec!["DAY1", "DAY2", "DAY1"]);
        assert_eq!(result.days()[0].periods, vec!["A", "B"]);
        assert_eq!(result.days()[1].periods, vec!["C", "D"]);
        assert_eq!(result.days()[2].periods, vec!["A", "B"]);
    }

    #[test]
    fn test_sunday_does_not_advance_cycle() {
        // Mon 04-08 .. Mon 11-08; Sat 09-08 is the 2nd Saturday (instructional)
        let result = resolve(&request(date(2025, 8, 4), date(2025, 8, 11))).unwrap();

        assert_eq!(
            cycle_names(&result),
            vec!["DAY1", "DAY2", "DAY1", "DAY2", "DAY1", "DAY2", "", "DAY1"]
        );
        let sunday = &result.days()[6];
        assert!(sunday.is_holiday());
        assert_eq!(sunday.weekday_name(), "Sunday");
        assert_eq!(sunday.periods, vec!["Sunday - Holiday", "Sunday - Holiday"]);
    }

    #[test]
    fn test_first_saturday_with_explicit_holiday() {
        let mut req = request(date(2025, 8, 1), date(2025, 8, 4));
        req.holidays = HolidaySet::parse(["02-08-2025"]).unwrap();
        let result = resolve(&req).unwrap();

        assert_eq!(cycle_names(&result), vec!["DAY1", "", "", "DAY2"]);
        assert_eq!(
            result.days()[1].periods[0],
            "1 Saturday + Govt. Holiday - Holiday"
        );
        assert_eq!(
            result.days()[1].reasons,
            vec![HolidayReason::OddSaturday(1), HolidayReason::GovtHoliday]
        );
    }

    #[test]
    fn test_fifth_saturday_is_instructional() {
        let result = resolve(&request(date(2025, 8, 30), date(2025, 8, 30))).unwrap();
        assert_eq!(cycle_names(&result), vec!["DAY1"]);
    }

    #[test]
    fn test_single_day_range() {
        let result = resolve(&request(date(2025, 8, 5), date(2025, 8, 5))).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.days()[0].date, date(2025, 8, 5));
    }

    #[test]
    fn test_single_day_cycle_table() {
        let mut req = request(date(2025, 8, 4), date(2025, 8, 8));
        req.table = CycleTable::new(vec!["P".to_string()], vec![CycleDay::new("ONLY", ["x"])]);
        req.first_day = "ONLY".to_string();
        let result = resolve(&req).unwrap();

        assert!(result
            .days()
            .iter()
            .all(|d| d.cycle_day.as_deref() == Some("ONLY")));
    }

    #[test]
    fn test_start_in_middle_of_cycle() {
        let mut req = request(date(2025, 8, 4), date(2025, 8, 5));
        req.first_day = "DAY2".to_string();
        let result = resolve(&req).unwrap();
        assert_eq!(cycle_names(&result), vec!["DAY2", "DAY1"]);
    }

    #[test]
    fn test_holiday_on_start_date_keeps_first_day_for_next() {
        let mut req = request(date(2025, 8, 3), date(2025, 8, 4));
        req.first_day = "DAY2".to_string();
        let result = resolve(&req).unwrap();
        assert_eq!(cycle_names(&result), vec!["", "DAY2"]);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = resolve(&request(date(2025, 8, 6), date(2025, 8, 4))).unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidRange {
                start: date(2025, 8, 6),
                end: date(2025, 8, 4),
            }
        );
    }

    #[test]
    fn test_unknown_first_day_rejected() {
        let mut req = request(date(2025, 8, 4), date(2025, 8, 6));
        req.first_day = "DAY 9".to_string();
        let err = resolve(&req).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownCycleDay { .. }));
        assert!(err.to_string().contains("DAY1, DAY2"), "got: {err}");
    }

    #[test]
    fn test_malformed_table_rejected() {
        let mut req = request(date(2025, 8, 4), date(2025, 8, 6));
        req.table.days[1].slots.pop();
        let err = resolve(&req).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedCycleTable(_)));
    }

    #[test]
    fn test_length_and_contiguity_over_semester() {
        let start = date(2025, 8, 4);
        let end = date(2025, 12, 1);
        let result = resolve(&request(start, end)).unwrap();

        let expected = usize::try_from((end - start).num_days() + 1).unwrap();
        assert_eq!(result.len(), expected);
        for (offset, day) in result.days().iter().enumerate() {
            assert_eq!(day.date, start + chrono::Days::new(offset as u64));
        }
    }

    #[test]
    fn test_pointer_advances_once_per_instructional_day() {
        let table = CycleTable::builtin();
        let n = table.len();
        let req = ScheduleRequest {
            start: date(2025, 8, 4),
            end: date(2025, 12, 1),
            table: table.clone(),
            first_day: "DAY 3".to_string(),
            holidays: HolidaySet::parse(["15-08-2025", "02-10-2025", "20-10-2025"]).unwrap(),
        };
        let result = resolve(&req).unwrap();

        let indices: Vec<usize> = result
            .days()
            .iter()
            .filter_map(|d| d.cycle_day.as_deref())
            .map(|name| table.position(name).unwrap())
            .collect();
        assert_eq!(indices[0], 2);
        for pair in indices.windows(2) {
            assert_eq!((pair[0] + 1) % n, pair[1]);
        }
    }

    #[test]
    fn test_every_sunday_is_holiday() {
        let result = resolve(&request(date(2025, 8, 4), date(2025, 12, 1))).unwrap();
        for day in result.days() {
            if day.weekday_name() == "Sunday" {
                assert!(day.is_holiday());
                assert!(day.periods.iter().all(|p| p.ends_with("Sunday - Holiday")));
            }
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut req = request(date(2025, 8, 1), date(2025, 9, 30));
        req.holidays = HolidaySet::parse(["15-08-2025"]).unwrap();
        assert_eq!(resolve(&req).unwrap(), resolve(&req).unwrap());
    }

    #[test]
    fn test_header_and_cells() {
        let result = resolve(&request(date(2025, 8, 3), date(2025, 8, 4))).unwrap();
        assert_eq!(
            result.header(),
            vec!["Date", "Weekday", "Cycle Day", "P1", "P2"]
        );
        let rows: Vec<Vec<String>> = result.rows().collect();
        assert_eq!(
            rows[0],
            vec!["03-08-2025", "Sunday", "", "Sunday - Holiday", "Sunday - Holiday"]
        );
        assert_eq!(rows[1], vec!["04-08-2025", "Monday", "DAY1", "A", "B"]);
    }

    #[test]
    fn test_summary_counts() {
        let result = resolve(&request(date(2025, 8, 1), date(2025, 8, 10))).unwrap();
        let summary = result.summary();

        // Holidays: Sat 02 (1st), Sun 03, Sun 10
        assert_eq!(summary.total_days, 10);
        assert_eq!(summary.holidays, 3);
        assert_eq!(summary.instructional_days, 7);
        assert_eq!(
            summary.per_cycle_day,
            vec![("DAY1".to_string(), 4), ("DAY2".to_string(), 3)]
        );
    }

    #[test]
    fn test_summary_follows_table_order() {
        let days: Vec<CycleDay> = (1..=10)
            .map(|n| CycleDay::new(&format!("DAY {n}"), ["x"]))
            .collect();
        let mut req = request(date(2025, 8, 4), date(2025, 8, 20));
        req.table = CycleTable::new(vec!["P".to_string()], days);
        req.first_day = "DAY 1".to_string();
        let summary = resolve(&req).unwrap().summary();

        let names: Vec<&str> = summary.per_cycle_day.iter().map(|(n, _)| n.as_str()).collect();
        let expected: Vec<String> = (1..=10).map(|n| format!("DAY {n}")).collect();
        assert_eq!(names, expected);
        // 14 instructional days between Mon 04 and Wed 20: DAY 1..4 run twice
        assert_eq!(summary.per_cycle_day[0].1, 2);
        assert_eq!(summary.per_cycle_day[3].1, 2);
        assert_eq!(summary.per_cycle_day[4].1, 1);
        assert_eq!(summary.per_cycle_day[9].1, 1);
    }

    #[test]
    fn test_summary_lists_unused_cycle_days() {
        let summary = resolve(&request(date(2025, 8, 4), date(2025, 8, 4)))
            .unwrap()
            .summary();
        assert_eq!(
            summary.per_cycle_day,
            vec![("DAY1".to_string(), 1), ("DAY2".to_string(), 0)]
        );
    }

    #[test]
    fn test_explicit_holidays_on_weekend_do_not_double_count() {
        let mut req = request(date(2025, 8, 1), date(2025, 8, 4));
        req.holidays = HolidaySet::parse(["02-08-2025", "03-08-2025"]).unwrap();
        let result = resolve(&req).unwrap();

        assert_eq!(cycle_names(&result), vec!["DAY1", "", "", "DAY2"]);
        assert_eq!(
            result.days()[1].periods[0],
            "1 Saturday + Govt. Holiday - Holiday"
        );
        assert_eq!(
            result.days()[2].periods,
            vec!["Sunday + Govt. Holiday - Holiday"; 2]
        );
    }

    #[test]
    fn test_json_shape() {
        let result = resolve(&request(date(2025, 8, 3), date(2025, 8, 4))).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["period_labels"][0], "P1");
        assert_eq!(json["days"][0]["date"], "03-08-2025");
        assert!(json["days"][0]["cycle_day"].is_null());
        assert_eq!(json["days"][0]["reasons"][0], "sunday");
        assert_eq!(json["days"][1]["cycle_day"], "DAY1");
        assert!(json["days"][1].get("reasons").is_none());
    }
}
