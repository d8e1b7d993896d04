//! Holiday classification
//!
//! Three independent rules decide whether a date is non-instructional:
//! Sundays, odd-numbered Saturdays of the month (the 5th excepted), and
//! explicit holidays supplied by the caller. Reasons accumulate.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Day-month-year with zero-padded day and month, e.g. "04-08-2025"
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Suffix appended to the joined reasons in every period cell of a holiday
pub const HOLIDAY_SUFFIX: &str = " - Holiday";

/// A date string that is not in strict `DD-MM-YYYY` form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{value}': expected DD-MM-YYYY, e.g. 04-08-2025")]
pub struct DateFormatError {
    /// The rejected input
    pub value: String,
}

/// Format a date the way holiday keys and the Date column are written.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `DD-MM-YYYY` date. Input that would not format back to itself
/// (missing zero padding, stray whitespace, two-digit years) is rejected.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateFormatError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|d| format_date(*d) == value)
        .ok_or_else(|| DateFormatError {
            value: value.to_string(),
        })
}

/// Serde adapter writing dates as `DD-MM-YYYY`.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as `DD-MM-YYYY`
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    /// Deserialize from strict `DD-MM-YYYY`
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_date(&value).map_err(serde::de::Error::custom)
    }
}

/// Why a date is not an instructional day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayReason {
    /// Every Sunday
    Sunday,
    /// The nth Saturday of the month, n odd and not 5
    OddSaturday(u32),
    /// Listed in the caller's holiday set
    GovtHoliday,
}

impl fmt::Display for HolidayReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunday => write!(f, "Sunday"),
            Self::OddSaturday(n) => write!(f, "{n} Saturday"),
            Self::GovtHoliday => write!(f, "Govt. Holiday"),
        }
    }
}

/// Explicit holiday dates supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    /// An empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `DD-MM-YYYY` entries, rejecting the first malformed one.
    pub fn parse<I, S>(entries: I) -> Result<Self, DateFormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .map(|e| parse_date(e.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()
            .map(|dates| Self { dates })
    }

    /// Add a date; returns false if it was already present.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    /// True if the date is an explicit holiday
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Number of explicit holidays
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True if there are no explicit holidays
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates in chronological order
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<Vec<String>> for HolidaySet {
    type Error = DateFormatError;

    fn try_from(entries: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(entries)
    }
}

impl From<HolidaySet> for Vec<String> {
    fn from(set: HolidaySet) -> Self {
        set.dates.into_iter().map(format_date).collect()
    }
}

/// 1-based occurrence of the date's weekday within its month, counting
/// from day 1 through the date itself. For a Saturday this is its
/// Saturday ordinal.
#[must_use]
pub fn saturday_ordinal(date: NaiveDate) -> u32 {
    date.day0() / 7 + 1
}

/// All reasons the date is a holiday, in rule order. Empty means
/// instructional.
#[must_use]
pub fn holiday_reasons(date: NaiveDate, holidays: &HolidaySet) -> Vec<HolidayReason> {
    let mut reasons = Vec::new();

    match date.weekday() {
        Weekday::Sun => reasons.push(HolidayReason::Sunday),
        Weekday::Sat => {
            let nth = saturday_ordinal(date);
            if nth % 2 == 1 && nth != 5 {
                reasons.push(HolidayReason::OddSaturday(nth));
            }
        }
        _ => {}
    }

    if holidays.contains(date) {
        reasons.push(HolidayReason::GovtHoliday);
    }

    reasons
}

/// Cell text for a holiday, e.g. "1 Saturday + Govt. Holiday - Holiday".
/// `None` when there are no reasons.
#[must_use]
pub fn holiday_label(reasons: &[HolidayReason]) -> Option<String> {
    if reasons.is_empty() {
        return None;
    }
    let joined = reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" + ");
    Some(format!("{joined}{HOLIDAY_SUFFIX}"))
}
