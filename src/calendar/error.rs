//! Error types for schedule resolution.

use chrono::NaiveDate;
use thiserror::Error;

/// Input-validation failures detected before any day is resolved.
///
/// Resolution is all-or-nothing: when one of these is returned, no
/// partial schedule exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The semester ends before it starts.
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange {
        /// First day of the requested range
        start: NaiveDate,
        /// Last day of the requested range (inclusive)
        end: NaiveDate,
    },

    /// The starting cycle day is not a row of the cycle table.
    #[error("unknown cycle day '{name}' (available: {available})")]
    UnknownCycleDay {
        /// The name that was asked for
        name: String,
        /// Comma-separated names present in the table
        available: String,
    },

    /// The cycle table is empty, ragged, or has repeated day names.
    #[error("malformed cycle table: {0}")]
    MalformedCycleTable(String),
}

/// Alias for `Result<T, ResolveError>`.
pub type ResolveResult<T> = Result<T, ResolveError>;
