//! Error types for the timetable and credential stores.

use thiserror::Error;

use crate::store::{OwnerId, TimetableId};

/// Errors reported by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database failure
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Schedule could not be encoded or decoded as JSON
    #[error("failed to (de)serialize schedule: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A stored timestamp is corrupt
    #[error("stored timestamp is not RFC 3339: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// No timetable has this id
    #[error("no timetable with id {0}")]
    NotFound(TimetableId),

    /// No owner has this id
    #[error("no owner with id {0}")]
    UnknownOwner(OwnerId),

    /// Username already taken
    #[error("username '{0}' is already registered")]
    DuplicateUser(String),

    /// Unknown username or wrong password
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Rejected input, such as a blank name
    #[error("{0}")]
    Invalid(String),
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
