//! Timetable persistence
//!
//! Generated schedules are stored per owner behind [`TimetableStore`];
//! owners register and sign in through [`CredentialStore`]. Owners are
//! identified by an opaque [`OwnerId`] so any backend can implement both.

pub mod credentials;
pub mod error;
pub mod sqlite;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::resolver::ScheduleResult;

pub use credentials::SecretHash;
pub use error::{StoreError, StoreResult};
pub use sqlite::SqliteStore;

/// Opaque owner identifier
pub type OwnerId = i64;

/// Identifier of a saved timetable
pub type TimetableId = i64;

/// Listing entry for a saved timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableMeta {
    /// Store-assigned id
    pub id: TimetableId,
    /// Name given when saving
    pub name: String,
    /// When it was saved
    pub created_at: DateTime<Utc>,
}

/// Named schedules saved per owner. No update in place: save a new one and
/// delete the old.
pub trait TimetableStore {
    /// Save a schedule under a name and return its id.
    fn create(&mut self, owner: OwnerId, name: &str, schedule: &ScheduleResult)
        -> StoreResult<TimetableId>;

    /// Saved timetables of an owner, oldest first.
    fn list(&self, owner: OwnerId) -> StoreResult<Vec<TimetableMeta>>;

    /// Load a saved schedule.
    fn get(&self, id: TimetableId) -> StoreResult<ScheduleResult>;

    /// Remove a saved schedule.
    fn delete(&mut self, id: TimetableId) -> StoreResult<()>;
}

/// Owner registration and sign-in
pub trait CredentialStore {
    /// Register a new owner. Usernames are unique.
    fn register(&mut self, username: &str, email: Option<&str>, secret: &str)
        -> StoreResult<OwnerId>;

    /// Check a username and secret. Unknown users and wrong secrets fail
    /// with the same error.
    fn verify(&self, username: &str, secret: &str) -> StoreResult<OwnerId>;
}
