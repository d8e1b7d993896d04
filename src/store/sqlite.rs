//! SQLite store backend.
//!
//! One database file with two tables: `users` (salted secret hashes) and
//! `timetables` (schedules serialized as JSON, keyed by owner).

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::calendar::resolver::ScheduleResult;
use crate::store::credentials::{SecretHash, DEFAULT_ITERATIONS};
use crate::store::{
    CredentialStore, OwnerId, StoreError, StoreResult, TimetableId, TimetableMeta, TimetableStore,
};

/// Timetable and credential store over a single SQLite database.
pub struct SqliteStore {
    conn: Connection,
    iterations: u32,
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl SqliteStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::init(Connection::open(path)?)
    }

    /// A private in-memory database, dropped with the store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE IF NOT EXISTS users (
                 id          INTEGER PRIMARY KEY AUTOINCREMENT,
                 username    TEXT    NOT NULL UNIQUE,
                 email       TEXT,
                 salt        BLOB    NOT NULL,
                 secret_hash BLOB    NOT NULL,
                 iterations  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS timetables (
                 id         INTEGER PRIMARY KEY AUTOINCREMENT,
                 user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                 name       TEXT    NOT NULL,
                 data       TEXT    NOT NULL,
                 created_at TEXT    NOT NULL
             );",
        )?;

        Ok(Self {
            conn,
            iterations: DEFAULT_ITERATIONS,
        })
    }

    /// Use a different PBKDF2 work factor for newly registered owners.
    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }
}

impl TimetableStore for SqliteStore {
    fn create(
        &mut self,
        owner: OwnerId,
        name: &str,
        schedule: &ScheduleResult,
    ) -> StoreResult<TimetableId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Invalid(
                "timetable name cannot be empty".to_string(),
            ));
        }

        let data = serde_json::to_string(schedule)?;
        let created_at = Utc::now().to_rfc3339();
        match self.conn.execute(
            "INSERT INTO timetables (user_id, name, data, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![owner, name, data, created_at],
        ) {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(e) if is_constraint_violation(&e) => Err(StoreError::UnknownOwner(owner)),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, owner: OwnerId) -> StoreResult<Vec<TimetableMeta>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, created_at FROM timetables WHERE user_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map([owner], |row| {
                Ok((
                    row.get::<_, TimetableId>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, created_at)| {
                Ok(TimetableMeta {
                    id,
                    name,
                    created_at: DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc),
                })
            })
            .collect()
    }

    fn get(&self, id: TimetableId) -> StoreResult<ScheduleResult> {
        let data: String = self
            .conn
            .query_row("SELECT data FROM timetables WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or(StoreError::NotFound(id))?;
        Ok(serde_json::from_str(&data)?)
    }

    fn delete(&mut self, id: TimetableId) -> StoreResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM timetables WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

impl CredentialStore for SqliteStore {
    fn register(
        &mut self,
        username: &str,
        email: Option<&str>,
        secret: &str,
    ) -> StoreResult<OwnerId> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::Invalid("username cannot be empty".to_string()));
        }
        if secret.is_empty() {
            return Err(StoreError::Invalid("password cannot be empty".to_string()));
        }

        let hashed = SecretHash::new(secret, self.iterations);
        match self.conn.execute(
            "INSERT INTO users (username, email, salt, secret_hash, iterations) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![username, email, hashed.salt, hashed.hash, hashed.iterations],
        ) {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(e) if is_constraint_violation(&e) => {
                Err(StoreError::DuplicateUser(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn verify(&self, username: &str, secret: &str) -> StoreResult<OwnerId> {
        let stored = self
            .conn
            .query_row(
                "SELECT id, salt, secret_hash, iterations FROM users WHERE username = ?1",
                [username.trim()],
                |row| {
                    Ok((
                        row.get::<_, OwnerId>(0)?,
                        SecretHash {
                            salt: row.get(1)?,
                            hash: row.get(2)?,
                            iterations: row.get(3)?,
                        },
                    ))
                },
            )
            .optional()?;

        match stored {
            Some((id, hashed)) if hashed.verify(secret) => Ok(id),
            Some(_) => Err(StoreError::InvalidCredentials),
            None => {
                // Same work as a real check so unknown users are not faster.
                let _ = SecretHash::new(secret, self.iterations);
                Err(StoreError::InvalidCredentials)
            }
        }
    }
}
