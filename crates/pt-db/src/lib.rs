//! Storage layer for the pointage time tracker.
//!
//! Provides the on-device key-value collaborator behind
//! [`pt_core::TimeTrackingStore`], backed by a single `rusqlite` table.
//!
//! # Thread Safety
//!
//! [`Database`] wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! The store is single-threaded, so one `Database` per process is enough.
//!
//! # Schema
//!
//! One table, `kv`, holding opaque string values by key. `updated_at` is an
//! ISO 8601 UTC timestamp (e.g. `2025-03-12T10:00:00Z`) of the last write.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use pt_core::KeyValueStore;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Returns the stored value for `key`.
    pub fn get_value(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Inserts or replaces the value for `key`.
    pub fn set_value(&self, key: &str, value: &str) -> Result<(), DbError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn.execute(
            "
            INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, now],
        )?;
        Ok(())
    }

    /// Deletes `key`. Missing keys are not an error.
    pub fn remove_value(&self, key: &str) -> Result<(), DbError> {
        let removed = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?", params![key])?;
        tracing::debug!(key, removed, "removed stored value");
        Ok(())
    }

    /// When `key` was last written, as an ISO 8601 timestamp.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>, DbError> {
        let updated_at = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated_at)
    }
}

impl KeyValueStore for Database {
    type Error = DbError;

    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        self.get_value(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        self.set_value(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), DbError> {
        self.remove_value(key)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};
    use pt_core::{
        EmployeeStatus, ManualClock, ManualEntry, NewEmployee, STORAGE_KEY, TimeTrackingStore,
        TrackingState,
    };

    use super::*;

    fn start_time() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 12, 10, 0, 0)
            .unwrap()
    }

    #[test]
    fn get_missing_key_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_value("nope").unwrap(), None);
        assert_eq!(db.updated_at("nope").unwrap(), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let db = Database::open_in_memory().unwrap();
        db.set_value("k", "one").unwrap();
        db.set_value("k", "two").unwrap();

        assert_eq!(db.get_value("k").unwrap().as_deref(), Some("two"));
        let updated_at = db.updated_at("k").unwrap().unwrap();
        assert!(DateTime::parse_from_rfc3339(&updated_at).is_ok());
    }

    #[test]
    fn remove_deletes_and_tolerates_missing() {
        let mut db = Database::open_in_memory().unwrap();
        db.set("k", "v").unwrap();
        db.remove("k").unwrap();
        db.remove("k").unwrap();
        assert_eq!(db.get("k").unwrap(), None);
    }

    #[test]
    fn init_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("pointage.db");
        {
            let db = Database::open(&path).unwrap();
            db.set_value("k", "v").unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_value("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn store_state_survives_reopen_on_disk() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("pointage.db");
        let clock = ManualClock::new(start_time());

        let expected = {
            let db = Database::open(&path).unwrap();
            let mut store = TimeTrackingStore::open(db, clock.clone());
            let id = store.add_employee(NewEmployee {
                name: "Ana".to_string(),
                role: "Technician".to_string(),
                email: String::new(),
                hourly_rate: 20.0,
                status: EmployeeStatus::Active,
            });
            let start = store.now() - Duration::hours(3);
            store.add_manual_entry(ManualEntry {
                employee_id: id.clone(),
                project: "Support".to_string(),
                start,
                end: start + Duration::minutes(150),
                notes: Some("Réseau".to_string()),
            });
            store.clock_in(id, "Support", None);
            store.state().clone()
        };

        let db = Database::open(&path).unwrap();
        let raw = db.get_value(STORAGE_KEY).unwrap().unwrap();
        let stored = TrackingState::from_json(&raw, TrackingState::default()).unwrap();
        assert_eq!(stored, expected);

        let reopened = TimeTrackingStore::open(db, clock);
        assert_eq!(reopened.state(), &expected);
        assert_eq!(reopened.employees().len(), 4);
    }

    #[test]
    fn corrupt_row_falls_back_to_seed() {
        let db = Database::open_in_memory().unwrap();
        db.set_value(STORAGE_KEY, "[[[").unwrap();

        let store = TimeTrackingStore::open(db, ManualClock::new(start_time()));
        assert_eq!(store.employees().len(), 3);
        assert_eq!(store.entries().len(), 3);

        let repaired = store.storage().get_value(STORAGE_KEY).unwrap().unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&repaired).is_ok());
    }
}
