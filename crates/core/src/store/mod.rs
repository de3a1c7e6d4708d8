//! SQLite persistence store.
//!
//! `Store` owns a single connection behind a mutex: the system is
//! single-process with short synchronous reads and writes, so one connection
//! is the whole pool. The handle has an explicit lifecycle — opened once at
//! startup and passed into the service layer, never held in process-global
//! state.
//!
//! Schema creation is idempotent at open. Multi-statement mutations (the bulk
//! bed replace) and the statistics snapshot run inside a single transaction.

mod activity;
mod beds;
mod referrals;
mod stats;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::error::{CoreError, CoreResult};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS referrals (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_initial TEXT NOT NULL,
    phone TEXT NOT NULL DEFAULT '',
    dob TEXT NOT NULL DEFAULT '',
    referral_partner TEXT NOT NULL,
    bed_type TEXT NOT NULL DEFAULT '',
    urgency TEXT NOT NULL DEFAULT '',
    date_referred TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'new',
    waitlist_priority INTEGER NOT NULL DEFAULT 0,
    staff_notes TEXT NOT NULL DEFAULT '',
    partner_notes TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS beds (
    id TEXT PRIMARY KEY,
    bed_number TEXT NOT NULL,
    facility_id TEXT NOT NULL,
    facility_name TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'available',
    occupant_name TEXT NOT NULL DEFAULT '',
    occupant_id TEXT NOT NULL DEFAULT '',
    check_in_date TEXT NOT NULL DEFAULT '',
    expected_checkout TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS activity (
    id TEXT PRIMARY KEY,
    type TEXT NOT NULL,
    message TEXT NOT NULL,
    time TEXT NOT NULL,
    facility TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);
";

/// Handle to the shelter database.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (creating if needed) the database at `path` and ensures the
    /// schema exists.
    pub fn open(path: &Path) -> CoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::init(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a fresh in-memory database. Intended for tests.
    pub fn open_in_memory() -> CoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init(conn: &Connection) -> CoreResult<()> {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn conn(&self) -> CoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| CoreError::LockPoisoned)
    }
}

/// Serializes a timestamp for storage.
///
/// All stored timestamps use the same fixed-width RFC 3339 form (UTC,
/// millisecond precision, `Z` suffix) so that SQL string comparison orders
/// them chronologically.
pub(crate) fn to_stored_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_stored_timestamp(value: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| CoreError::InvalidTimestamp(value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_is_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelter.db");

        {
            let store = Store::open(&path).unwrap();
            assert!(store.list_referrals().unwrap().is_empty());
        }
        // Reopening must not fail on the existing schema.
        let store = Store::open(&path).unwrap();
        assert!(store.list_beds().unwrap().is_empty());
    }

    #[test]
    fn test_stored_timestamps_order_lexicographically() {
        let earlier = Utc::now();
        let later = earlier + chrono::Duration::milliseconds(5);
        assert!(to_stored_timestamp(earlier) < to_stored_timestamp(later));
    }

    #[test]
    fn test_stored_timestamp_round_trip() {
        let now = Utc::now();
        let parsed = parse_stored_timestamp(&to_stored_timestamp(now)).unwrap();
        assert_eq!(parsed.timestamp_millis(), now.timestamp_millis());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_stored_timestamp("yesterday"),
            Err(CoreError::InvalidTimestamp(_))
        ));
    }
}
