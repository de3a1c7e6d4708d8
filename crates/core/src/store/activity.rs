//! Activity log table operations.

use rusqlite::params;

use super::{parse_stored_timestamp, to_stored_timestamp, Store};
use crate::activity::ActivityEntry;
use crate::error::CoreResult;

impl Store {
    /// Appends one entry to the activity log.
    pub fn append_activity(&self, entry: &ActivityEntry) -> CoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO activity (id, type, message, time, facility, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.id,
                entry.kind,
                entry.message,
                entry.time,
                entry.facility,
                to_stored_timestamp(entry.created_at),
            ],
        )?;
        Ok(())
    }

    /// The most recent `limit` entries, newest first.
    pub fn recent_activity(&self, limit: u32) -> CoreResult<Vec<ActivityEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, type, message, time, facility, created_at FROM activity \
             ORDER BY created_at DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, kind, message, time, facility, created_at) = row?;
            entries.push(ActivityEntry {
                id,
                kind,
                message,
                time,
                facility,
                created_at: parse_stored_timestamp(&created_at)?,
            });
        }
        Ok(entries)
    }
}
