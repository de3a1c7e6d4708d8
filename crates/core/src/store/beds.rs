//! Bed table operations.

use rusqlite::params;
use std::str::FromStr;

use super::{parse_stored_timestamp, to_stored_timestamp, Store};
use crate::bed::{Bed, BedStatus};
use crate::error::{CoreError, CoreResult};

const BED_COLUMNS: &str = "id, bed_number, facility_id, facility_name, status, occupant_name, \
     occupant_id, check_in_date, expected_checkout, created_at";

const INSERT_BED: &str = "INSERT INTO beds (id, bed_number, facility_id, facility_name, status, \
     occupant_name, occupant_id, check_in_date, expected_checkout, created_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

impl Store {
    /// All beds, ordered by facility then bed number.
    pub fn list_beds(&self) -> CoreResult<Vec<Bed>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {BED_COLUMNS} FROM beds ORDER BY facility_id, bed_number"
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(BedRow {
                id: row.get(0)?,
                bed_number: row.get(1)?,
                facility_id: row.get(2)?,
                facility_name: row.get(3)?,
                status: row.get(4)?,
                occupant_name: row.get(5)?,
                occupant_id: row.get(6)?,
                check_in_date: row.get(7)?,
                expected_checkout: row.get(8)?,
                created_at: row.get(9)?,
            })
        })?;

        let mut beds = Vec::new();
        for row in rows {
            beds.push(bed_from_row(row?)?);
        }
        Ok(beds)
    }

    /// Persists a single bed record.
    pub fn insert_bed(&self, bed: &Bed) -> CoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            INSERT_BED,
            params![
                bed.id,
                bed.bed_number,
                bed.facility_id,
                bed.facility_name,
                bed.status.as_str(),
                bed.occupant_name,
                bed.occupant_id,
                bed.check_in_date,
                bed.expected_checkout,
                to_stored_timestamp(bed.created_at),
            ],
        )?;
        Ok(())
    }

    /// Replaces the entire bed collection with `beds`.
    ///
    /// The wipe and the inserts run in one transaction, so an interruption
    /// leaves the previous collection intact rather than an empty table.
    pub fn replace_all_beds(&self, beds: &[Bed]) -> CoreResult<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM beds", [])?;
        {
            let mut stmt = tx.prepare(INSERT_BED)?;
            for bed in beds {
                stmt.execute(params![
                    bed.id,
                    bed.bed_number,
                    bed.facility_id,
                    bed.facility_name,
                    bed.status.as_str(),
                    bed.occupant_name,
                    bed.occupant_id,
                    bed.check_in_date,
                    bed.expected_checkout,
                    to_stored_timestamp(bed.created_at),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Updates a bed's status; unknown ids surface as `CoreError::NotFound`.
    pub fn set_bed_status(&self, id: &str, status: BedStatus) -> CoreResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE beds SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        if changed == 0 {
            return Err(CoreError::NotFound {
                resource: "bed",
                id: id.to_owned(),
            });
        }
        Ok(())
    }

    /// Deletes one bed; unknown ids surface as `CoreError::NotFound`.
    pub fn delete_bed(&self, id: &str) -> CoreResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM beds WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CoreError::NotFound {
                resource: "bed",
                id: id.to_owned(),
            });
        }
        Ok(())
    }

    /// Removes every bed, returning how many were deleted.
    pub fn delete_all_beds(&self) -> CoreResult<usize> {
        let conn = self.conn()?;
        Ok(conn.execute("DELETE FROM beds", [])?)
    }
}

// Internal row type; raw column values before domain conversion.
struct BedRow {
    id: String,
    bed_number: String,
    facility_id: String,
    facility_name: String,
    status: String,
    occupant_name: String,
    occupant_id: String,
    check_in_date: String,
    expected_checkout: String,
    created_at: String,
}

fn bed_from_row(row: BedRow) -> CoreResult<Bed> {
    Ok(Bed {
        id: row.id,
        bed_number: row.bed_number,
        facility_id: row.facility_id,
        facility_name: row.facility_name,
        status: BedStatus::from_str(&row.status)?,
        occupant_name: row.occupant_name,
        occupant_id: row.occupant_id,
        check_in_date: row.check_in_date,
        expected_checkout: row.expected_checkout,
        created_at: parse_stored_timestamp(&row.created_at)?,
    })
}
