//! Referral table operations.

use chrono::Utc;
use rusqlite::params;
use std::str::FromStr;

use super::{parse_stored_timestamp, to_stored_timestamp, Store};
use crate::error::{CoreError, CoreResult};
use crate::referral::{Referral, ReferralStatus};

const REFERRAL_COLUMNS: &str = "id, first_name, last_initial, phone, dob, referral_partner, \
     bed_type, urgency, date_referred, status, waitlist_priority, staff_notes, partner_notes, \
     created_at, updated_at";

impl Store {
    /// All referrals, most recently created first.
    pub fn list_referrals(&self) -> CoreResult<Vec<Referral>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {REFERRAL_COLUMNS} FROM referrals ORDER BY created_at DESC"
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(ReferralRow {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_initial: row.get(2)?,
                phone: row.get(3)?,
                dob: row.get(4)?,
                referral_partner: row.get(5)?,
                bed_type: row.get(6)?,
                urgency: row.get(7)?,
                date_referred: row.get(8)?,
                status: row.get(9)?,
                waitlist_priority: row.get(10)?,
                staff_notes: row.get(11)?,
                partner_notes: row.get(12)?,
                created_at: row.get(13)?,
                updated_at: row.get(14)?,
            })
        })?;

        let mut referrals = Vec::new();
        for row in rows {
            referrals.push(referral_from_row(row?)?);
        }
        Ok(referrals)
    }

    /// Persists a fully-formed referral record.
    pub fn insert_referral(&self, referral: &Referral) -> CoreResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO referrals (id, first_name, last_initial, phone, dob, referral_partner, \
             bed_type, urgency, date_referred, status, waitlist_priority, staff_notes, \
             partner_notes, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                referral.id,
                referral.first_name,
                referral.last_initial,
                referral.phone,
                referral.dob,
                referral.referral_partner,
                referral.bed_type,
                referral.urgency,
                referral.date_referred,
                referral.status.as_str(),
                referral.waitlist_priority,
                referral.staff_notes,
                referral.partner_notes,
                to_stored_timestamp(referral.created_at),
                to_stored_timestamp(referral.updated_at),
            ],
        )?;
        Ok(())
    }

    /// Updates a referral's status and refreshes its update timestamp.
    ///
    /// Unknown ids surface as `CoreError::NotFound` rather than succeeding
    /// silently.
    pub fn set_referral_status(&self, id: &str, status: ReferralStatus) -> CoreResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE referrals SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_str(), to_stored_timestamp(Utc::now()), id],
        )?;
        if changed == 0 {
            return Err(CoreError::NotFound {
                resource: "referral",
                id: id.to_owned(),
            });
        }
        Ok(())
    }
}

// Internal row type; raw column values before domain conversion.
struct ReferralRow {
    id: String,
    first_name: String,
    last_initial: String,
    phone: String,
    dob: String,
    referral_partner: String,
    bed_type: String,
    urgency: String,
    date_referred: String,
    status: String,
    waitlist_priority: i64,
    staff_notes: String,
    partner_notes: String,
    created_at: String,
    updated_at: String,
}

fn referral_from_row(row: ReferralRow) -> CoreResult<Referral> {
    Ok(Referral {
        id: row.id,
        first_name: row.first_name,
        last_initial: row.last_initial,
        phone: row.phone,
        dob: row.dob,
        referral_partner: row.referral_partner,
        bed_type: row.bed_type,
        urgency: row.urgency,
        date_referred: row.date_referred,
        status: ReferralStatus::from_str(&row.status)?,
        waitlist_priority: row.waitlist_priority,
        staff_notes: row.staff_notes,
        partner_notes: row.partner_notes,
        created_at: parse_stored_timestamp(&row.created_at)?,
        updated_at: parse_stored_timestamp(&row.updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn referral(id: &str, created_offset_ms: i64) -> Referral {
        let at = Utc::now() + Duration::milliseconds(created_offset_ms);
        Referral {
            id: id.into(),
            first_name: "Jane".into(),
            last_initial: "D".into(),
            phone: String::new(),
            dob: String::new(),
            referral_partner: "Self-Referral".into(),
            bed_type: String::new(),
            urgency: "high".into(),
            date_referred: "2026-08-01".into(),
            status: ReferralStatus::New,
            waitlist_priority: 0,
            staff_notes: String::new(),
            partner_notes: String::new(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_insert_and_list_round_trip() {
        let store = Store::open_in_memory().unwrap();
        store.insert_referral(&referral("ref-1-aaaaaa", 0)).unwrap();

        let listed = store.list_referrals().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "ref-1-aaaaaa");
        assert_eq!(listed[0].first_name, "Jane");
        assert_eq!(listed[0].status, ReferralStatus::New);
        assert_eq!(listed[0].created_at, listed[0].updated_at);
    }

    #[test]
    fn test_list_orders_newest_first() {
        let store = Store::open_in_memory().unwrap();
        store.insert_referral(&referral("ref-1-aaaaaa", 0)).unwrap();
        store
            .insert_referral(&referral("ref-2-bbbbbb", 1000))
            .unwrap();
        store
            .insert_referral(&referral("ref-3-cccccc", 500))
            .unwrap();

        let ids: Vec<String> = store
            .list_referrals()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["ref-2-bbbbbb", "ref-3-cccccc", "ref-1-aaaaaa"]);
    }

    #[test]
    fn test_set_status_updates_record_and_timestamp() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_referral(&referral("ref-1-aaaaaa", -5000))
            .unwrap();

        store
            .set_referral_status("ref-1-aaaaaa", ReferralStatus::Placed)
            .unwrap();

        let listed = store.list_referrals().unwrap();
        assert_eq!(listed[0].status, ReferralStatus::Placed);
        assert!(listed[0].updated_at > listed[0].created_at);
    }

    #[test]
    fn test_set_status_unknown_id_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        let err = store
            .set_referral_status("ref-missing", ReferralStatus::Placed)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotFound {
                resource: "referral",
                ..
            }
        ));
    }
}
