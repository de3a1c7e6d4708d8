//! Aggregate statistics queries.

use chrono::{Duration, Utc};
use rusqlite::params;

use super::{to_stored_timestamp, Store};
use crate::error::CoreResult;
use crate::stats::{occupancy_rate, DashboardStats};

impl Store {
    /// Computes the dashboard snapshot.
    ///
    /// All counts are taken inside one transaction so the snapshot is
    /// consistent: a concurrent write lands entirely before or entirely after
    /// it.
    pub fn dashboard_stats(&self) -> CoreResult<DashboardStats> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let total_referrals: i64 =
            tx.query_row("SELECT COUNT(*) FROM referrals", [], |row| row.get(0))?;
        let pending_referrals: i64 = tx.query_row(
            "SELECT COUNT(*) FROM referrals WHERE status IN ('new', 'in_review')",
            [],
            |row| row.get(0),
        )?;
        let waitlisted_clients: i64 = tx.query_row(
            "SELECT COUNT(*) FROM referrals WHERE status = 'waitlisted'",
            [],
            |row| row.get(0),
        )?;

        let week_ago = to_stored_timestamp(Utc::now() - Duration::days(7));
        let placed_this_week: i64 = tx.query_row(
            "SELECT COUNT(*) FROM referrals WHERE status = 'placed' AND updated_at >= ?1",
            params![week_ago],
            |row| row.get(0),
        )?;

        let total_beds: i64 = tx.query_row("SELECT COUNT(*) FROM beds", [], |row| row.get(0))?;
        let total_beds_available: i64 = tx.query_row(
            "SELECT COUNT(*) FROM beds WHERE status = 'available'",
            [],
            |row| row.get(0),
        )?;
        let occupied_beds: i64 = tx.query_row(
            "SELECT COUNT(*) FROM beds WHERE status = 'occupied'",
            [],
            |row| row.get(0),
        )?;

        tx.commit()?;

        Ok(DashboardStats {
            total_referrals,
            pending_referrals,
            placed_this_week,
            total_beds_available,
            total_beds,
            occupancy_rate: occupancy_rate(occupied_beds, total_beds),
            // Placement durations are not tracked yet; mirror the dashboard's
            // placeholder behaviour.
            avg_placement_time: if total_referrals > 0 {
                "~3 days".into()
            } else {
                "--".into()
            },
            waitlisted_clients,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bed::{Bed, BedStatus};
    use crate::referral::{Referral, ReferralStatus};

    fn referral(id: &str, status: ReferralStatus) -> Referral {
        let now = Utc::now();
        Referral {
            id: id.into(),
            first_name: "Jane".into(),
            last_initial: "D".into(),
            phone: String::new(),
            dob: String::new(),
            referral_partner: "Self-Referral".into(),
            bed_type: String::new(),
            urgency: "medium".into(),
            date_referred: "2026-08-01".into(),
            status,
            waitlist_priority: 0,
            staff_notes: String::new(),
            partner_notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn bed(id: &str, status: BedStatus) -> Bed {
        Bed {
            id: id.into(),
            bed_number: id.to_uppercase(),
            facility_id: "workforce".into(),
            facility_name: "Workforce".into(),
            status,
            occupant_name: String::new(),
            occupant_id: String::new(),
            check_in_date: String::new(),
            expected_checkout: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_store_snapshot() {
        let store = Store::open_in_memory().unwrap();
        let stats = store.dashboard_stats().unwrap();
        assert_eq!(stats.total_referrals, 0);
        assert_eq!(stats.pending_referrals, 0);
        assert_eq!(stats.placed_this_week, 0);
        assert_eq!(stats.total_beds, 0);
        assert_eq!(stats.occupancy_rate, 0);
        assert_eq!(stats.avg_placement_time, "--");
    }

    #[test]
    fn test_referral_counts_by_status() {
        let store = Store::open_in_memory().unwrap();
        store.insert_referral(&referral("r1", ReferralStatus::New)).unwrap();
        store
            .insert_referral(&referral("r2", ReferralStatus::InReview))
            .unwrap();
        store
            .insert_referral(&referral("r3", ReferralStatus::Waitlisted))
            .unwrap();
        store
            .insert_referral(&referral("r4", ReferralStatus::Declined))
            .unwrap();

        let stats = store.dashboard_stats().unwrap();
        assert_eq!(stats.total_referrals, 4);
        assert_eq!(stats.pending_referrals, 2);
        assert_eq!(stats.waitlisted_clients, 1);
        assert_eq!(stats.avg_placement_time, "~3 days");
    }

    #[test]
    fn test_placed_this_week_uses_update_window() {
        let store = Store::open_in_memory().unwrap();

        // Placed just now: inside the 7-day window.
        store.insert_referral(&referral("r1", ReferralStatus::New)).unwrap();
        store
            .set_referral_status("r1", ReferralStatus::Placed)
            .unwrap();

        // Placed long ago: outside the window.
        let mut old = referral("r2", ReferralStatus::Placed);
        old.updated_at = Utc::now() - Duration::days(30);
        store.insert_referral(&old).unwrap();

        let stats = store.dashboard_stats().unwrap();
        assert_eq!(stats.placed_this_week, 1);
        // The freshly placed referral no longer counts as pending.
        assert_eq!(stats.pending_referrals, 0);
    }

    #[test]
    fn test_occupancy_rate_from_bed_counts() {
        let store = Store::open_in_memory().unwrap();
        store.insert_bed(&bed("w1", BedStatus::Occupied)).unwrap();
        store.insert_bed(&bed("w2", BedStatus::Occupied)).unwrap();
        store.insert_bed(&bed("w3", BedStatus::Available)).unwrap();

        let stats = store.dashboard_stats().unwrap();
        assert_eq!(stats.total_beds, 3);
        assert_eq!(stats.total_beds_available, 1);
        assert_eq!(stats.occupancy_rate, 67);
    }
}
