//! Domain service layer.
//!
//! `ShelterService` wraps the store with business-level behaviour: generated
//! identifiers and timestamps on creation, closed-enum validation of
//! caller-supplied status strings, and activity-log entries appended as a side
//! effect of notable mutations.

use chrono::Utc;
use haven_types::{LastInitial, NonEmptyText};
use std::str::FromStr;
use std::sync::Arc;

use crate::activity::{wall_clock_label, ActivityEntry};
use crate::bed::{Bed, BedStatus, NewBed};
use crate::error::{CoreError, CoreResult};
use crate::facility::{summarize_facilities, FacilitySummary};
use crate::id;
use crate::referral::{NewReferral, Referral, ReferralStatus};
use crate::stats::DashboardStats;
use crate::store::Store;

#[derive(Clone)]
pub struct ShelterService {
    store: Arc<Store>,
}

impl ShelterService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All referrals, most recently created first.
    pub fn list_referrals(&self) -> CoreResult<Vec<Referral>> {
        self.store.list_referrals()
    }

    /// Creates a referral from intake input.
    ///
    /// Required fields are validated here; everything else defaults. The
    /// intake is recorded in the activity log, but a log failure does not
    /// fail the intake itself — the referral is already persisted and the
    /// feed is advisory.
    pub fn create_referral(&self, input: NewReferral) -> CoreResult<Referral> {
        let first_name = NonEmptyText::new(&input.first_name)
            .map_err(|_| CoreError::InvalidInput("firstName cannot be empty".into()))?;
        let last_initial = LastInitial::new(&input.last_initial).map_err(|_| {
            CoreError::InvalidInput("lastInitial must be a single letter".into())
        })?;
        let referral_partner = NonEmptyText::new(&input.referral_partner)
            .map_err(|_| CoreError::InvalidInput("referralPartner cannot be empty".into()))?;

        let status = if input.status.is_empty() {
            ReferralStatus::New
        } else {
            ReferralStatus::from_str(&input.status)?
        };
        let date_referred = if input.date_referred.is_empty() {
            Utc::now().format("%Y-%m-%d").to_string()
        } else {
            input.date_referred
        };

        let now = Utc::now();
        let referral = Referral {
            id: id::referral_id(),
            first_name: first_name.as_str().to_owned(),
            last_initial: last_initial.to_string(),
            phone: input.phone,
            dob: input.dob,
            referral_partner: referral_partner.as_str().to_owned(),
            bed_type: input.bed_type,
            urgency: input.urgency,
            date_referred,
            status,
            waitlist_priority: input.waitlist_priority,
            staff_notes: input.staff_notes,
            partner_notes: input.partner_notes,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_referral(&referral)?;
        self.log_activity(
            "intake",
            format!(
                "New referral: {} {}. from {}",
                referral.first_name, referral.last_initial, referral.referral_partner
            ),
            "",
        );

        Ok(referral)
    }

    /// Moves a referral to a new status.
    ///
    /// The status string is validated against the closed enum before the
    /// store is touched; unknown ids surface as `CoreError::NotFound`.
    pub fn update_referral_status(&self, id: &str, status: &str) -> CoreResult<()> {
        let status = ReferralStatus::from_str(status)?;
        self.store.set_referral_status(id, status)
    }

    /// All beds, ordered by facility then bed number.
    pub fn list_beds(&self) -> CoreResult<Vec<Bed>> {
        self.store.list_beds()
    }

    /// Creates a single bed.
    pub fn create_bed(&self, input: NewBed) -> CoreResult<Bed> {
        let bed = self.build_bed(input)?;
        self.store.insert_bed(&bed)?;
        Ok(bed)
    }

    /// Replaces the entire bed collection.
    ///
    /// Destructive by design: the previous collection is wiped and `inputs`
    /// becomes the new set, atomically. The replacement is recorded in the
    /// activity log (non-fatal, as for intake).
    pub fn replace_beds(&self, inputs: Vec<NewBed>) -> CoreResult<Vec<Bed>> {
        let beds = inputs
            .into_iter()
            .map(|input| self.build_bed(input))
            .collect::<CoreResult<Vec<Bed>>>()?;

        self.store.replace_all_beds(&beds)?;
        self.log_activity("bed_update", format!("{} beds created", beds.len()), "");

        Ok(beds)
    }

    /// Updates a bed's status, validating the status string first.
    pub fn update_bed_status(&self, id: &str, status: &str) -> CoreResult<()> {
        let status = BedStatus::from_str(status)?;
        self.store.set_bed_status(id, status)
    }

    /// Deletes one bed.
    pub fn delete_bed(&self, id: &str) -> CoreResult<()> {
        self.store.delete_bed(id)
    }

    /// Per-facility summaries derived from the current bed collection.
    pub fn facilities(&self) -> CoreResult<Vec<FacilitySummary>> {
        Ok(summarize_facilities(&self.store.list_beds()?))
    }

    /// The most recent `limit` activity entries.
    pub fn recent_activity(&self, limit: u32) -> CoreResult<Vec<ActivityEntry>> {
        self.store.recent_activity(limit)
    }

    /// The dashboard aggregate snapshot.
    pub fn dashboard_stats(&self) -> CoreResult<DashboardStats> {
        self.store.dashboard_stats()
    }

    fn build_bed(&self, input: NewBed) -> CoreResult<Bed> {
        let bed_number = NonEmptyText::new(&input.bed_number)
            .map_err(|_| CoreError::InvalidInput("bedNumber cannot be empty".into()))?;
        let facility_id = NonEmptyText::new(&input.facility_id)
            .map_err(|_| CoreError::InvalidInput("facilityId cannot be empty".into()))?;

        let status = match input.status.as_deref() {
            None | Some("") => BedStatus::Available,
            Some(value) => BedStatus::from_str(value)?,
        };

        Ok(Bed {
            id: input.id.filter(|id| !id.is_empty()).unwrap_or_else(id::bed_id),
            bed_number: bed_number.as_str().to_owned(),
            facility_id: facility_id.as_str().to_owned(),
            facility_name: input.facility_name,
            status,
            occupant_name: String::new(),
            occupant_id: String::new(),
            check_in_date: String::new(),
            expected_checkout: String::new(),
            created_at: Utc::now(),
        })
    }

    fn log_activity(&self, kind: &str, message: String, facility: &str) {
        let now = Utc::now();
        let entry = ActivityEntry {
            id: id::activity_id(),
            kind: kind.into(),
            message,
            time: wall_clock_label(now),
            facility: facility.into(),
            created_at: now,
        };
        if let Err(err) = self.store.append_activity(&entry) {
            tracing::warn!("failed to append activity entry: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ShelterService {
        ShelterService::new(Arc::new(Store::open_in_memory().unwrap()))
    }

    fn intake(first: &str, initial: &str, partner: &str) -> NewReferral {
        NewReferral {
            first_name: first.into(),
            last_initial: initial.into(),
            referral_partner: partner.into(),
            ..NewReferral::default()
        }
    }

    #[test]
    fn test_create_referral_defaults_and_logs_intake() {
        let service = service();
        let referral = service
            .create_referral(intake("Jane", "D", "Self-Referral"))
            .unwrap();

        assert!(referral.id.starts_with("ref-"));
        assert_eq!(referral.status, ReferralStatus::New);
        assert_eq!(referral.created_at, referral.updated_at);
        assert!(!referral.date_referred.is_empty());

        let recent = service.recent_activity(20).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].kind, "intake");
        assert_eq!(recent[0].message, "New referral: Jane D. from Self-Referral");
    }

    #[test]
    fn test_create_referral_ids_unique() {
        let service = service();
        let a = service
            .create_referral(intake("Jane", "D", "Self-Referral"))
            .unwrap();
        let b = service
            .create_referral(intake("John", "S", "Street Outreach"))
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_create_referral_rejects_empty_partner() {
        let service = service();
        let err = service
            .create_referral(intake("Jane", "D", "  "))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("referralPartner")));
        // Nothing persisted.
        assert!(service.list_referrals().unwrap().is_empty());
        assert!(service.recent_activity(20).unwrap().is_empty());
    }

    #[test]
    fn test_create_referral_rejects_unknown_status() {
        let service = service();
        let mut input = intake("Jane", "D", "Self-Referral");
        input.status = "pending".into();
        assert!(matches!(
            service.create_referral(input),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_update_referral_status_validates_enum() {
        let service = service();
        let referral = service
            .create_referral(intake("Jane", "D", "Self-Referral"))
            .unwrap();

        assert!(matches!(
            service.update_referral_status(&referral.id, "archived"),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(matches!(
            service.update_referral_status("ref-missing", "placed"),
            Err(CoreError::NotFound { .. })
        ));

        service
            .update_referral_status(&referral.id, "placed")
            .unwrap();
        let stats = service.dashboard_stats().unwrap();
        assert_eq!(stats.pending_referrals, 0);
        assert_eq!(stats.placed_this_week, 1);
    }

    #[test]
    fn test_create_bed_defaults() {
        let service = service();
        let bed = service
            .create_bed(NewBed {
                id: None,
                bed_number: "W9".into(),
                facility_id: "workforce".into(),
                facility_name: "Workforce".into(),
                status: None,
            })
            .unwrap();

        assert!(bed.id.starts_with("bed-"));
        assert_eq!(bed.status, BedStatus::Available);
    }

    #[test]
    fn test_create_bed_keeps_supplied_id() {
        let service = service();
        let bed = service
            .create_bed(NewBed {
                id: Some("bed-w1".into()),
                bed_number: "W1".into(),
                facility_id: "workforce".into(),
                facility_name: "Workforce".into(),
                status: Some("reserved".into()),
            })
            .unwrap();
        assert_eq!(bed.id, "bed-w1");
        assert_eq!(bed.status, BedStatus::Reserved);
    }

    #[test]
    fn test_replace_beds_wipes_and_logs() {
        let service = service();
        for i in 0..5 {
            service
                .create_bed(NewBed {
                    id: Some(format!("old-{i}")),
                    bed_number: format!("O{i}"),
                    facility_id: "workforce".into(),
                    facility_name: "Workforce".into(),
                    status: None,
                })
                .unwrap();
        }

        let inputs: Vec<NewBed> = (1..=12)
            .map(|i| NewBed {
                id: Some(format!("bed-{i}")),
                bed_number: format!("W{i}"),
                facility_id: "workforce".into(),
                facility_name: "Workforce".into(),
                status: Some("available".into()),
            })
            .collect();
        let beds = service.replace_beds(inputs).unwrap();
        assert_eq!(beds.len(), 12);
        assert_eq!(service.list_beds().unwrap().len(), 12);

        let recent = service.recent_activity(20).unwrap();
        assert_eq!(recent[0].kind, "bed_update");
        assert_eq!(recent[0].message, "12 beds created");
    }

    #[test]
    fn test_facilities_derived_from_beds() {
        let service = service();
        service
            .create_bed(NewBed {
                id: None,
                bed_number: "W1".into(),
                facility_id: "workforce".into(),
                facility_name: "Workforce".into(),
                status: Some("occupied".into()),
            })
            .unwrap();
        service
            .create_bed(NewBed {
                id: None,
                bed_number: "W2".into(),
                facility_id: "workforce".into(),
                facility_name: "Workforce".into(),
                status: None,
            })
            .unwrap();

        let facilities = service.facilities().unwrap();
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].total_beds, 2);
        assert_eq!(facilities[0].occupied_beds, 1);
        assert!(facilities[0].accepting_referrals);
    }

    #[test]
    fn test_update_bed_status_validates_enum() {
        let service = service();
        let bed = service
            .create_bed(NewBed {
                id: None,
                bed_number: "W1".into(),
                facility_id: "workforce".into(),
                facility_name: "Workforce".into(),
                status: None,
            })
            .unwrap();

        assert!(matches!(
            service.update_bed_status(&bed.id, "broken"),
            Err(CoreError::InvalidInput(_))
        ));
        service.update_bed_status(&bed.id, "occupied").unwrap();
        assert_eq!(service.list_beds().unwrap()[0].status, BedStatus::Occupied);
    }
}
