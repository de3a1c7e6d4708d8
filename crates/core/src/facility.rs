//! Derived facility summaries.
//!
//! Facilities are not persisted. They are aggregated at read time from the
//! bed collection, grouped by `facility_id`. This is the single place that
//! derivation lives; both the REST surface and any UI consume the same
//! numbers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bed::{Bed, BedStatus};

/// Aggregated per-facility bed counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacilitySummary {
    pub id: String,
    pub name: String,
    pub total_beds: i64,
    pub available_beds: i64,
    pub occupied_beds: i64,
    pub reserved_beds: i64,
    pub maintenance_beds: i64,
    /// True iff at least one bed is available.
    pub accepting_referrals: bool,
}

/// Groups beds by facility and counts them by status.
///
/// Facilities are returned ordered by id; the display name is taken from the
/// first bed seen for each facility.
pub fn summarize_facilities(beds: &[Bed]) -> Vec<FacilitySummary> {
    let mut by_facility: BTreeMap<&str, FacilitySummary> = BTreeMap::new();

    for bed in beds {
        let summary = by_facility
            .entry(bed.facility_id.as_str())
            .or_insert_with(|| FacilitySummary {
                id: bed.facility_id.clone(),
                name: bed.facility_name.clone(),
                total_beds: 0,
                available_beds: 0,
                occupied_beds: 0,
                reserved_beds: 0,
                maintenance_beds: 0,
                accepting_referrals: false,
            });

        summary.total_beds += 1;
        match bed.status {
            BedStatus::Available => summary.available_beds += 1,
            BedStatus::Occupied => summary.occupied_beds += 1,
            BedStatus::Reserved => summary.reserved_beds += 1,
            BedStatus::Maintenance => summary.maintenance_beds += 1,
        }
    }

    let mut summaries: Vec<FacilitySummary> = by_facility.into_values().collect();
    for summary in &mut summaries {
        summary.accepting_referrals = summary.available_beds > 0;
    }
    summaries
}
