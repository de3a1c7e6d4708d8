//! Bed records.
//!
//! A bed is one physical slot within a facility wing. Beds are created
//! individually or through a destructive bulk replace, change status over
//! time, and can be deleted individually.
//!
//! Status and occupant fields are independent: a bed can be `occupied` with no
//! occupant recorded. The occupant fields exist for the dashboard display
//! only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Closed set of bed states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BedStatus {
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl BedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BedStatus::Available => "available",
            BedStatus::Occupied => "occupied",
            BedStatus::Reserved => "reserved",
            BedStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for BedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BedStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(BedStatus::Available),
            "occupied" => Ok(BedStatus::Occupied),
            "reserved" => Ok(BedStatus::Reserved),
            "maintenance" => Ok(BedStatus::Maintenance),
            other => Err(CoreError::InvalidInput(format!(
                "unknown bed status: {other}"
            ))),
        }
    }
}

/// A persisted bed record.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    pub id: String,
    /// Display code shown on the bed board, e.g. `W3`.
    pub bed_number: String,
    pub facility_id: String,
    pub facility_name: String,
    pub status: BedStatus,
    pub occupant_name: String,
    pub occupant_id: String,
    pub check_in_date: String,
    pub expected_checkout: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a bed.
///
/// `id` is client-supplied for bulk/default sets and generated otherwise.
/// `status` defaults to `available` when absent.
#[derive(Debug, Clone, Default)]
pub struct NewBed {
    pub id: Option<String>,
    pub bed_number: String,
    pub facility_id: String,
    pub facility_name: String,
    pub status: Option<String>,
}
