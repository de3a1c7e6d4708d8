//! Request and response payloads for the REST surface.
//!
//! Field names are camelCase on the wire. Request types default every field
//! so that "missing" and "empty" are indistinguishable to handlers, which
//! report required-field failures with explicit messages rather than serde
//! errors.

use haven_core::{ActivityEntry, Bed, DashboardStats, FacilitySummary, Referral};
use serde::{Deserialize, Serialize};

/// Generic failure payload: `{ "error": "<message>" }`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Generic acknowledgement payload: `{ "success": true }`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SuccessRes {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListReferralsRes {
    pub referrals: Vec<Referral>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateReferralRes {
    pub referral: Referral,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateReferralReq {
    pub first_name: String,
    pub last_initial: String,
    pub phone: String,
    pub dob: String,
    pub referral_partner: String,
    pub bed_type: String,
    pub urgency: String,
    pub date_referred: String,
    pub status: String,
    pub waitlist_priority: i64,
    pub staff_notes: String,
    pub partner_notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateReferralStatusReq {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListBedsRes {
    pub beds: Vec<Bed>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateBedRes {
    pub bed: Bed,
}

/// Body of `POST /beds`.
///
/// Two modes share the endpoint: a single create using the flat fields, and a
/// bulk replace-all when `bulk` is set and `beds` is supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBedReq {
    pub bulk: bool,
    pub beds: Option<Vec<BulkBedReq>>,
    pub id: String,
    pub bed_number: String,
    pub facility_id: String,
    pub facility_name: String,
    pub status: String,
}

/// One bed record within a bulk replace request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkBedReq {
    pub id: String,
    pub bed_number: String,
    pub facility_id: String,
    pub facility_name: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBedStatusReq {
    pub id: String,
    pub status: String,
}

/// Query parameters of `DELETE /beds`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct DeleteBedParams {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FacilitiesRes {
    pub facilities: Vec<FacilitySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatsRes {
    pub stats: DashboardStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ActivityRes {
    pub activities: Vec<ActivityEntry>,
}
