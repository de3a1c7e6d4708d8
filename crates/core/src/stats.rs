//! Dashboard statistics.
//!
//! The snapshot is computed on demand from the referral and bed tables; see
//! `Store::dashboard_stats` for the aggregation queries.

use serde::{Deserialize, Serialize};

/// Aggregate snapshot shown on the dashboard header cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_referrals: i64,
    /// Referrals still in `new` or `in_review`.
    pub pending_referrals: i64,
    /// Referrals moved to `placed` within the last 7 days (by update time).
    pub placed_this_week: i64,
    pub total_beds_available: i64,
    pub total_beds: i64,
    /// Occupied beds as a share of all beds, rounded to the nearest percent.
    pub occupancy_rate: i64,
    /// Placeholder until placement durations are tracked.
    pub avg_placement_time: String,
    pub waitlisted_clients: i64,
}

/// Occupancy as a rounded percentage; 0 when there are no beds.
pub fn occupancy_rate(occupied: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    ((occupied as f64 / total as f64) * 100.0).round() as i64
}
