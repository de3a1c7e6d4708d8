//! Client referral records.
//!
//! A referral is one client's request for shelter placement. Referrals are
//! created via intake, mutated only through explicit status updates, and never
//! deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Closed set of referral workflow states.
///
/// There is deliberately no transition graph: staff may move a referral from
/// any status to any other. Unrecognized strings are rejected at the service
/// boundary rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReferralStatus {
    New,
    InReview,
    Accepted,
    Placed,
    Waitlisted,
    Declined,
    Discharged,
}

impl ReferralStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferralStatus::New => "new",
            ReferralStatus::InReview => "in_review",
            ReferralStatus::Accepted => "accepted",
            ReferralStatus::Placed => "placed",
            ReferralStatus::Waitlisted => "waitlisted",
            ReferralStatus::Declined => "declined",
            ReferralStatus::Discharged => "discharged",
        }
    }
}

impl fmt::Display for ReferralStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferralStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ReferralStatus::New),
            "in_review" => Ok(ReferralStatus::InReview),
            "accepted" => Ok(ReferralStatus::Accepted),
            "placed" => Ok(ReferralStatus::Placed),
            "waitlisted" => Ok(ReferralStatus::Waitlisted),
            "declined" => Ok(ReferralStatus::Declined),
            "discharged" => Ok(ReferralStatus::Discharged),
            other => Err(CoreError::InvalidInput(format!(
                "unknown referral status: {other}"
            ))),
        }
    }
}

/// A persisted referral record.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: String,
    pub first_name: String,
    pub last_initial: String,
    pub phone: String,
    pub dob: String,
    pub referral_partner: String,
    pub bed_type: String,
    pub urgency: String,
    pub date_referred: String,
    pub status: ReferralStatus,
    pub waitlist_priority: i64,
    pub staff_notes: String,
    pub partner_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Intake input for a new referral.
///
/// `first_name`, `last_initial` and `referral_partner` must be non-empty; all
/// other fields have defaults applied by the service layer.
#[derive(Debug, Clone, Default)]
pub struct NewReferral {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            ReferralStatus::New,
            ReferralStatus::InReview,
            ReferralStatus::Accepted,
            ReferralStatus::Placed,
            ReferralStatus::Waitlisted,
            ReferralStatus::Declined,
            ReferralStatus::Discharged,
        ] {
            assert_eq!(status.as_str().parse::<ReferralStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_unknown_strings() {
        assert!("pending".parse::<ReferralStatus>().is_err());
        assert!("PLACED".parse::<ReferralStatus>().is_err());
        assert!("".parse::<ReferralStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ReferralStatus::InReview).unwrap();
        assert_eq!(json, "\"in_review\"");
    }
}
