//! Append-only activity log.
//!
//! Every notable mutation (referral intake, bulk bed creation) appends one
//! entry here. Entries are never updated or deleted; the dashboard reads them
//! newest-first with a cap.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// One activity feed entry.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    /// Type tag, e.g. `intake` or `bed_update`.
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Pre-formatted wall-clock label, e.g. `3:42 PM`.
    pub time: String,
    pub facility: String,
    pub created_at: DateTime<Utc>,
}

/// Formats the feed's wall-clock label for the given instant, in local time.
pub fn wall_clock_label(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_label_has_no_leading_zero() {
        let label = wall_clock_label(Utc::now());
        assert!(!label.starts_with('0'));
        assert!(label.ends_with("AM") || label.ends_with("PM"));
    }

    #[test]
    fn test_entry_serializes_type_field() {
        let entry = ActivityEntry {
            id: "act-1-abc123".into(),
            kind: "intake".into(),
            message: "New referral: Jane D. from Self-Referral".into(),
            time: "3:42 PM".into(),
            facility: String::new(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "intake");
        assert!(json.get("kind").is_none());
    }
}
