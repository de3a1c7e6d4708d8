//! Record identifier generation.
//!
//! Identifiers are opaque but human-scannable: a short prefix naming the
//! record kind, the creation time in epoch milliseconds, and a random
//! 6-character suffix to break same-millisecond collisions.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

const SUFFIX_LEN: usize = 6;

pub fn referral_id() -> String {
    prefixed("ref")
}

pub fn bed_id() -> String {
    prefixed("bed")
}

pub fn activity_id() -> String {
    prefixed("act")
}

fn prefixed(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_format() {
        let id = referral_id();
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ref");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_ids_unique_across_calls() {
        let mut seen = HashSet::new();
        for _ in 0..200 {
            assert!(seen.insert(referral_id()));
        }
    }

    #[test]
    fn test_prefixes() {
        assert!(bed_id().starts_with("bed-"));
        assert!(activity_id().starts_with("act-"));
    }
}
