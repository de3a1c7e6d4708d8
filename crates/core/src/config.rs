//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core
//! services. The intent is to avoid reading process-wide environment variables
//! during request handling, and to keep the store behind an explicit handle
//! with a known lifecycle rather than a lazily-created global.

use std::path::{Path, PathBuf};

/// Default location of the SQLite database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "data/shelter.db";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    db_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig` with an explicit database path.
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Resolve the database path from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, the default path is used.
pub fn db_path_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_defaults_when_unset() {
        assert_eq!(db_path_from_env_value(None), PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(
            db_path_from_env_value(Some("  ".into())),
            PathBuf::from(DEFAULT_DB_PATH)
        );
    }

    #[test]
    fn test_db_path_uses_env_value() {
        assert_eq!(
            db_path_from_env_value(Some("/tmp/haven.db".into())),
            PathBuf::from("/tmp/haven.db")
        );
    }
}
