//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//! - Fall back to fixed defaults for every unset or blank variable.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Default database file. The database name is fixed; only its directory moves.
pub const DEFAULT_DB_FILE: &str = "employee_tracker_db.sqlite3";

pub const ENV_DB_PATH: &str = "TRACKER_DB_PATH";
pub const ENV_LOG_DIR: &str = "TRACKER_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "TRACKER_LOG_LEVEL";
pub const ENV_SEED: &str = "TRACKER_SEED";

/// Server connection keys with no meaning for an embedded database file.
pub const IGNORED_SERVER_KEYS: [&str; 4] =
    ["MYSQL_HOST", "MYSQL_PORT", "MYSQL_USER", "MYSQL_PASSWORD"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub log_level: String,
    /// Populate sample rows when the database has no departments.
    pub seed_sample_data: bool,
    /// Entries of [`IGNORED_SERVER_KEYS`] that were set; reported at startup.
    pub ignored_keys: Vec<&'static str>,
}

impl TrackerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let base_dir = std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir());

        Self {
            db_path: value(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)),
            log_dir: value(ENV_LOG_DIR)
                .map(PathBuf::from)
                .map(|dir| if dir.is_absolute() { dir } else { base_dir.join(dir) })
                .unwrap_or_else(|| base_dir.join("logs")),
            log_level: value(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            seed_sample_data: value(ENV_SEED)
                .map(|raw| matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            ignored_keys: IGNORED_SERVER_KEYS
                .into_iter()
                .filter(|key| value(*key).is_some())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults_when_unset_or_blank() {
        let config = TrackerConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, "  ")]));

        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE));
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with("logs"));
        assert_eq!(config.log_level, default_log_level());
        assert!(!config.seed_sample_data);
        assert!(config.ignored_keys.is_empty());
    }

    #[test]
    fn records_server_keys_that_are_set() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            ("MYSQL_HOST", "db.internal"),
            ("MYSQL_PASSWORD", "secret"),
            ("MYSQL_PORT", " "),
        ]));

        assert_eq!(config.ignored_keys, vec!["MYSQL_HOST", "MYSQL_PASSWORD"]);
    }

    #[test]
    fn reads_overrides_and_absolutizes_log_dir() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, "/var/lib/tracker/roster.sqlite3"),
            (ENV_LOG_DIR, "tracker-logs"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_SEED, "TRUE"),
        ]));

        assert_eq!(
            config.db_path,
            PathBuf::from("/var/lib/tracker/roster.sqlite3")
        );
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with("tracker-logs"));
        assert_eq!(config.log_level, "warn");
        assert!(config.seed_sample_data);
    }
}
