//! # Application Configuration
//!
//! Stores the configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--offline`, `order --restaurant`, ...)
//! 2. Environment variables (`FRIDGE_*`)
//! 3. Config file (`config.toml`)
//! 4. Defaults (this file)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Config file location                                                   │
//! │     ~/.config/manager/config.toml                        (Linux)        │
//! │     ~/Library/Application Support/com.fridge.manager/config.toml (macOS)│
//! │     %APPDATA%\fridge\manager\config\config.toml          (Windows)      │
//! │  or wherever `--config` points.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{ProjectDirs, UserDirs};
use fridge_core::DEFAULT_RESTAURANT;
use fridge_db::{AuthMode, ConnectionProfile};
use fridge_export::DEFAULT_PREFIX;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// What to do when the database answers but has no `products` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSchemaPolicy {
    /// Close the connection and run on seed data.
    #[default]
    Local,
    /// Create the table, seed it, and use the database.
    Bootstrap,
}

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Tried in order; the first live one wins.
    #[serde(default = "ConnectionProfile::defaults")]
    pub profiles: Vec<ConnectionProfile>,

    #[serde(default)]
    pub missing_schema: MissingSchemaPolicy,

    /// Overrides every profile's own timeout when set.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            profiles: ConnectionProfile::defaults(),
            missing_schema: MissingSchemaPolicy::Local,
            connect_timeout_secs: None,
        }
    }
}

/// `[reports]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Where supplier orders are saved. Defaults to the Documents folder.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default = "default_prefix")]
    pub file_prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            output_dir: None,
            file_prefix: default_prefix(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete application configuration.
///
/// ## Example Config File
/// ```toml
/// restaurant = "Gourmet"
/// offline = false
///
/// [database]
/// missing_schema = "local"      # or "bootstrap"
/// connect_timeout_secs = 3
///
/// [[database.profiles]]
/// name = "tcp"
/// auth_mode = "password"
/// host = "localhost"
/// port = 5432
/// user = "postgres"
/// password = "123"
///
/// [reports]
/// output_dir = "/srv/orders"
/// file_prefix = "supplier_order"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Restaurant name printed on supplier orders.
    #[serde(default = "default_restaurant")]
    pub restaurant: String,

    /// Skip the database entirely and run on seed data.
    #[serde(default)]
    pub offline: bool,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub reports: ReportSettings,
}

fn default_restaurant() -> String {
    DEFAULT_RESTAURANT.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            restaurant: default_restaurant(),
            offline: false,
            database: DatabaseSettings::default(),
            reports: ReportSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist; the default location is
    /// optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.restaurant.trim().is_empty() {
            return Err(ConfigError::Invalid("restaurant must not be empty".into()));
        }

        for profile in &self.database.profiles {
            if profile.name.trim().is_empty() {
                return Err(ConfigError::Invalid("every profile needs a name".into()));
            }
            if profile.connect_timeout.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "profile '{}': connect timeout must be greater than 0",
                    profile.name
                )));
            }
        }

        if self.database.connect_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.reports.file_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("reports.file_prefix must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `FRIDGE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("FRIDGE_RESTAURANT") {
            debug!(restaurant = %name, "Overriding restaurant from environment");
            self.restaurant = name;
        }

        if let Some(dir) = var("FRIDGE_REPORT_DIR") {
            self.reports.output_dir = Some(PathBuf::from(dir));
        }

        if let Some(secs) = var("FRIDGE_CONNECT_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.database.connect_timeout_secs = Some(s),
                Err(_) => warn!(value = %secs, "Ignoring invalid FRIDGE_CONNECT_TIMEOUT_SECS"),
            }
        }

        if let Some(password) = var("FRIDGE_DB_PASSWORD") {
            for profile in &mut self.database.profiles {
                if profile.auth_mode != AuthMode::Peer {
                    profile.password = Some(password.clone());
                }
            }
        }

        if let Some(offline) = var("FRIDGE_OFFLINE") {
            self.offline = matches!(offline.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "fridge", "manager").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Profiles in attempt order with the global timeout applied.
    pub fn profiles(&self) -> Vec<ConnectionProfile> {
        let timeout = self.database.connect_timeout_secs.map(Duration::from_secs);
        self.database
            .profiles
            .iter()
            .cloned()
            .map(|p| match timeout {
                Some(t) => p.with_timeout(t),
                None => p,
            })
            .collect()
    }

    /// Directory supplier orders are saved to.
    pub fn report_dir(&self) -> PathBuf {
        self.reports
            .output_dir
            .clone()
            .unwrap_or_else(default_report_dir)
    }
}

/// Documents folder, then the app data folder, then the working directory.
pub fn default_report_dir() -> PathBuf {
    if let Some(docs) = UserDirs::new().and_then(|d| d.document_dir().map(Path::to_path_buf)) {
        return docs;
    }
    if let Some(dirs) = ProjectDirs::from("com", "fridge", "manager") {
        return dirs.data_dir().to_path_buf();
    }
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.restaurant, "Gourmet");
        assert!(!config.offline);
        assert_eq!(config.database.profiles.len(), 3);
        assert_eq!(config.database.missing_schema, MissingSchemaPolicy::Local);
        assert_eq!(config.reports.file_prefix, "supplier_order");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.restaurant, "Gourmet");
        assert_eq!(config.database.profiles, ConnectionProfile::defaults());
    }

    #[test]
    fn test_parse_full_file() {
        let config = AppConfig::from_toml_str(
            r#"
            restaurant = "Bistro"

            [database]
            missing_schema = "bootstrap"
            connect_timeout_secs = 5

            [[database.profiles]]
            name = "tcp"
            auth_mode = "password"
            host = "db.local"
            user = "chef"
            password = "secret"

            [reports]
            output_dir = "/srv/orders"
            file_prefix = "order"
            "#,
        )
        .unwrap();

        assert_eq!(config.restaurant, "Bistro");
        assert_eq!(config.database.missing_schema, MissingSchemaPolicy::Bootstrap);
        assert_eq!(config.database.profiles.len(), 1);

        let profile = &config.profiles()[0];
        assert_eq!(profile.host, "db.local");
        assert_eq!(profile.port, 5432);
        assert_eq!(profile.database, "fridgemanager");
        assert_eq!(profile.connect_timeout, Duration::from_secs(5));

        assert_eq!(config.report_dir(), PathBuf::from("/srv/orders"));
        assert_eq!(config.reports.file_prefix, "order");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[
            ("FRIDGE_RESTAURANT", "Trattoria"),
            ("FRIDGE_REPORT_DIR", "/tmp/orders"),
            ("FRIDGE_CONNECT_TIMEOUT_SECS", "1"),
            ("FRIDGE_DB_PASSWORD", "hunter2"),
            ("FRIDGE_OFFLINE", "true"),
        ]));

        assert_eq!(config.restaurant, "Trattoria");
        assert_eq!(config.report_dir(), PathBuf::from("/tmp/orders"));
        assert!(config.offline);
        assert!(config
            .profiles()
            .iter()
            .all(|p| p.connect_timeout == Duration::from_secs(1)));

        let passwords: Vec<Option<&str>> = config
            .database
            .profiles
            .iter()
            .map(|p| p.password.as_deref())
            .collect();
        assert_eq!(passwords, vec![None, Some("hunter2"), Some("hunter2")]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.restaurant = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.database.connect_timeout_secs = Some(0);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.database.profiles[0].connect_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
