//! Configuration file loading for the roomkit binary.
//!
//! The file is TOML with three optional sections:
//!
//! ```toml
//! [database]
//! url = "sqlite://roomkit.db"
//! max_connections = 5
//! busy_timeout_secs = 5
//!
//! [stages]
//! removal = "lookup_then_delete"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Missing sections and keys take their defaults.

use crate::error::{Error, Result};
use roomkit_stage::RemovalStrategy;
use roomkit_store::SqliteStoreOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Project name used for the config directory.
pub const PROJECT_NAME: &str = "roomkit";

/// Config file name inside the project config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomkitConfig {
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Stage operation settings.
    #[serde(default)]
    pub stages: StageConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Pool size for file databases.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds a statement waits on a locked database.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

fn default_url() -> String {
    SqliteStoreOptions::default().url
}

fn default_max_connections() -> u32 {
    SqliteStoreOptions::default().max_connections
}

fn default_busy_timeout_secs() -> u64 {
    SqliteStoreOptions::default().busy_timeout.as_secs()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

/// Stage operation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// How `stage remove` deletes.
    #[serde(default)]
    pub removal: RemovalStrategy,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl RoomkitConfig {
    /// `<config_dir>/roomkit/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join(CONFIG_FILE_NAME))
    }

    /// The explicit path if given, else the default path.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(Path::new(path));
        }
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Replace the database URL when an override is given.
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.database.url = url;
        }
        self
    }

    /// Connection options for [`roomkit_store::SqliteStore::connect`].
    pub fn store_options(&self) -> SqliteStoreOptions {
        SqliteStoreOptions {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            busy_timeout: Duration::from_secs(self.database.busy_timeout_secs),
        }
    }
}
