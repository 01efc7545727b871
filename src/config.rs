//! Global configuration management
//!
//! Persistent settings live at `~/.tasklist/config.toml`. The API base URL
//! is resolved in this order: explicit override (the `--api-url` flag), the
//! `TASKLIST_API_URL` environment variable, the config file, and finally the
//! fixed local fallback.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Environment variable that overrides the configured base URL
pub const API_URL_ENV: &str = "TASKLIST_API_URL";

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default seconds between periodic refreshes
pub const DEFAULT_INTERVAL_SECS: u64 = 30;

/// Errors from loading or saving the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("config I/O error at {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// The file exists but is not valid TOML for this schema
    #[error("invalid config at {path}: {source}")]
    Parse {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },
    /// Serializing the config failed
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value was rejected
    #[error("{0}")]
    Invalid(String),
}

/// Global tasklist configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Remote service settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Background refresh settings
    #[serde(default)]
    pub refresh: RefreshConfig,
}

/// Remote service settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the task service (e.g. `http://localhost:8000`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Background refresh settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between periodic refreshes
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl RefreshConfig {
    /// Interval as a duration
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl GlobalConfig {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::global_config()
    }

    /// Load config from the default location, or defaults if missing or unreadable
    #[must_use]
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config: {e}");
                Self::default()
            },
        }
    }

    /// Load config from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the stored base URL after a basic sanity check
    pub fn set_base_url(&mut self, url: &str) -> Result<(), ConfigError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "Base URL must start with http:// or https://, got '{url}'"
            )));
        }
        self.api.base_url = Some(normalize_base_url(url));
        Ok(())
    }

    /// Set the refresh interval in seconds
    pub fn set_interval_secs(&mut self, secs: u64) -> Result<(), ConfigError> {
        if secs == 0 {
            return Err(ConfigError::Invalid("Refresh interval must be at least 1 second".into()));
        }
        self.refresh.interval_secs = secs;
        Ok(())
    }

    /// Resolve the base URL to talk to
    ///
    /// `explicit` (from the command line) wins, then the environment
    /// variable, then the file, then [`DEFAULT_BASE_URL`]. A blank source is
    /// skipped.
    #[must_use]
    pub fn resolve_base_url(&self, explicit: Option<&str>) -> String {
        let from_env = std::env::var(API_URL_ENV).ok();
        let chosen = [explicit, from_env.as_deref(), self.api.base_url.as_deref()]
            .into_iter()
            .flatten()
            .find(|u| !u.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        normalize_base_url(chosen)
    }
}

/// Trim whitespace and any trailing `/`
#[must_use]
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
