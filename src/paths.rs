//! Centralized path definitions for tasklist
//!
//! Only user-level state exists:
//!
//! ```text
//! ~/.tasklist/
//! └── config.toml               # API base URL, refresh interval
//! ```

use std::path::PathBuf;

/// Global config directory name
const GLOBAL_DIR: &str = ".tasklist";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global tasklist directory.
///
/// Returns `~/.tasklist/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.tasklist/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
