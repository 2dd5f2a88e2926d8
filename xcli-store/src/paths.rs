//! Default file locations.

use std::path::PathBuf;

/// Directory name under `~/.config`.
const APP_DIR: &str = "x-cli";

/// Returns the configuration directory, `~/.config/x-cli`.
///
/// The same location is used on every platform so the documented `.env`
/// path holds everywhere. Falls back to the current directory when no
/// home directory is known.
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".config").join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the user-level `.env` file path.
pub fn default_env_path() -> PathBuf {
    default_config_dir().join(".env")
}

/// Returns the configuration file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}
