//! Home and XDG Base Directory helpers.

use crate::error::ApiError;
use std::path::PathBuf;

/// The current user's home directory.
pub fn home_dir() -> Result<PathBuf, ApiError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| ApiError::ConfigError("Could not determine home directory".to_string()))
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
/// Follows XDG Base Directory Specification
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    Ok(home_dir()?.join(".config"))
}

/// Returns `$XDG_CONFIG_HOME/read-later/config.toml`
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join("read-later").join("config.toml"))
}
