//! Config sections and their path resolution.

use crate::config::xdg;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the local reading-list store under the home directory.
pub const DEFAULT_DATA_FILE_NAME: &str = ".read-later-today.json";

/// Local store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file; None means `~/.read-later-today.json`
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_data_file(&self) -> Result<PathBuf, ApiError> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(xdg::home_dir()?.join(DEFAULT_DATA_FILE_NAME)),
        }
    }
}

/// Safari ingestion configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SafariConfig {
    /// Bookmark file; None means `~/Library/Safari/Bookmarks.plist`
    #[serde(default)]
    pub bookmarks_path: Option<PathBuf>,
}

fn default_hour() -> u8 {
    5
}

/// Daily cleanup schedule for the launch agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_hour")]
    pub hour: u8,

    #[serde(default)]
    pub minute: u8,

    /// LaunchAgents directory; None means `~/Library/LaunchAgents`
    #[serde(default)]
    pub launch_agents_dir: Option<PathBuf>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hour: default_hour(),
            minute: 0,
            launch_agents_dir: None,
        }
    }
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.hour > 23 {
            return Err(ApiError::ConfigError(format!(
                "schedule.hour must be 0-23, got {}",
                self.hour
            )));
        }
        if self.minute > 59 {
            return Err(ApiError::ConfigError(format!(
                "schedule.minute must be 0-59, got {}",
                self.minute
            )));
        }
        Ok(())
    }

    pub fn resolve_launch_agents_dir(&self) -> Result<PathBuf, ApiError> {
        match &self.launch_agents_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(xdg::home_dir()?.join("Library").join("LaunchAgents")),
        }
    }
}

/// Browser launch configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Opener command; None means `open` on macOS, `xdg-open` elsewhere
    #[serde(default)]
    pub command: Option<String>,
}
