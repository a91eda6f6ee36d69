//! Configuration
//!
//! Layered configuration for the reading-list tool: built-in defaults, an
//! optional global TOML file, then `READ_LATER__*` environment overrides.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sections;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use sections::{BrowserConfig, SafariConfig, ScheduleConfig, StorageConfig};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadLaterConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub safari: SafariConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
