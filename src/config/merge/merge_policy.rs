//! Defaults seeded into every builder before any source is added.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("schedule.hour", 5)?
        .set_default("schedule.minute", 0)?
        .set_default("logging.level", "info")?
        .set_default("logging.output", "file")
}
