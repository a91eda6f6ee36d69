//! Environment variable source: READ_LATER__ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `READ_LATER__SCHEDULE__HOUR=6` sets `schedule.hour`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("READ_LATER")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
