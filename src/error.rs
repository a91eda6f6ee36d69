//! Application-level error type.
//!
//! Every command returns `Result<_, ApiError>`. Failures from the Safari
//! ingestion core arrive already classified as [`AccessError`] and are carried
//! through unchanged so the presentation layer can pick remediation text.

use crate::safari::AccessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StoreError(String),

    #[error("Invalid URL: {0}. Please provide a valid HTTP or HTTPS URL.")]
    InvalidUrl(String),

    #[error("No saved URL with id {0}")]
    ItemNotFound(String),

    #[error("Launch agent error: {0}")]
    LaunchAgentError(String),

    #[error("Failed to open URL: {0}")]
    BrowserError(String),

    #[error("Failed to get user input: {0}")]
    PromptError(String),

    #[error(transparent)]
    Safari(#[from] AccessError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<dialoguer::Error> for ApiError {
    fn from(err: dialoguer::Error) -> Self {
        ApiError::PromptError(err.to_string())
    }
}
