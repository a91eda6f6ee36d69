//! Opening saved links in the user's browser.

use crate::config::BrowserConfig;
use crate::error::ApiError;
use std::process::Command;

#[cfg(target_os = "macos")]
const DEFAULT_OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const DEFAULT_OPENER: &str = "xdg-open";

/// Something that can show a URL to the user.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), ApiError>;
}

/// Runs the platform opener (or the configured command) with the URL.
pub struct SystemOpener {
    command: String,
}

impl SystemOpener {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            command: config
                .command
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_OPENER.to_string()),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), ApiError> {
        tracing::info!(command = %self.command, url, "Opening URL");
        let status = Command::new(&self.command)
            .arg(url)
            .status()
            .map_err(|e| ApiError::BrowserError(e.to_string()))?;
        if !status.success() {
            return Err(ApiError::BrowserError(format!(
                "{} exited with {}",
                self.command, status
            )));
        }
        Ok(())
    }
}
