//! Launch agent for the daily cleanup.
//!
//! `setup` writes `~/Library/LaunchAgents/com.read-later-today.cleanup.plist`
//! and loads it with `launchctl`; launchd then runs `read-later cleanup` at
//! the configured time every day.

use crate::config::ScheduleConfig;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const AGENT_LABEL: &str = "com.read-later-today.cleanup";
pub const CLEANUP_LOG_PATH: &str = "/tmp/read-later-today-cleanup.log";
pub const CLEANUP_ERR_PATH: &str = "/tmp/read-later-today-cleanup.err";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalendarInterval {
    pub hour: u8,
    pub minute: u8,
}

/// launchd job definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AgentDefinition {
    pub label: String,
    pub program_arguments: Vec<String>,
    pub start_calendar_interval: CalendarInterval,
    pub standard_out_path: String,
    pub standard_error_path: String,
}

/// `launchctl` operations used by the agent.
pub trait Launchctl: Send + Sync {
    fn load(&self, plist: &Path) -> Result<(), String>;
    fn unload(&self, plist: &Path) -> Result<(), String>;
}

pub struct SystemLaunchctl;

impl SystemLaunchctl {
    fn run(action: &str, plist: &Path) -> Result<(), String> {
        let output = Command::new("launchctl")
            .arg(action)
            .arg(plist)
            .output()
            .map_err(|e| e.to_string())?;
        if output.status.success() {
            Ok(())
        } else {
            Err(String::from_utf8_lossy(&output.stderr).trim().to_string())
        }
    }
}

impl Launchctl for SystemLaunchctl {
    fn load(&self, plist: &Path) -> Result<(), String> {
        Self::run("load", plist)
    }

    fn unload(&self, plist: &Path) -> Result<(), String> {
        Self::run("unload", plist)
    }
}

/// What `install` did, for the setup summary.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub plist_path: PathBuf,
    pub program: PathBuf,
    pub hour: u8,
    pub minute: u8,
}

pub struct LaunchAgent {
    plist_path: PathBuf,
    program: PathBuf,
    schedule: ScheduleConfig,
    launchctl: Box<dyn Launchctl>,
}

impl LaunchAgent {
    pub fn new(
        agents_dir: &Path,
        program: PathBuf,
        schedule: ScheduleConfig,
        launchctl: Box<dyn Launchctl>,
    ) -> Self {
        Self {
            plist_path: agents_dir.join(format!("{}.plist", AGENT_LABEL)),
            program,
            schedule,
            launchctl,
        }
    }

    /// Agent for the running executable, placed per the schedule config.
    pub fn from_config(schedule: &ScheduleConfig) -> Result<Self, ApiError> {
        let program = std::env::current_exe().map_err(|e| {
            ApiError::LaunchAgentError(format!("Could not resolve executable path: {}", e))
        })?;
        Ok(Self::new(
            &schedule.resolve_launch_agents_dir()?,
            program,
            schedule.clone(),
            Box::new(SystemLaunchctl),
        ))
    }

    pub fn plist_path(&self) -> &Path {
        &self.plist_path
    }

    pub fn is_installed(&self) -> bool {
        self.plist_path.exists()
    }

    pub fn definition(&self) -> AgentDefinition {
        AgentDefinition {
            label: AGENT_LABEL.to_string(),
            program_arguments: vec![
                self.program.to_string_lossy().to_string(),
                "cleanup".to_string(),
            ],
            start_calendar_interval: CalendarInterval {
                hour: self.schedule.hour,
                minute: self.schedule.minute,
            },
            standard_out_path: CLEANUP_LOG_PATH.to_string(),
            standard_error_path: CLEANUP_ERR_PATH.to_string(),
        }
    }

    /// Write the plist and load it. A plist that fails to load is removed.
    pub fn install(&self) -> Result<InstallReport, ApiError> {
        self.schedule.validate()?;

        if let Some(dir) = self.plist_path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| {
                ApiError::LaunchAgentError(format!(
                    "Failed to create directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        plist::to_file_xml(&self.plist_path, &self.definition()).map_err(|e| {
            ApiError::LaunchAgentError(format!(
                "Failed to write {}: {}",
                self.plist_path.display(),
                e
            ))
        })?;

        if let Err(e) = self.launchctl.load(&self.plist_path) {
            let _ = std::fs::remove_file(&self.plist_path);
            return Err(ApiError::LaunchAgentError(format!(
                "Failed to load launch agent: {}",
                e
            )));
        }

        tracing::info!(plist = %self.plist_path.display(), "Launch agent installed");
        Ok(InstallReport {
            plist_path: self.plist_path.clone(),
            program: self.program.clone(),
            hour: self.schedule.hour,
            minute: self.schedule.minute,
        })
    }

    /// Unload and delete the agent if present.
    ///
    /// Best effort: individual failures are returned as warnings.
    pub fn uninstall(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.is_installed() {
            return warnings;
        }

        if let Err(e) = self.launchctl.unload(&self.plist_path) {
            warnings.push(format!("Failed to unload agent: {}", e));
        }
        if let Err(e) = std::fs::remove_file(&self.plist_path) {
            warnings.push(format!("Failed to remove plist file: {}", e));
        }

        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        warnings
    }
}
