//! CLI Tooling
//!
//! Command-line interface for the reading list. Commands return their output
//! as a string; the binary prints it and maps errors to exit codes.

use crate::browser::{SystemOpener, UrlOpener};
use crate::config::ReadLaterConfig;
use crate::error::ApiError;
use crate::launchd::LaunchAgent;
use crate::links::{title_for, validate_url};
use crate::safari::{compute_breakdown, SnapshotAcquirer};
use crate::store::{EntrySource, JsonReadingListStore, ReadingItem, ReadingListStore};
use crate::tooling::format;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Read Later - save links for today, report on Safari's Reading List
#[derive(Parser, Debug)]
#[command(name = "read-later", version)]
#[command(about = "CLI tool to manage reading material URLs with automatic daily cleanup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags into the loaded configuration.
    ///
    /// `--log-file` is not folded: it goes to `init_logging` directly so it
    /// outranks READ_LATER_LOG_FILE.
    pub fn apply_overrides(&self, config: &mut ReadLaterConfig) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a URL to your reading list
    Add {
        /// URL to add
        url: String,
    },
    /// Open a saved URL in your browser
    Resume {
        /// Item id (omit to pick interactively)
        id: Option<String>,
    },
    /// Remove a URL from your reading list
    #[command(alias = "rm")]
    Remove {
        /// Item id (omit to pick interactively)
        id: Option<String>,
    },
    /// Remove all URLs from your reading list
    #[command(alias = "removeAll")]
    RemoveAll {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// List saved URLs
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show Safari Reading List status
    Status {
        /// Show only the Safari Reading List
        #[arg(long, conflicts_with = "all")]
        safari: bool,
        /// Show every section (default)
        #[arg(long)]
        all: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Install the launch agent for automatic daily cleanup
    Setup {
        /// Reinstall without asking when already installed
        #[arg(long)]
        force: bool,
    },
    /// Remove the launch agent and optionally delete data
    Uninstall {
        /// Delete the data file without asking
        #[arg(long, conflicts_with = "keep_data")]
        delete_data: bool,
        /// Keep the data file without asking
        #[arg(long)]
        keep_data: bool,
    },
    /// Internal command used by the launch agent (clears all URLs)
    Cleanup,
}

/// Stable name for logs.
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Add { .. } => "add",
        Commands::Resume { .. } => "resume",
        Commands::Remove { .. } => "remove",
        Commands::RemoveAll { .. } => "remove-all",
        Commands::List { .. } => "list",
        Commands::Status { .. } => "status",
        Commands::Setup { .. } => "setup",
        Commands::Uninstall { .. } => "uninstall",
        Commands::Cleanup => "cleanup",
    }
}

/// CLI context: resolved configuration plus the collaborators commands use.
pub struct CliContext {
    config: ReadLaterConfig,
    store: Box<dyn ReadingListStore>,
    opener: Box<dyn UrlOpener>,
    launch_agent: LaunchAgent,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(config: ReadLaterConfig) -> Result<Self, ApiError> {
        let data_file = config.storage.resolve_data_file()?;
        let launch_agent = LaunchAgent::from_config(&config.schedule)?;
        Ok(Self {
            store: Box::new(JsonReadingListStore::new(data_file)),
            opener: Box::new(SystemOpener::new(&config.browser)),
            launch_agent,
            config,
        })
    }

    pub fn with_store(mut self, store: Box<dyn ReadingListStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_opener(mut self, opener: Box<dyn UrlOpener>) -> Self {
        self.opener = opener;
        self
    }

    pub fn with_launch_agent(mut self, launch_agent: LaunchAgent) -> Self {
        self.launch_agent = launch_agent;
        self
    }

    pub fn store(&self) -> &dyn ReadingListStore {
        self.store.as_ref()
    }

    pub fn launch_agent(&self) -> &LaunchAgent {
        &self.launch_agent
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let name = command_name(command);
        tracing::debug!(command = name, "Executing command");
        let result = self.execute_inner(command);
        if let Err(e) = &result {
            tracing::error!(command = name, error = %e, "Command failed");
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Add { url } => self.handle_add(url),
            Commands::Resume { id } => self.handle_resume(id.as_deref()),
            Commands::Remove { id } => self.handle_remove(id.as_deref()),
            Commands::RemoveAll { force } => self.handle_remove_all(*force),
            Commands::List { format } => self.handle_list(format),
            Commands::Status {
                safari,
                all,
                format,
            } => self.handle_status(*safari, *all, format),
            Commands::Setup { force } => self.handle_setup(*force),
            Commands::Uninstall {
                delete_data,
                keep_data,
            } => self.handle_uninstall(*delete_data, *keep_data),
            Commands::Cleanup => self.handle_cleanup(),
        }
    }

    fn handle_add(&self, url: &str) -> Result<String, ApiError> {
        validate_url(url)?;
        let url = url.trim();
        let item = self
            .store
            .add_url(url, &title_for(url), Some(EntrySource::Cli))?;
        info!(id = %item.id, url = %item.url, "Added URL");
        Ok(format!(
            "{}\n{}\n{}",
            format::format_success("URL added successfully!"),
            format::format_dim(&format!("  {}", item.title)),
            format::format_dim(&format!("  {}", item.url))
        ))
    }

    fn handle_resume(&self, id: Option<&str>) -> Result<String, ApiError> {
        let items = self.store.get_urls();
        if items.is_empty() {
            return Ok(format!(
                "{}\n{}",
                format::format_notice("No URLs saved yet. Add one with:"),
                format::format_dim("  read-later add <url>")
            ));
        }

        let item = match id {
            Some(id) => items
                .iter()
                .find(|item| item.id == id)
                .ok_or_else(|| ApiError::ItemNotFound(id.to_string()))?,
            None => select_item(&items, "Select a URL to open")?,
        };

        self.opener.open(&item.url)?;
        Ok(format::format_success("URL opened in browser"))
    }

    fn handle_remove(&self, id: Option<&str>) -> Result<String, ApiError> {
        let items = self.store.get_urls();
        if items.is_empty() {
            return Ok(format::format_notice("No URLs saved yet."));
        }

        let id = match id {
            Some(id) => id.to_string(),
            None => select_item(&items, "Select a URL to remove")?.id.clone(),
        };

        if self.store.remove_url(&id)? {
            info!(id = %id, "Removed URL");
            Ok(format::format_success("URL removed successfully"))
        } else {
            Ok(format::format_notice("URL not found"))
        }
    }

    fn handle_remove_all(&self, force: bool) -> Result<String, ApiError> {
        let items = self.store.get_urls();
        if items.is_empty() {
            return Ok(format::format_notice("No URLs saved yet."));
        }

        if !force {
            use dialoguer::Confirm;
            println!(
                "{}",
                format::format_notice(&format!("You have {} URL(s) saved.", items.len()))
            );
            let confirmed = Confirm::new()
                .with_prompt("Are you sure you want to remove all URLs?")
                .default(false)
                .interact()?;
            if !confirmed {
                return Ok(format::format_dim("Cancelled."));
            }
        }

        let count = self.store.remove_all_urls()?;
        Ok(format::format_success(&format!("Removed {} URL(s)", count)))
    }

    fn handle_list(&self, format: &str) -> Result<String, ApiError> {
        let items = self.store.get_urls();
        match format {
            "json" => serde_json::to_string_pretty(&items)
                .map_err(|e| ApiError::StoreError(format!("Failed to serialize list: {}", e))),
            "text" => Ok(format::format_item_table(&items)),
            other => Err(invalid_format(other)),
        }
    }

    fn handle_status(&self, safari_only: bool, _all: bool, format: &str) -> Result<String, ApiError> {
        if format != "text" && format != "json" {
            return Err(invalid_format(format));
        }

        // Without --safari every section is shown.
        let show_local = !safari_only;

        let acquirer = match &self.config.safari.bookmarks_path {
            Some(path) => SnapshotAcquirer::new(path),
            None => SnapshotAcquirer::locate()?,
        };
        let entries = acquirer.read_reading_list()?;
        let breakdown = compute_breakdown(&entries, Utc::now());
        let local_count = show_local.then(|| self.store.get_urls().len());
        info!(
            safari_total = breakdown.total,
            local_total = ?local_count,
            "Computed status"
        );

        if format == "json" {
            let mut value = json!({ "safari": breakdown });
            if let Some(count) = local_count {
                value["local"] = json!({ "total": count });
            }
            return serde_json::to_string_pretty(&value)
                .map_err(|e| ApiError::StoreError(format!("Failed to serialize status: {}", e)));
        }

        let mut out = format::format_safari_status_text(&breakdown);
        if let Some(count) = local_count {
            out.push('\n');
            out.push_str(&format::format_local_status_text(count));
        }
        Ok(out.trim_end().to_string())
    }

    fn handle_setup(&self, force: bool) -> Result<String, ApiError> {
        let agent = &self.launch_agent;
        if agent.is_installed() {
            if !force {
                use dialoguer::Confirm;
                let reinstall = Confirm::new()
                    .with_prompt("Launch agent is already installed. Reinstall?")
                    .default(false)
                    .interact()?;
                if !reinstall {
                    return Ok(format::format_dim("Setup cancelled."));
                }
            }
            for warning in agent.uninstall() {
                println!("{}", format::format_notice(&warning));
            }
        }

        let report = agent.install().map_err(|e| {
            eprintln!(
                "{}",
                format::format_dim(&format!(
                    "Troubleshooting: ensure you can write to {}, and that launchctl is available.",
                    agent
                        .plist_path()
                        .parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default()
                ))
            );
            e
        })?;
        Ok(format::format_setup_summary(&report))
    }

    fn handle_uninstall(&self, delete_data: bool, keep_data: bool) -> Result<String, ApiError> {
        let agent = &self.launch_agent;
        let mut lines = Vec::new();

        if !agent.is_installed() {
            lines.push(format::format_notice("Launch agent is not installed."));
        } else {
            for warning in agent.uninstall() {
                lines.push(format::format_notice(&format!(
                    "Some cleanup operations failed: {}",
                    warning
                )));
            }
            if agent.is_installed() {
                lines.push(format::format_manual_removal_hint(
                    agent.plist_path(),
                    self.store.data_file_path(),
                ));
            } else {
                lines.push(format::format_success("Launch agent uninstalled"));
            }
        }

        let data_path = self.store.data_file_path();
        if data_path.exists() {
            let delete = if delete_data {
                true
            } else if keep_data {
                false
            } else {
                use dialoguer::Confirm;
                Confirm::new()
                    .with_prompt(format!(
                        "Do you want to delete the data file ({})?",
                        data_path.display()
                    ))
                    .default(false)
                    .interact()?
            };

            if delete {
                std::fs::remove_file(data_path).map_err(|e| {
                    ApiError::StoreError(format!(
                        "Failed to delete {}: {}",
                        data_path.display(),
                        e
                    ))
                })?;
                lines.push(format::format_success("Data file deleted"));
            } else {
                lines.push(format::format_dim(&format!(
                    "Data file kept at: {}",
                    data_path.display()
                )));
            }
        }

        lines.push(format::format_success("Uninstall complete!"));
        Ok(lines.join("\n"))
    }

    fn handle_cleanup(&self) -> Result<String, ApiError> {
        let timestamp = Utc::now().to_rfc3339();
        info!("Running cleanup");
        let count = self.store.remove_all_urls()?;
        info!(removed = count, "Cleanup finished");
        Ok(format!(
            "[{ts}] Running cleanup...\n[{ts}] Removed {count} URL(s)",
            ts = timestamp,
            count = count
        ))
    }
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::ConfigError(format!(
        "Invalid output format: {} (must be 'text' or 'json')",
        format
    ))
}

fn select_item<'a>(items: &'a [ReadingItem], prompt: &str) -> Result<&'a ReadingItem, ApiError> {
    use dialoguer::Select;

    let choices: Vec<String> = items.iter().map(format::format_item_choice).collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&choices)
        .default(0)
        .max_length(10)
        .interact()?;
    Ok(&items[selection])
}
