//! Format status, lists and error remediation as text.

use crate::launchd::{InstallReport, AGENT_LABEL, CLEANUP_LOG_PATH};
use crate::safari::{AccessError, AccessErrorKind, TimeBreakdown};
use crate::store::ReadingItem;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_success(message: &str) -> String {
    format!("{}", format!("✓ {}", message).green())
}

pub fn format_notice(message: &str) -> String {
    format!("{}", message.yellow())
}

pub fn format_dim(message: &str) -> String {
    format!("{}", message.dimmed())
}

/// Safari section of `status`.
pub fn format_safari_status_text(breakdown: &TimeBreakdown) -> String {
    let mut out = format!(
        "{}\n",
        format!("Safari Reading List: {} unread items", breakdown.total).bold()
    );
    if breakdown.total > 0 {
        out.push_str(&format!("  • {} this week\n", breakdown.this_week));
        out.push_str(&format!("  • {} this month\n", breakdown.this_month));
        out.push_str(&format!("  • {} older\n", breakdown.older));
    }
    out
}

/// Local-list section of `status`.
pub fn format_local_status_text(count: usize) -> String {
    format!(
        "{}\n",
        format!("Local reading list: {} saved URL(s)", count).bold()
    )
}

/// Saved URLs as a table.
pub fn format_item_table(items: &[ReadingItem]) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Reading list"));
    if items.is_empty() {
        out.push_str("No URLs saved yet.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["ID", "Title", "URL", "Added"]);
    for item in items {
        table.add_row(vec![
            item.id.clone(),
            item.title.clone(),
            item.url.clone(),
            item.added_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} URL(s).\n", items.len()));
    out
}

/// Label used in selection prompts.
pub fn format_item_choice(item: &ReadingItem) -> String {
    format!("{} - {}", item.title, format_dim(&item.url))
}

/// User-facing remediation for a Safari access failure.
pub fn format_access_error(err: &AccessError) -> String {
    match err.kind {
        AccessErrorKind::Permission => format!(
            "{}\nPlease grant Full Disk Access:\nSystem Settings → Privacy & Security → Full Disk Access → Terminal",
            format_notice("⚠️  Cannot access Safari data.")
        ),
        AccessErrorKind::NotFound if *err == AccessError::not_found() => {
            format_notice("⚠️  Safari bookmarks not found. Is Safari installed?")
        }
        AccessErrorKind::NotFound => format_notice(&format!("⚠️  {}", err.message)),
        AccessErrorKind::ParseError => format_notice(
            "⚠️  Could not parse Safari bookmarks. File may be corrupted.",
        ),
    }
}

pub fn format_setup_summary(report: &InstallReport) -> String {
    let lines = [
        format_success("Launch agent installed successfully!"),
        String::new(),
        format!("{}", "Configuration:".bold()),
        format_dim(&format!("  Plist file: {}", report.plist_path.display())),
        format_dim(&format!("  CLI path: {}", report.program.display())),
        format_dim(&format!(
            "  Schedule: Daily at {:02}:{:02}",
            report.hour, report.minute
        )),
        String::new(),
        format_notice(&format!(
            "Your reading list will be automatically cleared at {:02}:{:02} every day.",
            report.hour, report.minute
        )),
        String::new(),
        format_dim("To manually trigger cleanup:"),
        format_dim(&format!("  launchctl start {}", AGENT_LABEL)),
        String::new(),
        format_dim("To check logs:"),
        format_dim(&format!("  cat {}", CLEANUP_LOG_PATH)),
    ];
    lines.join("\n")
}

pub fn format_manual_removal_hint(plist_path: &Path, data_file: &Path) -> String {
    format!(
        "{}\n{}\n{}",
        format_notice("You can manually remove these files:"),
        format_dim(&format!("  {}", plist_path.display())),
        format_dim(&format!("  {}", data_file.display()))
    )
}
