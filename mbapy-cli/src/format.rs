//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use anyhow::Result;
use colored::*;
use mbapy_core::{CommandEntry, Registry};
use serde::Serialize;

use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Table,
    Json,
}

const SEPARATOR_WIDTH: usize = 100;

/// Script listing as printed by `--list`: index, name, brief, separator.
pub fn format_scripts_list(entries: &[CommandEntry]) -> String {
    let mut output = String::new();
    for (idx, entry) in entries.iter().enumerate() {
        output.push_str(&format!("scripts {:3}: {}\n", idx, entry.name));
        output.push_str(&entry.brief);
        output.push('\n');
        output.push_str(&"-".repeat(SEPARATOR_WIDTH));
        output.push('\n');
    }
    output
}

/// Script listing as printed by `--info`: like `--list` plus detailed text.
pub fn format_scripts_info(entries: &[CommandEntry]) -> String {
    let mut output = String::new();
    for (idx, entry) in entries.iter().enumerate() {
        output.push_str(&format!("scripts {:3}: {}\n", idx, entry.name));
        output.push_str(&entry.brief);
        output.push('\n');
        output.push_str(&entry.detailed);
        output.push('\n');
        output.push_str(&"-".repeat(SEPARATOR_WIDTH));
        output.push('\n');
    }
    output
}

/// Format the brief listing
pub fn format_list(entries: &[CommandEntry], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct BriefItem<'a> {
                name: &'a str,
                brief: &'a str,
            }

            let items: Vec<BriefItem> = entries
                .iter()
                .map(|e| BriefItem {
                    name: &e.name,
                    brief: &e.brief,
                })
                .collect();
            Ok(serde_json::to_string_pretty(&items)?)
        }
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct ScriptRow {
                #[tabled(rename = "#")]
                idx: usize,
                #[tabled(rename = "Script")]
                name: String,
                #[tabled(rename = "Description")]
                brief: String,
            }

            let rows: Vec<ScriptRow> = entries
                .iter()
                .enumerate()
                .map(|(idx, e)| ScriptRow {
                    idx,
                    name: e.name.cyan().to_string(),
                    brief: e.brief.clone(),
                })
                .collect();

            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{}", "Available Scripts:".bold(), table))
        }
    }
}

/// Format every entry with its detailed text
pub fn format_info(entries: &[CommandEntry], format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
        OutputFormat::Table => Ok(entries
            .iter()
            .map(format_entry_text)
            .collect::<Vec<_>>()
            .join(&format!("\n{}\n", "-".repeat(SEPARATOR_WIDTH)))),
    }
}

/// Format detailed help for a single script
pub fn format_entry(entry: &CommandEntry, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entry)?),
        OutputFormat::Table => Ok(format_entry_text(entry)),
    }
}

fn format_entry_text(entry: &CommandEntry) -> String {
    format!(
        "{}\n{}\n\n{}\n\n{} mbapy-cli {} [ARGS]...",
        entry.name.bold().cyan(),
        entry.brief,
        entry.detailed,
        "Usage:".bold(),
        entry.name
    )
}

/// Message printed for a name with no registry entry, followed by the
/// available scripts.
pub fn format_unknown_script(name: &str, args: &[String], registry: &Registry) -> String {
    let mut output = format!("{} unknown script: {}", "✗".red().bold(), name.yellow());
    if !args.is_empty() {
        output.push_str(&format!(" (args: {})", args.join(" ")));
    }
    output.push_str("\n\nAvailable scripts:\n");
    output.push_str(&format_scripts_list(registry.list()));
    output
}

/// Package banner printed when no arguments are given
pub fn format_banner() -> String {
    let mut output = String::new();
    output.push_str(&"mbapy python package command-line tools".bold().to_string());
    output.push('\n');
    output.push_str(&format!(
        "mbapy-cli version: {}",
        env!("CARGO_PKG_VERSION").cyan()
    ));
    output.push('\n');
    output.push_str(&format!("authors: {}", env!("CARGO_PKG_AUTHORS")));
    output.push('\n');
    output.push_str(&format!(
        "url: {}, license: {}",
        env!("CARGO_PKG_REPOSITORY"),
        env!("CARGO_PKG_LICENSE")
    ));
    output.push('\n');
    output.push_str(&format!(
        "run {} to list scripts, {} for usage",
        "mbapy-cli --list".green(),
        "mbapy-cli --help".green()
    ));
    output
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}
