use crate::OutputFormat;
use anyhow::Result;
use gazza_core::activity::{ActivityLog, ActivityStatus};
use gazza_core::{export, paths};
use std::io::{self, Write};
use std::path::Path;

pub fn show(limit: usize, format: OutputFormat) -> Result<()> {
    let log = ActivityLog::new(paths::activity_log_path()?);
    let entries = log.entries()?;

    if entries.is_empty() {
        println!("No activity recorded yet.");
        return Ok(());
    }

    // most recent entries sit at the end of the log
    let start = entries.len().saturating_sub(limit);
    let window = &entries[start..];

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(window)?),
        OutputFormat::Table => {
            println!("Timestamp,Action,Status,Details");
            for entry in window {
                println!(
                    "{},{},{},{}",
                    entry.timestamp,
                    entry.action,
                    entry.status.as_str(),
                    entry.details
                );
            }
        }
        OutputFormat::Pretty => {
            use console::style;

            println!("\n{}", style("Activity log").bold().cyan());
            println!("{}", style("============").cyan());
            for entry in window {
                let status = match entry.status {
                    ActivityStatus::Success => style("ok").green(),
                    ActivityStatus::Error => style("err").red(),
                    ActivityStatus::Warning => style("warn").yellow(),
                    ActivityStatus::Info => style("info").dim(),
                };
                println!(
                    "  {}  [{:>4}]  {}  {}",
                    entry.timestamp, status, entry.action, entry.details
                );
            }
            println!("\nShowing {} of {} entries", window.len(), entries.len());
        }
    }
    Ok(())
}

pub fn export(output: Option<&Path>) -> Result<()> {
    let log = ActivityLog::new(paths::activity_log_path()?);
    let entries = log.entries()?;

    match output {
        Some(path) => {
            export::write_csv(&entries, path)?;
            println!("✅ Exported {} entries to {}", entries.len(), path.display());
        }
        None => {
            print!("{}", export::to_csv_string(&entries)?);
        }
    }
    Ok(())
}

pub fn clear(yes: bool) -> Result<()> {
    if !yes {
        print!("This deletes the whole activity log. Type 'yes' to confirm: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if input.trim() != "yes" {
            println!("Clear cancelled.");
            return Ok(());
        }
    }

    let log = ActivityLog::new(paths::activity_log_path()?);
    log.clear()?;
    println!("✅ Activity log cleared");
    Ok(())
}
