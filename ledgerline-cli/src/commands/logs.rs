//! Logs command - view recent event-log entries

use anyhow::Result;
use colored::Colorize;

use super::get_ledgerline_dir;
use crate::output;
use ledgerline_core::{EntryPoint, LoggingService};

fn format_timestamp(timestamp_ms: i64) -> String {
    use chrono::{TimeZone, Utc};
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

pub fn run(errors: bool, limit: usize, json: bool) -> Result<()> {
    let dir = get_ledgerline_dir();
    std::fs::create_dir_all(&dir)?;
    let service = LoggingService::new(&dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))?;

    let entries = if errors {
        service.get_errors(limit)?
    } else {
        service.get_recent(limit)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No log entries found.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Time", "Event", "Context", "Error"]);

    for entry in entries {
        let context = [entry.command.as_deref(), entry.report.as_deref()]
            .iter()
            .filter_map(|&s| s)
            .collect::<Vec<_>>()
            .join(", ");

        let error = entry
            .error_message
            .as_deref()
            .map(|m| m.red().to_string())
            .unwrap_or_default();

        table.add_row(vec![
            format_timestamp(entry.timestamp),
            entry.event,
            context,
            error,
        ]);
    }

    println!("{}", table);

    Ok(())
}
