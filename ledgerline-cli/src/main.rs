//! Ledgerline CLI - multi-currency invoicing reports in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

mod commands;
mod output;

use commands::{backup, currencies, demo, logs, query, status, summary, totals};

/// Ledgerline - invoicing reports in your terminal
#[derive(Parser)]
#[command(name = "lgr", version, about, long_about = None)]
struct Cli {
    /// Acting company id (overrides the configured default)
    #[arg(long, global = true)]
    company: Option<Uuid>,

    /// Acting user id (overrides the configured default)
    #[arg(long, global = true)]
    user: Option<Uuid>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dataset status and summary
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved currency set for the acting company/user
    Currencies {
        /// Reload the currency directory cache first
        #[arg(long)]
        refresh: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Per-currency summary report (one query per currency and metric)
    Summary {
        /// Start date (YYYY-MM-DD), defaults to January 1 of this year
        #[arg(long)]
        from: Option<NaiveDate>,
        /// End date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Point-in-time totals report (one query per metric)
    Totals {
        /// Start date (YYYY-MM-DD), defaults to January 1 of this year
        #[arg(long)]
        from: Option<NaiveDate>,
        /// End date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Execute a read-only SQL query against the database
    Query {
        /// SQL query to execute
        sql: Option<String>,
        /// Read SQL from file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Output format (table, csv, json)
        #[arg(long, default_value = "table")]
        format: String,
        /// Output as JSON (shorthand for --format json)
        #[arg(long)]
        json: bool,
    },

    /// Manage backups
    Backup {
        #[command(subcommand)]
        command: backup::BackupCommands,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// Show recent event-log entries
    Logs {
        /// Only entries carrying an error
        #[arg(long)]
        errors: bool,
        /// Maximum number of entries to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let acting = commands::ActingArgs {
        company: cli.company,
        user: cli.user,
    };

    match cli.command {
        Commands::Status { json } => status::run(json),
        Commands::Currencies { refresh, json } => currencies::run(&acting, refresh, json),
        Commands::Summary { from, to, json } => summary::run(&acting, from, to, json),
        Commands::Totals { from, to, json } => totals::run(&acting, from, to, json),
        Commands::Query { sql, file, format, json } => {
            let fmt = if json { "json".to_string() } else { format };
            query::run(sql.as_deref(), file.as_deref(), &fmt)
        }
        Commands::Backup { command } => backup::run(command),
        Commands::Demo { command } => demo::run(command),
        Commands::Logs { errors, limit, json } => logs::run(errors, limit, json),
    }
}
