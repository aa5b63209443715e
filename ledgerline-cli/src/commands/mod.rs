//! CLI command implementations

pub mod backup;
pub mod currencies;
pub mod demo;
pub mod logs;
pub mod query;
pub mod status;
pub mod summary;
pub mod totals;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use uuid::Uuid;

use ledgerline_core::domain::report::DateRange;
use ledgerline_core::domain::User;
use ledgerline_core::ports::ReportingStore;
use ledgerline_core::{EntryPoint, LedgerlineContext, LogEvent, LoggingService};

/// Acting company/user overrides from the global CLI flags
pub struct ActingArgs {
    pub company: Option<Uuid>,
    pub user: Option<Uuid>,
}

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (logging never blocks
/// operations)
pub fn get_logger() -> Option<LoggingService> {
    let dir = get_ledgerline_dir();
    std::fs::create_dir_all(&dir).ok()?;
    LoggingService::new(&dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the ledgerline directory from environment or default
pub fn get_ledgerline_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LEDGERLINE_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".ledgerline")
    }
}

/// Get or create the ledgerline context
pub fn get_context() -> Result<LedgerlineContext> {
    let dir = get_ledgerline_dir();

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create ledgerline directory: {:?}", dir))?;

    LedgerlineContext::new(&dir).context("Failed to initialize ledgerline context")
}

/// Resolve the acting company and user: CLI flags win over settings.json
pub fn resolve_acting(ctx: &LedgerlineContext, acting: &ActingArgs) -> Result<(Uuid, User)> {
    let company_id = acting.company.or(ctx.config.company_id).context(
        "No acting company configured. Pass --company, set app.companyId in settings.json, \
         or run `lgr demo on`",
    )?;
    let user_id = acting.user.or(ctx.config.user_id).context(
        "No acting user configured. Pass --user, set app.userId in settings.json, \
         or run `lgr demo on`",
    )?;

    let actor = ctx
        .repository
        .user(user_id)?
        .with_context(|| format!("User not found: {}", user_id))?;

    Ok((company_id, actor))
}

/// Date range for report commands: defaults to the current year so far
pub fn report_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> DateRange {
    let today = Utc::now().date_naive();
    let start = from.unwrap_or_else(|| NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap());
    let end = to.unwrap_or(today);
    DateRange::new(start, end)
}
