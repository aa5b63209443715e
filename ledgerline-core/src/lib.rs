//! Ledgerline Core - multi-currency invoicing reports
//!
//! This crate implements the reporting core following hexagonal
//! architecture:
//!
//! - **domain**: Core business entities (Company, Client, Invoice, the
//!   report value types)
//! - **ports**: Trait definitions for external dependencies
//!   (ReportingStore, CurrencyDirectory)
//! - **services**: Business logic orchestration (currency resolution,
//!   report aggregation, status, backups)
//! - **adapters**: Concrete implementations (DuckDB, cached directory,
//!   demo data)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::directory::CachedCurrencyDirectory;
use adapters::duckdb::DuckDbRepository;
use config::Config;
use ports::{CurrencyDirectory, ReportingStore};
use services::*;

// Re-export commonly used types at crate root
pub use adapters::duckdb::QueryResult;
pub use domain::{
    Client, Company, CurrencyEntry, CurrencyId, CurrencySnapshot, DateRange, Expense, Invoice,
    MetricRow, MetricSlot, Payment, SummaryReport, TotalsReport, User, VisibilityScope,
};
pub use domain::result::Error;
pub use services::{EntryPoint, LogEvent, LoggingService};

/// Main context for Ledgerline operations
///
/// This is the primary entry point for all business logic. It holds the
/// database connection, configuration, and all services.
pub struct LedgerlineContext {
    pub config: Config,
    pub repository: Arc<DuckDbRepository>,
    pub directory: Arc<CachedCurrencyDirectory>,
    pub currency_service: CurrencyService,
    pub report_service: ReportService,
    pub status_service: StatusService,
    pub query_service: QueryService,
    pub backup_service: BackupService,
    pub demo_service: DemoService,
}

impl LedgerlineContext {
    /// Create a new Ledgerline context
    pub fn new(ledgerline_dir: &Path) -> Result<Self> {
        let config = Config::load(ledgerline_dir)?;

        // Demo mode reports against its own seeded database
        let db_filename = if config.demo_mode {
            "demo.duckdb"
        } else {
            "ledgerline.duckdb"
        };

        let db_path = ledgerline_dir.join(db_filename);
        let repository = Arc::new(DuckDbRepository::new(&db_path)?);

        // Initialize schema
        repository.ensure_schema()?;

        let directory = Arc::new(CachedCurrencyDirectory::new(Arc::clone(&repository)));

        let store: Arc<dyn ReportingStore> = repository.clone();
        let directory_port: Arc<dyn CurrencyDirectory> = directory.clone();

        let currency_service =
            CurrencyService::new(Arc::clone(&store), Arc::clone(&directory_port));
        let report_service = ReportService::new(store, directory_port);
        let status_service = StatusService::new(Arc::clone(&repository));
        let query_service = QueryService::new(Arc::clone(&repository));
        let backup_service =
            BackupService::new(ledgerline_dir.to_path_buf(), db_filename.to_string());
        let demo_service = DemoService::new(ledgerline_dir);

        Ok(Self {
            config,
            repository,
            directory,
            currency_service,
            report_service,
            status_service,
            query_service,
            backup_service,
            demo_service,
        })
    }
}
