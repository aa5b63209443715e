//! Demo service - manage demo mode
//!
//! Demo mode provides a seeded multi-currency dataset for onboarding and
//! testing without touching real invoicing data. It lives in its own
//! demo.duckdb next to the real database.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use uuid::Uuid;

use crate::adapters::demo::{
    generate_demo_clients, generate_demo_company, generate_demo_currencies,
    generate_demo_expenses, generate_demo_invoices, generate_demo_payments, generate_demo_users,
    DEMO_ADMIN_ID, DEMO_COMPANY_ID,
};
use crate::adapters::duckdb::DuckDbRepository;
use crate::config::Config;

/// Demo service for managing demo mode
pub struct DemoService {
    ledgerline_dir: PathBuf,
}

impl DemoService {
    pub fn new(ledgerline_dir: &Path) -> Self {
        Self {
            ledgerline_dir: ledgerline_dir.to_path_buf(),
        }
    }

    /// Check if demo mode is currently enabled
    pub fn is_enabled(&self) -> Result<bool> {
        let config = Config::load(&self.ledgerline_dir)?;
        Ok(config.demo_mode)
    }

    /// Enable demo mode
    ///
    /// Deletes any existing demo database for a fresh start, flips the
    /// config flag, seeds demo.duckdb, and points the acting context at
    /// the demo company/admin so reports work immediately.
    pub fn enable(&self) -> Result<()> {
        let demo_db = self.ledgerline_dir.join("demo.duckdb");
        let demo_wal = self.ledgerline_dir.join("demo.duckdb.wal");
        if demo_db.exists() {
            std::fs::remove_file(&demo_db)?;
        }
        if demo_wal.exists() {
            std::fs::remove_file(&demo_wal)?;
        }

        let mut config = Config::load(&self.ledgerline_dir).unwrap_or_default();
        config.demo_mode = true;
        config.company_id = Some(Uuid::parse_str(DEMO_COMPANY_ID).unwrap());
        config.user_id = Some(Uuid::parse_str(DEMO_ADMIN_ID).unwrap());
        config.save(&self.ledgerline_dir)?;

        let repository = Arc::new(DuckDbRepository::new(&demo_db)?);
        repository.ensure_schema()?;

        repository.replace_currencies(&generate_demo_currencies())?;
        repository.upsert_company(&generate_demo_company())?;
        for user in generate_demo_users() {
            repository.upsert_user(&user)?;
        }
        for client in generate_demo_clients() {
            repository.upsert_client(&client)?;
        }
        for invoice in generate_demo_invoices() {
            repository.upsert_invoice(&invoice)?;
        }
        for payment in generate_demo_payments() {
            repository.upsert_payment(&payment)?;
        }
        for expense in generate_demo_expenses() {
            repository.upsert_expense(&expense)?;
        }

        Ok(())
    }

    /// Disable demo mode, optionally deleting the demo database
    pub fn disable(&self, clean: bool) -> Result<()> {
        let mut config = Config::load(&self.ledgerline_dir).unwrap_or_default();
        config.demo_mode = false;
        config.save(&self.ledgerline_dir)?;

        if clean {
            let demo_db = self.ledgerline_dir.join("demo.duckdb");
            let demo_wal = self.ledgerline_dir.join("demo.duckdb.wal");
            if demo_db.exists() {
                std::fs::remove_file(&demo_db)?;
            }
            if demo_wal.exists() {
                std::fs::remove_file(&demo_wal)?;
            }
        }

        Ok(())
    }
}
