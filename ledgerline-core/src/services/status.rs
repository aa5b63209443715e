//! Status service - dataset summary

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::adapters::duckdb::DuckDbRepository;

/// Status service for dataset summaries
pub struct StatusService {
    repository: Arc<DuckDbRepository>,
}

impl StatusService {
    pub fn new(repository: Arc<DuckDbRepository>) -> Self {
        Self { repository }
    }

    /// Get overall dataset summary
    pub fn get_status(&self) -> Result<StatusSummary> {
        Ok(StatusSummary {
            total_companies: self.repository.count_rows("companies")?,
            total_users: self.repository.count_rows("users")?,
            total_clients: self.repository.count_rows("clients")?,
            total_invoices: self.repository.count_rows("invoices")?,
            total_payments: self.repository.count_rows("payments")?,
            total_expenses: self.repository.count_rows("expenses")?,
            total_currencies: self.repository.count_rows("currencies")?,
            invoice_dates: {
                let (earliest, latest) = self.repository.get_invoice_date_range()?;
                InvoiceDateRange { earliest, latest }
            },
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total_companies: i64,
    pub total_users: i64,
    pub total_clients: i64,
    pub total_invoices: i64,
    pub total_payments: i64,
    pub total_expenses: i64,
    pub total_currencies: i64,
    pub invoice_dates: InvoiceDateRange,
}

#[derive(Debug, Serialize)]
pub struct InvoiceDateRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}
