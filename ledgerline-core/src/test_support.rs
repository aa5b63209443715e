//! In-memory fakes for unit-testing the reporting services
//!
//! Integration tests use the real DuckDB adapter; these fakes exist so the
//! aggregation logic can be exercised without a database file.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::currency::{normalize_currency_id, CurrencyEntry, CurrencyId, CurrencySnapshot};
use crate::domain::report::{DateRange, MetricRow};
use crate::domain::result::{Error, Result};
use crate::domain::{Company, User, VisibilityScope};
use crate::ports::{CurrencyDirectory, ReportingStore};

/// Scriptable in-memory ReportingStore
pub struct MemoryStore {
    company: Company,
    admin: User,
    staff: User,
    client_currencies: Vec<(Uuid, CurrencyId)>,
    expense_currencies: Vec<(Uuid, CurrencyId)>,
    invoice_rows: Vec<MetricRow>,
    outstanding_rows: Vec<MetricRow>,
    payment_rows: Vec<MetricRow>,
    revenue_rows: Vec<MetricRow>,
    expense_rows: Vec<MetricRow>,
    fail_metrics: bool,
}

impl MemoryStore {
    pub fn new(default_currency: CurrencyId) -> Self {
        let company = Company::new(Uuid::new_v4(), "Test Co", default_currency);
        let admin = User::new(Uuid::new_v4(), company.id, "Admin", true);
        let staff = User::new(Uuid::new_v4(), company.id, "Staff", false);
        Self {
            company,
            admin,
            staff,
            client_currencies: Vec::new(),
            expense_currencies: Vec::new(),
            invoice_rows: Vec::new(),
            outstanding_rows: Vec::new(),
            payment_rows: Vec::new(),
            revenue_rows: Vec::new(),
            expense_rows: Vec::new(),
            fail_metrics: false,
        }
    }

    pub fn company_id(&self) -> Uuid {
        self.company.id
    }

    pub fn admin(&self) -> User {
        self.admin.clone()
    }

    pub fn staff(&self) -> User {
        self.staff.clone()
    }

    pub fn add_client_currency(&mut self, owner: Uuid, currency: CurrencyId) {
        self.client_currencies.push((owner, currency));
    }

    pub fn add_expense_currency(&mut self, owner: Uuid, currency: CurrencyId) {
        self.expense_currencies.push((owner, currency));
    }

    pub fn push_invoice_row(&mut self, row: MetricRow) {
        self.invoice_rows.push(row);
    }

    pub fn push_outstanding_row(&mut self, row: MetricRow) {
        self.outstanding_rows.push(row);
    }

    pub fn push_payment_row(&mut self, row: MetricRow) {
        self.payment_rows.push(row);
    }

    pub fn push_revenue_row(&mut self, row: MetricRow) {
        self.revenue_rows.push(row);
    }

    pub fn push_expense_row(&mut self, row: MetricRow) {
        self.expense_rows.push(row);
    }

    /// Make every metric query fail with a database error
    pub fn fail_metrics(&mut self) {
        self.fail_metrics = true;
    }

    fn distinct(pairs: &[(Uuid, CurrencyId)], scope: &VisibilityScope) -> Vec<CurrencyId> {
        let mut out = Vec::new();
        for (owner, currency) in pairs {
            if let Some(user) = scope.owner() {
                if user != *owner {
                    continue;
                }
            }
            if !out.contains(currency) {
                out.push(*currency);
            }
        }
        out
    }

    fn metric(&self, rows: &[MetricRow], currency: Option<CurrencyId>) -> Result<Vec<MetricRow>> {
        if self.fail_metrics {
            return Err(Error::database("injected metric failure"));
        }
        Ok(match currency {
            None => rows.to_vec(),
            Some(id) => rows
                .iter()
                .filter(|r| normalize_currency_id(&r.currency_id).parse::<CurrencyId>() == Ok(id))
                .cloned()
                .collect(),
        })
    }
}

impl ReportingStore for MemoryStore {
    fn company(&self, company_id: Uuid) -> Result<Option<Company>> {
        Ok((company_id == self.company.id).then(|| self.company.clone()))
    }

    fn user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok([&self.admin, &self.staff]
            .into_iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    fn client_currency_ids(
        &self,
        _company_id: Uuid,
        scope: &VisibilityScope,
    ) -> Result<Vec<CurrencyId>> {
        Ok(Self::distinct(&self.client_currencies, scope))
    }

    fn expense_currency_ids(
        &self,
        _company_id: Uuid,
        scope: &VisibilityScope,
    ) -> Result<Vec<CurrencyId>> {
        Ok(Self::distinct(&self.expense_currencies, scope))
    }

    fn invoice_totals(
        &self,
        _company_id: Uuid,
        _range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> Result<Vec<MetricRow>> {
        self.metric(&self.invoice_rows, currency)
    }

    fn outstanding_totals(
        &self,
        _company_id: Uuid,
        _range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> Result<Vec<MetricRow>> {
        self.metric(&self.outstanding_rows, currency)
    }

    fn payment_totals(
        &self,
        _company_id: Uuid,
        _range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> Result<Vec<MetricRow>> {
        self.metric(&self.payment_rows, currency)
    }

    fn revenue_totals(
        &self,
        _company_id: Uuid,
        _range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> Result<Vec<MetricRow>> {
        self.metric(&self.revenue_rows, currency)
    }

    fn expense_totals(
        &self,
        _company_id: Uuid,
        _range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> Result<Vec<MetricRow>> {
        self.metric(&self.expense_rows, currency)
    }
}

/// Directory serving a fixed snapshot
pub struct StaticDirectory {
    snapshot: Arc<CurrencySnapshot>,
}

impl StaticDirectory {
    pub fn with_codes(codes: &[(CurrencyId, &str)]) -> Self {
        let entries = codes
            .iter()
            .map(|(id, code)| CurrencyEntry {
                id: *id,
                code: (*code).to_string(),
            })
            .collect();
        Self {
            snapshot: Arc::new(CurrencySnapshot::new(entries)),
        }
    }
}

impl CurrencyDirectory for StaticDirectory {
    fn snapshot(&self) -> Result<Arc<CurrencySnapshot>> {
        Ok(Arc::clone(&self.snapshot))
    }

    fn refresh(&self) -> Result<usize> {
        Ok(self.snapshot.len())
    }
}
