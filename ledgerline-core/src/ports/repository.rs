//! Reporting store port - database abstraction
//!
//! The reporting services consume the store through this trait. The metric
//! queries are thin aggregates: each returns rows grouped by currency, and
//! a currency with zero activity in the range is simply absent from the
//! result - callers substitute their own defaults.

use uuid::Uuid;

use crate::domain::currency::CurrencyId;
use crate::domain::report::{DateRange, MetricRow};
use crate::domain::result::Result;
use crate::domain::{Company, User, VisibilityScope};

/// Read interface for report aggregation
///
/// Any data-access failure is fatal for the calling operation and
/// propagates unchanged; no method retries.
pub trait ReportingStore: Send + Sync {
    // === Tenant/actor lookup ===

    /// Fetch a company by id
    fn company(&self, company_id: Uuid) -> Result<Option<Company>>;

    /// Fetch a user by id
    fn user(&self, user_id: Uuid) -> Result<Option<User>>;

    // === Currency resolution ===

    /// Distinct currency ids across the tenant's client records
    ///
    /// Soft-archived clients are included; permanently deleted ones are
    /// not. `scope` restricts to one owner for non-admin actors.
    fn client_currency_ids(
        &self,
        company_id: Uuid,
        scope: &VisibilityScope,
    ) -> Result<Vec<CurrencyId>>;

    /// Distinct currency ids across the tenant's expense records, same
    /// deletion and visibility rules as clients
    fn expense_currency_ids(
        &self,
        company_id: Uuid,
        scope: &VisibilityScope,
    ) -> Result<Vec<CurrencyId>>;

    // === Metric queries ===
    //
    // With `currency` set, rows are scoped to that single currency
    // (summary mode). With `None`, one query spans all currencies and
    // every row self-tags its currency id (totals mode).

    /// Amounts invoiced in the range
    fn invoice_totals(
        &self,
        company_id: Uuid,
        range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> Result<Vec<MetricRow>>;

    /// Open invoice balances for invoices issued in the range
    fn outstanding_totals(
        &self,
        company_id: Uuid,
        range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> Result<Vec<MetricRow>>;

    /// Payments received in the range
    fn payment_totals(
        &self,
        company_id: Uuid,
        range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> Result<Vec<MetricRow>>;

    /// Revenue (paid amounts) in the range
    fn revenue_totals(
        &self,
        company_id: Uuid,
        range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> Result<Vec<MetricRow>>;

    /// Expense amounts in the range
    fn expense_totals(
        &self,
        company_id: Uuid,
        range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> Result<Vec<MetricRow>>;
}
