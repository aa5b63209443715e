//! Report service - multi-currency report aggregation
//!
//! Builds two report shapes over the same metric queries:
//!
//! - `summary`: one per-currency query per metric. O(currencies x 4)
//!   round trips, no join concerns - each result list lands under its
//!   currency's slot untouched.
//! - `totals`: each metric fetched once across all currencies, every row
//!   self-tagging its currency id; rows are decorated with directory
//!   codes and then matched back to the resolved currency set, with an
//!   explicit empty placeholder where a currency had no activity.
//!
//! All four fetches of a call either succeed or the call fails as a
//! whole; there is no partial report.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::currency::{normalize_currency_id, CurrencyId, CurrencySnapshot};
use crate::domain::report::{
    CurrencySummary, CurrencyTotals, DateRange, MetricRow, MetricSlot, SummaryReport, TotalsReport,
};
use crate::domain::result::Result;
use crate::domain::User;
use crate::ports::{CurrencyDirectory, ReportingStore};
use crate::services::CurrencyService;

pub struct ReportService {
    store: Arc<dyn ReportingStore>,
    directory: Arc<dyn CurrencyDirectory>,
    currencies: CurrencyService,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportingStore>, directory: Arc<dyn CurrencyDirectory>) -> Self {
        let currencies = CurrencyService::new(Arc::clone(&store), Arc::clone(&directory));
        Self {
            store,
            directory,
            currencies,
        }
    }

    /// Time-series style report: independent per-currency queries
    pub fn summary(&self, company_id: Uuid, actor: &User, range: DateRange) -> Result<SummaryReport> {
        let snapshot = self.directory.snapshot()?;
        let resolved = self.currencies.resolve(company_id, actor)?;

        let mut data = HashMap::with_capacity(resolved.len());
        for currency in resolved {
            let block = CurrencySummary {
                code: snapshot.code_for(currency).to_string(),
                invoices: self.store.invoice_totals(company_id, &range, Some(currency))?,
                outstanding: self
                    .store
                    .outstanding_totals(company_id, &range, Some(currency))?,
                payments: self.store.payment_totals(company_id, &range, Some(currency))?,
                expenses: self.store.expense_totals(company_id, &range, Some(currency))?,
            };
            data.insert(currency, block);
        }

        Ok(SummaryReport {
            start_date: range.start,
            end_date: range.end,
            data,
        })
    }

    /// Point-in-time totals: one query per metric, re-keyed by currency
    pub fn totals(&self, company_id: Uuid, actor: &User, range: DateRange) -> Result<TotalsReport> {
        let snapshot = self.directory.snapshot()?;
        let resolved = self.currencies.resolve(company_id, actor)?;

        let mut invoices = self.store.invoice_totals(company_id, &range, None)?;
        let mut revenue = self.store.revenue_totals(company_id, &range, None)?;
        let mut outstanding = self.store.outstanding_totals(company_id, &range, None)?;
        let mut expenses = self.store.expense_totals(company_id, &range, None)?;

        // Decorate whole lists before any matching happens
        add_currency_codes(&mut invoices, &snapshot);
        add_currency_codes(&mut revenue, &snapshot);
        add_currency_codes(&mut outstanding, &snapshot);
        add_currency_codes(&mut expenses, &snapshot);

        let mut data = HashMap::with_capacity(resolved.len());
        for currency in resolved {
            data.insert(
                currency,
                CurrencyTotals {
                    code: snapshot.code_for(currency).to_string(),
                    invoices: first_match(&invoices, currency),
                    revenue: first_match(&revenue, currency),
                    outstanding: first_match(&outstanding, currency),
                    expenses: first_match(&expenses, currency),
                },
            );
        }

        Ok(TotalsReport {
            start_date: range.start,
            end_date: range.end,
            data,
        })
    }
}

/// Normalize each row's currency id and attach its directory code
///
/// Idempotent: normalizing an already-normalized id is a no-op, and the
/// code lookup is stable for a given snapshot. Ids the directory does not
/// know get an empty code.
pub fn add_currency_codes(rows: &mut [MetricRow], snapshot: &CurrencySnapshot) {
    for row in rows.iter_mut() {
        row.currency_id = normalize_currency_id(&row.currency_id);
        row.code = snapshot.code_for_raw(&row.currency_id).to_string();
    }
}

/// First row tagged with the currency, or the explicit empty placeholder
///
/// Duplicate rows for one currency would be a data error upstream; taking
/// the first is the defined tie-break, not a failure.
fn first_match(rows: &[MetricRow], currency: CurrencyId) -> MetricSlot {
    rows.iter()
        .find(|row| row.currency_id.parse::<CurrencyId>() == Ok(currency))
        .cloned()
        .into()
}
