//! Currency service - resolves the currency set relevant to a tenant
//!
//! The resolved set is the union of client currencies, the company's own
//! default currency, and expense currencies, restricted by the actor's
//! visibility. Order is not significant to callers (they always index by
//! currency id); deduplication keeps the first occurrence.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::currency::CurrencyId;
use crate::domain::result::{Error, Result};
use crate::domain::{User, VisibilityScope};
use crate::ports::{CurrencyDirectory, ReportingStore};

/// A resolved currency decorated with its directory code (for display)
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedCurrency {
    pub id: CurrencyId,
    pub code: String,
}

pub struct CurrencyService {
    store: Arc<dyn ReportingStore>,
    directory: Arc<dyn CurrencyDirectory>,
}

impl CurrencyService {
    pub fn new(store: Arc<dyn ReportingStore>, directory: Arc<dyn CurrencyDirectory>) -> Self {
        Self { store, directory }
    }

    /// Resolve every currency with financial activity for the tenant,
    /// visible to the actor, plus the tenant's default currency
    ///
    /// A tenant with zero clients and zero expenses still resolves to
    /// exactly one currency: its default. Soft-archived records count;
    /// permanently deleted ones never do.
    pub fn resolve(&self, company_id: Uuid, actor: &User) -> Result<Vec<CurrencyId>> {
        let company = self
            .store
            .company(company_id)?
            .ok_or_else(|| Error::not_found(format!("Company not found: {}", company_id)))?;

        let scope = VisibilityScope::for_actor(actor);

        let client_ids = self.store.client_currency_ids(company_id, &scope)?;
        let expense_ids = self.store.expense_currency_ids(company_id, &scope)?;

        // Union of clients, the default currency (always, active or not),
        // and expenses; first occurrence wins
        let mut resolved: Vec<CurrencyId> = Vec::new();
        for id in client_ids
            .into_iter()
            .chain(std::iter::once(company.default_currency_id))
            .chain(expense_ids)
        {
            if !resolved.contains(&id) {
                resolved.push(id);
            }
        }

        Ok(resolved)
    }

    /// Resolve currencies and attach their directory codes
    ///
    /// An id the directory does not know gets an empty code, not an error.
    pub fn resolve_decorated(&self, company_id: Uuid, actor: &User) -> Result<Vec<ResolvedCurrency>> {
        let snapshot = self.directory.snapshot()?;
        let resolved = self.resolve(company_id, actor)?;
        Ok(resolved
            .into_iter()
            .map(|id| ResolvedCurrency {
                id,
                code: snapshot.code_for(id).to_string(),
            })
            .collect())
    }

    /// Reload the directory cache from its backing store
    pub fn refresh_directory(&self) -> Result<usize> {
        self.directory.refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, StaticDirectory};

    fn service(store: MemoryStore) -> (CurrencyService, Uuid) {
        let company_id = store.company_id();
        let svc = CurrencyService::new(
            Arc::new(store),
            Arc::new(StaticDirectory::with_codes(&[(1, "USD"), (2, "EUR"), (3, "GBP")])),
        );
        (svc, company_id)
    }

    #[test]
    fn test_empty_tenant_resolves_to_default_only() {
        let store = MemoryStore::new(1);
        let admin = store.admin();
        let (svc, company_id) = service(store);

        let resolved = svc.resolve(company_id, &admin).unwrap();
        assert_eq!(resolved, vec![1]);
    }

    #[test]
    fn test_union_is_deduplicated() {
        let mut store = MemoryStore::new(1);
        let admin = store.admin();
        store.add_client_currency(admin.id, 1);
        store.add_client_currency(admin.id, 2);
        store.add_expense_currency(admin.id, 2);
        store.add_expense_currency(admin.id, 3);
        let (svc, company_id) = service(store);

        let resolved = svc.resolve(company_id, &admin).unwrap();
        assert_eq!(resolved.len(), 3);
        for id in [1, 2, 3] {
            assert!(resolved.contains(&id));
        }
    }

    #[test]
    fn test_non_admin_does_not_see_other_users_currencies() {
        let mut store = MemoryStore::new(1);
        let admin = store.admin();
        let staff = store.staff();
        store.add_client_currency(admin.id, 2);
        store.add_expense_currency(staff.id, 3);
        let (svc, company_id) = service(store);

        let as_staff = svc.resolve(company_id, &staff).unwrap();
        assert!(!as_staff.contains(&2), "other user's currency leaked");
        assert_eq!(as_staff, vec![1, 3]);

        let as_admin = svc.resolve(company_id, &admin).unwrap();
        assert!(as_admin.contains(&2));
        assert!(as_admin.contains(&3));
    }

    #[test]
    fn test_unknown_company_is_an_error() {
        let store = MemoryStore::new(1);
        let admin = store.admin();
        let (svc, _) = service(store);

        let err = svc.resolve(Uuid::new_v4(), &admin).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_decorated_resolution_handles_directory_miss() {
        let mut store = MemoryStore::new(1);
        let admin = store.admin();
        store.add_client_currency(admin.id, 7);
        let company_id = store.company_id();
        let svc = CurrencyService::new(
            Arc::new(store),
            Arc::new(StaticDirectory::with_codes(&[(1, "USD")])),
        );

        let decorated = svc.resolve_decorated(company_id, &admin).unwrap();
        let seven = decorated.iter().find(|c| c.id == 7).unwrap();
        assert_eq!(seven.code, "");
        let one = decorated.iter().find(|c| c.id == 1).unwrap();
        assert_eq!(one.code, "USD");
    }
}
