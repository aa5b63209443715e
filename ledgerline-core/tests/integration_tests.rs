//! Integration tests for ledgerline-core services
//!
//! These tests run the full reporting stack against a real DuckDB file:
//! currency resolution, both report modes, directory decoration, and the
//! deletion/visibility rules. Only the database is real - there is no
//! network IO anywhere in this crate.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;
use uuid::Uuid;

use ledgerline_core::adapters::directory::CachedCurrencyDirectory;
use ledgerline_core::adapters::duckdb::DuckDbRepository;
use ledgerline_core::domain::currency::CurrencyEntry;
use ledgerline_core::domain::report::DateRange;
use ledgerline_core::domain::{Client, Company, Expense, Invoice, Payment, User};
use ledgerline_core::ports::{CurrencyDirectory, ReportingStore};
use ledgerline_core::services::{CurrencyService, ReportService};

// ============================================================================
// Test Helpers
// ============================================================================

struct TestEnv {
    repo: Arc<DuckDbRepository>,
    directory: Arc<CachedCurrencyDirectory>,
    company: Company,
    admin: User,
    staff: User,
}

impl TestEnv {
    /// Fresh database with schema, a USD/EUR/GBP directory, one company
    /// (default currency 1 = USD), and two users
    fn new(temp_dir: &TempDir) -> Self {
        let db_path = temp_dir.path().join("test.duckdb");
        let repo = Arc::new(DuckDbRepository::new(&db_path).expect("Failed to create repository"));
        repo.ensure_schema().expect("Failed to initialize schema");

        repo.replace_currencies(&[
            CurrencyEntry { id: 1, code: "USD".to_string() },
            CurrencyEntry { id: 2, code: "EUR".to_string() },
            CurrencyEntry { id: 3, code: "GBP".to_string() },
        ])
        .unwrap();

        let company = Company::new(Uuid::new_v4(), "Test Studio", 1);
        repo.upsert_company(&company).unwrap();

        let admin = User::new(Uuid::new_v4(), company.id, "Admin", true);
        let staff = User::new(Uuid::new_v4(), company.id, "Staff", false);
        repo.upsert_user(&admin).unwrap();
        repo.upsert_user(&staff).unwrap();

        let directory = Arc::new(CachedCurrencyDirectory::new(Arc::clone(&repo)));

        Self {
            repo,
            directory,
            company,
            admin,
            staff,
        }
    }

    fn currency_service(&self) -> CurrencyService {
        let store: Arc<dyn ReportingStore> = self.repo.clone();
        let directory: Arc<dyn CurrencyDirectory> = self.directory.clone();
        CurrencyService::new(store, directory)
    }

    fn report_service(&self) -> ReportService {
        let store: Arc<dyn ReportingStore> = self.repo.clone();
        let directory: Arc<dyn CurrencyDirectory> = self.directory.clone();
        ReportService::new(store, directory)
    }

    fn add_client(&self, owner: &User, currency: i64) -> Client {
        let client = Client::new(Uuid::new_v4(), self.company.id, owner.id, "Client", currency);
        self.repo.upsert_client(&client).unwrap();
        client
    }

    fn add_invoice(&self, owner: &User, client: &Client, amount: Decimal, date: NaiveDate) -> Invoice {
        let invoice = Invoice::new(
            Uuid::new_v4(),
            self.company.id,
            owner.id,
            client.id,
            format!("INV-{}", &Uuid::new_v4().to_string()[..8]),
            client.currency_id,
            amount,
            date,
        );
        self.repo.upsert_invoice(&invoice).unwrap();
        invoice
    }

    fn add_payment(&self, invoice: &Invoice, amount: Decimal, date: NaiveDate) -> Payment {
        let mut payment = Payment::new(
            Uuid::new_v4(),
            self.company.id,
            amount,
            invoice.currency_id,
            date,
        );
        payment.invoice_id = Some(invoice.id);
        payment.client_id = Some(invoice.client_id);
        self.repo.upsert_payment(&payment).unwrap();
        payment
    }

    fn add_expense(&self, owner: &User, currency: i64, amount: Decimal, date: NaiveDate) -> Expense {
        let expense = Expense::new(
            Uuid::new_v4(),
            self.company.id,
            owner.id,
            amount,
            currency,
            date,
        );
        self.repo.upsert_expense(&expense).unwrap();
        expense
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range_2026() -> DateRange {
    DateRange::new(date(2026, 1, 1), date(2026, 12, 31))
}

// ============================================================================
// Currency Resolution
// ============================================================================

/// A tenant with zero clients and zero expenses resolves to exactly its
/// default currency
#[test]
fn test_empty_tenant_resolves_to_default_currency_only() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    let resolved = env
        .currency_service()
        .resolve(env.company.id, &env.admin)
        .unwrap();

    assert_eq!(resolved, vec![1]);
}

#[test]
fn test_resolution_unions_clients_default_and_expenses() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    env.add_client(&env.admin, 2);
    env.add_client(&env.admin, 2); // duplicate currency
    env.add_expense(&env.admin, 3, Decimal::new(10000, 2), date(2026, 2, 1));

    let resolved = env
        .currency_service()
        .resolve(env.company.id, &env.admin)
        .unwrap();

    assert_eq!(resolved.len(), 3, "deduplicated union expected: {:?}", resolved);
    for id in [1, 2, 3] {
        assert!(resolved.contains(&id));
    }
}

/// Non-admin actors never see currencies that exist only on records they
/// do not own
#[test]
fn test_non_admin_resolution_is_restricted_to_own_records() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    env.add_client(&env.admin, 2); // admin-owned EUR client
    env.add_client(&env.staff, 3); // staff-owned GBP client

    let as_staff = env
        .currency_service()
        .resolve(env.company.id, &env.staff)
        .unwrap();
    assert!(!as_staff.contains(&2), "staff saw another user's currency");
    assert!(as_staff.contains(&3));
    assert!(as_staff.contains(&1), "default currency always present");

    let as_admin = env
        .currency_service()
        .resolve(env.company.id, &env.admin)
        .unwrap();
    assert!(as_admin.contains(&2));
    assert!(as_admin.contains(&3));
}

/// Soft-archived records still contribute currencies; permanently deleted
/// records never do
#[test]
fn test_deletion_rules_in_resolution() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    let mut archived = Client::new(Uuid::new_v4(), env.company.id, env.admin.id, "Archived", 2);
    archived.archived_at = Some(chrono::Utc::now().naive_utc());
    env.repo.upsert_client(&archived).unwrap();

    let mut deleted = Client::new(Uuid::new_v4(), env.company.id, env.admin.id, "Deleted", 3);
    deleted.is_deleted = true;
    env.repo.upsert_client(&deleted).unwrap();

    let resolved = env
        .currency_service()
        .resolve(env.company.id, &env.admin)
        .unwrap();

    assert!(resolved.contains(&2), "archived client's currency must count");
    assert!(!resolved.contains(&3), "deleted client's currency must not");
}

// ============================================================================
// Totals Report
// ============================================================================

/// One USD client, one EUR expense, default currency USD.
/// Resolution yields {1, 2}; with no EUR invoices the EUR invoice slot is
/// the explicit empty placeholder while USD reflects the actual rows.
#[test]
fn test_totals_usd_eur_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    let client = env.add_client(&env.admin, 1);
    let invoice = env.add_invoice(&env.admin, &client, Decimal::new(480000, 2), date(2026, 3, 10));
    env.add_payment(&invoice, Decimal::new(120000, 2), date(2026, 3, 20));
    env.add_expense(&env.admin, 2, Decimal::new(50000, 2), date(2026, 4, 1));

    let resolved = env
        .currency_service()
        .resolve(env.company.id, &env.admin)
        .unwrap();
    assert_eq!(resolved.len(), 2);
    assert!(resolved.contains(&1) && resolved.contains(&2));

    let report = env
        .report_service()
        .totals(env.company.id, &env.admin, range_2026())
        .unwrap();

    let usd = &report.data[&1];
    let usd_invoices = usd.invoices.row().expect("USD invoice row expected");
    assert_eq!(usd_invoices.total, Decimal::new(480000, 2));
    assert_eq!(usd_invoices.entries, 1);
    assert_eq!(usd_invoices.code, "USD");
    assert_eq!(usd.revenue.row().unwrap().total, Decimal::new(120000, 2));

    let eur = &report.data[&2];
    assert!(eur.invoices.is_empty(), "no EUR invoices: explicit empty slot");
    assert!(eur.revenue.is_empty());
    assert_eq!(eur.expenses.row().unwrap().total, Decimal::new(50000, 2));
    assert_eq!(eur.expenses.row().unwrap().code, "EUR");
}

/// Every resolved currency gets non-null placeholders for all four slots,
/// even with zero matching rows anywhere
#[test]
fn test_totals_always_fills_all_four_slots() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    env.add_client(&env.admin, 2);

    let report = env
        .report_service()
        .totals(env.company.id, &env.admin, range_2026())
        .unwrap();

    assert_eq!(report.data.len(), 2);
    for block in report.data.values() {
        assert!(block.invoices.is_empty());
        assert!(block.revenue.is_empty());
        assert!(block.outstanding.is_empty());
        assert!(block.expenses.is_empty());
    }

    // The JSON contract: empty slots are {}, never null
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["data"]["1"]["invoices"], serde_json::json!({}));
    assert_eq!(json["data"]["2"]["revenue"], serde_json::json!({}));
}

/// A resolved currency the directory does not know decorates to an empty
/// code; the call does not fail
#[test]
fn test_totals_with_currency_missing_from_directory() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    // Currency 7 exists on records but not in the directory table
    let client = env.add_client(&env.admin, 7);
    env.add_invoice(&env.admin, &client, Decimal::new(90000, 2), date(2026, 5, 5));

    let report = env
        .report_service()
        .totals(env.company.id, &env.admin, range_2026())
        .unwrap();

    let seven = &report.data[&7];
    assert_eq!(seven.code, "");
    let row = seven.invoices.row().expect("row for currency 7");
    assert_eq!(row.code, "");
    assert_eq!(row.total, Decimal::new(90000, 2));
}

/// Outstanding reflects open balances only; paid-off invoices drop out
#[test]
fn test_totals_outstanding_tracks_open_balances() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    let client = env.add_client(&env.admin, 1);

    // Fully paid invoice: balance zero
    let mut paid = Invoice::new(
        Uuid::new_v4(),
        env.company.id,
        env.admin.id,
        client.id,
        "INV-PAID",
        1,
        Decimal::new(100000, 2),
        date(2026, 2, 1),
    );
    paid.balance = Decimal::ZERO;
    env.repo.upsert_invoice(&paid).unwrap();

    // Half-paid invoice
    let mut open = Invoice::new(
        Uuid::new_v4(),
        env.company.id,
        env.admin.id,
        client.id,
        "INV-OPEN",
        1,
        Decimal::new(200000, 2),
        date(2026, 2, 15),
    );
    open.balance = Decimal::new(100000, 2);
    env.repo.upsert_invoice(&open).unwrap();

    let report = env
        .report_service()
        .totals(env.company.id, &env.admin, range_2026())
        .unwrap();

    let usd = &report.data[&1];
    assert_eq!(usd.outstanding.row().unwrap().total, Decimal::new(100000, 2));
    assert_eq!(usd.outstanding.row().unwrap().entries, 1);
    // Both invoices still count as invoiced amounts
    assert_eq!(usd.invoices.row().unwrap().total, Decimal::new(300000, 2));
}

/// Date range bounds are inclusive and rows outside the range vanish
#[test]
fn test_totals_respects_date_range() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    let client = env.add_client(&env.admin, 1);
    env.add_invoice(&env.admin, &client, Decimal::new(100000, 2), date(2026, 1, 1));
    env.add_invoice(&env.admin, &client, Decimal::new(200000, 2), date(2026, 6, 30));
    env.add_invoice(&env.admin, &client, Decimal::new(400000, 2), date(2026, 7, 1));

    let report = env
        .report_service()
        .totals(
            env.company.id,
            &env.admin,
            DateRange::new(date(2026, 1, 1), date(2026, 6, 30)),
        )
        .unwrap();

    let usd = &report.data[&1];
    assert_eq!(usd.invoices.row().unwrap().total, Decimal::new(300000, 2));
    assert_eq!(usd.invoices.row().unwrap().entries, 2);
}

// ============================================================================
// Summary Report
// ============================================================================

/// A range with no activity still yields a block per resolved currency,
/// each metric list empty (the provider's zero-activity convention)
#[test]
fn test_summary_empty_range_keys_all_resolved_currencies() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    let client = env.add_client(&env.admin, 2);
    env.add_invoice(&env.admin, &client, Decimal::new(100000, 2), date(2026, 3, 1));

    // Query a range before any activity
    let report = env
        .report_service()
        .summary(
            env.company.id,
            &env.admin,
            DateRange::new(date(2020, 1, 1), date(2020, 12, 31)),
        )
        .unwrap();

    assert_eq!(report.start_date, date(2020, 1, 1));
    assert_eq!(report.end_date, date(2020, 12, 31));
    assert_eq!(report.data.len(), 2);
    for block in report.data.values() {
        assert!(block.invoices.is_empty());
        assert!(block.outstanding.is_empty());
        assert!(block.payments.is_empty());
        assert!(block.expenses.is_empty());
    }
}

/// Each currency's slots hold only that currency's rows
#[test]
fn test_summary_scopes_metrics_per_currency() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    let usd_client = env.add_client(&env.admin, 1);
    let eur_client = env.add_client(&env.admin, 2);
    let usd_invoice =
        env.add_invoice(&env.admin, &usd_client, Decimal::new(150000, 2), date(2026, 2, 1));
    env.add_invoice(&env.admin, &eur_client, Decimal::new(250000, 2), date(2026, 2, 2));
    env.add_payment(&usd_invoice, Decimal::new(75000, 2), date(2026, 2, 10));

    let report = env
        .report_service()
        .summary(env.company.id, &env.admin, range_2026())
        .unwrap();

    let usd = &report.data[&1];
    assert_eq!(usd.code, "USD");
    assert_eq!(usd.invoices.len(), 1);
    assert_eq!(usd.invoices[0].total, Decimal::new(150000, 2));
    assert_eq!(usd.payments.len(), 1);
    assert_eq!(usd.payments[0].total, Decimal::new(75000, 2));

    let eur = &report.data[&2];
    assert_eq!(eur.code, "EUR");
    assert_eq!(eur.invoices.len(), 1);
    assert_eq!(eur.invoices[0].total, Decimal::new(250000, 2));
    assert!(eur.payments.is_empty());
}

/// Reports ignore data belonging to another tenant entirely
#[test]
fn test_reports_are_tenant_scoped() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    // A second company with its own activity in GBP
    let other = Company::new(Uuid::new_v4(), "Other Co", 3);
    env.repo.upsert_company(&other).unwrap();
    let other_admin = User::new(Uuid::new_v4(), other.id, "Other Admin", true);
    env.repo.upsert_user(&other_admin).unwrap();
    let other_client = Client::new(Uuid::new_v4(), other.id, other_admin.id, "Their Client", 3);
    env.repo.upsert_client(&other_client).unwrap();
    let other_invoice = Invoice::new(
        Uuid::new_v4(),
        other.id,
        other_admin.id,
        other_client.id,
        "INV-X",
        3,
        Decimal::new(999900, 2),
        date(2026, 3, 3),
    );
    env.repo.upsert_invoice(&other_invoice).unwrap();

    let resolved = env
        .currency_service()
        .resolve(env.company.id, &env.admin)
        .unwrap();
    assert_eq!(resolved, vec![1], "other tenant's GBP must not leak");

    let report = env
        .report_service()
        .totals(env.company.id, &env.admin, range_2026())
        .unwrap();
    assert!(report.data[&1].invoices.is_empty());
    assert!(!report.data.contains_key(&3));
}

// ============================================================================
// Currency Directory
// ============================================================================

/// Refresh atomically swaps the snapshot; readers in other threads always
/// see a complete directory
#[test]
fn test_concurrent_snapshot_readers_during_refresh() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    let directory = Arc::clone(&env.directory);
    directory.refresh().unwrap();

    thread::scope(|s| {
        for _ in 0..4 {
            let directory = Arc::clone(&directory);
            s.spawn(move || {
                for _ in 0..50 {
                    let snap = directory.snapshot().unwrap();
                    // A snapshot is complete or not present at all: the id
                    // set always matches one directory generation
                    assert!(snap.len() == 3 || snap.len() == 4);
                    for entry in snap.entries() {
                        assert!(!entry.code.is_empty());
                    }
                }
            });
        }

        let repo = Arc::clone(&env.repo);
        let directory = Arc::clone(&directory);
        s.spawn(move || {
            for i in 0..10 {
                let mut entries = vec![
                    CurrencyEntry { id: 1, code: "USD".to_string() },
                    CurrencyEntry { id: 2, code: "EUR".to_string() },
                    CurrencyEntry { id: 3, code: "GBP".to_string() },
                ];
                if i % 2 == 0 {
                    entries.push(CurrencyEntry { id: 4, code: "JPY".to_string() });
                }
                repo.replace_currencies(&entries).unwrap();
                directory.refresh().unwrap();
            }
        });
    });
}

/// The aggregator reads a fresh snapshot per call: a refresh between two
/// calls is visible in the second report
#[test]
fn test_directory_refresh_visible_to_next_report() {
    let temp_dir = TempDir::new().unwrap();
    let env = TestEnv::new(&temp_dir);

    let client = env.add_client(&env.admin, 2);
    env.add_invoice(&env.admin, &client, Decimal::new(100000, 2), date(2026, 3, 1));

    let service = env.report_service();
    let before = service
        .totals(env.company.id, &env.admin, range_2026())
        .unwrap();
    assert_eq!(before.data[&2].code, "EUR");

    // Directory row renamed out from under the cache
    env.repo
        .replace_currencies(&[
            CurrencyEntry { id: 1, code: "USD".to_string() },
            CurrencyEntry { id: 2, code: "EUX".to_string() },
        ])
        .unwrap();
    env.directory.refresh().unwrap();

    let after = service
        .totals(env.company.id, &env.admin, range_2026())
        .unwrap();
    assert_eq!(after.data[&2].code, "EUX");
}
