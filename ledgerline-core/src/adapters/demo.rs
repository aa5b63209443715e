//! Demo data generator
//!
//! Produces a small multi-currency invoicing dataset for onboarding and
//! testing: one company, two users (one admin, one staff), clients and
//! activity across USD/EUR/GBP over the last 90 days.

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::currency::CurrencyEntry;
use crate::domain::{Client, Company, Expense, Invoice, Payment, User};

/// Fixed demo company id, also written to settings as the acting company
pub const DEMO_COMPANY_ID: &str = "11111111-1111-1111-1111-111111111111";
/// Fixed demo admin user id, also written to settings as the acting user
pub const DEMO_ADMIN_ID: &str = "22222222-2222-2222-2222-222222222222";
/// Fixed demo staff user id (owns the GBP client)
pub const DEMO_STAFF_ID: &str = "33333333-3333-3333-3333-333333333333";

fn company_id() -> Uuid {
    Uuid::parse_str(DEMO_COMPANY_ID).unwrap()
}

fn admin_id() -> Uuid {
    Uuid::parse_str(DEMO_ADMIN_ID).unwrap()
}

fn staff_id() -> Uuid {
    Uuid::parse_str(DEMO_STAFF_ID).unwrap()
}

fn days_ago(days: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(days)
}

/// Currency directory rows for the demo database
pub fn generate_demo_currencies() -> Vec<CurrencyEntry> {
    vec![
        CurrencyEntry {
            id: 1,
            code: "USD".to_string(),
        },
        CurrencyEntry {
            id: 2,
            code: "EUR".to_string(),
        },
        CurrencyEntry {
            id: 3,
            code: "GBP".to_string(),
        },
        CurrencyEntry {
            id: 4,
            code: "JPY".to_string(),
        },
    ]
}

/// The demo company (default currency USD)
pub fn generate_demo_company() -> Company {
    Company::new(company_id(), "Meridian Design Studio", 1)
}

/// Demo users: one admin, one staff member
pub fn generate_demo_users() -> Vec<User> {
    vec![
        User {
            email: Some("alex@meridian.example".to_string()),
            ..User::new(admin_id(), company_id(), "Alex Reyes", true)
        },
        User {
            email: Some("sam@meridian.example".to_string()),
            ..User::new(staff_id(), company_id(), "Sam Okafor", false)
        },
    ]
}

/// Demo clients across three currencies
///
/// Includes one soft-archived client (still visible to reporting) and one
/// permanently deleted client (invisible everywhere) so the deletion rules
/// have data to bite on.
pub fn generate_demo_clients() -> Vec<Client> {
    let mut clients = vec![
        Client::new(
            Uuid::parse_str("aaaaaaa1-0000-0000-0000-000000000001").unwrap(),
            company_id(),
            admin_id(),
            "Harbor & Co",
            1,
        ),
        Client::new(
            Uuid::parse_str("aaaaaaa1-0000-0000-0000-000000000002").unwrap(),
            company_id(),
            admin_id(),
            "Atelier Fournier",
            2,
        ),
        Client::new(
            Uuid::parse_str("aaaaaaa1-0000-0000-0000-000000000003").unwrap(),
            company_id(),
            staff_id(),
            "Whitfield Press",
            3,
        ),
    ];

    // Archived but not deleted: its currency still counts
    let mut archived = Client::new(
        Uuid::parse_str("aaaaaaa1-0000-0000-0000-000000000004").unwrap(),
        company_id(),
        admin_id(),
        "Old Mill Bakery",
        1,
    );
    archived.archived_at = Some(Utc::now().naive_utc());
    clients.push(archived);

    // Permanently deleted: must never surface anywhere
    let mut deleted = Client::new(
        Uuid::parse_str("aaaaaaa1-0000-0000-0000-000000000005").unwrap(),
        company_id(),
        admin_id(),
        "Defunct Ventures",
        4,
    );
    deleted.is_deleted = true;
    clients.push(deleted);

    clients
}

/// Demo invoices over the last 90 days
pub fn generate_demo_invoices() -> Vec<Invoice> {
    let clients = generate_demo_clients();
    let harbor = clients[0].id;
    let atelier = clients[1].id;
    let whitfield = clients[2].id;

    let mut invoices = vec![
        Invoice::new(
            Uuid::parse_str("bbbbbbb1-0000-0000-0000-000000000001").unwrap(),
            company_id(),
            admin_id(),
            harbor,
            "INV-0001",
            1,
            Decimal::new(480000, 2), // $4,800.00
            days_ago(75),
        ),
        Invoice::new(
            Uuid::parse_str("bbbbbbb1-0000-0000-0000-000000000002").unwrap(),
            company_id(),
            admin_id(),
            harbor,
            "INV-0002",
            1,
            Decimal::new(215000, 2),
            days_ago(40),
        ),
        Invoice::new(
            Uuid::parse_str("bbbbbbb1-0000-0000-0000-000000000003").unwrap(),
            company_id(),
            admin_id(),
            atelier,
            "INV-0003",
            2,
            Decimal::new(362500, 2), // EUR 3,625.00
            days_ago(30),
        ),
        Invoice::new(
            Uuid::parse_str("bbbbbbb1-0000-0000-0000-000000000004").unwrap(),
            company_id(),
            staff_id(),
            whitfield,
            "INV-0004",
            3,
            Decimal::new(129000, 2), // GBP 1,290.00
            days_ago(12),
        ),
    ];

    // INV-0001 is fully paid, INV-0003 half paid
    invoices[0].balance = Decimal::ZERO;
    invoices[2].balance = Decimal::new(181250, 2);

    invoices
}

/// Demo payments matching the invoice balances above
pub fn generate_demo_payments() -> Vec<Payment> {
    let invoices = generate_demo_invoices();

    vec![
        Payment {
            invoice_id: Some(invoices[0].id),
            client_id: Some(invoices[0].client_id),
            ..Payment::new(
                Uuid::parse_str("ccccccc1-0000-0000-0000-000000000001").unwrap(),
                company_id(),
                Decimal::new(480000, 2),
                1,
                days_ago(60),
            )
        },
        Payment {
            invoice_id: Some(invoices[2].id),
            client_id: Some(invoices[2].client_id),
            ..Payment::new(
                Uuid::parse_str("ccccccc1-0000-0000-0000-000000000002").unwrap(),
                company_id(),
                Decimal::new(181250, 2),
                2,
                days_ago(14),
            )
        },
    ]
}

/// Demo expenses, including one in a currency no client uses (JPY)
pub fn generate_demo_expenses() -> Vec<Expense> {
    vec![
        Expense::new(
            Uuid::parse_str("ddddddd1-0000-0000-0000-000000000001").unwrap(),
            company_id(),
            admin_id(),
            Decimal::new(42050, 2), // $420.50 software licenses
            1,
            days_ago(50),
        ),
        Expense::new(
            Uuid::parse_str("ddddddd1-0000-0000-0000-000000000002").unwrap(),
            company_id(),
            staff_id(),
            Decimal::new(88000, 2), // GBP print proofs
            3,
            days_ago(22),
        ),
        Expense::new(
            Uuid::parse_str("ddddddd1-0000-0000-0000-000000000003").unwrap(),
            company_id(),
            admin_id(),
            Decimal::new(1500000, 0), // JPY stock photography
            4,
            days_ago(8),
        ),
    ]
}
