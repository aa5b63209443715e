//! DuckDB repository implementation

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use duckdb::{params, Connection};
use rust_decimal::Decimal;
use sqlparser::dialect::DuckDbDialect;
use sqlparser::parser::Parser;
use uuid::Uuid;

use crate::domain::currency::{CurrencyEntry, CurrencyId};
use crate::domain::report::{DateRange, MetricRow};
use crate::domain::result::Error;
use crate::domain::{Client, Company, Expense, Invoice, Payment, User, VisibilityScope};
use crate::ports::ReportingStore;
use crate::services::MigrationService;

/// Validate SQL syntax before execution to catch malformed queries early.
/// This prevents crashes from malformed SQL reaching the database engine.
pub fn validate_sql_syntax(sql: &str) -> Result<()> {
    let dialect = DuckDbDialect {};
    Parser::parse_sql(&dialect, sql).map_err(|e| {
        let msg = e.to_string();
        let cleaned = msg.trim_start_matches("sql parser error: ");
        anyhow!("{}", cleaned)
    })?;
    Ok(())
}

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400, 800ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

impl From<duckdb::Error> for Error {
    fn from(e: duckdb::Error) -> Self {
        Error::Database(e.to_string())
    }
}

/// Result of a read-only SQL query
#[derive(Debug, Clone, serde::Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
    pub row_count: usize,
}

/// DuckDB repository implementation
pub struct DuckDbRepository {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl DuckDbRepository {
    /// Create a new DuckDB repository
    ///
    /// Includes retry logic with exponential backoff for file locking
    /// errors, which can occur when two invocations touch the database
    /// simultaneously (e.g. a report run racing a backup).
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    return Ok(Self {
                        conn: Mutex::new(conn),
                        db_path: db_path.to_path_buf(),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        eprintln!(
                            "[ledgerline] Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow!("Failed to open database after {} retries", MAX_RETRIES)))
    }

    /// Attempt to open a database connection (called by new() with retry logic)
    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Disable extension autoloading: cached extensions can carry stale
        // code signatures on macOS and we do not need any of them
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_with_flags(db_path, config)?;
        Ok(conn)
    }

    /// Path of the database file backing this repository
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run database migrations using the MigrationService
    pub fn run_migrations(&self) -> Result<crate::services::MigrationResult> {
        let conn = self.conn.lock().unwrap();
        let migration_service = MigrationService::new(&conn);
        migration_service.run_pending()
    }

    /// Ensure database schema exists (runs pending migrations)
    pub fn ensure_schema(&self) -> Result<()> {
        self.run_migrations()?;
        Ok(())
    }

    // === Write operations (seeding, demo data, tests) ===

    pub fn upsert_company(&self, company: &Company) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO companies (company_id, name, default_currency_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT (company_id) DO UPDATE SET
                name = EXCLUDED.name,
                default_currency_id = EXCLUDED.default_currency_id,
                updated_at = EXCLUDED.updated_at",
            params![
                company.id.to_string(),
                company.name,
                company.default_currency_id,
                company.created_at.naive_utc().to_string(),
                company.updated_at.naive_utc().to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn upsert_user(&self, user: &User) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO users (user_id, company_id, name, email, is_admin, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (user_id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                is_admin = EXCLUDED.is_admin,
                updated_at = EXCLUDED.updated_at",
            params![
                user.id.to_string(),
                user.company_id.to_string(),
                user.name,
                user.email,
                user.is_admin,
                user.created_at.naive_utc().to_string(),
                user.updated_at.naive_utc().to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn upsert_client(&self, client: &Client) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO clients (client_id, company_id, user_id, name, currency_id,
                                  archived_at, is_deleted, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (client_id) DO UPDATE SET
                name = EXCLUDED.name,
                currency_id = EXCLUDED.currency_id,
                archived_at = EXCLUDED.archived_at,
                is_deleted = EXCLUDED.is_deleted,
                updated_at = EXCLUDED.updated_at",
            params![
                client.id.to_string(),
                client.company_id.to_string(),
                client.user_id.to_string(),
                client.name,
                client.currency_id,
                client.archived_at.map(|d| d.to_string()),
                client.is_deleted,
                client.created_at.naive_utc().to_string(),
                client.updated_at.naive_utc().to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn upsert_invoice(&self, invoice: &Invoice) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO invoices (invoice_id, company_id, user_id, client_id, invoice_number,
                                   currency_id, amount, balance, invoice_date,
                                   archived_at, is_deleted, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (invoice_id) DO UPDATE SET
                invoice_number = EXCLUDED.invoice_number,
                currency_id = EXCLUDED.currency_id,
                amount = EXCLUDED.amount,
                balance = EXCLUDED.balance,
                invoice_date = EXCLUDED.invoice_date,
                archived_at = EXCLUDED.archived_at,
                is_deleted = EXCLUDED.is_deleted,
                updated_at = EXCLUDED.updated_at",
            params![
                invoice.id.to_string(),
                invoice.company_id.to_string(),
                invoice.user_id.to_string(),
                invoice.client_id.to_string(),
                invoice.invoice_number,
                invoice.currency_id,
                invoice.amount.to_string().parse::<f64>().unwrap_or(0.0),
                invoice.balance.to_string().parse::<f64>().unwrap_or(0.0),
                invoice.invoice_date.to_string(),
                invoice.archived_at.map(|d| d.to_string()),
                invoice.is_deleted,
                invoice.created_at.naive_utc().to_string(),
                invoice.updated_at.naive_utc().to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn upsert_payment(&self, payment: &Payment) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO payments (payment_id, company_id, invoice_id, client_id, amount,
                                   currency_id, payment_date,
                                   archived_at, is_deleted, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (payment_id) DO UPDATE SET
                amount = EXCLUDED.amount,
                currency_id = EXCLUDED.currency_id,
                payment_date = EXCLUDED.payment_date,
                archived_at = EXCLUDED.archived_at,
                is_deleted = EXCLUDED.is_deleted,
                updated_at = EXCLUDED.updated_at",
            params![
                payment.id.to_string(),
                payment.company_id.to_string(),
                payment.invoice_id.map(|id| id.to_string()),
                payment.client_id.map(|id| id.to_string()),
                payment.amount.to_string().parse::<f64>().unwrap_or(0.0),
                payment.currency_id,
                payment.payment_date.to_string(),
                payment.archived_at.map(|d| d.to_string()),
                payment.is_deleted,
                payment.created_at.naive_utc().to_string(),
                payment.updated_at.naive_utc().to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn upsert_expense(&self, expense: &Expense) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO expenses (expense_id, company_id, user_id, client_id, amount,
                                   currency_id, expense_date,
                                   archived_at, is_deleted, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (expense_id) DO UPDATE SET
                amount = EXCLUDED.amount,
                currency_id = EXCLUDED.currency_id,
                expense_date = EXCLUDED.expense_date,
                archived_at = EXCLUDED.archived_at,
                is_deleted = EXCLUDED.is_deleted,
                updated_at = EXCLUDED.updated_at",
            params![
                expense.id.to_string(),
                expense.company_id.to_string(),
                expense.user_id.to_string(),
                expense.client_id.map(|id| id.to_string()),
                expense.amount.to_string().parse::<f64>().unwrap_or(0.0),
                expense.currency_id,
                expense.expense_date.to_string(),
                expense.archived_at.map(|d| d.to_string()),
                expense.is_deleted,
                expense.created_at.naive_utc().to_string(),
                expense.updated_at.naive_utc().to_string(),
            ],
        )?;
        Ok(())
    }

    /// Replace the currency directory table with a new set of rows
    pub fn replace_currencies(&self, entries: &[CurrencyEntry]) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM currencies", [])?;
        for entry in entries {
            conn.execute(
                "INSERT INTO currencies (currency_id, code) VALUES (?, ?)",
                params![entry.id, entry.code],
            )?;
        }
        Ok(())
    }

    // === Directory reads ===

    /// All rows of the currency directory table, ordered by id
    pub fn get_currencies(&self) -> Result<Vec<CurrencyEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT currency_id, code FROM currencies ORDER BY currency_id")?;

        let entries = stmt
            .query_map([], |row| {
                Ok(CurrencyEntry {
                    id: row.get(0)?,
                    code: row.get(1)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(entries)
    }

    // === Status reads ===

    pub fn count_rows(&self, table: &str) -> Result<i64> {
        // Table name is interpolated, so restrict to the known set
        const KNOWN: &[&str] = &[
            "companies",
            "users",
            "clients",
            "invoices",
            "payments",
            "expenses",
            "currencies",
        ];
        if !KNOWN.contains(&table) {
            anyhow::bail!("Unknown table: {}", table);
        }
        let conn = self.conn.lock().unwrap();
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }

    /// Earliest and latest invoice dates across non-deleted invoices
    pub fn get_invoice_date_range(&self) -> Result<(Option<String>, Option<String>)> {
        let conn = self.conn.lock().unwrap();
        let range = conn.query_row(
            "SELECT CAST(MIN(invoice_date) AS VARCHAR), CAST(MAX(invoice_date) AS VARCHAR)
             FROM invoices WHERE is_deleted = FALSE",
            [],
            |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                ))
            },
        )?;
        Ok(range)
    }

    // === Query operations ===

    /// Execute a read-only SQL query, returning rows as JSON values
    pub fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        // Only SELECT/WITH statements are allowed; check the first word
        let first_word = sql
            .trim()
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_uppercase();
        if first_word != "SELECT" && first_word != "WITH" {
            anyhow::bail!("Only SELECT queries are allowed");
        }

        // Also block write keywords in subqueries. Keywords are matched
        // after a separator to avoid false positives (deleted_at vs DELETE)
        if contains_write_keyword(sql) {
            anyhow::bail!("Only SELECT queries are allowed");
        }

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(sql)?;
        let mut result_rows = stmt.query([])?;

        let mut rows: Vec<Vec<serde_json::Value>> = Vec::new();
        let mut column_count = 0;

        while let Some(row) = result_rows.next()? {
            if rows.is_empty() {
                column_count = row.as_ref().column_count();
            }

            let mut row_values: Vec<serde_json::Value> = Vec::new();
            for i in 0..column_count {
                row_values.push(column_value(row, i));
            }
            rows.push(row_values);
        }

        // Release the borrow on stmt before reading column names
        drop(result_rows);

        let count = if column_count > 0 {
            column_count
        } else {
            stmt.column_count()
        };
        let columns: Vec<String> = (0..count)
            .map(|i| {
                stmt.column_name(i)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|_| format!("col{}", i))
            })
            .collect();

        let row_count = rows.len();

        Ok(QueryResult {
            columns,
            rows,
            row_count,
        })
    }

    // === Metric aggregates ===
    //
    // currency_id is selected as VARCHAR on purpose: rows self-tag their
    // currency the way the storage layer hands it back, and the report
    // aggregator owns normalization of that tag.

    fn metric_rows(
        &self,
        base_sql: &str,
        company_id: Uuid,
        range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> crate::domain::result::Result<Vec<MetricRow>> {
        let conn = self.conn.lock().unwrap();
        let rows: Vec<MetricRow> = match currency {
            Some(id) => {
                let sql = format!("{} AND currency_id = ? GROUP BY currency_id", base_sql);
                let mut stmt = conn.prepare(&sql)?;
                let mapped = stmt.query_map(
                    params![
                        company_id.to_string(),
                        range.start.to_string(),
                        range.end.to_string(),
                        id
                    ],
                    map_metric_row,
                )?;
                mapped.filter_map(|r| r.ok()).collect()
            }
            None => {
                let sql = format!("{} GROUP BY currency_id", base_sql);
                let mut stmt = conn.prepare(&sql)?;
                let mapped = stmt.query_map(
                    params![
                        company_id.to_string(),
                        range.start.to_string(),
                        range.end.to_string()
                    ],
                    map_metric_row,
                )?;
                mapped.filter_map(|r| r.ok()).collect()
            }
        };
        Ok(rows)
    }

    fn distinct_currency_ids(
        &self,
        table: &'static str,
        company_id: Uuid,
        scope: &VisibilityScope,
    ) -> crate::domain::result::Result<Vec<CurrencyId>> {
        let conn = self.conn.lock().unwrap();
        // Two explicit query forms, chosen by scope before execution.
        // Soft-archived records are included; is_deleted excludes.
        let ids: Vec<CurrencyId> = match scope.owner() {
            Some(user_id) => {
                let sql = format!(
                    "SELECT DISTINCT currency_id FROM {}
                     WHERE company_id = ? AND is_deleted = FALSE AND user_id = ?",
                    table
                );
                let mut stmt = conn.prepare(&sql)?;
                let mapped = stmt.query_map(
                    params![company_id.to_string(), user_id.to_string()],
                    |row| row.get::<_, i64>(0),
                )?;
                mapped.filter_map(|r| r.ok()).collect()
            }
            None => {
                let sql = format!(
                    "SELECT DISTINCT currency_id FROM {}
                     WHERE company_id = ? AND is_deleted = FALSE",
                    table
                );
                let mut stmt = conn.prepare(&sql)?;
                let mapped =
                    stmt.query_map(params![company_id.to_string()], |row| row.get::<_, i64>(0))?;
                mapped.filter_map(|r| r.ok()).collect()
            }
        };
        Ok(ids)
    }
}

impl ReportingStore for DuckDbRepository {
    fn company(&self, company_id: Uuid) -> crate::domain::result::Result<Option<Company>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT company_id, name, default_currency_id,
                    CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR)
             FROM companies WHERE company_id = ?",
        )?;

        let mut rows = stmt.query_map(params![company_id.to_string()], |row| {
            let id_str: String = row.get(0)?;
            let created: String = row.get(3)?;
            let updated: String = row.get(4)?;
            Ok(Company {
                id: Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::new_v4()),
                name: row.get(1)?,
                default_currency_id: row.get(2)?,
                created_at: parse_timestamp(&created),
                updated_at: parse_timestamp(&updated),
            })
        })?;

        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    fn user(&self, user_id: Uuid) -> crate::domain::result::Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT user_id, company_id, name, email, is_admin,
                    CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR)
             FROM users WHERE user_id = ?",
        )?;

        let mut rows = stmt.query_map(params![user_id.to_string()], |row| {
            let id_str: String = row.get(0)?;
            let company_str: String = row.get(1)?;
            let created: String = row.get(5)?;
            let updated: String = row.get(6)?;
            Ok(User {
                id: Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::new_v4()),
                company_id: Uuid::parse_str(&company_str).unwrap_or_else(|_| Uuid::new_v4()),
                name: row.get(2)?,
                email: row.get(3)?,
                is_admin: row.get(4)?,
                created_at: parse_timestamp(&created),
                updated_at: parse_timestamp(&updated),
            })
        })?;

        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    fn client_currency_ids(
        &self,
        company_id: Uuid,
        scope: &VisibilityScope,
    ) -> crate::domain::result::Result<Vec<CurrencyId>> {
        self.distinct_currency_ids("clients", company_id, scope)
    }

    fn expense_currency_ids(
        &self,
        company_id: Uuid,
        scope: &VisibilityScope,
    ) -> crate::domain::result::Result<Vec<CurrencyId>> {
        self.distinct_currency_ids("expenses", company_id, scope)
    }

    fn invoice_totals(
        &self,
        company_id: Uuid,
        range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> crate::domain::result::Result<Vec<MetricRow>> {
        self.metric_rows(
            "SELECT CAST(currency_id AS VARCHAR), CAST(SUM(amount) AS DOUBLE), COUNT(*)
             FROM invoices
             WHERE company_id = ? AND is_deleted = FALSE
               AND invoice_date >= ? AND invoice_date <= ?",
            company_id,
            range,
            currency,
        )
    }

    fn outstanding_totals(
        &self,
        company_id: Uuid,
        range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> crate::domain::result::Result<Vec<MetricRow>> {
        self.metric_rows(
            "SELECT CAST(currency_id AS VARCHAR), CAST(SUM(balance) AS DOUBLE), COUNT(*)
             FROM invoices
             WHERE company_id = ? AND is_deleted = FALSE AND balance > 0
               AND invoice_date >= ? AND invoice_date <= ?",
            company_id,
            range,
            currency,
        )
    }

    fn payment_totals(
        &self,
        company_id: Uuid,
        range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> crate::domain::result::Result<Vec<MetricRow>> {
        self.metric_rows(
            "SELECT CAST(currency_id AS VARCHAR), CAST(SUM(amount) AS DOUBLE), COUNT(*)
             FROM payments
             WHERE company_id = ? AND is_deleted = FALSE
               AND payment_date >= ? AND payment_date <= ?",
            company_id,
            range,
            currency,
        )
    }

    fn revenue_totals(
        &self,
        company_id: Uuid,
        range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> crate::domain::result::Result<Vec<MetricRow>> {
        // Revenue is cash received: paid amounts net of refunds
        self.metric_rows(
            "SELECT CAST(currency_id AS VARCHAR), CAST(SUM(amount) AS DOUBLE), COUNT(*)
             FROM payments
             WHERE company_id = ? AND is_deleted = FALSE AND archived_at IS NULL
               AND payment_date >= ? AND payment_date <= ?",
            company_id,
            range,
            currency,
        )
    }

    fn expense_totals(
        &self,
        company_id: Uuid,
        range: &DateRange,
        currency: Option<CurrencyId>,
    ) -> crate::domain::result::Result<Vec<MetricRow>> {
        self.metric_rows(
            "SELECT CAST(currency_id AS VARCHAR), CAST(SUM(amount) AS DOUBLE), COUNT(*)
             FROM expenses
             WHERE company_id = ? AND is_deleted = FALSE
               AND expense_date >= ? AND expense_date <= ?",
            company_id,
            range,
            currency,
        )
    }
}

fn map_metric_row(row: &duckdb::Row) -> duckdb::Result<MetricRow> {
    let currency_id: String = row.get(0)?;
    let total: f64 = row.get(1)?;
    let entries: i64 = row.get(2)?;
    Ok(MetricRow {
        currency_id,
        code: String::new(),
        total: Decimal::try_from(total).unwrap_or_default(),
        entries,
    })
}

/// Write keywords that disqualify a query, matched after a separator to
/// avoid hitting column names like deleted_at
fn contains_write_keyword(sql: &str) -> bool {
    const KEYWORDS: &[&str] = &["INSERT", "UPDATE", "DELETE", "DROP", "CREATE", "ALTER", "TRUNCATE"];
    let upper = sql.to_uppercase();
    for kw in KEYWORDS {
        let mut start = 0;
        while let Some(pos) = upper[start..].find(kw) {
            let abs = start + pos;
            let before_ok = abs == 0
                || matches!(upper.as_bytes()[abs - 1], b' ' | b'\t' | b'\n' | b'(' | b';');
            let after = abs + kw.len();
            let after_ok = after >= upper.len()
                || matches!(upper.as_bytes()[after], b' ' | b'\t' | b'\n' | b'(');
            // The first word was already checked by the caller; any other
            // separated occurrence is a write attempt
            if before_ok && after_ok && abs != 0 {
                return true;
            }
            start = after;
        }
    }
    false
}

fn column_value(row: &duckdb::Row, idx: usize) -> serde_json::Value {
    use duckdb::types::ValueRef;

    match row.get_ref(idx) {
        Ok(ValueRef::Null) => serde_json::Value::Null,
        Ok(ValueRef::Boolean(b)) => serde_json::Value::Bool(b),
        Ok(ValueRef::TinyInt(i)) => serde_json::json!(i),
        Ok(ValueRef::SmallInt(i)) => serde_json::json!(i),
        Ok(ValueRef::Int(i)) => serde_json::json!(i),
        Ok(ValueRef::BigInt(i)) => serde_json::json!(i),
        Ok(ValueRef::HugeInt(i)) => serde_json::json!(i.to_string()),
        Ok(ValueRef::UTinyInt(i)) => serde_json::json!(i),
        Ok(ValueRef::USmallInt(i)) => serde_json::json!(i),
        Ok(ValueRef::UInt(i)) => serde_json::json!(i),
        Ok(ValueRef::UBigInt(i)) => serde_json::json!(i),
        Ok(ValueRef::Float(f)) => serde_json::json!(f),
        Ok(ValueRef::Double(f)) => serde_json::json!(f),
        Ok(ValueRef::Decimal(d)) => {
            use std::str::FromStr;
            let s = d.to_string();
            match f64::from_str(&s) {
                Ok(f) => serde_json::json!(f),
                Err(_) => serde_json::Value::String(s),
            }
        }
        Ok(ValueRef::Text(bytes)) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).to_string())
        }
        Ok(ValueRef::Blob(bytes)) => {
            serde_json::Value::String(format!("<blob {} bytes>", bytes.len()))
        }
        Ok(ValueRef::Date32(d)) => {
            // Days since epoch
            let epoch = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            let date = epoch + chrono::Duration::days(d as i64);
            serde_json::Value::String(date.to_string())
        }
        Ok(ValueRef::Timestamp(_, ts)) => {
            // Microseconds since epoch
            let dt = chrono::DateTime::from_timestamp_micros(ts)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| ts.to_string());
            serde_json::Value::String(dt)
        }
        _ => serde_json::Value::Null,
    }
}

/// Parse a TIMESTAMP column rendered as VARCHAR back into a UTC instant
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}
