//! Invoice domain model

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::currency::CurrencyId;

/// An invoice issued to a client
///
/// `amount` is the invoiced total; `balance` is what remains unpaid and is
/// what the outstanding metric aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub invoice_number: String,
    pub currency_id: CurrencyId,
    pub amount: Decimal,
    pub balance: Decimal,
    pub invoice_date: NaiveDate,
    pub archived_at: Option<NaiveDateTime>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        company_id: Uuid,
        user_id: Uuid,
        client_id: Uuid,
        invoice_number: impl Into<String>,
        currency_id: CurrencyId,
        amount: Decimal,
        invoice_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            company_id,
            user_id,
            client_id,
            invoice_number: invoice_number.into(),
            currency_id,
            amount,
            // A fresh invoice is fully unpaid
            balance: amount,
            invoice_date,
            archived_at: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.invoice_number.trim().is_empty() {
            return Err("invoice number cannot be empty");
        }
        if self.balance > self.amount {
            return Err("invoice balance cannot exceed invoiced amount");
        }
        Ok(())
    }
}
