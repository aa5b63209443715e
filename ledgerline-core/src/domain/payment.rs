//! Payment domain model

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::currency::CurrencyId;

/// A payment received against an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub company_id: Uuid,
    pub invoice_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub amount: Decimal,
    pub currency_id: CurrencyId,
    pub payment_date: NaiveDate,
    pub archived_at: Option<NaiveDateTime>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        id: Uuid,
        company_id: Uuid,
        amount: Decimal,
        currency_id: CurrencyId,
        payment_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            company_id,
            invoice_id: None,
            client_id: None,
            amount,
            currency_id,
            payment_date,
            archived_at: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
