//! Expense domain model

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::currency::CurrencyId;

/// A company expense, possibly in a currency no client uses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: Uuid,
    /// Optional client the expense is billable to
    pub client_id: Option<Uuid>,
    pub amount: Decimal,
    pub currency_id: CurrencyId,
    pub expense_date: NaiveDate,
    pub archived_at: Option<NaiveDateTime>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        id: Uuid,
        company_id: Uuid,
        user_id: Uuid,
        amount: Decimal,
        currency_id: CurrencyId,
        expense_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            company_id,
            user_id,
            client_id: None,
            amount,
            currency_id,
            expense_date,
            archived_at: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
