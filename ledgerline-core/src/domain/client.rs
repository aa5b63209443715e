//! Client domain model

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::currency::CurrencyId;

/// A client the company invoices
///
/// Carries two independent deletion marks: `archived_at` soft-archives the
/// record (it stays visible to reporting so historical currencies never
/// vanish), `is_deleted` removes it permanently from every query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub company_id: Uuid,
    /// Owning user; non-admin actors only see their own clients
    pub user_id: Uuid,
    pub name: String,
    pub currency_id: CurrencyId,
    pub archived_at: Option<NaiveDateTime>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(
        id: Uuid,
        company_id: Uuid,
        user_id: Uuid,
        name: impl Into<String>,
        currency_id: CurrencyId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            company_id,
            user_id,
            name: name.into(),
            currency_id,
            archived_at: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("client name cannot be empty");
        }
        Ok(())
    }
}
