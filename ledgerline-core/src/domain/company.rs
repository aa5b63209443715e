//! Company domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::currency::CurrencyId;

/// A tenant: an isolated customer account whose data is never mixed with
/// another company's. Every query in the reporting layer is implicitly
/// scoped by company id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    /// Always part of the resolved currency set, even with zero activity
    pub default_currency_id: CurrencyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(id: Uuid, name: impl Into<String>, default_currency_id: CurrencyId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            default_currency_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("company name cannot be empty");
        }
        if self.default_currency_id <= 0 {
            return Err("default currency id must be positive");
        }
        Ok(())
    }
}
