//! User domain model and actor visibility

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The acting identity behind a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    /// Admins see every record in the tenant; everyone else only their own
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Uuid, company_id: Uuid, name: impl Into<String>, is_admin: bool) -> Self {
        let now = Utc::now();
        Self {
            id,
            company_id,
            name: name.into(),
            email: None,
            is_admin,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Record visibility for a query, decided before the query is built
///
/// This is a tagged choice between the two predicates, not a conditional
/// mutation of a query builder: `Company` sees every tenant record,
/// `OwnedBy` only records whose `user_id` matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Tenant-wide visibility (admin actors)
    Company,
    /// Restricted to records owned by this user
    OwnedBy(Uuid),
}

impl VisibilityScope {
    /// Choose the scope for an actor
    pub fn for_actor(actor: &User) -> Self {
        if actor.is_admin {
            Self::Company
        } else {
            Self::OwnedBy(actor.id)
        }
    }

    /// The owning user to filter by, if any
    pub fn owner(&self) -> Option<Uuid> {
        match self {
            Self::Company => None,
            Self::OwnedBy(id) => Some(*id),
        }
    }
}
