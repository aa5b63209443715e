//! Currency directory types
//!
//! The directory maps currency ids to 3-letter display codes. It is
//! populated by an external refresh job and consumed here as an immutable
//! snapshot: readers always see a complete mapping, never a partially
//! updated one.

use serde::{Deserialize, Serialize};

/// Identifier for a currency in the shared directory
pub type CurrencyId = i64;

/// One directory row: id plus display code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyEntry {
    pub id: CurrencyId,
    /// ISO 4217 code, e.g. "USD"
    pub code: String,
}

/// Immutable point-in-time view of the currency directory
///
/// Lookups are first-match-wins: duplicate ids should not occur, but if
/// they do the earliest row is used rather than failing. An id missing
/// from the snapshot resolves to an empty string, never an error.
#[derive(Debug, Clone, Default)]
pub struct CurrencySnapshot {
    entries: Vec<CurrencyEntry>,
}

impl CurrencySnapshot {
    pub fn new(entries: Vec<CurrencyEntry>) -> Self {
        Self { entries }
    }

    /// A snapshot with no entries (directory not yet refreshed)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CurrencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a currency id to its display code
    pub fn code_for(&self, id: CurrencyId) -> &str {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.code.as_str())
            .unwrap_or("")
    }

    /// Resolve a raw (possibly quote-wrapped) currency id to its code
    ///
    /// Unparseable ids resolve to an empty string.
    pub fn code_for_raw(&self, raw: &str) -> &str {
        match normalize_currency_id(raw).parse::<CurrencyId>() {
            Ok(id) => self.code_for(id),
            Err(_) => "",
        }
    }
}

/// Strip stray quote characters from a currency id as returned by the
/// aggregate queries
///
/// The storage layer has been observed to hand back ids wrapped in JSON
/// quoting (`"2"` instead of `2`). Normalization must happen before the id
/// is used as a lookup key.
pub fn normalize_currency_id(raw: &str) -> String {
    raw.trim().replace('"', "")
}
