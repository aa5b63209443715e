//! Report value types
//!
//! Reports are response values: constructed fresh per aggregation call,
//! never persisted. The surrounding presentation layer serializes them with
//! currency ids as string keys; a missing metric is an explicit empty
//! object, never `null` and never an absent key.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::currency::CurrencyId;

/// Inclusive date range a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// One aggregate financial figure for one currency over a date range
///
/// `currency_id` is the raw tag from the aggregate query and may arrive
/// wrapped in stray quote characters; decoration normalizes it and fills
/// `code` from the directory snapshot (empty string on a miss).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRow {
    pub currency_id: String,
    #[serde(default)]
    pub code: String,
    pub total: Decimal,
    /// Number of source records behind the aggregate
    pub entries: i64,
}

impl MetricRow {
    pub fn new(currency_id: impl Into<String>, total: Decimal, entries: i64) -> Self {
        Self {
            currency_id: currency_id.into(),
            code: String::new(),
            total,
            entries,
        }
    }
}

/// A metric slot in a totals report
///
/// Either the first matching row for the currency, or an explicit empty
/// marker. The empty variant serializes to `{}` so consumers can always
/// access the slot without a presence check.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MetricSlot {
    Filled(MetricRow),
    Empty(EmptyMetric),
}

/// Serializes to `{}`
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EmptyMetric {}

impl MetricSlot {
    pub fn empty() -> Self {
        Self::Empty(EmptyMetric {})
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// The matched row, if any
    pub fn row(&self) -> Option<&MetricRow> {
        match self {
            Self::Filled(row) => Some(row),
            Self::Empty(_) => None,
        }
    }
}

impl From<Option<MetricRow>> for MetricSlot {
    fn from(row: Option<MetricRow>) -> Self {
        match row {
            Some(row) => Self::Filled(row),
            None => Self::empty(),
        }
    }
}

/// Per-currency block of a summary report
///
/// Each metric holds the provider's own result list for that single
/// currency; an empty list is the provider's zero-activity convention.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CurrencySummary {
    pub code: String,
    pub invoices: Vec<MetricRow>,
    pub outstanding: Vec<MetricRow>,
    pub payments: Vec<MetricRow>,
    pub expenses: Vec<MetricRow>,
}

/// Time-series style report: one per-currency query per metric
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data: HashMap<CurrencyId, CurrencySummary>,
}

/// Per-currency block of a totals report: every slot always present
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyTotals {
    pub code: String,
    pub invoices: MetricSlot,
    pub revenue: MetricSlot,
    pub outstanding: MetricSlot,
    pub expenses: MetricSlot,
}

/// Point-in-time snapshot report: each metric fetched once across all
/// currencies, then re-keyed by currency id
#[derive(Debug, Clone, Serialize)]
pub struct TotalsReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data: HashMap<CurrencyId, CurrencyTotals>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot_serializes_to_empty_object() {
        let slot = MetricSlot::empty();
        assert_eq!(serde_json::to_string(&slot).unwrap(), "{}");
    }

    #[test]
    fn test_filled_slot_serializes_row_fields() {
        let slot = MetricSlot::Filled(MetricRow::new("1", Decimal::new(250050, 2), 3));
        let json: serde_json::Value = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["currency_id"], "1");
        assert_eq!(json["total"], "2500.50");
        assert_eq!(json["entries"], 3);
    }

    #[test]
    fn test_slot_from_option() {
        let filled = MetricSlot::from(Some(MetricRow::new("2", Decimal::ZERO, 0)));
        assert!(!filled.is_empty());
        assert_eq!(filled.row().unwrap().currency_id, "2");

        let empty = MetricSlot::from(None);
        assert!(empty.is_empty());
        assert!(empty.row().is_none());
    }

    #[test]
    fn test_report_data_keys_serialize_as_strings() {
        let mut data = HashMap::new();
        data.insert(
            1,
            CurrencyTotals {
                code: "USD".to_string(),
                invoices: MetricSlot::empty(),
                revenue: MetricSlot::empty(),
                outstanding: MetricSlot::empty(),
                expenses: MetricSlot::empty(),
            },
        );
        let report = TotalsReport {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            data,
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert!(json["data"]["1"].is_object());
        assert_eq!(json["data"]["1"]["invoices"], serde_json::json!({}));
    }
}
