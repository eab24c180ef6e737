use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single extracted blood-test metric.
///
/// `metric` is always a canonical identifier from the catalog that produced
/// the record; raw document spellings never surface downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Canonical metric identifier (e.g., "Hemoglobina").
    pub metric: String,
    pub value: Decimal,
    /// Unit as spelled in the catalog vocabulary, or None when no adjacent
    /// token matched the metric's accepted units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Global index of the assembled line the record was read from.
    pub source_line: usize,
}
