use serde::{Deserialize, Serialize};

/// The metric catalog artifact: alias table plus unit vocabulary.
///
/// A versioned JSON file owned outside the core; many aliases map to one
/// canonical metric, and matching is exact-after-normalization, so the
/// alias list is the sole determinant of recall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub metrics: Vec<MetricDef>,
}

/// A single canonical metric with its known surface forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDef {
    /// Canonical identifier used downstream (e.g., "Colesterol HDL").
    pub id: String,
    /// Normalized surface forms that resolve to this metric. Stored
    /// pre-normalized (lowercase, accent-free, space-separated).
    pub aliases: Vec<String>,
    /// Accepted unit tokens; the first spelling is emitted on a match.
    #[serde(default)]
    pub units: Vec<String>,
}
