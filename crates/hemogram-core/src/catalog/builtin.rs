use crate::catalog::MetricCatalog;
use crate::error::HemogramError;

const METRICS_BR_JSON: &str = include_str!("../../../../catalog/metrics-br.json");

/// Load the builtin Brazilian lab-report catalog.
pub fn load_builtin() -> Result<MetricCatalog, HemogramError> {
    crate::catalog::parse_catalog_str(METRICS_BR_JSON)
}
