pub mod builtin;
pub mod schema;

use crate::error::HemogramError;
use crate::parsing::normalize::normalize_label;
use schema::CatalogDef;
use std::collections::HashMap;
use std::path::Path;

/// Read-only lookup structure built from a validated [`CatalogDef`].
///
/// Injected into the pipeline at construction; safe for concurrent reads,
/// never mutated after load.
#[derive(Debug, Clone)]
pub struct MetricCatalog {
    def: CatalogDef,
    /// Normalized alias -> index into `def.metrics`.
    aliases: HashMap<String, usize>,
    /// Longest alias measured in words, for greedy prefix matching.
    max_alias_words: usize,
}

impl MetricCatalog {
    /// Build a catalog from its definition, validating it first.
    pub fn from_def(def: CatalogDef) -> Result<Self, HemogramError> {
        validate_catalog(&def)?;

        let mut aliases = HashMap::new();
        let mut max_alias_words = 1;
        for (i, metric) in def.metrics.iter().enumerate() {
            for alias in &metric.aliases {
                aliases.insert(alias.clone(), i);
                max_alias_words = max_alias_words.max(alias.split_whitespace().count());
            }
        }

        Ok(MetricCatalog {
            def,
            aliases,
            max_alias_words,
        })
    }

    /// Resolve a normalized label to its canonical metric identifier.
    pub fn resolve(&self, normalized: &str) -> Option<&str> {
        self.aliases
            .get(normalized)
            .map(|&i| self.def.metrics[i].id.as_str())
    }

    /// Accepted unit tokens for a canonical metric identifier.
    pub fn units(&self, metric_id: &str) -> &[String] {
        self.def
            .metrics
            .iter()
            .find(|m| m.id == metric_id)
            .map(|m| m.units.as_slice())
            .unwrap_or(&[])
    }

    /// Word count of the longest alias, bounding greedy prefix matches.
    pub fn max_alias_words(&self) -> usize {
        self.max_alias_words
    }

    pub fn def(&self) -> &CatalogDef {
        &self.def
    }
}

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<MetricCatalog, HemogramError> {
    let content = std::fs::read_to_string(path).map_err(|e| HemogramError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let def: CatalogDef =
        serde_json::from_str(&content).map_err(|e| HemogramError::CatalogLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    MetricCatalog::from_def(def)
}

/// Parse a catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<MetricCatalog, HemogramError> {
    let def: CatalogDef = serde_json::from_str(json).map_err(HemogramError::Json)?;
    MetricCatalog::from_def(def)
}

/// Validate that a catalog definition is well-formed.
pub fn validate_catalog(def: &CatalogDef) -> Result<(), HemogramError> {
    if def.metrics.is_empty() {
        return Err(HemogramError::CatalogInvalid(
            "metrics must not be empty".into(),
        ));
    }

    let mut seen_aliases: HashMap<&str, &str> = HashMap::new();
    for metric in &def.metrics {
        if metric.id.is_empty() {
            return Err(HemogramError::CatalogInvalid(
                "metric id must not be empty".into(),
            ));
        }
        if metric.aliases.is_empty() {
            return Err(HemogramError::CatalogInvalid(format!(
                "metric '{}' has no aliases",
                metric.id
            )));
        }
        for alias in &metric.aliases {
            if *alias != normalize_label(alias) {
                return Err(HemogramError::CatalogInvalid(format!(
                    "alias '{}' of metric '{}' is not in normalized form (expected '{}')",
                    alias,
                    metric.id,
                    normalize_label(alias)
                )));
            }
            if let Some(other) = seen_aliases.insert(alias, &metric.id) {
                if other != metric.id {
                    return Err(HemogramError::CatalogInvalid(format!(
                        "alias '{}' claimed by both '{}' and '{}'",
                        alias, other, metric.id
                    )));
                }
            }
        }
    }

    Ok(())
}
