pub mod normalize;
pub mod values;

use crate::catalog::MetricCatalog;
use crate::extraction::WordToken;
use crate::layout::Line;
use crate::model::MetricRecord;
use normalize::normalize_label;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// How many lines below a label line are searched when the label's own
/// line carries no value (layouts that put "Resultado: 95" underneath).
const LOOKAHEAD_LINES: usize = 3;

/// A value on a following line counts as belonging to the label when it
/// starts at, or right of, the label's end x minus this slack.
const VALUE_ALIGN_SLACK: f32 = 20.0;

/// Scan assembled lines and emit one record per recognized metric.
///
/// For each line, the leading token span is matched greedily (longest span
/// first) against the catalog; on a match, the rest of the line and then a
/// short window of following lines are searched for the first parseable
/// value and an adjacent unit token. The first occurrence of a metric wins;
/// later matches for the same metric are discarded. Lines that yield
/// nothing are skipped, not errors.
pub fn extract_records(lines: &[Line], catalog: &MetricCatalog) -> Vec<MetricRecord> {
    let mut records = Vec::new();
    let mut emitted: HashSet<String> = HashSet::new();

    for (i, line) in lines.iter().enumerate() {
        let Some((metric_id, label_len)) = match_label(line, catalog) else {
            continue;
        };
        if emitted.contains(metric_id) {
            continue;
        }

        let units = catalog.units(metric_id);
        let found = find_value(&line.tokens[label_len..], units).or_else(|| {
            let label_end_x = line.tokens[label_len - 1].bbox.x_max;
            find_value_below(lines, i, label_end_x, units)
        });
        let Some((value, unit)) = found else {
            continue;
        };

        let metric_id = metric_id.to_string();
        emitted.insert(metric_id.clone());
        records.push(MetricRecord {
            metric: metric_id,
            value,
            unit,
            source_line: line.index,
        });
    }

    records
}

/// Greedy longest-prefix label match: try the leading k tokens, longest
/// span first, bounded by the catalog's longest alias.
fn match_label<'a>(line: &Line, catalog: &'a MetricCatalog) -> Option<(&'a str, usize)> {
    let max = catalog.max_alias_words().min(line.tokens.len());
    for k in (1..=max).rev() {
        let span = line.tokens[..k]
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let key = normalize_label(&span);
        if key.is_empty() {
            continue;
        }
        if let Some(id) = catalog.resolve(&key) {
            return Some((id, k));
        }
    }
    None
}

/// Find the first parseable value among the tokens, with its adjacent unit.
///
/// Multiplier notation split across tokens ("4,5 x 10^6") is tried before
/// the single token so the mantissa alone is not taken as the value.
fn find_value(tokens: &[WordToken], units: &[String]) -> Option<(Decimal, Option<String>)> {
    for i in 0..tokens.len() {
        if i + 2 < tokens.len() && tokens[i + 1].text.eq_ignore_ascii_case("x") {
            let joined = format!("{} x {}", tokens[i].text, tokens[i + 2].text);
            if let Some(value) = values::parse_number(&joined) {
                return Some((value, match_unit(tokens.get(i + 3), units)));
            }
        }
        if let Some(value) = values::parse_number(&tokens[i].text) {
            return Some((value, match_unit(tokens.get(i + 1), units)));
        }
    }
    None
}

/// Search the lines below a label for its value (structured layouts).
///
/// A line carrying a "resultado" token is trusted outright: the value is
/// the first parseable token after it. Otherwise only tokens horizontally
/// aligned with (or right of) the label's end are considered.
fn find_value_below(
    lines: &[Line],
    label_line: usize,
    label_end_x: f32,
    units: &[String],
) -> Option<(Decimal, Option<String>)> {
    let end = (label_line + 1 + LOOKAHEAD_LINES).min(lines.len());
    for line in &lines[label_line + 1..end] {
        if let Some(pos) = line
            .tokens
            .iter()
            .position(|t| normalize_label(&t.text) == "resultado")
        {
            if let Some(found) = find_value(&line.tokens[pos + 1..], units) {
                return Some(found);
            }
        }

        let aligned = line
            .tokens
            .iter()
            .position(|t| t.bbox.x_min > label_end_x - VALUE_ALIGN_SLACK);
        if let Some(j) = aligned {
            if let Some(found) = find_value(&line.tokens[j..], units) {
                return Some(found);
            }
        }
    }
    None
}

/// Match a candidate token against the metric's unit vocabulary; on a hit,
/// the catalog spelling is returned.
fn match_unit(token: Option<&WordToken>, units: &[String]) -> Option<String> {
    let text = token?.text.trim().to_lowercase();
    units
        .iter()
        .find(|u| u.to_lowercase() == text)
        .cloned()
}
