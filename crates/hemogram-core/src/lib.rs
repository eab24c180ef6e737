pub mod catalog;
pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod parsing;

use catalog::MetricCatalog;
use error::HemogramError;
use extraction::TokenSource;
use model::MetricRecord;

/// Main API entry point: extract normalized metric records from a PDF.
///
/// Runs the full pipeline: token source -> line assembly -> record
/// extraction against the injected catalog. A document with no extractable
/// text is a [`HemogramError::MalformedInput`]; a document that parses
/// cleanly but matches no catalog metric is a distinct
/// [`HemogramError::EmptyResult`], so callers can tell "unreadable PDF"
/// from "valid PDF, no recognizable metrics".
pub fn extract_pdf(
    pdf_bytes: &[u8],
    source: &dyn TokenSource,
    catalog: &MetricCatalog,
) -> Result<Vec<MetricRecord>, HemogramError> {
    let pages = source.read_words(pdf_bytes)?;

    if pages.iter().all(|p| p.words.is_empty()) {
        return Err(HemogramError::MalformedInput(
            "no text content found in PDF".into(),
        ));
    }

    let lines = layout::assemble_lines(&pages);
    let records = parsing::extract_records(&lines, catalog);

    if records.is_empty() {
        return Err(HemogramError::EmptyResult);
    }

    Ok(records)
}
