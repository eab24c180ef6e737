//! Integration tests for the extract_pdf() end-to-end pipeline.
//!
//! Uses a MockTokenSource that returns pre-built PageWords without
//! invoking pdftotext, so these tests run without poppler-utils.

use hemogram_core::catalog::builtin::load_builtin;
use hemogram_core::error::HemogramError;
use hemogram_core::extraction::{BBox, PageWords, TokenSource, WordToken};
use hemogram_core::extract_pdf;
use rust_decimal_macros::dec;

struct MockTokenSource {
    pages: Vec<PageWords>,
}

impl TokenSource for MockTokenSource {
    fn read_words(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageWords>, HemogramError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn page(number: usize, words: &[(&str, f32, f32)]) -> PageWords {
    PageWords {
        page_number: number,
        words: words
            .iter()
            .map(|(text, x0, y0)| WordToken {
                text: text.to_string(),
                bbox: BBox {
                    x_min: *x0,
                    y_min: *y0,
                    x_max: x0 + 8.0 * text.len() as f32,
                    y_max: y0 + 10.0,
                },
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Test 1: One-page report, label + value + unit on a single line
// ---------------------------------------------------------------------------
#[test]
fn single_line_hemoglobin_record() {
    let catalog = load_builtin().unwrap();
    let source = MockTokenSource {
        pages: vec![page(
            1,
            &[
                ("Laboratório", 10.0, 40.0),
                ("Exemplo", 110.0, 40.0),
                ("Hemoglobina", 10.0, 100.0),
                ("14,5", 200.0, 100.0),
                ("g/dL", 260.0, 100.0),
            ],
        )],
    };

    let records = extract_pdf(&[], &source, &catalog).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].metric, "Hemoglobina");
    assert_eq!(records[0].value, dec!(14.5));
    assert_eq!(records[0].unit.as_deref(), Some("g/dL"));
}

// ---------------------------------------------------------------------------
// Test 2: Duplicate label: first occurrence wins, one record per metric
// ---------------------------------------------------------------------------
#[test]
fn duplicate_metric_keeps_first_value() {
    let catalog = load_builtin().unwrap();
    let source = MockTokenSource {
        pages: vec![page(
            1,
            &[
                ("Glicose", 10.0, 100.0),
                ("95", 200.0, 100.0),
                ("mg/dL", 240.0, 100.0),
                ("Glicose", 10.0, 200.0),
                ("101", 200.0, 200.0),
                ("mg/dL", 240.0, 200.0),
            ],
        )],
    };

    let records = extract_pdf(&[], &source, &catalog).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].metric, "Glicose");
    assert_eq!(records[0].value, dec!(95));
}

// ---------------------------------------------------------------------------
// Test 3: Column layout with sub-line vertical offset still forms one line
// ---------------------------------------------------------------------------
#[test]
fn offset_columns_grouped_into_one_line() {
    let catalog = load_builtin().unwrap();
    // Value column rendered 0.9pt lower than the label column; token
    // height 10 gives a 5pt band, so both land on the same baseline.
    let source = MockTokenSource {
        pages: vec![page(
            1,
            &[
                ("Creatinina", 10.0, 100.0),
                ("0,9", 220.0, 100.9),
                ("mg/dL", 270.0, 100.9),
            ],
        )],
    };

    let records = extract_pdf(&[], &source, &catalog).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].metric, "Creatinina");
    assert_eq!(records[0].value, dec!(0.9));
}

// ---------------------------------------------------------------------------
// Test 4: Structured layout with the value on a "Resultado:" line below
// ---------------------------------------------------------------------------
#[test]
fn value_found_on_resultado_line() {
    let catalog = load_builtin().unwrap();
    let source = MockTokenSource {
        pages: vec![page(
            1,
            &[
                ("Ferritina", 10.0, 100.0),
                ("Método:", 10.0, 115.0),
                ("quimioluminescência", 80.0, 115.0),
                ("Resultado:", 10.0, 130.0),
                ("230", 120.0, 130.0),
                ("ng/mL", 160.0, 130.0),
            ],
        )],
    };

    let records = extract_pdf(&[], &source, &catalog).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].metric, "Ferritina");
    assert_eq!(records[0].value, dec!(230));
    assert_eq!(records[0].unit.as_deref(), Some("ng/mL"));
}

// ---------------------------------------------------------------------------
// Test 5: Multiplier notation parsed exactly, not truncated to mantissa
// ---------------------------------------------------------------------------
#[test]
fn multiplier_notation_record() {
    let catalog = load_builtin().unwrap();
    let source = MockTokenSource {
        pages: vec![page(
            1,
            &[
                ("Vitamina", 10.0, 100.0),
                ("B12", 90.0, 100.0),
                ("4,5", 200.0, 100.0),
                ("x", 240.0, 100.0),
                ("10^2", 260.0, 100.0),
                ("pg/mL", 310.0, 100.0),
            ],
        )],
    };

    let records = extract_pdf(&[], &source, &catalog).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].metric, "Vitamina B12");
    assert_eq!(records[0].value, dec!(450));
    assert_eq!(records[0].unit.as_deref(), Some("pg/mL"));
}

// ---------------------------------------------------------------------------
// Test 6: Multi-page report: records in page order, global line indices
// ---------------------------------------------------------------------------
#[test]
fn multi_page_records_in_order() {
    let catalog = load_builtin().unwrap();
    let source = MockTokenSource {
        pages: vec![
            page(
                1,
                &[
                    ("Hemoglobina", 10.0, 100.0),
                    ("14,5", 200.0, 100.0),
                    ("g/dL", 260.0, 100.0),
                ],
            ),
            page(
                2,
                &[
                    ("Glicose", 10.0, 100.0),
                    ("95", 200.0, 100.0),
                    ("mg/dL", 240.0, 100.0),
                ],
            ),
        ],
    };

    let records = extract_pdf(&[], &source, &catalog).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].metric, "Hemoglobina");
    assert_eq!(records[1].metric, "Glicose");
    assert!(records[0].source_line < records[1].source_line);
}

// ---------------------------------------------------------------------------
// Test 7: Accented and hyphenated labels resolve through the alias table
// ---------------------------------------------------------------------------
#[test]
fn accented_and_hyphenated_labels_resolve() {
    let catalog = load_builtin().unwrap();
    let source = MockTokenSource {
        pages: vec![page(
            1,
            &[
                ("Colesterol-HDL", 10.0, 100.0),
                ("52", 200.0, 100.0),
                ("mg/dL", 240.0, 100.0),
                ("Triglicerídeos", 10.0, 200.0),
                ("150", 200.0, 200.0),
                ("mg/dL", 240.0, 200.0),
            ],
        )],
    };

    let records = extract_pdf(&[], &source, &catalog).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].metric, "Colesterol HDL");
    assert_eq!(records[1].metric, "Triglicerídeos");
}

// ---------------------------------------------------------------------------
// Test 8: No recognizable labels — EmptyResult, distinct from malformed
// ---------------------------------------------------------------------------
#[test]
fn unrecognized_document_is_empty_result() {
    let catalog = load_builtin().unwrap();
    let source = MockTokenSource {
        pages: vec![page(
            1,
            &[
                ("Relatório", 10.0, 100.0),
                ("de", 90.0, 100.0),
                ("consulta", 120.0, 100.0),
            ],
        )],
    };

    let result = extract_pdf(&[], &source, &catalog);

    assert!(matches!(result, Err(HemogramError::EmptyResult)));
}

// ---------------------------------------------------------------------------
// Test 9: No text layer at all returns MalformedInput
// ---------------------------------------------------------------------------
#[test]
fn document_without_text_is_malformed_input() {
    let catalog = load_builtin().unwrap();
    let source = MockTokenSource {
        pages: vec![page(1, &[])],
    };

    let result = extract_pdf(&[], &source, &catalog);

    assert!(matches!(result, Err(HemogramError::MalformedInput(_))));
}

// ---------------------------------------------------------------------------
// Test 10: Two runs over the same document are identical
// ---------------------------------------------------------------------------
#[test]
fn extraction_is_deterministic() {
    let catalog = load_builtin().unwrap();
    let source = MockTokenSource {
        pages: vec![page(
            1,
            &[
                ("Hemoglobina", 10.0, 100.0),
                ("14,5", 200.0, 100.0),
                ("g/dL", 260.0, 100.0),
                ("Hematócrito", 10.0, 120.0),
                ("42,1", 200.0, 120.0),
                ("%", 260.0, 120.0),
                ("Glicose", 10.0, 140.0),
                ("95", 200.0, 140.0),
                ("mg/dL", 240.0, 140.0),
            ],
        )],
    };

    let first = extract_pdf(&[], &source, &catalog).unwrap();
    let second = extract_pdf(&[], &source, &catalog).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}
