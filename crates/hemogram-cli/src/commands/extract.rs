use hemogram_core::catalog::{builtin, load_catalog, MetricCatalog};
use hemogram_core::extraction::pdftotext::PdftotextSource;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    catalog_file: Option<PathBuf>,
) -> Result<(), hemogram_core::error::HemogramError> {
    let catalog: MetricCatalog = match catalog_file {
        Some(path) => load_catalog(&path)?,
        None => builtin::load_builtin()?,
    };

    let pdf_bytes = std::fs::read(&input_file)?;
    let source = PdftotextSource::new();
    let records = hemogram_core::extract_pdf(&pdf_bytes, &source, &catalog)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&records)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Extracted {} metric(s), written to {}",
                records.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&records)?,
            _ => output::table::print(&records),
        },
    }

    Ok(())
}
