use hemogram_core::catalog::{builtin, load_catalog};
use std::path::Path;

pub fn show() -> Result<(), hemogram_core::error::HemogramError> {
    let catalog = builtin::load_builtin()?;
    let def = catalog.def();

    println!("{} (version {})\n", def.name, def.version);
    if let Some(ref desc) = def.description {
        println!("{}\n", desc);
    }

    let max_id = def.metrics.iter().map(|m| m.id.len()).max().unwrap_or(10);
    for metric in &def.metrics {
        let units = if metric.units.is_empty() {
            "-".to_string()
        } else {
            metric.units.join(", ")
        };
        println!(
            "  {:<width$}  [{}]  aliases: {}",
            metric.id,
            units,
            metric.aliases.join(", "),
            width = max_id
        );
    }
    println!("\n{} metrics", def.metrics.len());

    Ok(())
}

pub fn validate(file: &Path) -> Result<(), hemogram_core::error::HemogramError> {
    let catalog = load_catalog(file)?;
    let def = catalog.def();

    let alias_count: usize = def.metrics.iter().map(|m| m.aliases.len()).sum();
    println!(
        "OK: '{}' v{}: {} metrics, {} aliases",
        def.name,
        def.version,
        def.metrics.len(),
        alias_count
    );

    Ok(())
}
