use hemogram_core::error::HemogramError;
use hemogram_core::model::MetricRecord;

pub fn print(records: &[MetricRecord]) -> Result<(), HemogramError> {
    let json = serde_json::to_string_pretty(records)?;
    println!("{json}");
    Ok(())
}
