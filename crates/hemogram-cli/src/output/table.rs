use hemogram_core::model::MetricRecord;

pub fn print(records: &[MetricRecord]) {
    if records.is_empty() {
        println!("No metrics extracted.");
        return;
    }

    let max_name = records.iter().map(|r| r.metric.len()).max().unwrap_or(10);

    println!("{}", "=".repeat(60));
    println!("EXTRACTED METRICS");
    println!("{}", "=".repeat(60));

    for record in records {
        let unit = record.unit.as_deref().unwrap_or("-");
        println!(
            "  {:<width$}  {:>10}  {}",
            record.metric,
            record.value.to_string(),
            unit,
            width = max_name
        );
    }

    println!("{}", "=".repeat(60));
    println!("Total: {} metric(s)", records.len());
}
