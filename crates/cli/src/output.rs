use crate::error::CliError;
use engine_runtime::execution::report::RunSummary;
use std::path::Path;

fn generate_summary_json(summary: &RunSummary) -> Result<String, CliError> {
    let json = serde_json::to_string_pretty(summary)?;
    Ok(json)
}

pub async fn write_summary(summary: &RunSummary, path: &Path) -> Result<(), CliError> {
    let summary_json = generate_summary_json(summary)?;
    tokio::fs::write(path, summary_json).await?;
    Ok(())
}

pub async fn print_summary(summary: &RunSummary) -> Result<(), CliError> {
    let summary_json = generate_summary_json(summary)?;
    println!("{summary_json}");
    Ok(())
}
