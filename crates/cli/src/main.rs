use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use connectors::file::csv::sink::CsvSink;
use engine_runtime::execution::{context::PipelineContext, executor};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "mrx",
    version = "0.1.0",
    about = "Parallel map/reduce over CSV shards"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let (job, summary_path) = commands::resolve_job(cli.command).await?;

    let sink = Arc::new(CsvSink::default());
    let summary = executor::run(&PipelineContext::default(), sink, &job).await?;

    match summary_path {
        Some(path) => output::write_summary(&summary, &path).await?,
        None => output::print_summary(&summary).await?,
    }

    Ok(())
}
