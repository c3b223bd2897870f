use engine_config::error::ConfigError;
use engine_runtime::error::PipelineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid job configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to run the job: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to write the run summary: {0}")]
    SummaryWrite(#[from] std::io::Error),
}
