use connectors::file::error::FileError;
use engine_config::error::ConfigError;
use engine_core::error::WorkerFailure;
use thiserror::Error;

/// Top-level errors of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The job was rejected before any work started.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Input directory not found: {0}")]
    InputNotFound(String),

    /// The input location exists but could not be listed.
    #[error("Failed to list input: {0}")]
    Discovery(FileError),

    #[error("{0}")]
    Worker(#[from] WorkerFailure),

    #[error("Failed to write result: {0}")]
    Sink(FileError),

    /// An error occurred while joining a task.
    /// This usually indicates that the task was cancelled or panicked.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
