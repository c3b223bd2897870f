use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {value} (must be at least 1)")]
    InvalidWorkerCount { name: &'static str, value: usize },

    #[error("Missing required column name: {0}")]
    MissingColumn(&'static str),

    #[error("Failed to read job file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse job file: {0}")]
    Parse(#[from] serde_json::Error),
}
