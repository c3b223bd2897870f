use crate::{error::ConfigError, job::JobConfig};
use std::path::Path;
use tracing::info;

/// Reads and validates a JSON job file.
pub async fn load(path: &Path) -> Result<JobConfig, ConfigError> {
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

    let job: JobConfig = serde_json::from_str(&source)?;
    job.validate()?;
    info!("Loaded job file {}", path.display());
    Ok(job)
}
