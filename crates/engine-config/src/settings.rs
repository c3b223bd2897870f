use crate::error::ConfigError;
use serde::Serialize;
use std::num::NonZeroUsize;

pub const DEFAULT_WORKERS: usize = 2;

/// Validated worker counts for the two parallel phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkerCounts {
    pub mappers: NonZeroUsize,
    pub reducers: NonZeroUsize,
}

impl WorkerCounts {
    pub fn new(mappers: usize, reducers: usize) -> Result<Self, ConfigError> {
        Ok(WorkerCounts {
            mappers: non_zero("mapper_count", mappers)?,
            reducers: non_zero("reducer_count", reducers)?,
        })
    }
}

fn non_zero(name: &'static str, value: usize) -> Result<NonZeroUsize, ConfigError> {
    NonZeroUsize::new(value).ok_or(ConfigError::InvalidWorkerCount { name, value })
}

/// Rejects empty or whitespace-only column names.
pub(crate) fn require_column(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingColumn(name));
    }
    Ok(())
}
