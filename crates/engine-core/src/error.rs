use connectors::file::error::FileError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Pipeline stage a worker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Map over the count input.
    Map,
    /// Map over the filter input of a join.
    FilterMap,
    /// Map over the joined input of a join.
    JoinMap,
    Reduce,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Map => "map",
            Phase::FilterMap => "filter-side map",
            Phase::JoinMap => "join-side map",
            Phase::Reduce => "reduce",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single worker unit stopped without a result.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Decode error: {0}")]
    Decode(#[from] FileError),

    /// The worker panicked or its task was torn down by the runtime.
    #[error("Worker panicked: {0}")]
    Panicked(String),
}

/// A failed worker, tagged with where it ran.
#[derive(Debug, Error)]
#[error("{phase} worker for partition {partition} failed: {source}")]
pub struct WorkerFailure {
    pub phase: Phase,
    pub partition: usize,
    pub source: TaskError,
}
