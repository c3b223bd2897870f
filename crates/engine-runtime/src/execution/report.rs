use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    Count,
    FilterJoin,
}

/// What a run did. Derived from collected results after the combine step;
/// workers never update it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub mode: PipelineMode,
    /// Input files across every discovered directory.
    pub work_items: usize,
    /// Peak map workers used by a single map phase.
    pub map_workers: usize,
    pub reduce_workers: usize,
    pub mapped_records: usize,
    pub result_rows: usize,
    pub elapsed_ms: u64,
    /// Set once the result has been written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}
