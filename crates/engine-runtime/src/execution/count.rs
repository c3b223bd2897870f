use crate::{
    error::PipelineError,
    execution::{
        context::PipelineContext,
        phases::{discover, elapsed_ms, map_phase, reduce_phase},
        report::{PipelineMode, RunSummary},
    },
};
use engine_config::job::CountJob;
use engine_core::{
    aggregate::{CountMap, aggregate_counts},
    combine::combine_counts,
    error::Phase,
    extract::{CountKeys, Extract},
};
use model::{core::key::Key, records::table::Table};
use std::time::Instant;
use tracing::info;

/// Frequency of every distinct key across all input files.
#[derive(Debug, Clone, PartialEq)]
pub struct CountResult {
    pub key_column: String,
    pub value_column: String,
    pub counts: CountMap,
}

impl CountResult {
    pub fn get(&self, key: &Key) -> Option<u64> {
        self.counts.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Rows of `(key, count)` ordered by key, each key written as the text
    /// of its first occurrence.
    pub fn into_table(self) -> Table {
        let mut entries: Vec<_> = self.counts.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut table = Table::new(vec![self.key_column, self.value_column]);
        for (key, count) in entries {
            table.push_row(vec![key.to_string(), count.to_string()]);
        }
        table
    }
}

#[derive(Debug, Clone)]
pub struct CountRun {
    pub result: CountResult,
    pub summary: RunSummary,
}

/// Counts rows per value of `job.key_column` over every file of
/// `job.input_dir`.
pub async fn run_count_pipeline(
    ctx: &PipelineContext,
    job: &CountJob,
) -> Result<CountRun, PipelineError> {
    let started = Instant::now();
    let workers = job.validate()?;
    let items = discover(ctx, &job.input_dir)?;
    let work_items = items.len();
    info!(
        "Counting '{}' over {} files in {}",
        job.key_column,
        work_items,
        job.input_dir.display()
    );

    let extractor = CountKeys {
        key_column: job.key_column.clone(),
    };
    let mapped = map_phase(ctx, Phase::Map, extractor, items, workers.mappers).await?;
    let mapped_records = mapped.outputs.iter().map(CountKeys::record_count).sum();

    let reduced = reduce_phase(mapped.outputs, workers.reducers, aggregate_counts).await?;
    let result = CountResult {
        key_column: job.key_column.clone(),
        value_column: job.value_column.clone(),
        counts: combine_counts(reduced.outputs),
    };

    let summary = RunSummary {
        mode: PipelineMode::Count,
        work_items,
        map_workers: mapped.workers,
        reduce_workers: reduced.workers,
        mapped_records,
        result_rows: result.len(),
        elapsed_ms: elapsed_ms(started),
        output: None,
    };
    info!(
        "Count pipeline finished: {} rows mapped into {} keys",
        summary.mapped_records, summary.result_rows
    );

    Ok(CountRun { result, summary })
}
