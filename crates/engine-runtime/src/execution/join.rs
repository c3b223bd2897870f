use crate::{
    error::PipelineError,
    execution::{
        context::PipelineContext,
        phases::{discover, elapsed_ms, map_phase, reduce_phase},
        report::{PipelineMode, RunSummary},
    },
};
use engine_config::job::FilterJoinJob;
use engine_core::{
    aggregate::aggregate_filtered,
    combine::combine_tuples,
    error::Phase,
    extract::{Extract, FilterKeys, JoinTuple, JoinTuples},
};
use model::{core::key::Key, records::table::Table};
use std::{collections::HashSet, sync::Arc, time::Instant};
use tracing::info;

/// Join-side tuples whose key passed the filter, in partition order.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinResult {
    pub columns: Vec<String>,
    pub tuples: Vec<JoinTuple>,
}

impl JoinResult {
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn into_table(self) -> Table {
        let mut table = Table::new(self.columns);
        for tuple in self.tuples {
            table.push_row(tuple.into_row());
        }
        table
    }
}

#[derive(Debug, Clone)]
pub struct JoinRun {
    pub result: JoinResult,
    pub summary: RunSummary,
}

/// Keeps the rows of `job.join_input_dir` whose key belongs to a row of
/// `job.filter_input_dir` matching the filter.
pub async fn run_filter_join_pipeline(
    ctx: &PipelineContext,
    job: &FilterJoinJob,
) -> Result<JoinRun, PipelineError> {
    let started = Instant::now();
    let workers = job.validate()?;
    let filter_items = discover(ctx, &job.filter_input_dir)?;
    let join_items = discover(ctx, &job.join_input_dir)?;
    let work_items = filter_items.len() + join_items.len();
    info!(
        "Filtering {} files on {} = '{}', joining {} files on '{}'",
        filter_items.len(),
        job.filter_column,
        job.filter_value,
        join_items.len(),
        job.join_key_column
    );

    let filter = FilterKeys {
        key_column: job.filter_key_column.clone(),
        filter_column: job.filter_column.clone(),
        filter_value: job.filter_value.clone(),
    };
    let filtered = map_phase(ctx, Phase::FilterMap, filter, filter_items, workers.mappers).await?;
    let filter_records: usize = filtered.outputs.iter().map(FilterKeys::record_count).sum();

    // Rows without a key can never be joined on.
    let key_set: HashSet<Key> = filtered
        .outputs
        .into_iter()
        .flatten()
        .filter(|key| !key.is_null())
        .collect();
    info!("Key set holds {} keys", key_set.len());

    let tuples = JoinTuples {
        key_column: job.join_key_column.clone(),
        attribute_columns: job.attribute_columns.clone(),
    };
    let mapped = map_phase(ctx, Phase::JoinMap, tuples, join_items, workers.mappers).await?;
    let join_records: usize = mapped.outputs.iter().map(JoinTuples::record_count).sum();

    let key_set = Arc::new(key_set);
    let reduced = reduce_phase(mapped.outputs, workers.reducers, move |partition| {
        aggregate_filtered(&key_set, partition)
    })
    .await?;

    let result = JoinResult {
        columns: job.output_columns(),
        tuples: combine_tuples(reduced.outputs),
    };

    let summary = RunSummary {
        mode: PipelineMode::FilterJoin,
        work_items,
        map_workers: filtered.workers.max(mapped.workers),
        reduce_workers: reduced.workers,
        mapped_records: filter_records + join_records,
        result_rows: result.len(),
        elapsed_ms: elapsed_ms(started),
        output: None,
    };
    info!(
        "Filter/join pipeline finished: kept {} of {} tuples",
        summary.result_rows, join_records
    );

    Ok(JoinRun { result, summary })
}
