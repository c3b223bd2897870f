use crate::{error::PipelineError, execution::context::PipelineContext};
use connectors::file::error::FileError;
use engine_core::{
    error::Phase,
    extract::{Extract, map_partition},
    partition::{Partition, partition},
    pool::run_parallel,
};
use model::records::work_item::WorkItem;
use std::{num::NonZeroUsize, path::Path, sync::Arc, time::Instant};
use tracing::info;

/// Collected results of one phase, in partition order.
pub(crate) struct PhaseOutput<R> {
    pub outputs: Vec<R>,
    pub workers: usize,
}

pub(crate) fn discover(
    ctx: &PipelineContext,
    dir: &Path,
) -> Result<Vec<WorkItem>, PipelineError> {
    ctx.discovery.list(dir).map_err(|err| match err {
        FileError::NotFound(path) => PipelineError::InputNotFound(path),
        other => PipelineError::Discovery(other),
    })
}

/// Decodes every work item on at most `mappers` workers. Output holds one
/// mapped group per work item, in discovery order. Failures are reported
/// under `phase`.
pub(crate) async fn map_phase<X: Extract>(
    ctx: &PipelineContext,
    phase: Phase,
    extractor: X,
    items: Vec<WorkItem>,
    mappers: NonZeroUsize,
) -> Result<PhaseOutput<X::Output>, PipelineError> {
    let started = Instant::now();
    let item_count = items.len();
    let partitions = partition(items, mappers);
    let workers = partitions.len();
    info!("Map phase: {item_count} work items on {workers} workers");

    let source = Arc::clone(&ctx.source);
    let extractor = Arc::new(extractor);
    let groups = run_parallel(phase, partitions, move |partition| {
        map_partition(source.as_ref(), extractor.as_ref(), partition)
    })
    .await?;

    info!(
        "Map phase finished in {:.3}s",
        started.elapsed().as_secs_f64()
    );
    Ok(PhaseOutput {
        outputs: groups.into_iter().flatten().collect(),
        workers,
    })
}

/// Runs `reduce` over at most `reducers` partitions of the mapped groups and
/// returns one partial aggregate per partition.
pub(crate) async fn reduce_phase<T, R, F>(
    groups: Vec<T>,
    reducers: NonZeroUsize,
    reduce: F,
) -> Result<PhaseOutput<R>, PipelineError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(Partition<T>) -> R + Send + Sync + 'static,
{
    let started = Instant::now();
    let group_count = groups.len();
    let partitions = partition(groups, reducers);
    let workers = partitions.len();
    info!("Reduce phase: {group_count} mapped groups on {workers} workers");

    let partials = run_parallel(Phase::Reduce, partitions, move |partition| {
        Ok(reduce(partition))
    })
    .await?;

    info!(
        "Reduce phase finished in {:.3}s",
        started.elapsed().as_secs_f64()
    );
    Ok(PhaseOutput {
        outputs: partials,
        workers,
    })
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
