use crate::{
    error::{Phase, TaskError, WorkerFailure},
    partition::Partition,
};
use futures::future::join_all;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{debug, error};

/// Runs `work` over every partition, one blocking task per partition, and
/// waits for all of them.
///
/// Results come back in partition order regardless of completion order. If
/// any unit fails, every sibling is still awaited and the failure with the
/// lowest partition index is returned; the other results are dropped.
pub async fn run_parallel<T, R, F>(
    phase: Phase,
    partitions: Vec<Partition<T>>,
    work: F,
) -> Result<Vec<R>, WorkerFailure>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(Partition<T>) -> Result<R, TaskError> + Send + Sync + 'static,
{
    let work = Arc::new(work);

    let units = partitions.into_iter().map(|partition| {
        let work = Arc::clone(&work);
        let index = partition.index;
        let handle = tokio::task::spawn_blocking(move || {
            debug!("{phase} worker {index} started on {} items", partition.len());
            let result = work(partition);
            debug!("{phase} worker {index} finished");
            result
        });
        async move { (index, handle.await) }
    });

    let mut results = Vec::new();
    let mut failure: Option<WorkerFailure> = None;

    for (partition, outcome) in join_all(units).await {
        let source = match outcome {
            Ok(Ok(value)) => {
                results.push(value);
                continue;
            }
            Ok(Err(err)) => err,
            Err(join_err) => TaskError::Panicked(panic_message(join_err)),
        };

        error!("{phase} worker for partition {partition} failed: {source}");
        if failure.is_none() {
            failure = Some(WorkerFailure {
                phase,
                partition,
                source,
            });
        }
    }

    match failure {
        Some(failure) => Err(failure),
        None => Ok(results),
    }
}

fn panic_message(err: JoinError) -> String {
    if err.is_cancelled() {
        return "task was cancelled".to_string();
    }
    let payload = err.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
