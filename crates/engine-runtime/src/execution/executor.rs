use crate::{
    error::PipelineError,
    execution::{
        context::PipelineContext, count::run_count_pipeline, join::run_filter_join_pipeline,
        report::RunSummary,
    },
};
use connectors::sink::ResultSink;
use engine_config::job::JobConfig;
use std::sync::Arc;
use tracing::info;

/// Runs one job and, if it succeeds and names an output path, writes the
/// result there. A failed run never touches the output.
pub async fn run(
    ctx: &PipelineContext,
    sink: Arc<dyn ResultSink>,
    job: &JobConfig,
) -> Result<RunSummary, PipelineError> {
    let (table, mut summary) = match job {
        JobConfig::Count(job) => {
            let run = run_count_pipeline(ctx, job).await?;
            (run.result.into_table(), run.summary)
        }
        JobConfig::FilterJoin(job) => {
            let run = run_filter_join_pipeline(ctx, job).await?;
            (run.result.into_table(), run.summary)
        }
    };

    let Some(dest) = job.output().map(|p| p.to_path_buf()) else {
        info!("No output path set, result not written");
        return Ok(summary);
    };

    let target = dest.clone();
    tokio::task::spawn_blocking(move || sink.write(&table, &target))
        .await?
        .map_err(PipelineError::Sink)?;

    info!("Run result saved to {}", dest.display());
    summary.output = Some(dest);
    Ok(summary)
}
