use connectors::{
    discovery::{DirectoryListing, InputDiscovery},
    file::csv::source::CsvSource,
    source::RowSource,
};
use std::sync::Arc;

/// Collaborators a pipeline reads through. Both are shared read-only with
/// every worker.
#[derive(Clone)]
pub struct PipelineContext {
    pub source: Arc<dyn RowSource>,
    pub discovery: Arc<dyn InputDiscovery>,
}

impl PipelineContext {
    pub fn new(source: Arc<dyn RowSource>, discovery: Arc<dyn InputDiscovery>) -> Self {
        PipelineContext { source, discovery }
    }

    pub fn with_source(mut self, source: Arc<dyn RowSource>) -> Self {
        self.source = source;
        self
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        PipelineContext {
            source: Arc::new(CsvSource::default()),
            discovery: Arc::new(DirectoryListing),
        }
    }
}
