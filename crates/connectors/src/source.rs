use crate::file::{csv::filter::CsvFilter, error::FileError};
use model::records::row::RowData;
use std::path::Path;

/// What to decode from one file: a column projection and an optional
/// equality filter.
#[derive(Debug, Clone, Default)]
pub struct ReadRequest {
    /// Columns to keep, in output order. Empty keeps every column.
    pub columns: Vec<String>,
    pub filter: Option<CsvFilter>,
}

impl ReadRequest {
    pub fn select<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReadRequest {
            columns: columns.into_iter().map(Into::into).collect(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: CsvFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Decodes one input file into ordered rows.
///
/// Implementations are called concurrently from map workers, one file at a
/// time per worker, and must not keep state between calls.
pub trait RowSource: Send + Sync {
    fn read(&self, path: &Path, request: &ReadRequest) -> Result<Vec<RowData>, FileError>;
}
