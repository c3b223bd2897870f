use crate::file::error::FileError;
use model::records::table::Table;
use std::path::Path;

/// Persists a result table. Always a full overwrite of `destination`.
pub trait ResultSink: Send + Sync {
    fn write(&self, table: &Table, destination: &Path) -> Result<(), FileError>;
}
