use crate::{
    file::{csv::settings::CsvSettings, error::FileError},
    sink::ResultSink,
};
use model::records::table::Table;
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Writes a table as a headed CSV file.
///
/// Rows go to a sibling `.partial` file which is renamed over the destination
/// once everything is flushed, so a failed write never leaves a truncated
/// result behind.
#[derive(Debug, Clone, Default)]
pub struct CsvSink {
    pub settings: CsvSettings,
}

impl CsvSink {
    pub fn new(settings: CsvSettings) -> Self {
        CsvSink { settings }
    }

    fn write_all(&self, table: &Table, path: &Path) -> Result<(), FileError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.settings.delimiter_byte())
            .from_path(path)?;

        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("result"));
    name.push(".partial");
    destination.with_file_name(name)
}

impl ResultSink for CsvSink {
    fn write(&self, table: &Table, destination: &Path) -> Result<(), FileError> {
        let partial = partial_path(destination);

        if let Err(err) = self.write_all(table, &partial) {
            let _ = fs::remove_file(&partial);
            return Err(err);
        }
        fs::rename(&partial, destination).map_err(|e| {
            let _ = fs::remove_file(&partial);
            FileError::from_io(destination, e)
        })?;

        info!(
            "Wrote {} rows to {}",
            table.len(),
            destination.display()
        );
        Ok(())
    }
}
