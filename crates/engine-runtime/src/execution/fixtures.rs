use connectors::{
    file::{csv::source::CsvSource, error::FileError},
    source::{ReadRequest, RowSource},
};
use model::records::row::RowData;
use std::{fs, path::Path};
use tempfile::TempDir;

/// A temporary directory holding one CSV file per `(name, contents)` pair.
pub(crate) fn shard_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

/// Reads CSV like the default source but fails on one file name.
pub(crate) struct FailingSource {
    inner: CsvSource,
    fail_on: String,
}

impl FailingSource {
    pub(crate) fn new(fail_on: &str) -> Self {
        FailingSource {
            inner: CsvSource::default(),
            fail_on: fail_on.to_string(),
        }
    }
}

impl RowSource for FailingSource {
    fn read(&self, path: &Path, request: &ReadRequest) -> Result<Vec<RowData>, FileError> {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        if name.as_deref() == Some(self.fail_on.as_str()) {
            return Err(FileError::ReadError(format!("corrupt shard {}", self.fail_on)));
        }
        self.inner.read(path, request)
    }
}
