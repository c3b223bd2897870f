use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Column '{column}' not found in {file}")]
    MissingColumn { file: String, column: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Error reading CSV file: {0}")]
    ReadError(String),

    #[error("Unsupported delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),
}

impl FileError {
    /// Maps an I/O error on `path` to `NotFound` when the path is missing.
    pub fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound(path.display().to_string()),
            _ => FileError::IoError(err),
        }
    }
}
