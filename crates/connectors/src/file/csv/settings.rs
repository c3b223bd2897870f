use crate::file::error::FileError;

#[derive(Debug, Clone, Copy)]
pub struct CsvSettings {
    delimiter: u8,
}

impl CsvSettings {
    /// csv only supports single-byte delimiters, so anything outside ASCII is
    /// rejected.
    pub fn new(delimiter: char) -> Result<Self, FileError> {
        if !delimiter.is_ascii() {
            return Err(FileError::InvalidDelimiter(delimiter));
        }
        Ok(CsvSettings {
            delimiter: delimiter as u8,
        })
    }

    pub(crate) fn delimiter_byte(&self) -> u8 {
        self.delimiter
    }
}

impl Default for CsvSettings {
    fn default() -> Self {
        CsvSettings { delimiter: b',' }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_delimiter() {
        let settings = CsvSettings::new(';').unwrap();
        assert_eq!(settings.delimiter_byte(), b';');
        assert_eq!(CsvSettings::default().delimiter_byte(), b',');
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let err = CsvSettings::new('§').unwrap_err();
        assert!(matches!(err, FileError::InvalidDelimiter('§')));
    }
}
