use crate::{
    file::{
        csv::{
            metadata::{CsvColumnMetadata, CsvMetadata},
            settings::CsvSettings,
        },
        error::FileError,
    },
    source::{ReadRequest, RowSource},
};
use csv::StringRecord;
use model::{core::value::FieldValue, records::row::RowData};
use std::{fs::File, path::Path};
use tracing::debug;

/// Decodes a headed CSV file into typed rows.
///
/// The whole file is read before any row is produced, because column types
/// are inferred over every record of the file.
#[derive(Debug, Clone, Default)]
pub struct CsvSource {
    pub settings: CsvSettings,
}

impl CsvSource {
    pub fn new(settings: CsvSettings) -> Self {
        CsvSource { settings }
    }

    fn load(&self, path: &Path) -> Result<(Vec<String>, Vec<StringRecord>), FileError> {
        let file = File::open(path).map_err(|e| FileError::from_io(path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.settings.delimiter_byte())
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(file);

        let headers = reader.headers()?.iter().map(String::from).collect();
        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FileError::ReadError(format!("{}: {e}", path.display())))?;

        Ok((headers, records))
    }
}

impl RowSource for CsvSource {
    fn read(&self, path: &Path, request: &ReadRequest) -> Result<Vec<RowData>, FileError> {
        let start = std::time::Instant::now();
        let (headers, records) = self.load(path)?;

        let entity_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let meta = CsvMetadata::infer(&entity_name, &headers, &records);

        let projection: Vec<&CsvColumnMetadata> = if request.columns.is_empty() {
            meta.columns.iter().collect()
        } else {
            request
                .columns
                .iter()
                .map(|name| {
                    meta.column(name).ok_or_else(|| FileError::MissingColumn {
                        file: entity_name.clone(),
                        column: name.clone(),
                    })
                })
                .collect::<Result<_, _>>()?
        };

        let filter = request
            .filter
            .as_ref()
            .map(|f| f.bind(&meta))
            .transpose()?;

        let mut rows = Vec::with_capacity(records.len());
        for record in &records {
            if let Some(ref filter) = filter
                && !filter.eval(record)
            {
                continue;
            }

            let fields = projection
                .iter()
                .map(|col| {
                    let cell = record.get(col.ordinal).unwrap_or("");
                    FieldValue {
                        name: col.name.clone(),
                        value: col.data_type.get_value(cell),
                        text: cell.to_string(),
                    }
                })
                .collect();
            rows.push(RowData::new(&entity_name, fields));
        }

        debug!(
            "Decoded {} of {} rows from {} in {}ms",
            rows.len(),
            records.len(),
            entity_name,
            start.elapsed().as_millis()
        );
        Ok(rows)
    }
}
