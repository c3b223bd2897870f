use csv::StringRecord;
use model::core::data_type::DataType;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CsvColumnMetadata {
    pub name: String,
    pub data_type: DataType,
    pub ordinal: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CsvMetadata {
    pub name: String,
    pub columns: Vec<CsvColumnMetadata>,
}

impl CsvMetadata {
    /// Infers every column's type from all records of the file, so a column
    /// has one type across the whole file.
    pub fn infer(name: &str, headers: &[String], records: &[StringRecord]) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(ordinal, header)| CsvColumnMetadata {
                name: header.clone(),
                data_type: DataType::infer(column_cells(records, ordinal)),
                ordinal,
            })
            .collect();

        CsvMetadata {
            name: name.to_string(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&CsvColumnMetadata> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

fn column_cells(records: &[StringRecord], ordinal: usize) -> impl Iterator<Item = &str> {
    records.iter().map(move |r| r.get(ordinal).unwrap_or(""))
}
