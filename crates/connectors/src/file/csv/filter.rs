use crate::file::{
    csv::metadata::{CsvColumnMetadata, CsvMetadata},
    error::FileError,
};
use csv::StringRecord;
use model::core::value::Value;
use serde::Serialize;

/// An equality condition `column == value` evaluated while decoding a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CsvFilter {
    pub column: String,
    pub value: String,
}

impl CsvFilter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        CsvFilter {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Resolves the column against a file's metadata and parses the literal
    /// with that column's inferred type.
    pub(crate) fn bind<'a>(&self, meta: &'a CsvMetadata) -> Result<BoundFilter<'a>, FileError> {
        let column = meta
            .column(&self.column)
            .ok_or_else(|| FileError::MissingColumn {
                file: meta.name.clone(),
                column: self.column.clone(),
            })?;

        Ok(BoundFilter {
            column,
            target: column.data_type.get_value(&self.value),
        })
    }
}

#[derive(Debug)]
pub(crate) struct BoundFilter<'a> {
    column: &'a CsvColumnMetadata,
    target: Option<Value>,
}

impl BoundFilter<'_> {
    /// Returns true if this record passes the filter.
    pub(crate) fn eval(&self, record: &StringRecord) -> bool {
        let cell = record.get(self.column.ordinal).unwrap_or("");
        match (self.column.data_type.get_value(cell), &self.target) {
            (None, None) => true,
            (Some(actual), Some(target)) => actual.equal(target),
            _ => false,
        }
    }
}
