use crate::core::{key::Key, value::FieldValue};
use serde::{Deserialize, Serialize};

/// One decoded row of an input file, addressable by column name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowData {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        RowData {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    /// Grouping key of `field`. A missing field is the null key.
    pub fn key(&self, field: &str) -> Key {
        self.get(field).map(Key::from_field).unwrap_or_else(Key::null)
    }

    /// Cell text of `field` as it appeared in the file. A missing field is
    /// empty.
    pub fn text(&self, field: &str) -> &str {
        self.get(field).map(|f| f.text.as_str()).unwrap_or("")
    }
}
