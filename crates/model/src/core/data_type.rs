use crate::core::value::Value;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column types a delimited file can be inferred to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Null,
    Int,
    Float,
    Boolean,
    Date,
    String,
}

/// Order in which an untyped column tries candidate types.
const CHAIN: &[DataType] = &[
    DataType::Int,
    DataType::Float,
    DataType::Boolean,
    DataType::Date,
    DataType::String,
];

impl DataType {
    /// Check if this type can parse the given cell. Empty cells are nulls and
    /// fit every type.
    pub fn can_parse(&self, cell: &str) -> bool {
        if cell.is_empty() {
            return true;
        }
        match self {
            DataType::Null => false,
            DataType::Int => cell.parse::<i64>().is_ok(),
            DataType::Float => parse_float(cell).is_some(),
            DataType::Boolean => parse_bool(cell).is_some(),
            DataType::Date => NaiveDate::parse_from_str(cell, DATE_FORMAT).is_ok(),
            DataType::String => true,
        }
    }

    /// Widens the type just enough to hold `cell` as well as every cell seen
    /// so far. Only `Int -> Float` is a lossless widening; any other conflict
    /// falls back to `String`.
    pub fn promote(self, cell: &str) -> DataType {
        if self.can_parse(cell) {
            return self;
        }
        match self {
            DataType::Null => CHAIN
                .iter()
                .copied()
                .find(|t| t.can_parse(cell))
                .unwrap_or(DataType::String),
            DataType::Int if DataType::Float.can_parse(cell) => DataType::Float,
            _ => DataType::String,
        }
    }

    /// Infers a column type from all of its cells.
    pub fn infer<'a, I>(cells: I) -> DataType
    where
        I: IntoIterator<Item = &'a str>,
    {
        cells
            .into_iter()
            .fold(DataType::Null, |current, cell| current.promote(cell))
    }

    /// Parses a cell as this type. Empty cells yield `None`.
    pub fn get_value(&self, cell: &str) -> Option<Value> {
        if cell.is_empty() {
            return None;
        }
        let value = match self {
            DataType::Int => cell.parse::<i64>().ok().map(Value::Int),
            DataType::Float => parse_float(cell).map(Value::Float),
            DataType::Boolean => parse_bool(cell).map(Value::Boolean),
            DataType::Date => NaiveDate::parse_from_str(cell, DATE_FORMAT)
                .ok()
                .map(Value::Date),
            DataType::Null | DataType::String => None,
        };
        Some(value.unwrap_or_else(|| Value::String(cell.to_string())))
    }
}

/// Finite floats only, so NaN or infinity never type a column as `Float`.
fn parse_float(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell.to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_basic_types() {
        assert_eq!(DataType::infer(["1", "2", "-3"]), DataType::Int);
        assert_eq!(DataType::infer(["1", "2.5"]), DataType::Float);
        assert_eq!(DataType::infer(["true", "FALSE"]), DataType::Boolean);
        assert_eq!(
            DataType::infer(["2021-01-01", "2021-01-02"]),
            DataType::Date
        );
        assert_eq!(DataType::infer(["LT", "US"]), DataType::String);
    }

    #[test]
    fn test_non_finite_floats_are_strings() {
        assert_eq!(DataType::infer(["NaN", "1.5"]), DataType::String);
        assert_eq!(DataType::infer(["1", "inf"]), DataType::String);
        assert_eq!(
            DataType::Float.get_value("NaN"),
            Some(Value::String("NaN".into()))
        );
    }

    #[test]
    fn test_infer_ignores_empty_cells() {
        assert_eq!(DataType::infer(["", "4", ""]), DataType::Int);
        assert_eq!(DataType::infer(["", ""]), DataType::Null);
        assert_eq!(DataType::infer(std::iter::empty::<&str>()), DataType::Null);
    }

    #[test]
    fn test_conflicting_cells_widen_to_string() {
        // a bool after a float must not narrow the column
        assert_eq!(DataType::infer(["1.5", "true"]), DataType::String);
        assert_eq!(DataType::infer(["2021-01-01", "7"]), DataType::String);
        assert_eq!(DataType::infer(["7", "2021-01-01"]), DataType::String);
    }

    #[test]
    fn test_get_value() {
        assert_eq!(DataType::Int.get_value("42"), Some(Value::Int(42)));
        assert_eq!(DataType::Float.get_value("3"), Some(Value::Float(3.0)));
        assert_eq!(
            DataType::Date.get_value("2021-01-01"),
            Some(Value::Date(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()))
        );
        assert_eq!(
            DataType::String.get_value("ad1"),
            Some(Value::String("ad1".into()))
        );
        assert_eq!(DataType::Int.get_value(""), None);
        // a cell that does not fit its column type is kept verbatim
        assert_eq!(
            DataType::Int.get_value("x"),
            Some(Value::String("x".into()))
        );
    }
}
