use crate::core::value::{FieldValue, Value};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

/// Grouping key of a cell.
///
/// Two cells are the same key when their text is the same number or, for
/// anything non-numeric, the same text. The type a column was inferred to in
/// one file does not matter, so shards that disagree on a column's type still
/// group together. The text of the first occurrence is kept for output.
#[derive(Debug, Clone)]
pub struct Key {
    form: KeyForm,
    text: String,
}

#[derive(Debug, Clone, Copy)]
enum KeyForm {
    Int(i64),
    /// Finite and non-integral; integral floats are stored as `Int`.
    Float(f64),
    Text,
    Null,
}

impl Key {
    pub fn null() -> Self {
        Key {
            form: KeyForm::Null,
            text: String::new(),
        }
    }

    /// Key of a raw cell. An empty cell is the null key.
    pub fn from_cell(cell: &str) -> Self {
        if cell.is_empty() {
            return Key::null();
        }
        let trimmed = cell.trim();
        let form = if let Ok(v) = trimmed.parse::<i64>() {
            KeyForm::Int(v)
        } else if let Ok(v) = trimmed.parse::<f64>() {
            numeric_form(v)
        } else {
            KeyForm::Text
        };
        Key {
            form,
            text: cell.to_string(),
        }
    }

    /// Key of a decoded field. Typed numbers are used as they are; any other
    /// value is keyed on its cell text, which still groups numbers found in a
    /// column that widened to `String`.
    pub fn from_field(field: &FieldValue) -> Self {
        let form = match &field.value {
            None => return Key::null(),
            Some(Value::Int(v)) => KeyForm::Int(*v),
            Some(Value::Float(v)) => numeric_form(*v),
            Some(_) => return Key::from_cell(&field.text),
        };
        Key {
            form,
            text: field.text.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.form, KeyForm::Null)
    }

    /// Cell text of the occurrence this key was built from.
    pub fn text(&self) -> &str {
        &self.text
    }

    fn rank(&self) -> u8 {
        match self.form {
            KeyForm::Int(_) | KeyForm::Float(_) => 0,
            KeyForm::Text => 1,
            KeyForm::Null => 2,
        }
    }
}

fn numeric_form(v: f64) -> KeyForm {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if !v.is_finite() {
        KeyForm::Text
    } else if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        KeyForm::Int(v as i64)
    } else {
        KeyForm::Float(v)
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self.form, other.form) {
            (KeyForm::Int(a), KeyForm::Int(b)) => a == b,
            (KeyForm::Float(a), KeyForm::Float(b)) => a.to_bits() == b.to_bits(),
            (KeyForm::Text, KeyForm::Text) => self.text == other.text,
            (KeyForm::Null, KeyForm::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(&self.form).hash(state);
        match self.form {
            KeyForm::Int(v) => v.hash(state),
            KeyForm::Float(v) => v.to_bits().hash(state),
            KeyForm::Text => self.text.hash(state),
            KeyForm::Null => {}
        }
    }
}

/// Numbers in numeric order, then text, then the null key.
impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.form, other.form) {
            (KeyForm::Int(a), KeyForm::Int(b)) => a.cmp(&b),
            (KeyForm::Float(a), KeyForm::Float(b)) => a.total_cmp(&b),
            // an Int never equals a non-integral Float
            (KeyForm::Int(a), KeyForm::Float(b)) => (a as f64).total_cmp(&b).then(Ordering::Less),
            (KeyForm::Float(a), KeyForm::Int(b)) => {
                a.total_cmp(&(b as f64)).then(Ordering::Greater)
            }
            (KeyForm::Text, KeyForm::Text) => self.text.cmp(&other.text),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
