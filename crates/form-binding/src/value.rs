// File: src/value.rs
// Purpose: Field values read from form objects and the types they convert into

use std::fmt;

/// A single field value, or a message argument
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Text(String),
    Int(i64),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// True for null, empty or whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Render for use inside a message template.
    ///
    /// Integers get thousands separators (`1000000` becomes `1,000,000`).
    pub fn to_message_string(&self) -> String {
        match self {
            FieldValue::Int(n) => group_thousands(*n),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{}", n),
        }
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Int(n.into())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Raw input that could not be converted to a field's declared type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert {value:?} to {target}")]
pub struct ConversionError {
    pub value: String,
    pub target: &'static str,
}

/// Declared type of a bindable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Int32,
    Int64,
}

impl FieldType {
    /// Canonical type identifier used in `code.type` message codes
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => std::any::type_name::<String>(),
            FieldType::Int32 => std::any::type_name::<i32>(),
            FieldType::Int64 => std::any::type_name::<i64>(),
        }
    }

    /// Convert a submitted string into a value of this type.
    ///
    /// Text is taken verbatim. Numbers ignore surrounding whitespace and an
    /// empty submission converts to [`FieldValue::Null`].
    pub fn convert(&self, raw: &str) -> Result<FieldValue, ConversionError> {
        let trimmed = raw.trim();
        let mismatch = || ConversionError {
            value: raw.to_string(),
            target: self.type_name(),
        };

        match self {
            FieldType::Text => Ok(FieldValue::Text(raw.to_string())),
            _ if trimmed.is_empty() => Ok(FieldValue::Null),
            FieldType::Int32 => trimmed
                .parse::<i32>()
                .map(FieldValue::from)
                .map_err(|_| mismatch()),
            FieldType::Int64 => trimmed
                .parse::<i64>()
                .map(FieldValue::from)
                .map_err(|_| mismatch()),
        }
    }
}
