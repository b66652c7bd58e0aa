// File: src/errors.rs
// Purpose: Field and object errors recorded during binding and validation

use crate::value::FieldValue;
use std::fmt;

/// Anything a [`MessageCatalog`](crate::MessageCatalog) can turn into text
pub trait MessageSourceResolvable {
    /// Candidate message keys, most specific first
    fn codes(&self) -> &[String];

    /// Arguments substituted into `{0}`, `{1}`, ... placeholders
    fn arguments(&self) -> &[FieldValue];

    /// Text used when no code resolves
    fn default_message(&self) -> Option<&str>;
}

/// An error on the target object as a whole (a cross-field or global error)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectError {
    pub object_name: String,
    pub codes: Vec<String>,
    pub arguments: Vec<FieldValue>,
    pub default_message: Option<String>,
}

impl ObjectError {
    pub fn new(
        object_name: impl Into<String>,
        codes: Vec<String>,
        arguments: Vec<FieldValue>,
        default_message: Option<String>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            codes,
            arguments,
            default_message,
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.codes.last().map(String::as_str)
    }
}

/// An error attached to one field of the target object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub object_name: String,
    pub field: String,
    /// What the user submitted; the raw string when conversion failed
    pub rejected_value: FieldValue,
    /// Raised while converting raw input, before any rule could run
    pub binding_failure: bool,
    pub codes: Vec<String>,
    pub arguments: Vec<FieldValue>,
    pub default_message: Option<String>,
}

impl FieldError {
    pub fn new(
        object_name: impl Into<String>,
        field: impl Into<String>,
        rejected_value: FieldValue,
        binding_failure: bool,
        codes: Vec<String>,
        arguments: Vec<FieldValue>,
        default_message: Option<String>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            field: field.into(),
            rejected_value,
            binding_failure,
            codes,
            arguments,
            default_message,
        }
    }

    /// The short code this error was raised with (the least specific key)
    pub fn code(&self) -> Option<&str> {
        self.codes.last().map(String::as_str)
    }
}

/// One entry of a [`BindingResult`](crate::BindingResult)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Field(FieldError),
    Global(ObjectError),
}

impl ValidationError {
    pub fn object_name(&self) -> &str {
        match self {
            ValidationError::Field(e) => &e.object_name,
            ValidationError::Global(e) => &e.object_name,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Field(e) => Some(&e.field),
            ValidationError::Global(_) => None,
        }
    }

    pub fn as_field_error(&self) -> Option<&FieldError> {
        match self {
            ValidationError::Field(e) => Some(e),
            ValidationError::Global(_) => None,
        }
    }

    pub fn as_object_error(&self) -> Option<&ObjectError> {
        match self {
            ValidationError::Global(e) => Some(e),
            ValidationError::Field(_) => None,
        }
    }

    /// Whether the catalog is guaranteed to produce something for this error
    pub fn is_presentable(&self) -> bool {
        !self.codes().is_empty() || self.default_message().is_some()
    }
}

impl From<FieldError> for ValidationError {
    fn from(error: FieldError) -> Self {
        ValidationError::Field(error)
    }
}

impl From<ObjectError> for ValidationError {
    fn from(error: ObjectError) -> Self {
        ValidationError::Global(error)
    }
}

impl MessageSourceResolvable for ObjectError {
    fn codes(&self) -> &[String] {
        &self.codes
    }

    fn arguments(&self) -> &[FieldValue] {
        &self.arguments
    }

    fn default_message(&self) -> Option<&str> {
        self.default_message.as_deref()
    }
}

impl MessageSourceResolvable for FieldError {
    fn codes(&self) -> &[String] {
        &self.codes
    }

    fn arguments(&self) -> &[FieldValue] {
        &self.arguments
    }

    fn default_message(&self) -> Option<&str> {
        self.default_message.as_deref()
    }
}

impl MessageSourceResolvable for ValidationError {
    fn codes(&self) -> &[String] {
        match self {
            ValidationError::Field(e) => e.codes(),
            ValidationError::Global(e) => e.codes(),
        }
    }

    fn arguments(&self) -> &[FieldValue] {
        match self {
            ValidationError::Field(e) => e.arguments(),
            ValidationError::Global(e) => e.arguments(),
        }
    }

    fn default_message(&self) -> Option<&str> {
        match self {
            ValidationError::Field(e) => MessageSourceResolvable::default_message(e),
            ValidationError::Global(e) => MessageSourceResolvable::default_message(e),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Field(e) => write!(
                f,
                "Field error in object '{}' on field '{}': rejected value [{}]{}; codes [{}]; arguments [{}]",
                e.object_name,
                e.field,
                e.rejected_value,
                if e.binding_failure { " (binding failure)" } else { "" },
                e.codes.join(","),
                join_args(&e.arguments),
            ),
            ValidationError::Global(e) => write!(
                f,
                "Error in object '{}': codes [{}]; arguments [{}]",
                e.object_name,
                e.codes.join(","),
                join_args(&e.arguments),
            ),
        }
    }
}

pub(crate) fn join_args(args: &[FieldValue]) -> String {
    args.iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
