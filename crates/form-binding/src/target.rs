// File: src/target.rs
// Purpose: The contract a form object offers to the binder and validators

use crate::rules::FieldRule;
use crate::value::{FieldType, FieldValue};
use std::any::Any;

/// A field the binder may populate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
}

impl FieldSpec {
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self { name, field_type }
    }
}

/// A form object that can be bound from a submission and validated
pub trait Bindable: Any + Send + Sync {
    /// Logical name errors are reported under.
    ///
    /// Defaults to the type's simple name with a lowercase first letter.
    fn object_name(&self) -> String {
        default_object_name(std::any::type_name_of_val(self))
    }

    /// Fields the binder is allowed to set, in display order
    fn fields(&self) -> &'static [FieldSpec];

    /// Current value of a field; `None` when the object has no such field
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Store an already converted value. Returns false for unknown fields or
    /// a value of the wrong shape.
    fn set_field_value(&mut self, field: &str, value: FieldValue) -> bool;

    /// Declarative rules attached to the fields
    fn rules(&self) -> &'static [FieldRule] {
        &[]
    }

    fn as_any(&self) -> &dyn Any;

    fn field_type(&self, field: &str) -> Option<FieldType> {
        self.fields()
            .iter()
            .find(|spec| spec.name == field)
            .map(|spec| spec.field_type)
    }
}

/// `my_crate::forms::ItemSaveForm` becomes `itemSaveForm`
pub fn default_object_name(type_name: &str) -> String {
    let without_generics = type_name.split('<').next().unwrap_or(type_name);
    let simple = without_generics.rsplit("::").next().unwrap_or(without_generics);
    let mut chars = simple.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
