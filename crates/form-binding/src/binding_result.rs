// File: src/binding_result.rs
// Purpose: Per-submission accumulator of field and global errors

use crate::codes::MessageCodesResolver;
use crate::errors::{FieldError, ObjectError, ValidationError};
use crate::target::Bindable;
use crate::value::FieldValue;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Errors collected for one target object.
///
/// The result keeps a snapshot of the target's field values so that
/// [`reject_value`](Self::reject_value) can record what was rejected and so a
/// view can show the user's input again. Errors keep insertion order and are
/// never deduplicated.
#[derive(Debug, Clone)]
pub struct BindingResult {
    object_name: String,
    values: HashMap<String, FieldValue>,
    field_types: HashMap<String, &'static str>,
    errors: Vec<ValidationError>,
    resolver: MessageCodesResolver,
}

impl BindingResult {
    /// Create an empty result for `target` using the default code resolver
    pub fn new(target: &dyn Bindable) -> Self {
        Self::with_resolver(target, MessageCodesResolver::default())
    }

    pub fn with_resolver(target: &dyn Bindable, resolver: MessageCodesResolver) -> Self {
        let mut result = Self {
            object_name: target.object_name(),
            values: HashMap::new(),
            field_types: HashMap::new(),
            errors: Vec::new(),
            resolver,
        };
        result.snapshot(target);
        result
    }

    /// Re-read the target's field values, e.g. after binding populated it
    pub fn snapshot(&mut self, target: &dyn Bindable) {
        self.values.clear();
        self.field_types.clear();
        for spec in target.fields() {
            let value = target.field_value(spec.name).unwrap_or(FieldValue::Null);
            self.values.insert(spec.name.to_string(), value);
            self.field_types
                .insert(spec.name.to_string(), spec.field_type.type_name());
        }
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Register a global error for the target
    pub fn reject(
        &mut self,
        code: &str,
        arguments: Vec<FieldValue>,
        default_message: Option<&str>,
    ) {
        let codes = self.resolver.resolve_object_codes(code, &self.object_name);
        let error = ObjectError::new(
            self.object_name.clone(),
            codes,
            arguments,
            default_message.map(str::to_string),
        );
        self.errors.push(error.into());
    }

    /// Register an error for `field`, recording the field's current value as
    /// the rejected value.
    ///
    /// An empty field path is treated as a global rejection. Nothing is added
    /// when the field already carries a binding failure.
    pub fn reject_value(
        &mut self,
        field: &str,
        code: &str,
        arguments: Vec<FieldValue>,
        default_message: Option<&str>,
    ) {
        if field.is_empty() {
            self.reject(code, arguments, default_message);
            return;
        }
        if self.is_binding_failure(field) {
            debug!(
                object = %self.object_name,
                field,
                code,
                "skipping rule error on field with binding failure"
            );
            return;
        }

        let rejected = self.values.get(field).cloned().unwrap_or(FieldValue::Null);
        let field_type = self.field_types.get(field).copied();
        let codes = self
            .resolver
            .resolve_field_codes(code, &self.object_name, field, field_type);
        let error = FieldError::new(
            self.object_name.clone(),
            field,
            rejected,
            false,
            codes,
            arguments,
            default_message.map(str::to_string),
        );
        self.errors.push(error.into());
    }

    /// Record that the raw input for `field` could not be bound
    pub fn reject_binding_failure(
        &mut self,
        field: &str,
        code: &str,
        raw_value: &str,
        arguments: Vec<FieldValue>,
        default_message: Option<&str>,
    ) {
        let field_type = self.field_types.get(field).copied();
        let codes = self
            .resolver
            .resolve_field_codes(code, &self.object_name, field, field_type);
        let error = FieldError::new(
            self.object_name.clone(),
            field,
            FieldValue::Text(raw_value.to_string()),
            true,
            codes,
            arguments,
            default_message.map(str::to_string),
        );
        self.errors.push(error.into());
    }

    /// Append a fully built error as is
    pub fn add_error(&mut self, error: impl Into<ValidationError>) {
        let error = error.into();
        if !error.is_presentable() {
            warn!(object = %self.object_name, "error has neither codes nor a default message");
        }
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Every error in insertion order
    pub fn all_errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn field_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter_map(ValidationError::as_field_error)
    }

    pub fn global_errors(&self) -> impl Iterator<Item = &ObjectError> {
        self.errors.iter().filter_map(ValidationError::as_object_error)
    }

    pub fn has_global_errors(&self) -> bool {
        self.global_errors().next().is_some()
    }

    /// Errors on one field in insertion order
    pub fn field_errors_for<'a>(
        &'a self,
        field: &'a str,
    ) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.field_errors().filter(move |e| e.field == field)
    }

    /// First error on `field`
    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.field_errors().find(|e| e.field == field)
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.field_error(field).is_some()
    }

    pub fn is_binding_failure(&self, field: &str) -> bool {
        self.field_errors()
            .any(|e| e.field == field && e.binding_failure)
    }

    /// Value to show for `field`: the rejected value when the field has an
    /// error, otherwise the bound value
    pub fn field_value(&self, field: &str) -> Option<FieldValue> {
        match self.field_error(field) {
            Some(error) => Some(error.rejected_value.clone()),
            None => self.values.get(field).cloned(),
        }
    }
}

impl fmt::Display for BindingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BindingResult for '{}': {} error(s)",
            self.object_name,
            self.errors.len()
        )?;
        for error in &self.errors {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::tests::ProductForm;
    use pretty_assertions::assert_eq;

    fn product(name: &str, price: Option<i32>) -> ProductForm {
        ProductForm {
            id: None,
            name: Some(name.to_string()),
            price,
        }
    }

    #[test]
    fn test_reject_creates_global_error() {
        let form = product("pen", Some(5));
        let mut result = BindingResult::new(&form);
        result.reject("totalPriceMin", vec![FieldValue::Int(10000), FieldValue::Int(5000)], None);

        assert!(result.has_errors());
        assert!(result.has_global_errors());
        let error = result.global_errors().next().unwrap();
        assert_eq!(error.codes, vec!["totalPriceMin.productForm", "totalPriceMin"]);
        assert_eq!(error.arguments, vec![FieldValue::Int(10000), FieldValue::Int(5000)]);
    }

    #[test]
    fn test_reject_value_reads_rejected_value_from_target() {
        let form = product("", Some(5));
        let mut result = BindingResult::new(&form);
        result.reject_value("name", "required", Vec::new(), None);

        let error = result.field_error("name").unwrap();
        assert_eq!(error.rejected_value, FieldValue::from(""));
        assert!(!error.binding_failure);
        assert_eq!(
            error.codes,
            vec![
                "required.productForm.name",
                "required.name",
                "required.alloc::string::String",
                "required",
            ]
        );
    }

    #[test]
    fn test_empty_field_path_is_global() {
        let form = product("pen", None);
        let mut result = BindingResult::new(&form);
        result.reject_value("", "broken", Vec::new(), Some("broken"));
        assert_eq!(result.global_errors().count(), 1);
        assert_eq!(result.field_errors().count(), 0);
    }

    #[test]
    fn test_binding_failure_suppresses_later_rule_errors() {
        let form = product("pen", None);
        let mut result = BindingResult::new(&form);
        result.reject_binding_failure("price", "typeMismatch", "abc", Vec::new(), None);
        result.reject_value("price", "NotNull", Vec::new(), None);
        result.reject_value("name", "NotBlank", Vec::new(), None);

        let price_errors: Vec<_> = result.field_errors_for("price").collect();
        assert_eq!(price_errors.len(), 1);
        assert!(price_errors[0].binding_failure);
        assert_eq!(price_errors[0].rejected_value, FieldValue::from("abc"));
        assert_eq!(price_errors[0].code(), Some("typeMismatch"));
        assert!(result.has_field_errors("name"));
    }

    #[test]
    fn test_ordering_and_duplicates_preserved() {
        let form = product("", None);
        let mut result = BindingResult::new(&form);
        result.reject_value("name", "NotBlank", Vec::new(), None);
        result.reject("global", Vec::new(), None);
        result.reject_value("name", "NotBlank", Vec::new(), None);

        let kinds: Vec<Option<&str>> = result.all_errors().iter().map(|e| e.field()).collect();
        assert_eq!(kinds, vec![Some("name"), None, Some("name")]);
        assert_eq!(result.field_errors_for("name").count(), 2);
    }

    #[test]
    fn test_field_value_prefers_rejected_value() {
        let form = product("pen", None);
        let mut result = BindingResult::new(&form);
        result.reject_binding_failure("price", "typeMismatch", "12x", Vec::new(), None);

        assert_eq!(result.field_value("price"), Some(FieldValue::from("12x")));
        assert_eq!(result.field_value("name"), Some(FieldValue::from("pen")));
        assert_eq!(result.field_value("unknown"), None);
    }

    #[test]
    fn test_add_error_keeps_prebuilt_error() {
        let form = product("pen", None);
        let mut result = BindingResult::new(&form);
        result.add_error(FieldError::new(
            "item",
            "name",
            FieldValue::from("pen"),
            false,
            vec!["required.item.itemName".to_string()],
            Vec::new(),
            Some("Item name is required.".to_string()),
        ));
        result.add_error(ObjectError::new(
            "item",
            vec!["totalPriceMin".to_string()],
            Vec::new(),
            Some("Total too low".to_string()),
        ));

        assert_eq!(result.error_count(), 2);
        assert_eq!(
            result.field_error("name").unwrap().codes,
            vec!["required.item.itemName"]
        );
    }

    #[test]
    fn test_display_lists_errors() {
        let form = product("", None);
        let mut result = BindingResult::new(&form);
        result.reject_value("name", "NotBlank", Vec::new(), None);
        let text = result.to_string();
        assert!(text.starts_with("BindingResult for 'productForm': 1 error(s)"));
        assert!(text.contains("field 'name'"));
    }
}
