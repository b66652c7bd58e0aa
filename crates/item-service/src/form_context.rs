// File: src/form_context.rs
// Purpose: Form context for templates to display validation errors and preserve values

use form_binding::{Bindable, BindingResult, Locale, MessageCatalog};
use std::collections::HashMap;

/// What a form view needs: the values to show and the resolved messages
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    /// Field values as the user entered them
    values: HashMap<String, String>,
    /// Field name and message, in the order the errors were raised
    field_errors: Vec<(String, String)>,
    /// Messages for errors on the item as a whole
    global_errors: Vec<String>,
}

impl FormContext {
    /// Create empty form context
    pub fn empty() -> Self {
        Self::default()
    }

    /// Context for a freshly loaded form, without errors
    pub fn from_target(target: &dyn Bindable) -> Self {
        let values = target
            .fields()
            .iter()
            .map(|spec| {
                let value = target.field_value(spec.name).unwrap_or_default();
                (spec.name.to_string(), value.to_string())
            })
            .collect();
        Self {
            values,
            ..Self::default()
        }
    }

    /// Context for a rejected submission. Fields with errors show the
    /// rejected input; messages are resolved for `locale`.
    pub fn from_binding_result(
        target: &dyn Bindable,
        result: &BindingResult,
        catalog: &MessageCatalog,
        locale: &Locale,
    ) -> Self {
        let values = target
            .fields()
            .iter()
            .map(|spec| {
                let value = result.field_value(spec.name).unwrap_or_default();
                (spec.name.to_string(), value.to_string())
            })
            .collect();
        let field_errors = result
            .field_errors()
            .map(|error| (error.field.clone(), catalog.resolve(error, locale)))
            .collect();
        let global_errors = result
            .global_errors()
            .map(|error| catalog.resolve(error, locale))
            .collect();
        Self {
            values,
            field_errors,
            global_errors,
        }
    }

    /// Value to put back into the input, empty when unknown
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    /// Check if field has an error
    pub fn has_error(&self, field: &str) -> bool {
        self.field_errors.iter().any(|(f, _)| f == field)
    }

    /// Messages for one field in insertion order
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.field_errors
            .iter()
            .filter(move |(f, _)| f == field)
            .map(|(_, message)| message.as_str())
    }

    /// Field errors whose field is not in `shown`, in insertion order
    pub fn errors_outside<'a>(
        &'a self,
        shown: &'a [&str],
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.field_errors
            .iter()
            .filter(move |(f, _)| !shown.contains(&f.as_str()))
            .map(|(f, message)| (f.as_str(), message.as_str()))
    }

    pub fn global_errors(&self) -> &[String] {
        &self.global_errors
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty() || !self.global_errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ItemSaveForm;
    use form_binding::{DataBinder, FieldValue, ValidatorRegistry};
    use pretty_assertions::assert_eq;

    fn catalog() -> MessageCatalog {
        let mut catalog = MessageCatalog::new(Locale::new("en"));
        catalog
            .add_properties(
                None,
                "typeMismatch=Please enter a number.\n\
                 Max=At most {0}.\n\
                 totalPriceMin=Total {0}, now {1}\n",
                "test",
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_empty_form_context() {
        let context = FormContext::empty();
        assert!(!context.has_errors());
        assert!(!context.has_error("any"));
        assert_eq!(context.value("any"), "");
    }

    #[test]
    fn test_from_target() {
        let form = ItemSaveForm {
            item_name: Some("pen".to_string()),
            price: Some(1000),
            quantity: None,
        };
        let context = FormContext::from_target(&form);
        assert_eq!(context.value("itemName"), "pen");
        assert_eq!(context.value("price"), "1000");
        assert_eq!(context.value("quantity"), "");
        assert!(!context.has_errors());
    }

    #[test]
    fn test_from_binding_result_keeps_raw_input() {
        let mut binder = DataBinder::new(ItemSaveForm::default());
        binder.bind([("itemName", "pen"), ("price", "abc"), ("quantity", "10000")]);
        binder.validate(&ValidatorRegistry::declarative(), &[]);
        let (form, mut result) = binder.into_parts();
        result.reject("totalPriceMin", vec![FieldValue::Int(10_000), FieldValue::Int(0)], None);

        let context =
            FormContext::from_binding_result(&form, &result, &catalog(), &Locale::new("en"));

        assert_eq!(context.value("price"), "abc");
        assert_eq!(context.value("quantity"), "10000");
        assert_eq!(context.errors_for("price").collect::<Vec<_>>(), vec!["Please enter a number."]);
        assert_eq!(context.errors_for("quantity").collect::<Vec<_>>(), vec!["At most 9,999."]);
        assert!(!context.has_error("itemName"));
        assert_eq!(context.global_errors(), &["Total 10,000, now 0".to_string()]);
        assert_eq!(
            context.errors_outside(&["itemName", "price"]).collect::<Vec<_>>(),
            vec![("quantity", "At most 9,999.")]
        );
        assert_eq!(context.errors_outside(&["price", "quantity"]).count(), 0);
    }
}
