// File: src/binder.rs
// Purpose: Populate a form object from submitted strings and validate it

use crate::binding_result::BindingResult;
use crate::codes::MessageCodesResolver;
use crate::rules::Group;
use crate::target::Bindable;
use crate::validator::ValidatorRegistry;
use tracing::debug;

/// Binds one submission onto a target and collects the resulting errors.
///
/// Conversion problems are recorded as binding failures with the raw input as
/// the rejected value, so validators never see half-converted data for those
/// fields.
#[derive(Debug)]
pub struct DataBinder<T: Bindable> {
    target: T,
    result: BindingResult,
    required_fields: Vec<String>,
}

impl<T: Bindable> DataBinder<T> {
    pub fn new(target: T) -> Self {
        Self::with_resolver(target, MessageCodesResolver::default())
    }

    pub fn with_resolver(target: T, resolver: MessageCodesResolver) -> Self {
        let result = BindingResult::with_resolver(&target, resolver);
        Self {
            target,
            result,
            required_fields: Vec::new(),
        }
    }

    /// Fields that must be submitted with a non-blank value
    pub fn required_fields(mut self, fields: &[&str]) -> Self {
        self.required_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Apply submitted `(name, raw value)` pairs.
    ///
    /// Unknown names are ignored. When a name repeats, the last value wins.
    pub fn bind<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut submitted: Vec<(&'static str, String)> = Vec::new();
        for (name, raw) in values {
            let name = name.as_ref();
            let Some(spec) = self.target.fields().iter().find(|s| s.name == name) else {
                debug!(object = %self.result.object_name(), field = name, "ignoring unknown field");
                continue;
            };
            let raw = raw.as_ref().to_string();
            match submitted.iter_mut().find(|(n, _)| *n == spec.name) {
                Some(entry) => entry.1 = raw,
                None => submitted.push((spec.name, raw)),
            }
        }

        for field in &self.required_fields {
            let raw = submitted
                .iter()
                .find(|(n, _)| *n == field.as_str())
                .map(|(_, raw)| raw.as_str());
            if raw.map_or(true, |r| r.trim().is_empty()) {
                self.result.reject_binding_failure(
                    field,
                    "required",
                    raw.unwrap_or_default(),
                    Vec::new(),
                    Some(format!("Field '{}' is required", field).as_str()),
                );
            }
        }

        for (name, raw) in submitted {
            if self.result.is_binding_failure(name) {
                continue;
            }
            let Some(field_type) = self.target.field_type(name) else {
                continue;
            };
            let bound = match field_type.convert(&raw) {
                Ok(value) => self.target.set_field_value(name, value),
                Err(err) => {
                    debug!(field = name, error = %err, "conversion failed");
                    false
                }
            };
            if !bound {
                self.result.reject_binding_failure(
                    name,
                    "typeMismatch",
                    &raw,
                    Vec::new(),
                    Some(
                        format!(
                            "Failed to convert value '{}' to required type {}",
                            raw,
                            field_type.type_name()
                        )
                        .as_str(),
                    ),
                );
            }
        }

        self.result.snapshot(&self.target);
        debug!(
            object = %self.result.object_name(),
            errors = self.result.error_count(),
            "bound submission"
        );
    }

    /// Run the registry's validators against the bound target
    pub fn validate(&mut self, registry: &ValidatorRegistry, groups: &[Group]) {
        registry.validate(&self.target, &mut self.result, groups);
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn binding_result(&self) -> &BindingResult {
        &self.result
    }

    pub fn into_parts(self) -> (T, BindingResult) {
        (self.target, self.result)
    }
}
