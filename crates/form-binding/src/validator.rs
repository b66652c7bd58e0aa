// File: src/validator.rs
// Purpose: Validator contract, the declarative rule engine and a registry

use crate::binding_result::BindingResult;
use crate::rules::Group;
use crate::target::Bindable;
use std::any::TypeId;
use std::sync::Arc;
use tracing::trace;

/// Something that checks a bound target and records errors on its result
pub trait Validator: Send + Sync {
    /// Whether this validator knows how to check values of `type_id`
    fn supports(&self, type_id: TypeId) -> bool;

    /// Add errors for `target` to `errors`. `groups` selects which
    /// declarative rules run; validators without groups may ignore it.
    fn validate(&self, target: &dyn Bindable, errors: &mut BindingResult, groups: &[Group]);
}

/// Runs each rule from [`Bindable::rules`] whose groups match the active
/// groups, in table order
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintValidator;

impl Validator for ConstraintValidator {
    fn supports(&self, _type_id: TypeId) -> bool {
        true
    }

    fn validate(&self, target: &dyn Bindable, errors: &mut BindingResult, groups: &[Group]) {
        for rule in target.rules().iter().filter(|r| r.applies_to(groups)) {
            let value = target.field_value(rule.field).unwrap_or_default();
            if rule.constraint.is_satisfied_by(&value) {
                continue;
            }
            trace!(field = rule.field, code = rule.constraint.code(), "rule violated");
            errors.reject_value(
                rule.field,
                rule.constraint.code(),
                rule.constraint.arguments(),
                Some(rule.constraint.default_message()),
            );
        }
    }
}

/// Validators applied to a submission, in registration order
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: Vec<Arc<dyn Validator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding only the [`ConstraintValidator`]
    pub fn declarative() -> Self {
        Self::new().with(ConstraintValidator)
    }

    pub fn register(&mut self, validator: impl Validator + 'static) {
        self.validators.push(Arc::new(validator));
    }

    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.register(validator);
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run every validator that supports the target's concrete type
    pub fn validate(&self, target: &dyn Bindable, errors: &mut BindingResult, groups: &[Group]) {
        let type_id = target.as_any().type_id();
        for validator in self.validators.iter().filter(|v| v.supports(type_id)) {
            validator.validate(target, errors, groups);
        }
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.validators.len())
            .finish()
    }
}
