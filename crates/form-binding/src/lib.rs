//! # form-binding
//!
//! Server-side form binding and validation.
//!
//! A submission flows through the crate in a fixed order:
//!
//! 1. [`DataBinder`] converts raw submitted strings into typed field values on a
//!    [`Bindable`] form object. Conversion failures become `typeMismatch` field
//!    errors flagged as binding failures.
//! 2. A [`ValidatorRegistry`] runs every [`Validator`] that supports the form
//!    type: the declarative [`ConstraintValidator`] (rule tables on the form)
//!    and any hand-written validators.
//! 3. Errors accumulate on a [`BindingResult`]. Each error carries the candidate
//!    message codes produced by the [`MessageCodesResolver`] plus its arguments.
//! 4. At render time a [`MessageCatalog`] turns an error into text for a locale.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut binder = DataBinder::new(SignupForm::default());
//! binder.bind([("age", "abc")]);
//! binder.validate(&ValidatorRegistry::declarative(), &[]);
//!
//! let (form, result) = binder.into_parts();
//! for error in result.all_errors() {
//!     println!("{}", catalog.resolve(error, &Locale::new("en")));
//! }
//! ```

pub mod binder;
pub mod binding_result;
pub mod catalog;
pub mod codes;
pub mod errors;
pub mod rules;
pub mod target;
pub mod validator;
pub mod value;

pub use binder::DataBinder;
pub use binding_result::BindingResult;
pub use catalog::{format_message, CatalogError, Locale, MessageCatalog};
pub use codes::{CodeFormat, MessageCodesResolver};
pub use errors::{FieldError, MessageSourceResolvable, ObjectError, ValidationError};
pub use rules::{Constraint, FieldRule, Group};
pub use target::{default_object_name, Bindable, FieldSpec};
pub use validator::{ConstraintValidator, Validator, ValidatorRegistry};
pub use value::{ConversionError, FieldType, FieldValue};
