// File: src/flow.rs
// Purpose: The three validation styles the handlers can be mounted with

use crate::domain::{Item, SAVE_CHECK, UPDATE_CHECK};
use crate::forms::{ItemFields, ItemForm, ItemSaveForm, ItemUpdateForm};
use crate::request_context::FormData;
use crate::validation::{check_total_price, ItemValidator};
use form_binding::{BindingResult, DataBinder, FieldValue, Group, ValidatorRegistry};
use tracing::debug;

/// How one mount point binds and validates item submissions
pub trait ItemFlow: Send + Sync + 'static {
    type SaveForm: ItemFields;
    type UpdateForm: ItemFields + for<'a> From<&'a Item>;

    /// Active groups when creating
    const SAVE_GROUPS: &'static [Group];
    /// Active groups when updating
    const UPDATE_GROUPS: &'static [Group];
    /// Whether the handler runs the price x quantity check itself
    const HANDLER_CROSS_CHECK: bool = true;

    fn registry() -> ValidatorRegistry;
}

/// `ItemSaveForm` / `ItemUpdateForm` with rule tables
pub struct SeparateForms;

impl ItemFlow for SeparateForms {
    type SaveForm = ItemSaveForm;
    type UpdateForm = ItemUpdateForm;
    const SAVE_GROUPS: &'static [Group] = &[];
    const UPDATE_GROUPS: &'static [Group] = &[];

    fn registry() -> ValidatorRegistry {
        ValidatorRegistry::declarative()
    }
}

/// One `ItemForm` whose rules are selected by `SaveCheck` / `UpdateCheck`
pub struct GroupedForm;

impl ItemFlow for GroupedForm {
    type SaveForm = ItemForm;
    type UpdateForm = ItemForm;
    const SAVE_GROUPS: &'static [Group] = &[SAVE_CHECK];
    const UPDATE_GROUPS: &'static [Group] = &[UPDATE_CHECK];

    fn registry() -> ValidatorRegistry {
        ValidatorRegistry::declarative()
    }
}

/// `ItemForm` checked only by the hand-written [`ItemValidator`]
pub struct Programmatic;

impl ItemFlow for Programmatic {
    type SaveForm = ItemForm;
    type UpdateForm = ItemForm;
    const SAVE_GROUPS: &'static [Group] = &[];
    const UPDATE_GROUPS: &'static [Group] = &[];
    const HANDLER_CROSS_CHECK: bool = false;

    fn registry() -> ValidatorRegistry {
        ValidatorRegistry::new().with(ItemValidator)
    }
}

/// Bind and validate a create submission
pub fn bind_save<F: ItemFlow>(
    data: &FormData,
    registry: &ValidatorRegistry,
) -> (F::SaveForm, BindingResult) {
    bind_and_validate(
        F::SaveForm::default(),
        data,
        registry,
        F::SAVE_GROUPS,
        F::HANDLER_CROSS_CHECK,
    )
}

/// Bind and validate an update submission for the item at `path_id`.
///
/// A form id that differs from the path id is a global `idMismatch` error.
pub fn bind_update<F: ItemFlow>(
    path_id: i64,
    data: &FormData,
    registry: &ValidatorRegistry,
) -> (F::UpdateForm, BindingResult) {
    let (form, mut result) = bind_and_validate(
        F::UpdateForm::default(),
        data,
        registry,
        F::UPDATE_GROUPS,
        F::HANDLER_CROSS_CHECK,
    );
    if let Some(form_id) = form.id().filter(|form_id| *form_id != path_id) {
        result.reject(
            "idMismatch",
            vec![FieldValue::Int(path_id), FieldValue::Int(form_id)],
            None,
        );
    }
    (form, result)
}

fn bind_and_validate<T: ItemFields>(
    target: T,
    data: &FormData,
    registry: &ValidatorRegistry,
    groups: &[Group],
    cross_check: bool,
) -> (T, BindingResult) {
    let mut binder = DataBinder::new(target);
    binder.bind(data.pairs());
    binder.validate(registry, groups);

    let (target, mut result) = binder.into_parts();
    if cross_check {
        check_total_price(target.price(), target.quantity(), &mut result);
    }
    debug!(object = %result.object_name(), errors = result.error_count(), "validated submission");
    (target, result)
}
