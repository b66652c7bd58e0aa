// File: src/validation.rs
// Purpose: Hand-written item rules, including the price x quantity check

use crate::domain::{PRICE_MAX, PRICE_MIN, QUANTITY_MAX, TOTAL_PRICE_MIN};
use crate::forms::ItemForm;
use form_binding::{Bindable, BindingResult, FieldValue, Group, Validator};
use std::any::TypeId;

/// Reject the whole item when `price * quantity` is under the minimum total.
///
/// Only runs when both values are present. Returns true when an error was
/// added.
pub fn check_total_price(
    price: Option<i32>,
    quantity: Option<i32>,
    errors: &mut BindingResult,
) -> bool {
    let (Some(price), Some(quantity)) = (price, quantity) else {
        return false;
    };
    let total = i64::from(price) * i64::from(quantity);
    if total >= TOTAL_PRICE_MIN {
        return false;
    }
    errors.reject(
        "totalPriceMin",
        vec![FieldValue::Int(TOTAL_PRICE_MIN), FieldValue::Int(total)],
        None,
    );
    true
}

/// Item rules written out by hand instead of read from a rule table.
///
/// Uses the legacy codes `required`, `range` and `max`, and treats a missing
/// price or quantity as out of range.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemValidator;

impl Validator for ItemValidator {
    fn supports(&self, type_id: TypeId) -> bool {
        type_id == TypeId::of::<ItemForm>()
    }

    fn validate(&self, target: &dyn Bindable, errors: &mut BindingResult, _groups: &[Group]) {
        let Some(item) = target.as_any().downcast_ref::<ItemForm>() else {
            return;
        };

        if item.item_name.as_deref().map_or(true, |name| name.trim().is_empty()) {
            errors.reject_value("itemName", "required", Vec::new(), None);
        }

        let price_ok = item
            .price
            .is_some_and(|p| (PRICE_MIN..=PRICE_MAX).contains(&i64::from(p)));
        if !price_ok {
            errors.reject_value(
                "price",
                "range",
                vec![FieldValue::Int(PRICE_MIN), FieldValue::Int(PRICE_MAX)],
                None,
            );
        }

        if item.quantity.map_or(true, |q| i64::from(q) > QUANTITY_MAX) {
            errors.reject_value("quantity", "max", vec![FieldValue::Int(QUANTITY_MAX)], None);
        }

        check_total_price(item.price, item.quantity, errors);
    }
}
