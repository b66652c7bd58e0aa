// File: src/forms.rs
// Purpose: Input-shaped item forms with their rule tables

use crate::domain::{Item, PRICE_MAX, PRICE_MIN, QUANTITY_MAX, SAVE_CHECK, UPDATE_CHECK};
use form_binding::{Bindable, Constraint, FieldRule, FieldSpec, FieldType, FieldValue, Group};
use std::any::Any;

/// Every item form reports its errors under this name
pub const OBJECT_NAME: &str = "item";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("form field '{0}' has no value")]
    MissingField(&'static str),
}

/// Read access shared by the item forms, plus the form to entity mapping
pub trait ItemFields: Bindable + Default {
    fn item_name(&self) -> Option<&str>;
    fn price(&self) -> Option<i32>;
    fn quantity(&self) -> Option<i32>;

    fn id(&self) -> Option<i64> {
        None
    }

    /// Copy the validated fields into a new entity
    fn to_item(&self) -> Result<Item, FormError> {
        Ok(Item::new(
            self.item_name().ok_or(FormError::MissingField("itemName"))?,
            self.price().ok_or(FormError::MissingField("price"))?,
            self.quantity().ok_or(FormError::MissingField("quantity"))?,
        ))
    }
}

/// Creation input: no identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSaveForm {
    pub item_name: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
}

/// Update input: `id` must be present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdateForm {
    pub id: Option<i64>,
    pub item_name: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
}

/// One form for both create and update, with rules split by group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub id: Option<i64>,
    pub item_name: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
}

const SAVE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("itemName", FieldType::Text),
    FieldSpec::new("price", FieldType::Int32),
    FieldSpec::new("quantity", FieldType::Int32),
];

const ID_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("id", FieldType::Int64),
    FieldSpec::new("itemName", FieldType::Text),
    FieldSpec::new("price", FieldType::Int32),
    FieldSpec::new("quantity", FieldType::Int32),
];

const PRICE_RANGE: Constraint = Constraint::Range {
    min: PRICE_MIN,
    max: PRICE_MAX,
};

const SAVE_RULES: &[FieldRule] = &[
    FieldRule::new("itemName", Constraint::NotBlank),
    FieldRule::new("price", Constraint::NotNull),
    FieldRule::new("price", PRICE_RANGE),
    FieldRule::new("quantity", Constraint::NotNull),
    FieldRule::new("quantity", Constraint::Max(QUANTITY_MAX)),
];

const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::new("id", Constraint::NotNull),
    FieldRule::new("itemName", Constraint::NotBlank),
    FieldRule::new("price", Constraint::NotNull),
    FieldRule::new("price", PRICE_RANGE),
    FieldRule::new("quantity", Constraint::NotNull),
];

const BOTH: &[Group] = &[SAVE_CHECK, UPDATE_CHECK];

const GROUPED_RULES: &[FieldRule] = &[
    FieldRule::new("id", Constraint::Null).in_groups(&[SAVE_CHECK]),
    FieldRule::new("id", Constraint::NotNull).in_groups(&[UPDATE_CHECK]),
    FieldRule::new("itemName", Constraint::NotBlank).in_groups(BOTH),
    FieldRule::new("price", Constraint::NotNull).in_groups(BOTH),
    FieldRule::new("price", PRICE_RANGE).in_groups(BOTH),
    FieldRule::new("quantity", Constraint::NotNull).in_groups(BOTH),
    FieldRule::new("quantity", Constraint::Max(QUANTITY_MAX)).in_groups(&[SAVE_CHECK]),
];

fn set_text(slot: &mut Option<String>, value: FieldValue) -> bool {
    match value {
        FieldValue::Text(s) => *slot = Some(s),
        FieldValue::Null => *slot = None,
        _ => return false,
    }
    true
}

fn set_i32(slot: &mut Option<i32>, value: FieldValue) -> bool {
    match value {
        FieldValue::Int(n) => match i32::try_from(n) {
            Ok(n) => *slot = Some(n),
            Err(_) => return false,
        },
        FieldValue::Null => *slot = None,
        _ => return false,
    }
    true
}

fn set_i64(slot: &mut Option<i64>, value: FieldValue) -> bool {
    match value {
        FieldValue::Int(n) => *slot = Some(n),
        FieldValue::Null => *slot = None,
        _ => return false,
    }
    true
}

impl Bindable for ItemSaveForm {
    fn object_name(&self) -> String {
        OBJECT_NAME.to_string()
    }

    fn fields(&self) -> &'static [FieldSpec] {
        SAVE_FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "itemName" => Some(self.item_name.clone().into()),
            "price" => Some(self.price.into()),
            "quantity" => Some(self.quantity.into()),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: FieldValue) -> bool {
        match field {
            "itemName" => set_text(&mut self.item_name, value),
            "price" => set_i32(&mut self.price, value),
            "quantity" => set_i32(&mut self.quantity, value),
            _ => false,
        }
    }

    fn rules(&self) -> &'static [FieldRule] {
        SAVE_RULES
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ItemFields for ItemSaveForm {
    fn item_name(&self) -> Option<&str> {
        self.item_name.as_deref()
    }

    fn price(&self) -> Option<i32> {
        self.price
    }

    fn quantity(&self) -> Option<i32> {
        self.quantity
    }
}

impl Bindable for ItemUpdateForm {
    fn object_name(&self) -> String {
        OBJECT_NAME.to_string()
    }

    fn fields(&self) -> &'static [FieldSpec] {
        ID_FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "itemName" => Some(self.item_name.clone().into()),
            "price" => Some(self.price.into()),
            "quantity" => Some(self.quantity.into()),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: FieldValue) -> bool {
        match field {
            "id" => set_i64(&mut self.id, value),
            "itemName" => set_text(&mut self.item_name, value),
            "price" => set_i32(&mut self.price, value),
            "quantity" => set_i32(&mut self.quantity, value),
            _ => false,
        }
    }

    fn rules(&self) -> &'static [FieldRule] {
        UPDATE_RULES
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ItemFields for ItemUpdateForm {
    fn item_name(&self) -> Option<&str> {
        self.item_name.as_deref()
    }

    fn price(&self) -> Option<i32> {
        self.price
    }

    fn quantity(&self) -> Option<i32> {
        self.quantity
    }

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl From<&Item> for ItemUpdateForm {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            item_name: Some(item.item_name.clone()),
            price: Some(item.price),
            quantity: Some(item.quantity),
        }
    }
}

impl Bindable for ItemForm {
    fn object_name(&self) -> String {
        OBJECT_NAME.to_string()
    }

    fn fields(&self) -> &'static [FieldSpec] {
        ID_FIELDS
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "itemName" => Some(self.item_name.clone().into()),
            "price" => Some(self.price.into()),
            "quantity" => Some(self.quantity.into()),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: FieldValue) -> bool {
        match field {
            "id" => set_i64(&mut self.id, value),
            "itemName" => set_text(&mut self.item_name, value),
            "price" => set_i32(&mut self.price, value),
            "quantity" => set_i32(&mut self.quantity, value),
            _ => false,
        }
    }

    fn rules(&self) -> &'static [FieldRule] {
        GROUPED_RULES
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ItemFields for ItemForm {
    fn item_name(&self) -> Option<&str> {
        self.item_name.as_deref()
    }

    fn price(&self) -> Option<i32> {
        self.price
    }

    fn quantity(&self) -> Option<i32> {
        self.quantity
    }

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl From<&Item> for ItemForm {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            item_name: Some(item.item_name.clone()),
            price: Some(item.price),
            quantity: Some(item.quantity),
        }
    }
}
