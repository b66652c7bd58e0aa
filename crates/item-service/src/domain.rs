// File: src/domain.rs
// Purpose: The stored item entity and the validation groups used by the forms

use form_binding::Group;

/// Rules that only apply when creating an item
pub const SAVE_CHECK: Group = Group::new("SaveCheck");

/// Rules that only apply when updating an item
pub const UPDATE_CHECK: Group = Group::new("UpdateCheck");

pub const PRICE_MIN: i64 = 1_000;
pub const PRICE_MAX: i64 = 1_000_000;
pub const QUANTITY_MAX: i64 = 9_999;
pub const TOTAL_PRICE_MIN: i64 = 10_000;

/// A stored item. Carries no validation metadata; forms do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Assigned by the repository on first save
    pub id: Option<i64>,
    pub item_name: String,
    pub price: i32,
    pub quantity: i32,
}

impl Item {
    pub fn new(item_name: impl Into<String>, price: i32, quantity: i32) -> Self {
        Self {
            id: None,
            item_name: item_name.into(),
            price,
            quantity,
        }
    }

    pub fn total_price(&self) -> i64 {
        i64::from(self.price) * i64::from(self.quantity)
    }
}

/// Items inserted at startup when seeding is enabled
pub fn seed_items() -> Vec<Item> {
    vec![Item::new("itemA", 10_000, 10), Item::new("itemB", 20_000, 20)]
}
