use crate::domain::money::Money;
use crate::domain::post::PostId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The pre-formatted order total handed to checkout.
///
/// Checkout treats this as opaque display data; only the cart ever
/// interprets amounts numerically.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct OrderTotal(String);

impl OrderTotal {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One configured product in the cart.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct CartItem {
    pub post: PostId,
    pub seller: String,
    pub price: Money,
    pub size: String,
    pub color: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// Session cart. Items are appended as configured, never merged.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Removes the item at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn order_total(&self) -> OrderTotal {
        OrderTotal::new(self.total().to_string())
    }
}
