//! Cart entities

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::Product;
use crate::types::{ProductId, Quantity};

/// One cart line with the product as it is in the catalog right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub product: Product,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.product.cost * Decimal::from(self.quantity)
    }
}

/// A user's cart. Keyed by product id, so a product appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: BTreeMap<ProductId, CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the line for `line.product_id`.
    pub fn put(&mut self, line: CartLine) -> Option<CartLine> {
        self.lines.insert(line.product_id.clone(), line)
    }

    pub fn get(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.get(product_id)
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromIterator<CartLine> for Cart {
    fn from_iter<I: IntoIterator<Item = CartLine>>(iter: I) -> Self {
        let mut cart = Cart::new();
        for line in iter {
            cart.put(line);
        }
        cart
    }
}

/// How a cart write treats an existing line for the same product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartIntent {
    /// Fail with a conflict if the line already exists.
    Add,
    /// Replace the quantity, creating the line if needed.
    Update,
}

/// Result of `set_quantity`.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange {
    Removed,
    Updated(Cart),
}

/// A cart row as listed for operators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub owner_email: String,
    pub product_id: ProductId,
    pub quantity: Quantity,
}
