//! Cart and cart item types.
//!
//! A cart holds references to products plus quantity and size; prices are
//! resolved from the live catalog at read time, never stored. Compare
//! [`crate::order::OrderLineItem`], which freezes the price.

use crate::catalog::Size;
use crate::error::CommerceError;
use crate::ids::{CartItemId, ProductId, UserId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A line item in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Unique item identifier, scoped to the owning cart.
    pub id: CartItemId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity, at least one.
    pub quantity: i64,
    /// Chosen size.
    pub size: Size,
}

impl CartItem {
    fn new(product_id: ProductId, quantity: i64, size: Size) -> Self {
        Self {
            id: CartItemId::generate(),
            product_id,
            quantity,
            size,
        }
    }
}

/// A shopping cart. At most one per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Owning user.
    pub owner: UserId,
    /// Items in insertion order.
    pub items: Vec<CartItem>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart for a user.
    pub fn new(owner: UserId) -> Self {
        let now = Utc::now();
        Self {
            owner,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add an item to the cart.
    ///
    /// An existing item with the same `(product, size)` pair has its
    /// quantity increased; otherwise a new item is appended.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        size: Size,
    ) -> Result<CartItemId, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id && i.size == size)
        {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            self.updated_at = Utc::now();
            return Ok(existing.id.clone());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = CartItem::new(product_id, quantity, size);
        let id = item.id.clone();
        self.items.push(item);
        self.updated_at = Utc::now();
        Ok(id)
    }

    /// Set the quantity of an existing item.
    ///
    /// Quantities below one are rejected; use [`Cart::remove_item`] to
    /// delete an item.
    pub fn update_item(
        &mut self,
        item_id: &CartItemId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| &i.id == item_id)
            .ok_or_else(|| CommerceError::CartItemNotFound(item_id.to_string()))?;
        item.quantity = quantity;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Remove an item. Returns whether anything was removed.
    ///
    /// An emptied cart remains as an empty cart; it is not deleted.
    pub fn remove_item(&mut self, item_id: &CartItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = Utc::now();
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get an item by id.
    pub fn get_item(&self, item_id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == item_id)
    }
}

/// A cart item with current product data resolved for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItemView {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub title: String,
    pub size: Size,
    pub quantity: i64,
    /// Current unit price. Display only; checkout re-resolves prices.
    pub unit_price: Money,
    pub line_total: Money,
}

/// A cart with prices and titles resolved at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: Money,
    pub item_count: i64,
}

impl CartView {
    /// An empty cart view.
    pub fn empty(currency: crate::money::Currency) -> Self {
        Self {
            items: Vec::new(),
            total: Money::zero(currency),
            item_count: 0,
        }
    }
}
