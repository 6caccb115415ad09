//! In-memory tables and their primitive operations.
//!
//! `StoreState` is the single unit of cloneable state the engine commits
//! or discards as a whole. The methods here are the primitives the public
//! components compose; they run inside a lock held by the engine and must
//! not block.

use std::collections::{BTreeMap, HashMap};

use stitch_commerce::address::ShippingAddress;
use stitch_commerce::cart::Cart;
use stitch_commerce::catalog::Product;
use stitch_commerce::error::CommerceError;
use stitch_commerce::ids::{OrderId, ProductId, UserId};
use stitch_commerce::money::Money;
use stitch_commerce::order::{Order, OrderLineItem, OrderStatus};

/// All store tables. Cloned by the engine for each transaction.
#[derive(Debug, Clone, Default)]
pub(crate) struct StoreState {
    pub(crate) products: BTreeMap<ProductId, Product>,
    pub(crate) carts: HashMap<UserId, Cart>,
    pub(crate) orders: BTreeMap<OrderId, Order>,
}

impl StoreState {
    /// Look up a product or fail with `ProductNotFound`.
    pub(crate) fn product(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.products
            .get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Conditionally decrement a product's stock.
    ///
    /// Check and decrement happen in one step under the engine's write
    /// lock, so two contenders for the last unit cannot both succeed.
    /// Returns the unit price read in the same step.
    pub(crate) fn debit_stock(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<Money, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let product = self
            .products
            .get_mut(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        if product.stock < quantity {
            return Err(CommerceError::InsufficientStock {
                product_id: id.to_string(),
                requested: quantity,
                available: product.stock,
            });
        }
        product.stock -= quantity;
        Ok(product.price)
    }

    /// Increment a product's stock (compensating credit or restock).
    pub(crate) fn credit_stock(
        &mut self,
        id: &ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let product = self
            .products
            .get_mut(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        product.stock = product
            .stock
            .checked_add(quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(())
    }

    /// Get the caller's cart, creating an empty one if absent.
    pub(crate) fn cart_mut(&mut self, owner: &UserId) -> &mut Cart {
        self.carts
            .entry(owner.clone())
            .or_insert_with(|| Cart::new(owner.clone()))
    }

    /// Persist a new order with initial status `pending`.
    pub(crate) fn create_order(
        &mut self,
        owner: UserId,
        line_items: Vec<OrderLineItem>,
        shipping_address: ShippingAddress,
        total: Money,
    ) -> Result<Order, CommerceError> {
        if line_items.is_empty() {
            return Err(CommerceError::Validation(
                "order must contain at least one line item".to_string(),
            ));
        }
        shipping_address.validate()?;

        let order = Order {
            id: OrderId::generate(),
            owner,
            line_items,
            shipping_address,
            total,
            status: OrderStatus::Pending,
            created_at: chrono::Utc::now(),
        };
        self.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }
}
