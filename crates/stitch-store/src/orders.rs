//! Order repository: immutable order records with a mutable status field.

use stitch_commerce::error::CommerceError;
use stitch_commerce::ids::{OrderId, UserId};
use stitch_commerce::order::{Order, OrderStatus};

use crate::engine::Store;

/// Read access to orders plus the status transition entry point.
///
/// Orders are only ever created by the checkout coordinator, inside the
/// same transaction that debits stock and clears the cart.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    store: Store,
}

impl OrderRepository {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Fetch an order by id.
    pub fn find_by_id(&self, order_id: &OrderId) -> Result<Order, CommerceError> {
        self.store.read(|state| {
            state
                .orders
                .get(order_id)
                .cloned()
                .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))
        })
    }

    /// All orders for one customer, newest first.
    pub fn find_by_owner(&self, owner: &UserId) -> Vec<Order> {
        self.store.read(|state| {
            let mut orders: Vec<Order> = state
                .orders
                .values()
                .filter(|o| &o.owner == owner)
                .cloned()
                .collect();
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            orders
        })
    }

    /// All orders in the store, newest first. Administrative listing.
    pub fn find_all(&self) -> Vec<Order> {
        self.store.read(|state| {
            let mut orders: Vec<Order> = state.orders.values().cloned().collect();
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            orders
        })
    }

    /// Move an order to the named status.
    ///
    /// Targets outside the status vocabulary and illegal transitions both
    /// fail with `InvalidTransition`.
    pub fn set_status(&self, order_id: &OrderId, target: &str) -> Result<Order, CommerceError> {
        let order = self.store.transaction(|state| {
            let order = state
                .orders
                .get_mut(order_id)
                .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))?;
            let target: OrderStatus =
                target
                    .parse()
                    .map_err(|()| CommerceError::InvalidTransition {
                        from: order.status.as_str().to_string(),
                        to: target.to_string(),
                    })?;
            order.transition_to(target)?;
            Ok(order.clone())
        })?;
        tracing::info!(order_id = %order.id, status = %order.status, "order status updated");
        Ok(order)
    }
}
