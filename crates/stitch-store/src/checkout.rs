//! Checkout coordinator: converts a cart into an order while consuming
//! stock, as one all-or-nothing operation.

use std::collections::HashMap;

use stitch_commerce::address::ShippingAddress;
use stitch_commerce::cart::CartItem;
use stitch_commerce::error::CommerceError;
use stitch_commerce::ids::{CartItemId, UserId};
use stitch_commerce::money::Money;
use stitch_commerce::order::{Order, OrderLineItem};

use crate::engine::Store;

/// Orchestrates the cart store, product ledger and order repository into
/// a single checkout operation.
#[derive(Debug, Clone)]
pub struct CheckoutCoordinator {
    store: Store,
}

impl CheckoutCoordinator {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Check out the caller's cart.
    ///
    /// Runs entirely inside one store transaction: the cart read, every
    /// stock debit, the order insert and the cart clear commit together
    /// or not at all. A failed debit aborts the transaction, and the
    /// debits already applied in the attempt are discarded with it.
    pub fn checkout(
        &self,
        owner: &UserId,
        shipping_address: ShippingAddress,
    ) -> Result<Order, CommerceError> {
        let result = self.store.transaction(|state| {
            // Step 1: the caller's cart, which must have items.
            let cart_items: Vec<CartItem> = match state.carts.get(owner) {
                Some(cart) if !cart.is_empty() => cart.items.clone(),
                _ => return Err(CommerceError::EmptyCart),
            };

            // Step 2: the address must be complete.
            shipping_address.validate()?;

            // Step 3: debit stock in ascending product-id order, taking
            // the price snapshot from the same atomic step as the debit.
            let mut debit_order: Vec<&CartItem> = cart_items.iter().collect();
            debit_order.sort_by(|a, b| {
                a.product_id
                    .cmp(&b.product_id)
                    .then_with(|| a.id.cmp(&b.id))
            });
            let mut snapshot_prices: HashMap<CartItemId, Money> = HashMap::new();
            for item in debit_order {
                let unit_price = state.debit_stock(&item.product_id, item.quantity)?;
                snapshot_prices.insert(item.id.clone(), unit_price);
            }

            // Step 4: freeze line items in cart order and total them from
            // the snapshot prices, not the live ledger.
            let mut line_items = Vec::with_capacity(cart_items.len());
            for item in &cart_items {
                let unit_price = snapshot_prices
                    .get(&item.id)
                    .copied()
                    .ok_or_else(|| CommerceError::Storage("missing price snapshot".to_string()))?;
                let title = state.product(&item.product_id)?.title.clone();
                line_items.push(OrderLineItem {
                    product_id: item.product_id.clone(),
                    title,
                    quantity: item.quantity,
                    size: item.size,
                    unit_price,
                });
            }
            let currency = line_items
                .first()
                .map(|l| l.unit_price.currency)
                .unwrap_or_default();
            let mut total = Money::zero(currency);
            for line in &line_items {
                total = total
                    .try_add(&line.line_total()?)
                    .ok_or(CommerceError::Overflow)?;
            }

            let order = state.create_order(
                owner.clone(),
                line_items,
                shipping_address.clone(),
                total,
            )?;

            // Step 5: empty the cart within the same transaction.
            state.cart_mut(owner).clear();

            Ok(order)
        });

        match &result {
            Ok(order) => {
                tracing::info!(
                    order_id = %order.id,
                    owner = %order.owner,
                    total = %order.total,
                    items = order.line_items.len(),
                    "checkout committed"
                );
            }
            Err(err) => {
                tracing::debug!(owner = %owner, error = %err, "checkout aborted");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitch_commerce::catalog::{ProductDraft, Size};
    use stitch_commerce::ids::ProductId;
    use stitch_commerce::money::Currency;
    use stitch_commerce::order::OrderStatus;

    fn seeded(store: &Store, title: &str, price: i64, stock: i64) -> ProductId {
        store
            .ledger()
            .insert(ProductDraft {
                title: title.to_string(),
                description: "test product".to_string(),
                price: Money::new(price, Currency::USD),
                stock,
                sizes: vec![Size::S, Size::M, Size::L],
                category: "test".to_string(),
                featured: false,
            })
            .unwrap()
            .id
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            name: "Ada".to_string(),
            street: "1 Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            postal_code: "E1".to_string(),
            phone: "555".to_string(),
        }
    }

    #[test]
    fn test_checkout_creates_pending_order_and_clears_cart() {
        let store = Store::new();
        let p = seeded(&store, "Shirt", 2000, 5);
        let owner = UserId::new("u1");
        store.carts().add_item(&owner, &p, 3, Size::M).unwrap();

        let order = store.checkout().checkout(&owner, address()).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total.amount_cents, 6000);
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.line_items[0].quantity, 3);
        assert_eq!(order.line_items[0].size, Size::M);

        assert!(store.carts().read(&owner).unwrap().items.is_empty());
        assert_eq!(store.ledger().peek(&p).unwrap().stock, 2);
    }

    #[test]
    fn test_checkout_empty_cart() {
        let store = Store::new();
        let owner = UserId::new("u1");
        let err = store.checkout().checkout(&owner, address()).unwrap_err();
        assert_eq!(err, CommerceError::EmptyCart);
    }

    #[test]
    fn test_checkout_validates_address() {
        let store = Store::new();
        let p = seeded(&store, "Shirt", 2000, 5);
        let owner = UserId::new("u1");
        store.carts().add_item(&owner, &p, 1, Size::M).unwrap();

        let mut addr = address();
        addr.street = String::new();
        let err = store.checkout().checkout(&owner, addr).unwrap_err();
        assert!(matches!(err, CommerceError::Validation(_)));

        // Nothing was debited or cleared.
        assert_eq!(store.ledger().peek(&p).unwrap().stock, 5);
        assert_eq!(store.carts().read(&owner).unwrap().item_count, 1);
    }

    #[test]
    fn test_checkout_partial_shortage_rolls_back_all_debits() {
        let store = Store::new();
        let p = seeded(&store, "Shirt", 2000, 5);
        let q = seeded(&store, "Scarf", 1000, 1);
        let owner = UserId::new("u1");
        store.carts().add_item(&owner, &p, 3, Size::M).unwrap();
        store.carts().add_item(&owner, &q, 2, Size::M).unwrap();

        let err = store.checkout().checkout(&owner, address()).unwrap_err();
        match err {
            CommerceError::InsufficientStock { product_id, .. } => {
                assert_eq!(product_id, q.to_string());
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // No partial debit survived and the cart is untouched.
        assert_eq!(store.ledger().peek(&p).unwrap().stock, 5);
        assert_eq!(store.ledger().peek(&q).unwrap().stock, 1);
        assert_eq!(store.carts().read(&owner).unwrap().items.len(), 2);
        assert!(store.orders().find_by_owner(&owner).is_empty());
    }

    #[test]
    fn test_checkout_price_snapshot_is_frozen() {
        let store = Store::new();
        let p = seeded(&store, "Shirt", 2000, 5);
        let owner = UserId::new("u1");
        store.carts().add_item(&owner, &p, 1, Size::M).unwrap();

        let order = store.checkout().checkout(&owner, address()).unwrap();
        assert_eq!(order.line_items[0].unit_price.amount_cents, 2000);

        // Reprice after the order exists; the order must not move.
        store
            .ledger()
            .update(
                &p,
                ProductDraft {
                    title: "Shirt".to_string(),
                    description: "test product".to_string(),
                    price: Money::new(9900, Currency::USD),
                    stock: 4,
                    sizes: vec![Size::S, Size::M, Size::L],
                    category: "test".to_string(),
                    featured: false,
                },
            )
            .unwrap();

        let stored = store.orders().find_by_id(&order.id).unwrap();
        assert_eq!(stored.line_items[0].unit_price.amount_cents, 2000);
        assert_eq!(stored.total.amount_cents, 2000);
    }

    #[test]
    fn test_checkout_totals_in_the_product_currency() {
        let store = Store::new();
        let p = store
            .ledger()
            .insert(ProductDraft {
                title: "Breton Top".to_string(),
                description: "Striped top.".to_string(),
                price: Money::new(3500, Currency::EUR),
                stock: 5,
                sizes: vec![Size::S, Size::M, Size::L],
                category: "shirts".to_string(),
                featured: false,
            })
            .unwrap()
            .id;
        let owner = UserId::new("u1");
        store.carts().add_item(&owner, &p, 2, Size::M).unwrap();

        let order = store.checkout().checkout(&owner, address()).unwrap();
        assert_eq!(order.total.currency, Currency::EUR);
        assert_eq!(order.total.amount_cents, 7000);
        assert_eq!(order.line_items[0].unit_price.currency, Currency::EUR);
    }

    #[test]
    fn test_checkout_twice_fails_second_time() {
        let store = Store::new();
        let p = seeded(&store, "Shirt", 2000, 5);
        let owner = UserId::new("u1");
        store.carts().add_item(&owner, &p, 1, Size::M).unwrap();

        store.checkout().checkout(&owner, address()).unwrap();
        let err = store.checkout().checkout(&owner, address()).unwrap_err();
        assert_eq!(err, CommerceError::EmptyCart);
        assert_eq!(store.orders().find_by_owner(&owner).len(), 1);
    }
}
