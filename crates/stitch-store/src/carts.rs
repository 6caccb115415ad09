//! Cart store: one mutable cart per user.

use stitch_commerce::cart::{Cart, CartItemView, CartView};
use stitch_commerce::catalog::Size;
use stitch_commerce::error::CommerceError;
use stitch_commerce::ids::{CartItemId, ProductId, UserId};
use stitch_commerce::money::{Currency, Money};

use crate::engine::Store;
use crate::state::StoreState;

/// Per-user cart operations. Mutations run in a store transaction, so
/// overlapping requests from the same user cannot lose updates.
#[derive(Debug, Clone)]
pub struct CartStore {
    store: Store,
}

impl CartStore {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Add an item to the caller's cart, creating the cart if absent.
    ///
    /// The size must be offered by the product at add time. Stock is not
    /// reserved here; shortages surface at checkout.
    pub fn add_item(
        &self,
        owner: &UserId,
        product_id: &ProductId,
        quantity: i64,
        size: Size,
    ) -> Result<CartView, CommerceError> {
        self.store.transaction(|state| {
            let product = state.product(product_id)?;
            if !product.has_size(size) {
                return Err(CommerceError::SizeUnavailable {
                    product_id: product_id.to_string(),
                    size: size.as_str().to_string(),
                });
            }
            state
                .cart_mut(owner)
                .add_item(product_id.clone(), quantity, size)?;
            view(state, owner)
        })
    }

    /// Set the quantity of an item in the caller's cart.
    pub fn update_item(
        &self,
        owner: &UserId,
        item_id: &CartItemId,
        quantity: i64,
    ) -> Result<CartView, CommerceError> {
        self.store.transaction(|state| {
            let cart = state
                .carts
                .get_mut(owner)
                .ok_or_else(|| CommerceError::CartItemNotFound(item_id.to_string()))?;
            cart.update_item(item_id, quantity)?;
            view(state, owner)
        })
    }

    /// Remove an item from the caller's cart. The emptied cart remains.
    pub fn remove_item(
        &self,
        owner: &UserId,
        item_id: &CartItemId,
    ) -> Result<CartView, CommerceError> {
        self.store.transaction(|state| {
            let cart = state
                .carts
                .get_mut(owner)
                .ok_or_else(|| CommerceError::CartItemNotFound(item_id.to_string()))?;
            if !cart.remove_item(item_id) {
                return Err(CommerceError::CartItemNotFound(item_id.to_string()));
            }
            view(state, owner)
        })
    }

    /// Read the caller's cart with current prices resolved.
    ///
    /// Display only; checkout re-validates independently.
    pub fn read(&self, owner: &UserId) -> Result<CartView, CommerceError> {
        self.store.read(|state| view(state, owner))
    }
}

/// Build the display view of a cart against the current catalog.
///
/// Items whose product has since been removed are omitted from display;
/// checkout still fails on them.
fn view(state: &StoreState, owner: &UserId) -> Result<CartView, CommerceError> {
    let Some(cart) = state.carts.get(owner) else {
        return Ok(CartView::empty(Currency::default()));
    };
    view_of(state, cart)
}

pub(crate) fn view_of(state: &StoreState, cart: &Cart) -> Result<CartView, CommerceError> {
    let mut items = Vec::with_capacity(cart.items.len());
    for item in &cart.items {
        let Ok(product) = state.product(&item.product_id) else {
            continue;
        };
        let line_total = product
            .price
            .try_multiply(item.quantity)
            .ok_or(CommerceError::Overflow)?;
        items.push(CartItemView {
            id: item.id.clone(),
            product_id: item.product_id.clone(),
            title: product.title.clone(),
            size: item.size,
            quantity: item.quantity,
            unit_price: product.price,
            line_total,
        });
    }
    // The view's currency follows its items; only an empty cart reports
    // the store default.
    let currency = items
        .first()
        .map(|i| i.unit_price.currency)
        .unwrap_or_default();
    let total = Money::try_sum(items.iter().map(|i| &i.line_total), currency)
        .ok_or(CommerceError::Overflow)?;
    let item_count = items.iter().map(|i| i.quantity).sum();
    Ok(CartView {
        items,
        total,
        item_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitch_commerce::catalog::ProductDraft;

    fn seeded_store() -> (Store, ProductId) {
        let store = Store::new();
        let product = store
            .ledger()
            .insert(ProductDraft {
                title: "Rain Shell".to_string(),
                description: "Packable shell.".to_string(),
                price: Money::new(12000, Currency::USD),
                stock: 10,
                sizes: vec![Size::S, Size::M],
                category: "jackets".to_string(),
                featured: false,
            })
            .unwrap();
        (store, product.id)
    }

    #[test]
    fn test_add_item_creates_cart_and_prices_view() {
        let (store, product_id) = seeded_store();
        let owner = UserId::new("u1");

        let cart = store
            .carts()
            .add_item(&owner, &product_id, 2, Size::M)
            .unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].unit_price.amount_cents, 12000);
        assert_eq!(cart.total.amount_cents, 24000);
    }

    #[test]
    fn test_add_item_rejects_unoffered_size() {
        let (store, product_id) = seeded_store();
        let owner = UserId::new("u1");

        let err = store
            .carts()
            .add_item(&owner, &product_id, 1, Size::XXL)
            .unwrap_err();
        assert!(matches!(err, CommerceError::SizeUnavailable { .. }));
        assert!(store.carts().read(&owner).unwrap().items.is_empty());
    }

    #[test]
    fn test_add_item_rejects_unknown_product() {
        let (store, _) = seeded_store();
        let owner = UserId::new("u1");
        let missing = ProductId::new("missing");

        let err = store
            .carts()
            .add_item(&owner, &missing, 1, Size::M)
            .unwrap_err();
        assert!(matches!(err, CommerceError::ProductNotFound(_)));
    }

    #[test]
    fn test_update_item_scoped_to_owner() {
        let (store, product_id) = seeded_store();
        let owner = UserId::new("u1");
        let other = UserId::new("u2");

        let cart = store
            .carts()
            .add_item(&owner, &product_id, 1, Size::M)
            .unwrap();
        let item_id = cart.items[0].id.clone();

        // Another user cannot touch this item.
        let err = store.carts().update_item(&other, &item_id, 3).unwrap_err();
        assert!(matches!(err, CommerceError::CartItemNotFound(_)));

        let cart = store.carts().update_item(&owner, &item_id, 3).unwrap();
        assert_eq!(cart.item_count, 3);
    }

    #[test]
    fn test_remove_item_leaves_empty_cart() {
        let (store, product_id) = seeded_store();
        let owner = UserId::new("u1");

        let cart = store
            .carts()
            .add_item(&owner, &product_id, 1, Size::M)
            .unwrap();
        let item_id = cart.items[0].id.clone();

        let cart = store.carts().remove_item(&owner, &item_id).unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.total.amount_cents, 0);

        let err = store.carts().remove_item(&owner, &item_id).unwrap_err();
        assert!(matches!(err, CommerceError::CartItemNotFound(_)));
    }

    #[test]
    fn test_read_reflects_current_price() {
        let (store, product_id) = seeded_store();
        let owner = UserId::new("u1");
        store
            .carts()
            .add_item(&owner, &product_id, 1, Size::M)
            .unwrap();

        // Reprice the product; the cart view must follow.
        let changed = ProductDraft {
            title: "Rain Shell".to_string(),
            description: "Packable shell.".to_string(),
            price: Money::new(9900, Currency::USD),
            stock: 10,
            sizes: vec![Size::S, Size::M],
            category: "jackets".to_string(),
            featured: false,
        };
        store.ledger().update(&product_id, changed).unwrap();

        let cart = store.carts().read(&owner).unwrap();
        assert_eq!(cart.items[0].unit_price.amount_cents, 9900);
        assert_eq!(cart.total.amount_cents, 9900);
    }

    #[test]
    fn test_view_follows_product_currency() {
        let store = Store::new();
        let product = store
            .ledger()
            .insert(ProductDraft {
                title: "Breton Top".to_string(),
                description: "Striped top.".to_string(),
                price: Money::new(3500, Currency::EUR),
                stock: 5,
                sizes: vec![Size::M],
                category: "shirts".to_string(),
                featured: false,
            })
            .unwrap();
        let owner = UserId::new("u1");

        let cart = store
            .carts()
            .add_item(&owner, &product.id, 2, Size::M)
            .unwrap();
        assert_eq!(cart.total.currency, Currency::EUR);
        assert_eq!(cart.total.amount_cents, 7000);
        assert_eq!(cart.items[0].line_total.currency, Currency::EUR);
    }

    #[test]
    fn test_read_absent_cart_is_empty() {
        let (store, _) = seeded_store();
        let cart = store.carts().read(&UserId::new("nobody")).unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.item_count, 0);
    }
}
