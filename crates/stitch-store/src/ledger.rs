//! Product ledger: authoritative price and stock per product.

use stitch_commerce::catalog::{Product, ProductDraft, ProductSnapshot};
use stitch_commerce::error::CommerceError;
use stitch_commerce::ids::ProductId;
use stitch_commerce::money::Money;

use crate::engine::Store;

/// Owns price and stock. Stock only ever changes through [`try_debit`]
/// and [`credit`]; everything else is catalog bookkeeping.
///
/// [`try_debit`]: ProductLedger::try_debit
/// [`credit`]: ProductLedger::credit
#[derive(Debug, Clone)]
pub struct ProductLedger {
    store: Store,
}

impl ProductLedger {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Atomically decrement stock by `quantity` if enough is available.
    ///
    /// Returns the unit price read in the same indivisible step, so
    /// checkout can snapshot prices without a second read.
    pub fn try_debit(
        &self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<Money, CommerceError> {
        self.store
            .transaction(|state| state.debit_stock(product_id, quantity))
    }

    /// Credit stock back (restock, or compensation when a debit must be
    /// undone outside a transaction).
    pub fn credit(&self, product_id: &ProductId, quantity: i64) -> Result<(), CommerceError> {
        self.store
            .transaction(|state| state.credit_stock(product_id, quantity))
    }

    /// Point-in-time view for display. Never a correctness input; only a
    /// `try_debit` outcome decides whether stock exists.
    pub fn peek(&self, product_id: &ProductId) -> Result<ProductSnapshot, CommerceError> {
        self.store
            .read(|state| state.product(product_id).map(ProductSnapshot::from))
    }

    /// Insert a new product.
    pub fn insert(&self, draft: ProductDraft) -> Result<Product, CommerceError> {
        let product = draft.into_product()?;
        self.store.transaction(|state| {
            state.products.insert(product.id.clone(), product.clone());
            Ok(product.clone())
        })
    }

    /// Replace an existing product's fields, keeping its id and creation
    /// time.
    pub fn update(
        &self,
        product_id: &ProductId,
        draft: ProductDraft,
    ) -> Result<Product, CommerceError> {
        draft.validate()?;
        self.store.transaction(|state| {
            let product = state
                .products
                .get_mut(product_id)
                .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
            product.title = draft.title;
            product.description = draft.description;
            product.price = draft.price;
            product.stock = draft.stock;
            product.sizes = draft.sizes;
            product.category = draft.category;
            product.featured = draft.featured;
            Ok(product.clone())
        })
    }

    /// Delete a product.
    pub fn remove(&self, product_id: &ProductId) -> Result<(), CommerceError> {
        self.store.transaction(|state| {
            state
                .products
                .remove(product_id)
                .map(|_| ())
                .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))
        })
    }

    /// Fetch a product by id.
    pub fn get(&self, product_id: &ProductId) -> Result<Product, CommerceError> {
        self.store
            .read(|state| state.product(product_id).cloned())
    }

    /// List all products, ordered by id.
    pub fn list(&self) -> Vec<Product> {
        self.store
            .read(|state| state.products.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitch_commerce::catalog::Size;
    use stitch_commerce::money::Currency;

    fn draft(stock: i64) -> ProductDraft {
        ProductDraft {
            title: "Cotton Tee".to_string(),
            description: "Everyday tee.".to_string(),
            price: Money::new(1500, Currency::USD),
            stock,
            sizes: vec![Size::S, Size::M],
            category: "shirts".to_string(),
            featured: false,
        }
    }

    #[test]
    fn test_try_debit_success_and_shortage() {
        let store = Store::new();
        let ledger = store.ledger();
        let product = ledger.insert(draft(2)).unwrap();

        let price = ledger.try_debit(&product.id, 2).unwrap();
        assert_eq!(price.amount_cents, 1500);

        let err = ledger.try_debit(&product.id, 1).unwrap_err();
        assert!(matches!(err, CommerceError::InsufficientStock { .. }));
        assert_eq!(ledger.peek(&product.id).unwrap().stock, 0);
    }

    #[test]
    fn test_credit_then_debit() {
        let store = Store::new();
        let ledger = store.ledger();
        let product = ledger.insert(draft(0)).unwrap();

        assert!(ledger.try_debit(&product.id, 1).is_err());
        ledger.credit(&product.id, 5).unwrap();
        assert!(ledger.try_debit(&product.id, 1).is_ok());
    }

    #[test]
    fn test_insert_validates_draft() {
        let store = Store::new();
        let mut bad = draft(1);
        bad.price = Money::new(-100, Currency::USD);
        assert!(store.ledger().insert(bad).is_err());
    }

    #[test]
    fn test_update_keeps_id() {
        let store = Store::new();
        let ledger = store.ledger();
        let product = ledger.insert(draft(2)).unwrap();

        let mut changed = draft(7);
        changed.title = "Cotton Tee v2".to_string();
        let updated = ledger.update(&product.id, changed).unwrap();
        assert_eq!(updated.id, product.id);
        assert_eq!(updated.stock, 7);
        assert_eq!(updated.title, "Cotton Tee v2");
    }

    #[test]
    fn test_remove_and_list() {
        let store = Store::new();
        let ledger = store.ledger();
        let product = ledger.insert(draft(1)).unwrap();
        assert_eq!(ledger.list().len(), 1);

        ledger.remove(&product.id).unwrap();
        assert!(ledger.list().is_empty());
        assert!(matches!(
            ledger.get(&product.id),
            Err(CommerceError::ProductNotFound(_))
        ));
    }
}
