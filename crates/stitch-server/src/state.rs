//! Shared application state.

use stitch_store::Store;

/// State handed to every handler. Cheap to clone; the store is an `Arc`
/// internally.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    store: Store,
}

impl AppState {
    /// Wrap a store for use as axum state.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }
}
