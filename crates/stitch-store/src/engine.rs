//! The store engine and its unit of work.
//!
//! All tables live behind one `RwLock`. A transaction clones the state,
//! applies the caller's closure to the clone, and installs the clone only
//! when the closure succeeds. Failure anywhere leaves the previous state
//! in place, so a multi-entity operation like checkout commits all of its
//! effects or none of them.

use std::sync::{Arc, PoisonError, RwLock};

use stitch_commerce::error::CommerceError;

use crate::carts::CartStore;
use crate::checkout::CheckoutCoordinator;
use crate::ledger::ProductLedger;
use crate::orders::OrderRepository;
use crate::state::StoreState;

/// Shared handle to the store. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreState>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure against a clone of the state and commit the clone on
    /// success. The write lock is held for the whole closure, so
    /// transactions are serialized and readers never observe a partial
    /// mutation.
    pub(crate) fn transaction<T>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<T, CommerceError>,
    ) -> Result<T, CommerceError> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut draft = guard.clone();
        let value = f(&mut draft)?;
        *guard = draft;
        Ok(value)
    }

    /// Run a read-only closure under the read lock.
    pub(crate) fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// The product ledger component.
    pub fn ledger(&self) -> ProductLedger {
        ProductLedger::new(self.clone())
    }

    /// The cart store component.
    pub fn carts(&self) -> CartStore {
        CartStore::new(self.clone())
    }

    /// The order repository component.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.clone())
    }

    /// The checkout coordinator component.
    pub fn checkout(&self) -> CheckoutCoordinator {
        CheckoutCoordinator::new(self.clone())
    }
}
