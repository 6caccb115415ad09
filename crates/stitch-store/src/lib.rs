//! In-memory transactional store for the Stitch commerce engine.
//!
//! The [`Store`] holds every table behind a single lock and exposes a
//! clone-and-swap unit of work: a transaction either commits all of its
//! effects or none of them. On top of that engine sit four components:
//!
//! - [`ProductLedger`]: authoritative price and stock, with the atomic
//!   conditional debit that makes oversell impossible.
//! - [`CartStore`]: one mutable cart per user, priced at read time.
//! - [`OrderRepository`]: order records and the status machine.
//! - [`CheckoutCoordinator`]: turns a cart into an order in one
//!   all-or-nothing transaction.

mod carts;
mod checkout;
mod engine;
mod ledger;
mod orders;
mod state;

pub use carts::CartStore;
pub use checkout::CheckoutCoordinator;
pub use engine::Store;
pub use ledger::ProductLedger;
pub use orders::OrderRepository;
