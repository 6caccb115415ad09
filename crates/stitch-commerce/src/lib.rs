//! E-commerce domain types and rules for Stitch.
//!
//! This crate holds the pure domain layer of the store:
//!
//! - **Catalog**: products, sizes, display snapshots
//! - **Cart**: per-user mutable cart with line items
//! - **Order**: immutable checkout records with a price snapshot per line
//! - **Status machine**: legal fulfillment transitions
//!
//! Persistence and the checkout algorithm live in `stitch-store`; this
//! crate knows nothing about storage or HTTP.
//!
//! # Example
//!
//! ```rust
//! use stitch_commerce::prelude::*;
//!
//! let draft = ProductDraft {
//!     title: "Linen Shirt".to_string(),
//!     description: "A lightweight linen shirt.".to_string(),
//!     price: Money::new(4500, Currency::USD),
//!     stock: 10,
//!     sizes: vec![Size::S, Size::M, Size::L],
//!     category: "shirts".to_string(),
//!     featured: false,
//! };
//! let product = draft.into_product().unwrap();
//!
//! let mut cart = Cart::new(UserId::new("user-1"));
//! cart.add_item(product.id.clone(), 2, Size::M).unwrap();
//! assert_eq!(cart.item_count(), 2);
//! ```

pub mod address;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod money;
pub mod order;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::address::ShippingAddress;
    pub use crate::cart::{Cart, CartItem, CartItemView, CartView, MAX_QUANTITY_PER_ITEM};
    pub use crate::catalog::{Product, ProductDraft, ProductSnapshot, Size};
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::order::{Order, OrderLineItem, OrderStatus};
}
