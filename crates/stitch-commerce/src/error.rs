//! Commerce error types.
//!
//! Every variant here is an expected, user-facing outcome; the HTTP layer
//! maps them onto status codes. Unexpected internal failures surface as
//! `Overflow` or `Storage` and are reported generically to the caller.

use thiserror::Error;

/// Errors that can occur in commerce operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Cart item not found in the caller's cart.
    #[error("Cart item not found: {0}")]
    CartItemNotFound(String),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Checkout attempted with no cart or an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Not enough stock to satisfy a debit.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// Quantity below the minimum of one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-item maximum.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Requested size is not offered for the product.
    #[error("Size {size} is not available for product {product_id}")]
    SizeUnavailable { product_id: String, size: String },

    /// Malformed or missing input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Illegal order status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Underlying store failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_names_product() {
        let err = CommerceError::InsufficientStock {
            product_id: "prod-1".to_string(),
            requested: 2,
            available: 1,
        };
        assert!(err.to_string().contains("prod-1"));
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = CommerceError::InvalidTransition {
            from: "delivered".to_string(),
            to: "pending".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid status transition from delivered to pending"
        );
    }
}
