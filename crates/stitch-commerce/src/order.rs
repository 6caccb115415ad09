//! Order types and the fulfillment status machine.
//!
//! An order is an immutable record of a completed checkout. Its line items
//! carry a price snapshot taken at checkout time and are never recomputed
//! from the live catalog. Only `status` may change afterwards, and only
//! through the transitions the status machine admits.

use crate::address::ShippingAddress;
use crate::catalog::Size;
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order fulfillment status.
///
/// Legal transitions: `pending -> processing -> shipped -> delivered`, and
/// `cancelled` from any non-terminal state. `delivered` and `cancelled`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Check if the status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check whether a transition to `target` is legal.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        match (self, target) {
            (OrderStatus::Pending, OrderStatus::Processing)
            | (OrderStatus::Processing, OrderStatus::Shipped)
            | (OrderStatus::Shipped, OrderStatus::Delivered) => true,
            (from, OrderStatus::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// A line item in an order. Quantities, size and unit price are frozen
/// facts from checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    /// Product ID.
    pub product_id: ProductId,
    /// Product title at time of order.
    pub title: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Chosen size.
    pub size: Size,
    /// Unit price at time of order.
    pub unit_price: Money,
}

impl OrderLineItem {
    /// Total for this line, `unit_price * quantity`.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// An immutable record of a completed checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Customer who placed the order.
    pub owner: UserId,
    /// Frozen line items.
    pub line_items: Vec<OrderLineItem>,
    /// Shipping address provided at checkout.
    pub shipping_address: ShippingAddress,
    /// Sum of `unit_price * quantity`, computed once at creation.
    pub total: Money,
    /// Fulfillment status. The only mutable field.
    pub status: OrderStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total item count.
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }

    /// Move the order to `target`, enforcing the status machine.
    pub fn transition_to(&mut self, target: OrderStatus) -> Result<(), CommerceError> {
        if !self.status.can_transition_to(target) {
            return Err(CommerceError::InvalidTransition {
                from: self.status.as_str().to_string(),
                to: target.as_str().to_string(),
            });
        }
        self.status = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn order() -> Order {
        Order {
            id: OrderId::generate(),
            owner: UserId::new("user-1"),
            line_items: vec![OrderLineItem {
                product_id: ProductId::new("p1"),
                title: "Linen Shirt".to_string(),
                quantity: 2,
                size: Size::M,
                unit_price: Money::new(4500, Currency::USD),
            }],
            shipping_address: ShippingAddress::default(),
            total: Money::new(9000, Currency::USD),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut o = order();
        o.transition_to(OrderStatus::Processing).unwrap();
        o.transition_to(OrderStatus::Shipped).unwrap();
        o.transition_to(OrderStatus::Delivered).unwrap();
        assert!(o.status.is_terminal());
    }

    #[test]
    fn test_cancel_from_non_terminal_states() {
        for start in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
        ] {
            assert!(start.can_transition_to(OrderStatus::Cancelled));
        }
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_no_skipping_steps() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_no_exit_from_terminal() {
        let mut o = order();
        o.status = OrderStatus::Delivered;
        for target in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Cancelled,
        ] {
            assert!(o.transition_to(target).is_err());
        }

        let mut o = order();
        o.status = OrderStatus::Cancelled;
        assert!(o.transition_to(OrderStatus::Pending).is_err());
    }

    #[test]
    fn test_unknown_status_string_rejected() {
        assert!("banana".parse::<OrderStatus>().is_err());
        assert_eq!("shipped".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
    }

    #[test]
    fn test_line_total() {
        let o = order();
        assert_eq!(o.line_items[0].line_total().unwrap().amount_cents, 9000);
        assert_eq!(o.item_count(), 2);
    }
}
