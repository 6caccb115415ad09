//! Product catalog types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Garment sizes offered by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

impl Size {
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::XS => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
            Size::XXL => "XXL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Size {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XS" => Ok(Size::XS),
            "S" => Ok(Size::S),
            "M" => Ok(Size::M),
            "L" => Ok(Size::L),
            "XL" => Ok(Size::XL),
            "XXL" => Ok(Size::XXL),
            _ => Err(()),
        }
    }
}

/// A product in the catalog.
///
/// `stock` is the authoritative count of purchasable units. It is never
/// written directly; all mutation goes through the product ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Product description.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Units in stock. Never negative.
    pub stock: i64,
    /// Sizes this product is offered in.
    pub sizes: Vec<Size>,
    /// Category label.
    pub category: String,
    /// Whether the product is featured on the storefront.
    pub featured: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Check whether the product is offered in the given size.
    pub fn has_size(&self, size: Size) -> bool {
        self.sizes.contains(&size)
    }

    /// Check whether the product has any purchasable stock.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Input for creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: Money,
    pub stock: i64,
    pub sizes: Vec<Size>,
    pub category: String,
    #[serde(default)]
    pub featured: bool,
}

impl ProductDraft {
    /// Validate draft fields.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.title.trim().is_empty() {
            return Err(CommerceError::Validation(
                "product title is required".to_string(),
            ));
        }
        if self.price.is_negative() {
            return Err(CommerceError::Validation(
                "product price must not be negative".to_string(),
            ));
        }
        if self.stock < 0 {
            return Err(CommerceError::Validation(
                "product stock must not be negative".to_string(),
            ));
        }
        if self.sizes.is_empty() {
            return Err(CommerceError::Validation(
                "product must offer at least one size".to_string(),
            ));
        }
        Ok(())
    }

    /// Materialize the draft into a product with a fresh id.
    pub fn into_product(self) -> Result<Product, CommerceError> {
        self.validate()?;
        Ok(Product {
            id: ProductId::generate(),
            title: self.title,
            description: self.description,
            price: self.price,
            stock: self.stock,
            sizes: self.sizes,
            category: self.category,
            featured: self.featured,
            created_at: Utc::now(),
        })
    }
}

/// A point-in-time view of a product for display purposes.
///
/// Callers must not make correctness decisions from a snapshot; only a
/// ledger debit outcome is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    pub stock: i64,
    pub sizes: Vec<Size>,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            stock: product.stock,
            sizes: product.sizes.clone(),
        }
    }
}
