//! Shipping address type.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// A structured shipping address. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone: String,
}

impl ShippingAddress {
    /// Names of the required fields that are empty or whitespace.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let fields: [(&'static str, &str); 6] = [
            ("name", &self.name),
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("postal_code", &self.postal_code),
            ("phone", &self.phone),
        ];
        for (label, value) in fields {
            if value.trim().is_empty() {
                missing.push(label);
            }
        }
        missing
    }

    /// Check if all required fields are present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Validate, naming every missing field in the error.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::Validation(format!(
                "shipping address is missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}
