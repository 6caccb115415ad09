//! Caller identity and authorization for Stitch.
//!
//! Token issuance and verification are an external collaborator's job;
//! this crate only models the identity that collaborator hands the core:
//! a caller id and a role from a closed vocabulary. Core operations take
//! an explicit [`AuthContext`] rather than reading ambient request state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use stitch_commerce::ids::UserId;
use thiserror::Error;

/// Authorization errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No caller identity was supplied.
    #[error("Missing caller credentials")]
    MissingCredentials,

    /// The supplied role is not in the role vocabulary.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// The caller's role does not permit the operation.
    #[error("Role {0} is not authorized for this operation")]
    Forbidden(Role),
}

/// Caller role. Closed vocabulary; anything else is rejected at the
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated caller of a core operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Caller's user id.
    pub caller: UserId,
    /// Caller's role.
    pub role: Role,
}

impl AuthContext {
    /// Create a context for a caller.
    pub fn new(caller: UserId, role: Role) -> Self {
        Self { caller, role }
    }

    /// Check if the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require the admin role, failing with `Forbidden` otherwise.
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden(self.role))
        }
    }
}
