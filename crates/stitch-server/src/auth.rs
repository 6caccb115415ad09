//! Caller extraction.
//!
//! Upstream token verification is out of scope; the server trusts the
//! `x-caller-id` and `x-caller-role` headers that boundary would set and
//! turns them into an explicit [`AuthContext`] handed to every core
//! operation. Nothing downstream reads ambient request state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stitch_auth::{AuthContext, AuthError, Role};
use stitch_commerce::ids::UserId;

use crate::error::ApiError;

pub const CALLER_ID_HEADER: &str = "x-caller-id";
pub const CALLER_ROLE_HEADER: &str = "x-caller-role";

/// Extractor wrapping the caller's [`AuthContext`].
#[derive(Debug, Clone)]
pub struct Caller(pub AuthContext);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller_id = header_value(parts, CALLER_ID_HEADER)?;
        let role_raw = header_value(parts, CALLER_ROLE_HEADER)?;
        let role: Role = role_raw.parse()?;
        Ok(Caller(AuthContext::new(UserId::new(caller_id), role)))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, AuthError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingCredentials)
}
