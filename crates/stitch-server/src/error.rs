//! HTTP error mapping.
//!
//! Handlers return `Result<T, ApiError>`; this module maps the domain and
//! auth error taxonomies onto status codes and the response envelope
//! `{ "success": false, "code", "message", ... }`. Internal failures are
//! reported generically without leaking detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use stitch_auth::AuthError;
use stitch_commerce::error::CommerceError;
use thiserror::Error;

/// Application-level error type for the HTTP surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Commerce(err) => match err {
                CommerceError::ProductNotFound(_)
                | CommerceError::CartItemNotFound(_)
                | CommerceError::OrderNotFound(_) => StatusCode::NOT_FOUND,
                CommerceError::EmptyCart
                | CommerceError::InsufficientStock { .. }
                | CommerceError::InvalidQuantity(_)
                | CommerceError::QuantityExceedsLimit(_, _)
                | CommerceError::SizeUnavailable { .. }
                | CommerceError::Validation(_)
                | CommerceError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
                CommerceError::Overflow | CommerceError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Auth(err) => match err {
                AuthError::MissingCredentials | AuthError::UnknownRole(_) => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Commerce(err) => match err {
                CommerceError::ProductNotFound(_) => "product_not_found",
                CommerceError::CartItemNotFound(_) => "cart_item_not_found",
                CommerceError::OrderNotFound(_) => "order_not_found",
                CommerceError::EmptyCart => "empty_cart",
                CommerceError::InsufficientStock { .. } => "insufficient_stock",
                CommerceError::InvalidQuantity(_) => "invalid_quantity",
                CommerceError::QuantityExceedsLimit(_, _) => "quantity_exceeds_limit",
                CommerceError::SizeUnavailable { .. } => "size_unavailable",
                CommerceError::Validation(_) => "validation_error",
                CommerceError::InvalidTransition { .. } => "invalid_transition",
                CommerceError::Overflow | CommerceError::Storage(_) => "internal_error",
            },
            Self::Auth(err) => match err {
                AuthError::MissingCredentials => "missing_credentials",
                AuthError::UnknownRole(_) => "unknown_role",
                AuthError::Forbidden(_) => "forbidden",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        // Internal detail stays out of the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let mut body = json!({
            "success": false,
            "code": self.code(),
            "message": message,
        });
        if let Self::Commerce(CommerceError::InsufficientStock { product_id, .. }) = &self {
            body["product_id"] = json!(product_id);
        }

        (status, Json(body)).into_response()
    }
}
