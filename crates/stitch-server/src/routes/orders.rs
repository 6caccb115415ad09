//! Order route handlers: checkout, order history and the admin surface.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use stitch_commerce::address::ShippingAddress;
use stitch_commerce::ids::OrderId;
use tracing::instrument;

use crate::auth::Caller;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(checkout))
        .route("/orders/my-orders", get(my_orders))
        .route("/orders/admin", get(all_orders))
        .route("/orders/admin/{order_id}", put(update_status))
}

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub shipping_address: ShippingAddress,
}

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Convert the caller's cart into an order.
#[instrument(skip(state, caller))]
async fn checkout(
    State(state): State<AppState>,
    caller: Caller,
    Json(body): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let order = state
        .store()
        .checkout()
        .checkout(&caller.0.caller, body.shipping_address)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "order": order })),
    ))
}

/// The caller's own orders, newest first.
#[instrument(skip(state, caller))]
async fn my_orders(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Value>, ApiError> {
    let orders = state.store().orders().find_by_owner(&caller.0.caller);
    Ok(Json(json!({ "success": true, "orders": orders })))
}

/// Every order in the store. Admin only.
#[instrument(skip(state, caller))]
async fn all_orders(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Value>, ApiError> {
    caller.0.require_admin()?;
    let orders = state.store().orders().find_all();
    Ok(Json(json!({ "success": true, "orders": orders })))
}

/// Move an order through its status machine. Admin only.
#[instrument(skip(state, caller))]
async fn update_status(
    State(state): State<AppState>,
    caller: Caller,
    Path(order_id): Path<OrderId>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, ApiError> {
    caller.0.require_admin()?;
    let order = state.store().orders().set_status(&order_id, &body.status)?;
    Ok(Json(json!({ "success": true, "order": order })))
}
