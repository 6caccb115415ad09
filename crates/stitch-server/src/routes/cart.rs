//! Cart route handlers.
//!
//! Every cart operation is scoped to the authenticated caller; there is no
//! way to address another user's cart.

use axum::extract::{Path, State};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use stitch_commerce::catalog::Size;
use stitch_commerce::ids::{CartItemId, ProductId};
use tracing::instrument;

use crate::auth::Caller;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(show).post(add))
        .route("/cart/item", put(update))
        .route("/cart/item/{item_id}", delete(remove))
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    pub size: Size,
}

/// Update cart item request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub item_id: CartItemId,
    pub quantity: i64,
}

/// Read the caller's cart with current prices.
#[instrument(skip(state, caller))]
async fn show(State(state): State<AppState>, caller: Caller) -> Result<Json<Value>, ApiError> {
    let cart = state.store().carts().read(&caller.0.caller)?;
    Ok(Json(json!({ "success": true, "cart": cart })))
}

/// Add an item to the caller's cart.
#[instrument(skip(state, caller))]
async fn add(
    State(state): State<AppState>,
    caller: Caller,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<Value>, ApiError> {
    let cart = state.store().carts().add_item(
        &caller.0.caller,
        &body.product_id,
        body.quantity,
        body.size,
    )?;
    Ok(Json(json!({ "success": true, "cart": cart })))
}

/// Set the quantity of a cart item.
#[instrument(skip(state, caller))]
async fn update(
    State(state): State<AppState>,
    caller: Caller,
    Json(body): Json<UpdateCartItemRequest>,
) -> Result<Json<Value>, ApiError> {
    let cart = state
        .store()
        .carts()
        .update_item(&caller.0.caller, &body.item_id, body.quantity)?;
    Ok(Json(json!({ "success": true, "cart": cart })))
}

/// Remove a cart item.
#[instrument(skip(state, caller))]
async fn remove(
    State(state): State<AppState>,
    caller: Caller,
    Path(item_id): Path<CartItemId>,
) -> Result<Json<Value>, ApiError> {
    let cart = state
        .store()
        .carts()
        .remove_item(&caller.0.caller, &item_id)?;
    Ok(Json(json!({ "success": true, "cart": cart })))
}
