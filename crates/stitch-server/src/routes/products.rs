//! Product route handlers: public catalog reads and the admin CRUD
//! surface.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use stitch_commerce::catalog::ProductDraft;
use stitch_commerce::ids::ProductId;
use tracing::instrument;

use crate::auth::Caller;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list))
        .route("/products/{product_id}", get(show))
        .route("/admin/products", post(create))
        .route(
            "/admin/products/{product_id}",
            put(update).delete(remove),
        )
}

/// List the catalog. Public.
#[instrument(skip(state))]
async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let products = state.store().ledger().list();
    Ok(Json(json!({ "success": true, "products": products })))
}

/// Fetch one product. Public.
#[instrument(skip(state))]
async fn show(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Value>, ApiError> {
    let product = state.store().ledger().get(&product_id)?;
    Ok(Json(json!({ "success": true, "product": product })))
}

/// Create a product. Admin only.
#[instrument(skip(state, caller))]
async fn create(
    State(state): State<AppState>,
    caller: Caller,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    caller.0.require_admin()?;
    let product = state.store().ledger().insert(draft)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "product": product })),
    ))
}

/// Replace a product's fields. Admin only.
#[instrument(skip(state, caller))]
async fn update(
    State(state): State<AppState>,
    caller: Caller,
    Path(product_id): Path<ProductId>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Value>, ApiError> {
    caller.0.require_admin()?;
    let product = state.store().ledger().update(&product_id, draft)?;
    Ok(Json(json!({ "success": true, "product": product })))
}

/// Delete a product. Admin only.
#[instrument(skip(state, caller))]
async fn remove(
    State(state): State<AppState>,
    caller: Caller,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Value>, ApiError> {
    caller.0.require_admin()?;
    state.store().ledger().remove(&product_id)?;
    Ok(Json(json!({ "success": true })))
}
