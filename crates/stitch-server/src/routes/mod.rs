//! Route handlers.

use axum::Router;

use crate::state::AppState;

mod cart;
mod orders;
mod products;

/// All application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(cart::routes())
        .merge(orders::routes())
        .merge(products::routes())
}
