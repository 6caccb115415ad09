//! HTTP surface for the Stitch checkout engine.
//!
//! The router is built as a function of [`AppState`] so tests can drive
//! it in-process with `tower::ServiceExt::oneshot`; the binary in
//! `main.rs` wires the same router to a TCP listener.

use axum::routing::get;
use axum::Router;

pub mod auth;
pub mod config;
pub mod error;
pub mod seed;

mod routes;
mod state;

pub use state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .with_state(state)
}

/// Liveness check. The store is in-process, so running means ready.
async fn health() -> &'static str {
    "ok"
}
