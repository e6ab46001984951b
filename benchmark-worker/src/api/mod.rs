//! HTTP API exposed by the worker.

pub mod benchmarks;
pub mod evaluate;
pub mod health;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the worker's HTTP application.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(evaluate::router(state.clone()))
        .merge(benchmarks::router(state.clone()))
        .merge(health::router(state))
        .layer(CorsLayer::permissive())
}
