//! Registry introspection endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
struct BenchmarkEntry {
    name: String,
    backend: String,
}

#[derive(Debug, Serialize)]
struct BenchmarksResponse {
    benchmarks: Vec<BenchmarkEntry>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/benchmarks", get(list_benchmarks))
        .with_state(state)
}

/// GET /v1/benchmarks - registered benchmark names and owning backends.
async fn list_benchmarks(State(state): State<Arc<AppState>>) -> Json<BenchmarksResponse> {
    let mut benchmarks: Vec<BenchmarkEntry> = state
        .registry
        .iter()
        .map(|(name, address)| BenchmarkEntry {
            name: name.clone(),
            backend: address.to_string(),
        })
        .collect();

    benchmarks.sort_by(|a, b| a.name.cmp(&b.name));

    Json(BenchmarksResponse { benchmarks })
}
