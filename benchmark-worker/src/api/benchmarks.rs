//! Benchmark listing endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct BenchmarkEntry {
    name: String,
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

/// GET /v1/benchmarks - names this worker owns.
async fn list_benchmarks(State(state): State<Arc<AppState>>) -> Json<BenchmarksResponse> {
    let benchmarks = state
        .benchmarks
        .names()
        .into_iter()
        .map(|name| BenchmarkEntry { name })
        .collect();

    Json(BenchmarksResponse { benchmarks })
}
