//! Evaluation endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use bencher_common::{EvaluationRequest, EvaluationResult};

use crate::error::{Error, Result};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/evaluate", post(evaluate))
        .with_state(state)
}

/// POST /v1/evaluate - evaluate one of this worker's benchmarks at a point.
async fn evaluate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluationRequest>,
) -> Result<Json<EvaluationResult>> {
    let benchmark = state
        .benchmarks
        .get(&request.benchmark)
        .ok_or_else(|| Error::UnknownBenchmark(request.benchmark.clone()))?;

    tracing::debug!(
        benchmark = %request.benchmark,
        dimensions = request.point.len(),
        "Evaluating point"
    );

    // Evaluations may be CPU-heavy; keep them off the async workers.
    let point = request.point;
    let value = tokio::task::spawn_blocking(move || benchmark.evaluate(&point))
        .await
        .map_err(|e| Error::EvaluationFailed(e.to_string()))??;

    Ok(Json(EvaluationResult { value }))
}
