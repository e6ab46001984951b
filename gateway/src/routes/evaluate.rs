//! Evaluation endpoint: the gateway's sole serving entry point.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use bytes::Bytes;

use crate::error::Result;
use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/evaluate", post(evaluate))
        .with_state(state)
}

/// POST /v1/evaluate - forward an evaluation to the owning backend.
///
/// The raw body goes to the router so the payload crosses the gateway
/// untouched in both directions.
async fn evaluate(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response> {
    let payload = state.router.evaluate(body).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        payload,
    )
        .into_response())
}
