//! Error types surfaced to gateway callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use bencher_common::ErrorBody;

/// Errors from routing and forwarding an evaluation request.
///
/// Every failure reaches the caller with its kind preserved; the gateway
/// never substitutes a default value. Registration-time errors are not here:
/// they abort startup before the server ever binds.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No backend registered for benchmark '{0}'")]
    UnknownBenchmark(String),

    #[error("Backend unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Backend timed out: {0}")]
    UpstreamTimeout(String),

    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::UnknownBenchmark(_) => (StatusCode::NOT_FOUND, "unknown_benchmark"),
            GatewayError::UpstreamUnavailable(_) => {
                (StatusCode::BAD_GATEWAY, "upstream_unavailable")
            }
            GatewayError::UpstreamTimeout(_) => {
                (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout")
            }
            GatewayError::EvaluationFailed(_) => (StatusCode::BAD_GATEWAY, "evaluation_failed"),
        };

        let body = Json(ErrorBody::new(error_type, self.to_string()));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
