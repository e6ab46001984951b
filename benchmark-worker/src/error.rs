//! Error types for the benchmark worker.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use bencher_common::ErrorBody;

/// Errors from benchmark evaluation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown benchmark: {0}")]
    UnknownBenchmark(String),

    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Error::UnknownBenchmark(_) => (StatusCode::NOT_FOUND, "unknown_benchmark"),
            Error::InvalidPoint(_) => (StatusCode::BAD_REQUEST, "invalid_point"),
            Error::EvaluationFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "evaluation_failed")
            }
        };

        let body = Json(ErrorBody::new(error_type, self.to_string()));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
