//! Evaluation wire types.
//!
//! The gateway and every worker speak the same single-procedure contract:
//! `POST /v1/evaluate` with an [`EvaluationRequest`] body, answered by an
//! [`EvaluationResult`] on success or an [`ErrorBody`] on failure. The
//! gateway forwards the request body it received and relays the worker's
//! response bytes, so both sides of the hop share these definitions.

use serde::{Deserialize, Serialize};

/// A request to evaluate a named benchmark at one point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Benchmark name, case-sensitive. Routing key; never interpreted beyond
    /// lookup.
    pub benchmark: String,
    /// Coordinates of the point to evaluate, in order.
    #[serde(default)]
    pub point: Vec<f64>,
}

/// The numeric result of a benchmark evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub value: f64,
}

/// Structured error response body: `{"error": {"type": ..., "message": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(error_type: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                error_type: error_type.to_string(),
                message: message.into(),
            },
        }
    }
}
