//! Evaluation router: resolves a benchmark name and forwards the call.

use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use bencher_common::EvaluationRequest;

use crate::clients::ClientPool;
use crate::config::ForwardConfig;
use crate::error::{GatewayError, Result};
use crate::registry::BenchmarkRegistry;

/// Routes evaluation requests to the backend owning the named benchmark.
///
/// The sole serving entry point: validate, resolve, forward once, translate
/// failures. Retry policy belongs to the caller, not the gateway.
pub struct EvaluationRouter {
    registry: Arc<BenchmarkRegistry>,
    pool: ClientPool,
}

impl EvaluationRouter {
    pub fn new(registry: Arc<BenchmarkRegistry>, forward: ForwardConfig) -> Self {
        Self {
            registry,
            pool: ClientPool::new(forward),
        }
    }

    /// Route one evaluation request and relay the backend's response bytes.
    ///
    /// `body` is the caller's request body; only the benchmark name is read
    /// from it, and the bytes are forwarded unmodified. The returned bytes
    /// are the backend's success payload, also unmodified.
    pub async fn evaluate(&self, body: Bytes) -> Result<Bytes> {
        let request: EvaluationRequest = serde_json::from_slice(&body)
            .map_err(|e| GatewayError::InvalidRequest(format!("malformed body: {}", e)))?;

        if request.benchmark.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "benchmark name must not be empty".to_string(),
            ));
        }

        let address = self
            .registry
            .resolve(&request.benchmark)
            .map_err(|_| GatewayError::UnknownBenchmark(request.benchmark.clone()))?
            .clone();

        let client = self.pool.get_or_create(&address).await;

        let request_id = Uuid::new_v4();
        tracing::debug!(
            benchmark = %request.benchmark,
            backend = %address,
            request_id = %request_id,
            dimensions = request.point.len(),
            "Forwarding evaluation"
        );

        let response = match client.evaluate_raw(body).await {
            Ok(response) => response,
            Err(e) if e.is_connect() => {
                self.pool.discard(&address).await;
                return Err(GatewayError::UpstreamUnavailable(format!(
                    "could not connect to {}: {}",
                    address, e
                )));
            }
            Err(e) if e.is_timeout() => {
                // Deadline errors keep the pooled client; only connect
                // failures evict it.
                tracing::warn!(
                    benchmark = %request.benchmark,
                    backend = %address,
                    request_id = %request_id,
                    "Backend deadline exceeded"
                );
                return Err(GatewayError::UpstreamTimeout(format!(
                    "{} did not answer within the deadline",
                    address
                )));
            }
            Err(e) => {
                return Err(GatewayError::UpstreamUnavailable(format!(
                    "request to {} failed: {}",
                    address, e
                )));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::EvaluationFailed(format!(
                "{} answered HTTP {}: {}",
                address, status, detail
            )));
        }

        let payload = response.bytes().await.map_err(|e| {
            GatewayError::UpstreamUnavailable(format!(
                "reading response from {} failed: {}",
                address, e
            ))
        })?;

        tracing::debug!(
            benchmark = %request.benchmark,
            backend = %address,
            request_id = %request_id,
            "Evaluation relayed"
        );

        Ok(payload)
    }
}
