//! End-to-end tests for the gateway routing path, with wiremock backends.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::Router;
use bytes::Bytes;
use http::{Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bencher_common::ErrorBody;
use bencher_gateway::{app, AppState, BackendAddress, BenchmarkRegistry, Config, ForwardConfig};

fn backend_address(server: &MockServer) -> BackendAddress {
    let uri = server.uri();
    let addr = uri.strip_prefix("http://").unwrap();
    let (host, port) = addr.split_once(':').unwrap();
    BackendAddress::new(host, port.parse::<u16>().unwrap())
}

fn test_app(entries: &[(&[&str], BackendAddress)], forward: ForwardConfig) -> Router {
    let mut registry = BenchmarkRegistry::new();
    for (names, address) in entries {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        registry.register(&names, address.clone()).unwrap();
    }

    let config = Config {
        server: Default::default(),
        forward,
        backends: vec![],
    };

    app(Arc::new(AppState::new(config, Arc::new(registry))))
}

async fn evaluate(app: &Router, body: &str) -> (StatusCode, Bytes) {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/evaluate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes)
}

fn error_type(body: &Bytes) -> String {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap();
    parsed.error.error_type
}

/// A port that nothing listens on: bind, read the port, drop the listener.
fn unreachable_address() -> BackendAddress {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    BackendAddress::new("127.0.0.1", port)
}

#[tokio::test]
async fn test_routes_to_owning_backend() {
    let backend_a = MockServer::start().await;
    let backend_b = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/evaluate"))
        .and(body_json(
            serde_json::json!({"benchmark": "alpha", "point": [0.1, 0.2]}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 3.5})))
        .expect(1)
        .mount(&backend_a)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/evaluate"))
        .and(body_json(
            serde_json::json!({"benchmark": "gamma", "point": [1.0]}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": -7.25})))
        .expect(1)
        .mount(&backend_b)
        .await;

    let app = test_app(
        &[
            (&["alpha", "beta"], backend_address(&backend_a)),
            (&["gamma"], backend_address(&backend_b)),
        ],
        ForwardConfig::default(),
    );

    let (status, body) = evaluate(&app, r#"{"benchmark": "alpha", "point": [0.1, 0.2]}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], br#"{"value":3.5}"#);

    let (status, body) = evaluate(&app, r#"{"benchmark": "gamma", "point": [1.0]}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], br#"{"value":-7.25}"#);
}

#[tokio::test]
async fn test_unknown_benchmark_contacts_no_backend() {
    let backend = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 0.0})))
        .expect(0)
        .mount(&backend)
        .await;

    let app = test_app(
        &[(&["alpha"], backend_address(&backend))],
        ForwardConfig::default(),
    );

    let (status, body) = evaluate(&app, r#"{"benchmark": "delta", "point": [0.0]}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_type(&body), "unknown_benchmark");
}

#[tokio::test]
async fn test_empty_benchmark_name_is_rejected() {
    let app = test_app(&[], ForwardConfig::default());

    let (status, body) = evaluate(&app, r#"{"benchmark": "", "point": [1.0]}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_type(&body), "invalid_request");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = test_app(&[], ForwardConfig::default());

    let (status, body) = evaluate(&app, "{").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_type(&body), "invalid_request");
}

#[tokio::test]
async fn test_unreachable_backend_does_not_affect_other_requests() {
    let live = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/evaluate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 1.0})))
        .expect(1)
        .mount(&live)
        .await;

    let app = test_app(
        &[
            (&["dead"], unreachable_address()),
            (&["alive"], backend_address(&live)),
        ],
        ForwardConfig {
            timeout_secs: 5,
            connect_timeout_secs: 1,
        },
    );

    let (dead_result, live_result) = tokio::join!(
        evaluate(&app, r#"{"benchmark": "dead", "point": [0.0]}"#),
        evaluate(&app, r#"{"benchmark": "alive", "point": [0.0]}"#),
    );

    assert_eq!(dead_result.0, StatusCode::BAD_GATEWAY);
    assert_eq!(error_type(&dead_result.1), "upstream_unavailable");
    assert_eq!(live_result.0, StatusCode::OK);
}

#[tokio::test]
async fn test_timeout_leaves_cached_client_usable() {
    let backend = MockServer::start().await;

    // First call runs into the deadline; the second is answered promptly.
    Mock::given(method("POST"))
        .and(path("/v1/evaluate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"value": 9.0}))
                .set_delay(Duration::from_secs(5)),
        )
        .up_to_n_times(1)
        .mount(&backend)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/evaluate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 9.0})))
        .mount(&backend)
        .await;

    let app = test_app(
        &[(&["slow"], backend_address(&backend))],
        ForwardConfig {
            timeout_secs: 1,
            connect_timeout_secs: 1,
        },
    );

    let (status, body) = evaluate(&app, r#"{"benchmark": "slow", "point": [0.5]}"#).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(error_type(&body), "upstream_timeout");

    let (status, body) = evaluate(&app, r#"{"benchmark": "slow", "point": [0.5]}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], br#"{"value":9.0}"#);
}

#[tokio::test]
async fn test_backend_error_is_translated_with_payload_preserved() {
    let backend = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/evaluate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            serde_json::json!({"error": {"type": "evaluation_failed", "message": "singular matrix"}}),
        ))
        .mount(&backend)
        .await;

    let app = test_app(
        &[(&["alpha"], backend_address(&backend))],
        ForwardConfig::default(),
    );

    let (status, body) = evaluate(&app, r#"{"benchmark": "alpha", "point": [1.0]}"#).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(error_type(&body), "evaluation_failed");

    let parsed: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert!(parsed.error.message.contains("singular matrix"));
}

#[tokio::test]
async fn test_success_payload_is_relayed_verbatim() {
    let backend = MockServer::start().await;

    // Extra fields and extreme values must survive the hop untouched.
    let payload = r#"{"value":1e308,"diagnostics":{"iterations":17}}"#;
    Mock::given(method("POST"))
        .and(path("/v1/evaluate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(payload.as_bytes().to_vec(), "application/json"),
        )
        .mount(&backend)
        .await;

    let app = test_app(
        &[(&["alpha"], backend_address(&backend))],
        ForwardConfig::default(),
    );

    let (status, body) = evaluate(&app, r#"{"benchmark": "alpha", "point": [1.0]}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], payload.as_bytes());
}

#[tokio::test]
async fn test_list_benchmarks() {
    let app = test_app(
        &[
            (&["alpha", "beta"], BackendAddress::new("backend-a", 9001)),
            (&["gamma"], BackendAddress::new("backend-b", 9002)),
        ],
        ForwardConfig::default(),
    );

    let request = Request::builder()
        .uri("/v1/benchmarks")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let benchmarks = parsed["benchmarks"].as_array().unwrap();
    assert_eq!(benchmarks.len(), 3);
    assert_eq!(benchmarks[0]["name"], "alpha");
    assert_eq!(benchmarks[0]["backend"], "backend-a:9001");
    assert_eq!(benchmarks[2]["name"], "gamma");
    assert_eq!(benchmarks[2]["backend"], "backend-b:9002");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(&[], ForwardConfig::default());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["status"], "ok");
}
