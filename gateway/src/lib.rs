pub mod clients;
pub mod config;
pub mod error;
pub mod registry;
pub mod router;
pub mod routes;

pub use clients::{BackendClient, ClientPool};
pub use config::{BackendEntry, Config, ForwardConfig, ServerConfig};
pub use error::GatewayError;
pub use registry::{BackendAddress, BenchmarkRegistry, RegistryError};
pub use router::EvaluationRouter;

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Frozen name-to-backend mapping; read-only once serving begins.
    pub registry: Arc<BenchmarkRegistry>,
    /// Router owning the backend client pool.
    pub router: EvaluationRouter,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config, registry: Arc<BenchmarkRegistry>) -> Self {
        let router = EvaluationRouter::new(registry.clone(), config.forward.clone());
        Self {
            config,
            registry,
            router,
            started_at: Utc::now(),
        }
    }
}

/// Build the gateway's HTTP application.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::evaluate::router(state.clone()))
        .merge(routes::benchmarks::router(state.clone()))
        .merge(routes::health::router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
