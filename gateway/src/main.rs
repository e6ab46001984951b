//! Bencher Gateway - routes evaluation requests to benchmark worker processes.

use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bencher_gateway::{app, AppState, BenchmarkRegistry, Config};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle --version / -V
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("bencher-gateway {}", VERSION);
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Make sure config.toml exists or GATEWAY__SECTION__KEY environment variables are set.",
            e
        )
    })?;

    // The serving capacity is the configured worker thread count.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers)
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting bencher gateway ({} workers)", config.server.workers);

    // Registration phase: build the registry from the static backend list.
    // A duplicate benchmark name is fatal; the gateway refuses to serve an
    // inconsistent mapping.
    let mut registry = BenchmarkRegistry::new();
    for entry in &config.backends {
        let address = entry.address();
        registry.register(&entry.benchmarks, address.clone())?;
        tracing::info!(
            backend = %address,
            benchmarks = entry.benchmarks.len(),
            "Registered backend"
        );
    }
    let registry = Arc::new(registry);
    tracing::info!(
        "Registry frozen: {} benchmarks across {} backends",
        registry.len(),
        registry.addresses().len()
    );

    let state = Arc::new(AppState::new(config.clone(), registry));
    let app = app(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // In-flight requests have drained; dropping state closes the pooled
    // backend connections.
    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests");
}
