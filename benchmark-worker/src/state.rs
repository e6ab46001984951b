//! Shared application state.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::benchmarks::BenchmarkSet;
use crate::config::Config;

/// Shared application state passed to all handlers.
pub struct AppState {
    pub config: Config,
    pub benchmarks: Arc<BenchmarkSet>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config, benchmarks: Arc<BenchmarkSet>) -> Self {
        Self {
            config,
            benchmarks,
            started_at: Utc::now(),
        }
    }
}
