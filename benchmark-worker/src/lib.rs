pub mod api;
pub mod benchmarks;
pub mod config;
pub mod error;
pub mod state;

pub use benchmarks::{Benchmark, BenchmarkSet};
pub use config::Config;
pub use error::Error;
pub use state::AppState;
