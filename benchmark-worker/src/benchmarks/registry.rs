//! Name-indexed set of benchmarks hosted by this worker.

use std::collections::HashMap;
use std::sync::Arc;

use super::synthetic::{Ackley, Levy, Rastrigin, Rosenbrock, Sphere};
use super::Benchmark;

/// The benchmarks this worker owns, keyed by name.
#[derive(Default)]
pub struct BenchmarkSet {
    benchmarks: HashMap<String, Arc<dyn Benchmark>>,
}

impl BenchmarkSet {
    /// Create a new empty set.
    pub fn new() -> Self {
        Self {
            benchmarks: HashMap::new(),
        }
    }

    /// The full set of synthetic benchmarks this worker ships with.
    pub fn synthetic() -> Self {
        let mut set = Self::new();
        set.register(Arc::new(Sphere));
        set.register(Arc::new(Rosenbrock));
        set.register(Arc::new(Rastrigin));
        set.register(Arc::new(Ackley));
        set.register(Arc::new(Levy));
        set
    }

    /// Register a benchmark under its name. A later registration with the
    /// same name replaces the earlier one.
    pub fn register(&mut self, benchmark: Arc<dyn Benchmark>) {
        self.benchmarks
            .insert(benchmark.name().to_string(), benchmark);
    }

    /// Get a benchmark by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Benchmark>> {
        self.benchmarks.get(name).cloned()
    }

    /// Names of all hosted benchmarks, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.benchmarks.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}
