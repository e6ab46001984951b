//! Static benchmark registry mapping names to backend addresses.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Network endpoint of a benchmark worker process.
///
/// Several benchmark names may map to the same address; the address is the
/// key for the backend client pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackendAddress {
    pub host: String,
    pub port: u16,
}

impl BackendAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Base URL for HTTP requests to this backend.
    pub fn http_base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for BackendAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Errors from registration and lookup.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Benchmark '{name}' is already registered to {existing}")]
    DuplicateBenchmark {
        name: String,
        existing: BackendAddress,
    },
    #[error("No backend registered for benchmark '{0}'")]
    UnknownBenchmark(String),
}

/// Lookup table from benchmark name to owning backend.
///
/// Populated during the startup registration phase via `&mut self`, then
/// frozen behind an `Arc` before the gateway accepts traffic. Lookups on the
/// serving path are plain map reads with no locking.
#[derive(Debug, Default)]
pub struct BenchmarkRegistry {
    entries: HashMap<String, BackendAddress>,
}

impl BenchmarkRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a set of benchmark names as owned by `address`.
    ///
    /// Re-registering a name to the address it already maps to is a no-op.
    /// A name already owned by a *different* address fails the whole call
    /// with [`RegistryError::DuplicateBenchmark`], and none of `names` are
    /// inserted.
    pub fn register(
        &mut self,
        names: &[String],
        address: BackendAddress,
    ) -> Result<(), RegistryError> {
        for name in names {
            if let Some(existing) = self.entries.get(name) {
                if *existing != address {
                    return Err(RegistryError::DuplicateBenchmark {
                        name: name.clone(),
                        existing: existing.clone(),
                    });
                }
            }
        }
        for name in names {
            self.entries.insert(name.clone(), address.clone());
        }
        Ok(())
    }

    /// Resolve a benchmark name to its backend address.
    pub fn resolve(&self, name: &str) -> Result<&BackendAddress, RegistryError> {
        self.entries
            .get(name)
            .ok_or_else(|| RegistryError::UnknownBenchmark(name.to_string()))
    }

    /// All registered benchmark names, sorted.
    pub fn benchmark_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Distinct backend addresses across the mapping.
    pub fn addresses(&self) -> Vec<BackendAddress> {
        let mut addresses: Vec<BackendAddress> = Vec::new();
        for address in self.entries.values() {
            if !addresses.contains(address) {
                addresses.push(address.clone());
            }
        }
        addresses
    }

    /// Iterate over (name, address) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BackendAddress)> {
        self.entries.iter()
    }

    /// Number of registered benchmark names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
