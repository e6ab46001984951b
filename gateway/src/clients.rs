//! Backend client pool: one lazily-created HTTP client per backend address.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use tokio::sync::RwLock;

use crate::config::ForwardConfig;
use crate::registry::BackendAddress;

/// Reusable HTTP client handle bound to one backend worker.
///
/// A single client serves concurrent requests; connection multiplexing is
/// the transport's job, not the gateway's.
#[derive(Debug)]
pub struct BackendClient {
    address: BackendAddress,
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    fn new(address: &BackendAddress, forward: &ForwardConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(forward.timeout_secs))
            .connect_timeout(Duration::from_secs(forward.connect_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: address.http_base_url(),
            address: address.clone(),
            http,
        }
    }

    pub fn address(&self) -> &BackendAddress {
        &self.address
    }

    /// Forward an evaluation request body to this backend.
    ///
    /// The body is relayed as-is; the numeric payload is never re-encoded on
    /// either side of the hop.
    pub async fn evaluate_raw(&self, body: Bytes) -> Result<reqwest::Response, reqwest::Error> {
        self.http
            .post(format!("{}/v1/evaluate", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
    }
}

/// Cache of backend clients, keyed by address.
///
/// Clients are created on first use and shared for the lifetime of the
/// process; teardown happens when the pool drops at shutdown. There is no
/// background health-checking: a client found broken on use is discarded and
/// recreated on the next call for its address.
#[derive(Debug)]
pub struct ClientPool {
    clients: RwLock<HashMap<BackendAddress, Arc<BackendClient>>>,
    forward: ForwardConfig,
}

impl ClientPool {
    pub fn new(forward: ForwardConfig) -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            forward,
        }
    }

    /// Get the cached client for `address`, creating it on first use.
    ///
    /// Concurrent calls for the same address yield the same client: the
    /// write lock is held across the re-check-and-insert step, so only one
    /// caller constructs. The lock is never held while a client is in use.
    pub async fn get_or_create(&self, address: &BackendAddress) -> Arc<BackendClient> {
        if let Some(client) = self.clients.read().await.get(address) {
            return client.clone();
        }

        let mut clients = self.clients.write().await;
        if let Some(client) = clients.get(address) {
            return client.clone();
        }

        let client = Arc::new(BackendClient::new(address, &self.forward));
        clients.insert(address.clone(), client.clone());
        tracing::debug!(backend = %address, "Created backend client");
        client
    }

    /// Drop the cached client for `address`; the next `get_or_create` for it
    /// builds a fresh one.
    pub async fn discard(&self, address: &BackendAddress) {
        if self.clients.write().await.remove(address).is_some() {
            tracing::warn!(backend = %address, "Discarded backend client");
        }
    }

    /// Number of live clients in the pool.
    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_or_create_caches_per_address() {
        let pool = ClientPool::new(ForwardConfig::default());
        let addr_a = BackendAddress::new("127.0.0.1", 50053);
        let addr_b = BackendAddress::new("127.0.0.1", 50054);

        let first = pool.get_or_create(&addr_a).await;
        let second = pool.get_or_create(&addr_a).await;
        let other = pool.get_or_create(&addr_b).await;

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(pool.len().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_get_or_create_single_creation() {
        let pool = Arc::new(ClientPool::new(ForwardConfig::default()));
        let address = BackendAddress::new("127.0.0.1", 50053);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let pool = pool.clone();
            let address = address.clone();
            handles.push(tokio::spawn(
                async move { pool.get_or_create(&address).await },
            ));
        }

        let mut clients = Vec::new();
        for handle in handles {
            clients.push(handle.await.unwrap());
        }

        assert_eq!(pool.len().await, 1);
        for client in &clients[1..] {
            assert!(Arc::ptr_eq(&clients[0], client));
        }
    }

    #[tokio::test]
    async fn test_discard_recreates_lazily() {
        let pool = ClientPool::new(ForwardConfig::default());
        let address = BackendAddress::new("127.0.0.1", 50053);

        let first = pool.get_or_create(&address).await;
        pool.discard(&address).await;
        assert!(pool.is_empty().await);

        let second = pool.get_or_create(&address).await;
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(pool.len().await, 1);
    }

    #[tokio::test]
    async fn test_discard_unknown_address_is_noop() {
        let pool = ClientPool::new(ForwardConfig::default());
        pool.discard(&BackendAddress::new("127.0.0.1", 50053)).await;
        assert!(pool.is_empty().await);
    }
}
