//! HTTP client cache for optimized connection management
//!
//! Provides per-endpoint client instances with connection pooling and
//! keep-alive optimization, shared by the router, price feed and
//! marketplace clients.

use dashmap::DashMap;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Configuration for creating an optimized HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointConfig {
	/// Base URL of the external service
	pub base_url: String,
	/// Request timeout in milliseconds
	pub timeout_ms: u64,
}

impl EndpointConfig {
	pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
		Self {
			base_url: base_url.into(),
			timeout_ms,
		}
	}
}

/// Cached client with creation timestamp for TTL management
#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn new(client: Client) -> Self {
		Self {
			client: Arc::new(client),
			created_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe cache of HTTP clients keyed by endpoint configuration
#[derive(Clone, Debug)]
pub struct HttpClientCache {
	clients: Arc<DashMap<EndpointConfig, CachedClient>>,
	ttl: Duration,
}

impl HttpClientCache {
	/// Create a new client cache with the default 30-minute TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or create an optimized client for the given endpoint
	pub fn get_client(&self, config: &EndpointConfig) -> Result<Arc<Client>, reqwest::Error> {
		// Atomic check and removal of an expired client
		self.clients.remove_if(config, |_, cached| {
			let expired = cached.is_expired(self.ttl);
			if expired {
				warn!(
					"client cache expired for {} (age: {:?}), creating a new client",
					config.base_url,
					cached.created_at.elapsed()
				);
			}
			expired
		});

		if let Some(cached) = self.clients.get(config) {
			debug!(
				"reusing cached client for {} (age: {:?})",
				config.base_url,
				cached.created_at.elapsed()
			);
			return Ok(cached.client.clone());
		}

		debug!("creating new client for {}", config.base_url);
		let cached = CachedClient::new(Self::build_client(config)?);
		let client = cached.client.clone();

		// Entry API so concurrent callers settle on a single client
		use dashmap::mapref::entry::Entry;

		match self.clients.entry(config.clone()) {
			Entry::Occupied(entry) => Ok(entry.get().client.clone()),
			Entry::Vacant(entry) => {
				entry.insert(cached);
				Ok(client)
			},
		}
	}

	fn build_client(config: &EndpointConfig) -> Result<Client, reqwest::Error> {
		ClientBuilder::new()
			.timeout(Duration::from_millis(config.timeout_ms))
			.pool_max_idle_per_host(10)
			.pool_idle_timeout(Duration::from_secs(90))
			.tcp_keepalive(Duration::from_secs(60))
			.build()
	}

	/// Drop everything; used when a session ends
	pub fn clear(&self) {
		let count = self.clients.len();
		self.clients.clear();
		debug!("cleared all {} clients from cache", count);
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}
}

impl Default for HttpClientCache {
	fn default() -> Self {
		Self::new()
	}
}
