//! Swap router client
//!
//! Talks to the external routing service: `/route` quotes a swap,
//! `/msgs` decomposes a quoted route into signable chain messages.

use async_trait::async_trait;
use crossbuy_types::{
	MessagePlan, MessagesRequest, RouteRequest, RouterError, RouterResult, SwapRoute, SwapRouter,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::client_cache::{EndpointConfig, HttpClientCache};

const TRACING_TARGET: &str = "crossbuy::router";

/// HTTP implementation of the router seam
#[derive(Debug, Clone)]
pub struct SolveRouter {
	config: EndpointConfig,
	cache: HttpClientCache,
}

impl SolveRouter {
	pub fn new(endpoint: impl Into<String>, timeout_ms: u64) -> Self {
		Self::with_cache(endpoint, timeout_ms, HttpClientCache::new())
	}

	/// Share an existing client cache with the other adapters
	pub fn with_cache(
		endpoint: impl Into<String>,
		timeout_ms: u64,
		cache: HttpClientCache,
	) -> Self {
		Self {
			config: EndpointConfig::new(endpoint, timeout_ms),
			cache,
		}
	}

	fn client(&self) -> RouterResult<Arc<Client>> {
		self.cache.get_client(&self.config).map_err(RouterError::Http)
	}

	async fn post<B: Serialize, T: DeserializeOwned>(
		&self,
		path: &str,
		body: &B,
	) -> RouterResult<T> {
		let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
		let response = self.client()?.post(&url).json(body).send().await?;

		let status = response.status();
		let text = response.text().await?;
		if !status.is_success() {
			return Err(RouterError::Status {
				code: status.as_u16(),
				body: text,
			});
		}

		Ok(serde_json::from_str(&text)?)
	}
}

#[async_trait]
impl SwapRouter for SolveRouter {
	async fn route(&self, request: &RouteRequest) -> RouterResult<SwapRoute> {
		debug!(
			target: TRACING_TARGET,
			amount_in = %request.amount_in,
			source = %request.source_asset.denom,
			dest = %request.dest_asset.denom,
			"requesting swap route"
		);

		self.post("route", request).await
	}

	async fn messages(&self, request: &MessagesRequest) -> RouterResult<MessagePlan> {
		debug!(
			target: TRACING_TARGET,
			amount_in = %request.amount_in,
			chains = request.chain_ids_to_addresses.len(),
			"requesting message plan"
		);

		self.post("msgs", request).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_router_shares_one_cached_client() {
		let cache = HttpClientCache::new();
		let router = SolveRouter::with_cache("https://api.skip.money/v1", 30_000, cache.clone());

		let client1 = router.client().unwrap();
		let client2 = router.client().unwrap();
		assert!(Arc::ptr_eq(&client1, &client2));
	}
}
