//! Price feed client (DefiLlama current-price API)

use async_trait::async_trait;
use crossbuy_types::{PriceFeed, PriceFeedError, PriceFeedResult};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::client_cache::{EndpointConfig, HttpClientCache};

const TRACING_TARGET: &str = "crossbuy::price";

#[derive(Debug, Deserialize)]
struct Coin {
	price: f64,
}

#[derive(Debug, Deserialize)]
struct CoinsResponse {
	coins: HashMap<String, Coin>,
}

/// Spot prices via `/prices/current/coingecko:{id}`
#[derive(Debug, Clone)]
pub struct DefiLlamaFeed {
	config: EndpointConfig,
	cache: HttpClientCache,
}

impl DefiLlamaFeed {
	pub fn new(endpoint: impl Into<String>, timeout_ms: u64) -> Self {
		Self::with_cache(endpoint, timeout_ms, HttpClientCache::new())
	}

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
}

#[async_trait]
impl PriceFeed for DefiLlamaFeed {
	async fn price(&self, id: &str) -> PriceFeedResult<f64> {
		let key = format!("coingecko:{id}");
		let url = format!(
			"{}/prices/current/{key}",
			self.config.base_url.trim_end_matches('/')
		);

		let client = self.cache.get_client(&self.config)?;
		let response = client.get(&url).send().await?;

		let status = response.status();
		if !status.is_success() {
			return Err(PriceFeedError::Status {
				code: status.as_u16(),
				body: response.text().await.unwrap_or_default(),
			});
		}

		let body: CoinsResponse = response.json().await?;
		let price = body
			.coins
			.get(&key)
			.map(|coin| coin.price)
			.ok_or_else(|| PriceFeedError::MissingPrice { id: id.to_string() })?;

		debug!(target: TRACING_TARGET, id, price, "price feed lookup");
		Ok(price)
	}
}
