//! Marketplace data client
//!
//! Collections and listed tokens come from the marketplace GraphQL API;
//! asks are smart-queried from the marketplace contract on the home chain.

use async_trait::async_trait;
use crossbuy_types::{
	Ask, ChainNode, Collection, MarketApi, MarketError, MarketResult, Token,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::client_cache::{EndpointConfig, HttpClientCache};

const TRACING_TARGET: &str = "crossbuy::market";

const COLLECTION_QUERY: &str = r#"
query Collection($address: String!) {
	collection(address: $address) {
		id
		name
		description
		media {
			type
			url
		}
		floorPrice
		creator {
			id
			address
		}
		tokenCounts {
			listed
			total
		}
	}
}
"#;

const TOKENS_QUERY: &str = r#"
query TokensQuery($collectionAddr: String) {
	tokens(collectionAddr: $collectionAddr, filterForSale: LISTED, sortBy: PRICE_ASC) {
		tokens {
			id
			name
			owner
			price
			rarityOrder
			media {
				type
				url
				format
			}
		}
	}
}
"#;

const TOKEN_QUERY: &str = r#"
query Token($collectionAddress: String!, $id: String!) {
	token(collectionAddr: $collectionAddress, tokenId: $id) {
		id
		name
		owner
		price
		rarityOrder
		media {
			type
			url
			format
		}
	}
}
"#;

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
	data: Option<T>,
	#[serde(default)]
	errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CollectionData {
	collection: Option<Collection>,
}

#[derive(Debug, Deserialize)]
struct TokensData {
	tokens: TokensResult,
}

#[derive(Debug, Deserialize)]
struct TokensResult {
	tokens: Vec<Token>,
}

#[derive(Debug, Deserialize)]
struct TokenData {
	token: Option<Token>,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
	ask: Option<Ask>,
}

#[derive(Debug, Deserialize)]
struct AsksResponse {
	asks: Vec<Ask>,
}

#[derive(Debug, Deserialize)]
struct AskCountResponse {
	count: u64,
}

/// GraphQL + contract-backed implementation of the marketplace seam
#[derive(Debug, Clone)]
pub struct MarketClient {
	config: EndpointConfig,
	cache: HttpClientCache,
	marketplace_address: String,
	home_node: Arc<dyn ChainNode>,
}

impl MarketClient {
	pub fn new(
		endpoint: impl Into<String>,
		timeout_ms: u64,
		marketplace_address: impl Into<String>,
		home_node: Arc<dyn ChainNode>,
	) -> Self {
		Self::with_cache(
			endpoint,
			timeout_ms,
			marketplace_address,
			home_node,
			HttpClientCache::new(),
		)
	}

	pub fn with_cache(
		endpoint: impl Into<String>,
		timeout_ms: u64,
		marketplace_address: impl Into<String>,
		home_node: Arc<dyn ChainNode>,
		cache: HttpClientCache,
	) -> Self {
		Self {
			config: EndpointConfig::new(endpoint, timeout_ms),
			cache,
			marketplace_address: marketplace_address.into(),
			home_node,
		}
	}

	async fn query<T: DeserializeOwned>(
		&self,
		query: &str,
		variables: serde_json::Value,
	) -> MarketResult<T> {
		let client = self.cache.get_client(&self.config)?;
		let response = client
			.post(&self.config.base_url)
			.json(&serde_json::json!({ "query": query, "variables": variables }))
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(MarketError::Status {
				code: status.as_u16(),
				body: response.text().await.unwrap_or_default(),
			});
		}

		let body: QueryResponse<T> = response.json().await?;
		if let Some(error) = body.errors.first() {
			return Err(MarketError::Graph {
				reason: error.to_string(),
			});
		}

		body.data.ok_or_else(|| MarketError::Graph {
			reason: "response carried no data".to_string(),
		})
	}

	async fn query_marketplace<T: DeserializeOwned>(
		&self,
		query: serde_json::Value,
	) -> MarketResult<T> {
		let response = self
			.home_node
			.query_contract(&self.marketplace_address, &query)
			.await?;
		Ok(serde_json::from_value(response)?)
	}
}

#[async_trait]
impl MarketApi for MarketClient {
	async fn collection(&self, address: &str) -> MarketResult<Collection> {
		debug!(target: TRACING_TARGET, address, "fetching collection");
		let data: CollectionData = self
			.query(COLLECTION_QUERY, serde_json::json!({ "address": address }))
			.await?;

		data.collection.ok_or_else(|| MarketError::NotFound {
			collection: address.to_string(),
			token_id: String::new(),
		})
	}

	async fn tokens(&self, collection: &str) -> MarketResult<Vec<Token>> {
		debug!(target: TRACING_TARGET, collection, "fetching listed tokens");
		let data: TokensData = self
			.query(
				TOKENS_QUERY,
				serde_json::json!({ "collectionAddr": collection }),
			)
			.await?;

		Ok(data.tokens.tokens)
	}

	async fn token(&self, collection: &str, token_id: &str) -> MarketResult<Token> {
		debug!(target: TRACING_TARGET, collection, token_id, "fetching token");
		let data: TokenData = self
			.query(
				TOKEN_QUERY,
				serde_json::json!({ "collectionAddress": collection, "id": token_id }),
			)
			.await?;

		data.token.ok_or_else(|| MarketError::NotFound {
			collection: collection.to_string(),
			token_id: token_id.to_string(),
		})
	}

	async fn ask(&self, collection: &str, token_id: u64) -> MarketResult<Ask> {
		let response: AskResponse = self
			.query_marketplace(serde_json::json!({
				"ask": { "collection": collection, "token_id": token_id }
			}))
			.await?;

		response.ask.ok_or_else(|| MarketError::NotFound {
			collection: collection.to_string(),
			token_id: token_id.to_string(),
		})
	}

	async fn asks(
		&self,
		collection: &str,
		start_after: u64,
		limit: u32,
	) -> MarketResult<Vec<Ask>> {
		let response: AsksResponse = self
			.query_marketplace(serde_json::json!({
				"asks": { "collection": collection, "start_after": start_after, "limit": limit }
			}))
			.await?;

		Ok(response.asks)
	}

	async fn ask_count(&self, collection: &str) -> MarketResult<u64> {
		let response: AskCountResponse = self
			.query_marketplace(serde_json::json!({
				"ask_count": { "collection": collection }
			}))
			.await?;

		Ok(response.count)
	}
}
