//! Marketplace read models: collections, listed tokens, and asks
//!
//! Collections and tokens come from the marketplace GraphQL API; asks are
//! read straight from the marketplace contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

use crate::node::NodeError;

/// Result type for marketplace reads
pub type MarketResult<T> = Result<T, MarketError>;

/// Errors surfaced by marketplace reads
#[derive(Error, Debug)]
pub enum MarketError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("marketplace API returned status {code}: {body}")]
	Status { code: u16, body: String },

	#[error("GraphQL query failed: {reason}")]
	Graph { reason: String },

	#[error("response could not be decoded: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("no listing found for token {token_id} in {collection}")]
	NotFound { collection: String, token_id: String },

	#[error(transparent)]
	Node(#[from] NodeError),
}

/// Media attached to a collection or token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Media {
	#[serde(rename = "type")]
	pub media_type: String,
	pub url: String,
	#[serde(default)]
	pub format: Option<String>,
}

/// Account shape used by the GraphQL API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccount {
	pub id: String,
	pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTokenCounts {
	pub listed: u64,
	pub total: u64,
}

/// Collection metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
	pub id: String,
	pub name: String,
	pub description: String,
	pub media: Media,
	/// Base-unit floor price in the settlement denom
	pub floor_price: String,
	#[serde(default)]
	pub creator: Option<WalletAccount>,
	#[serde(default)]
	pub token_counts: Option<CollectionTokenCounts>,
}

/// A listed token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
	pub id: String,
	pub name: String,
	pub owner: String,
	/// Base-unit asking price in the settlement denom
	pub price: String,
	pub rarity_order: u64,
	pub media: Media,
}

/// An active listing as stored by the marketplace contract
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ask {
	pub sale_type: SaleType,
	pub collection: String,
	pub token_id: u64,
	pub seller: String,
	/// Base-unit price in the settlement denom
	pub price: String,
	#[serde(default)]
	pub funds_recipient: Option<String>,
	#[serde(default)]
	pub reserve_for: Option<String>,
	#[serde(default)]
	pub finders_fee_bps: Option<u64>,
	pub expires_at: String,
	pub is_active: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaleType {
	Auction,
	FixedPrice,
}

/// Seam to marketplace data: GraphQL reads plus contract ask lookups
#[async_trait]
pub trait MarketApi: Send + Sync + Debug {
	async fn collection(&self, address: &str) -> MarketResult<Collection>;

	/// Listed tokens for a collection, price-ascending
	async fn tokens(&self, collection: &str) -> MarketResult<Vec<Token>>;

	async fn token(&self, collection: &str, token_id: &str) -> MarketResult<Token>;

	/// A single ask from the marketplace contract
	async fn ask(&self, collection: &str, token_id: u64) -> MarketResult<Ask>;

	/// Paged asks from the marketplace contract
	async fn asks(&self, collection: &str, start_after: u64, limit: u32)
		-> MarketResult<Vec<Ask>>;

	async fn ask_count(&self, collection: &str) -> MarketResult<u64>;
}
