//! External price feed seam

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// Result type for price feed lookups
pub type PriceFeedResult<T> = Result<T, PriceFeedError>;

#[derive(Error, Debug)]
pub enum PriceFeedError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("price feed returned status {code}: {body}")]
	Status { code: u16, body: String },

	#[error("no price available for {id}")]
	MissingPrice { id: String },
}

/// Current spot prices for assets, keyed by their feed identifier
#[async_trait]
pub trait PriceFeed: Send + Sync + Debug {
	async fn price(&self, id: &str) -> PriceFeedResult<f64>;
}
