//! Mock collaborators for integration tests
//!
//! Simple, working doubles for the wallet, the chain nodes and the router,
//! with call tracking and failure switches so tests can script each step
//! of the checkout pipeline.

#![allow(dead_code)]

pub mod nodes;
pub mod router;
pub mod wallet;

use std::sync::Arc;

use crossbuy::{ChainRegistry, CheckoutService, CrossbuyBuilder, MarketApi, Settings};

pub use nodes::{ChainState, MockConnector};
pub use router::MockRouter;
pub use wallet::MockWallet;

/// The user's address on a chain, mirroring what `MockWallet` hands out
pub fn address_for(chain_id: &str) -> String {
	format!("addr-{chain_id}")
}

/// Settings tuned for fast tests: millisecond polls, one-second timeouts
pub fn test_settings() -> Settings {
	let mut settings = Settings::default();
	settings.submission.poll_interval_ms = 5;
	settings.submission.confirmation_timeout_secs = 1;
	settings
}

/// Assemble a checkout service from the given doubles
pub async fn build_service(
	settings: Settings,
	wallet: Arc<MockWallet>,
	state: Arc<ChainState>,
	router: Arc<MockRouter>,
	market: Arc<dyn MarketApi>,
) -> CheckoutService {
	CrossbuyBuilder::new()
		.with_settings(settings)
		.with_registry(ChainRegistry::default())
		.with_wallet(wallet)
		.with_connector(Arc::new(MockConnector::new(state)))
		.with_router(router)
		.with_market(market)
		.build()
		.await
		.expect("service should assemble")
}

/// A marketplace with exactly one listed token
pub mod market {
	use super::*;
	use async_trait::async_trait;
	use crossbuy::types::{
		Ask, Collection, MarketApi, MarketError, MarketResult, Media, SaleType, Token,
	};

	#[derive(Debug)]
	pub struct SingleListingMarket {
		pub collection: String,
		pub token_id: u64,
		/// Base-unit price in the settlement denom
		pub price: u128,
	}

	impl SingleListingMarket {
		pub fn new(collection: &str, token_id: u64, price: u128) -> Self {
			Self {
				collection: collection.to_string(),
				token_id,
				price,
			}
		}

		fn media() -> Media {
			Media {
				media_type: "image".to_string(),
				url: "ipfs://test".to_string(),
				format: Some("jpg".to_string()),
			}
		}

		fn listing(&self) -> Token {
			Token {
				id: self.token_id.to_string(),
				name: format!("Test #{}", self.token_id),
				owner: "stars1owner".to_string(),
				price: self.price.to_string(),
				rarity_order: 1,
				media: Self::media(),
			}
		}

		fn not_found(&self, collection: &str, token_id: &str) -> MarketError {
			MarketError::NotFound {
				collection: collection.to_string(),
				token_id: token_id.to_string(),
			}
		}
	}

	#[async_trait]
	impl MarketApi for SingleListingMarket {
		async fn collection(&self, address: &str) -> MarketResult<Collection> {
			if address != self.collection {
				return Err(self.not_found(address, ""));
			}
			Ok(Collection {
				id: self.collection.clone(),
				name: "Test Collection".to_string(),
				description: "A collection for tests".to_string(),
				media: Self::media(),
				floor_price: self.price.to_string(),
				creator: None,
				token_counts: None,
			})
		}

		async fn tokens(&self, collection: &str) -> MarketResult<Vec<Token>> {
			if collection != self.collection {
				return Ok(Vec::new());
			}
			Ok(vec![self.listing()])
		}

		async fn token(&self, collection: &str, token_id: &str) -> MarketResult<Token> {
			if collection != self.collection || token_id != self.token_id.to_string() {
				return Err(self.not_found(collection, token_id));
			}
			Ok(self.listing())
		}

		async fn ask(&self, collection: &str, token_id: u64) -> MarketResult<Ask> {
			if collection != self.collection || token_id != self.token_id {
				return Err(self.not_found(collection, &token_id.to_string()));
			}
			Ok(Ask {
				sale_type: SaleType::FixedPrice,
				collection: self.collection.clone(),
				token_id: self.token_id,
				seller: "stars1owner".to_string(),
				price: self.price.to_string(),
				funds_recipient: None,
				reserve_for: None,
				finders_fee_bps: None,
				expires_at: "1900000000000000000".to_string(),
				is_active: true,
			})
		}

		async fn asks(
			&self,
			collection: &str,
			_start_after: u64,
			_limit: u32,
		) -> MarketResult<Vec<Ask>> {
			match self.ask(collection, self.token_id).await {
				Ok(ask) => Ok(vec![ask]),
				Err(_) => Ok(Vec::new()),
			}
		}

		async fn ask_count(&self, collection: &str) -> MarketResult<u64> {
			Ok(if collection == self.collection { 1 } else { 0 })
		}
	}
}
