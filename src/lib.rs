//! Crossbuy
//!
//! Cross-chain checkout engine for a Cosmos NFT marketplace: price a
//! listing in any configured asset, solve the source amount against the
//! swap router, and drive the multi-hop purchase to completion.

// Core domain types - the most commonly used types
pub use crossbuy_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	// Primary domain entities
	Ask,
	Asset,
	ChainInfo,
	ChainMessage,
	ChainNode,
	Coin,
	Collection,
	IbcDenom,
	MarketApi,
	// Error types
	MarketError,
	MessagePlan,
	MessagesRequest,
	NodeConnector,
	NodeError,
	OfflineSigner,
	PriceFeed,
	PriceFeedError,
	Purchase,
	RouteRequest,
	RouterError,
	SigningNode,
	SolveStrategy,
	SolverError,
	SubmissionReceipt,
	SubmissionStatus,
	SubmitError,
	SwapRoute,
	SwapRouter,
	Token,
	TxReceipt,
	Wallet,
	WalletError,
	WalletKey,
};

// Service layer
pub use crossbuy_service::{
	AmountSolver, CheckoutError, CheckoutQuote, CheckoutService, SolverConfig, Submitter,
	SubmitterConfig,
};

// Adapters
pub use crossbuy_adapters::{
	DefiLlamaFeed, HttpClientCache, MarketClient, NodePool, SolveRouter,
};

// Config
pub use crossbuy_config::{load_config, ChainRegistry, LogFormat, Settings};

// Module aliases for direct access to the member crates
pub mod types {
	pub use crossbuy_types::*;
}

pub mod adapters {
	pub use crossbuy_adapters::*;
}

pub mod config {
	pub use crossbuy_config::*;
}

pub mod service {
	pub use crossbuy_service::*;
}

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum BuildError {
	#[error("a wallet implementation is required")]
	MissingWallet,

	#[error("a node connector implementation is required")]
	MissingConnector,

	#[error("home chain {chain_id} is not in the registry")]
	HomeChainNotFound { chain_id: String },

	#[error("settlement denom {denom} is not in the asset list")]
	SettlementAssetNotFound { denom: String },

	#[error(transparent)]
	Node(#[from] NodeError),
}

/// Builder wiring the external capabilities into a [`CheckoutService`].
///
/// The wallet and node connector have no built-in implementations; they
/// are injected by the host (browser extension bridge in production, test
/// doubles everywhere else).
pub struct CrossbuyBuilder {
	settings: Settings,
	registry: ChainRegistry,
	wallet: Option<Arc<dyn Wallet>>,
	connector: Option<Arc<dyn NodeConnector>>,
	market: Option<Arc<dyn MarketApi>>,
	router: Option<Arc<dyn SwapRouter>>,
	prices: Option<Arc<dyn PriceFeed>>,
}

impl CrossbuyBuilder {
	pub fn new() -> Self {
		Self {
			settings: Settings::default(),
			registry: ChainRegistry::default(),
			wallet: None,
			connector: None,
			market: None,
			router: None,
			prices: None,
		}
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = settings;
		self
	}

	pub fn with_registry(mut self, registry: ChainRegistry) -> Self {
		self.registry = registry;
		self
	}

	pub fn with_wallet(mut self, wallet: Arc<dyn Wallet>) -> Self {
		self.wallet = Some(wallet);
		self
	}

	pub fn with_connector(mut self, connector: Arc<dyn NodeConnector>) -> Self {
		self.connector = Some(connector);
		self
	}

	/// Replace the HTTP router client, e.g. with a test double
	pub fn with_router(mut self, router: Arc<dyn SwapRouter>) -> Self {
		self.router = Some(router);
		self
	}

	pub fn with_price_feed(mut self, prices: Arc<dyn PriceFeed>) -> Self {
		self.prices = Some(prices);
		self
	}

	pub fn with_market(mut self, market: Arc<dyn MarketApi>) -> Self {
		self.market = Some(market);
		self
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Assemble the checkout service, connecting the home-chain query node
	/// on the way (the marketplace ask reads need it).
	pub async fn build(self) -> Result<CheckoutService, BuildError> {
		let wallet = self.wallet.ok_or(BuildError::MissingWallet)?;
		let connector = self.connector.ok_or(BuildError::MissingConnector)?;

		let settings = self.settings;
		let registry = self.registry;

		let settlement = registry
			.asset(&settings.home.settlement_denom)
			.cloned()
			.ok_or_else(|| BuildError::SettlementAssetNotFound {
				denom: settings.home.settlement_denom.clone(),
			})?;

		let cache = HttpClientCache::new();
		let pool = NodePool::new(connector);

		let router: Arc<dyn SwapRouter> = match self.router {
			Some(router) => router,
			None => Arc::new(SolveRouter::with_cache(
				settings.router.endpoint.clone(),
				settings.router.timeout_ms,
				cache.clone(),
			)),
		};

		let prices: Arc<dyn PriceFeed> = match self.prices {
			Some(prices) => prices,
			None => Arc::new(DefiLlamaFeed::with_cache(
				settings.price_feed.endpoint.clone(),
				settings.price_feed.timeout_ms,
				cache.clone(),
			)),
		};

		let market: Arc<dyn MarketApi> = match self.market {
			Some(market) => market,
			None => {
				let home_chain = registry.chain(&settings.home.chain_id).ok_or_else(|| {
					BuildError::HomeChainNotFound {
						chain_id: settings.home.chain_id.clone(),
					}
				})?;
				let home_node = pool.query_node(home_chain).await?;
				Arc::new(MarketClient::with_cache(
					settings.graphql.endpoint.clone(),
					settings.graphql.timeout_ms,
					settings.home.marketplace_address.clone(),
					home_node,
					cache,
				))
			},
		};

		let solver = AmountSolver::new(
			router.clone(),
			prices,
			SolverConfig {
				strategy: settings.solver.strategy,
				settlement: settlement.clone(),
				max_iterations: settings.solver.max_iterations,
				precision: settings.solver.precision,
				low_bound: settings.solver.low_bound,
				high_bound: settings.solver.high_bound,
				seed_safety_margin: settings.solver.seed_safety_margin,
			},
		);

		let submitter = Submitter::new(
			router.clone(),
			wallet,
			pool,
			registry.clone(),
			SubmitterConfig {
				home_chain_id: settings.home.chain_id.clone(),
				settlement_denom: settings.home.settlement_denom.clone(),
				marketplace_address: settings.home.marketplace_address.clone(),
				slippage_tolerance_percent: settings.submission.slippage_tolerance_percent.clone(),
				poll_interval: Duration::from_millis(settings.submission.poll_interval_ms),
				confirmation_timeout: Duration::from_secs(
					settings.submission.confirmation_timeout_secs,
				),
				purchase_expiry_days: settings.submission.purchase_expiry_days,
			},
		);

		info!(
			home_chain = %settings.home.chain_id,
			settlement = %settings.home.settlement_denom,
			strategy = ?settings.solver.strategy,
			"checkout service assembled"
		);

		Ok(CheckoutService::new(
			market, router, solver, submitter, registry, settlement,
		))
	}
}

impl Default for CrossbuyBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Initialize tracing with configuration-based settings
pub fn init_tracing(settings: &Settings) {
	let log_level = &settings.logging.level;
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	match settings.logging.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter);
			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter);
			if settings.logging.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
	}
}
