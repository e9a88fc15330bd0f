//! Checkout flow
//!
//! The token-page journey as one service: look up the listing, solve the
//! source amount, fetch the executable route, and hand it to the
//! submitter. Identity-asset purchases skip routing entirely.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crossbuy_config::ChainRegistry;
use crossbuy_types::{
	from_base_units, parse_base_units, to_base_units, Asset, IbcDenom, MarketApi, MarketError,
	Purchase, RouteRequest, RouterError, SolverError, SubmissionReceipt, SubmitError, SwapRoute,
	SwapRouter,
};

use crate::solver::AmountSolver;
use crate::submitter::Submitter;

const TRACING_TARGET: &str = "crossbuy::checkout";

#[derive(Error, Debug)]
pub enum CheckoutError {
	#[error("asset {denom} is not in the configured asset list")]
	UnknownAsset { denom: String },

	#[error("listing price {price} is not a valid amount")]
	InvalidPrice { price: String },

	#[error(transparent)]
	Market(#[from] MarketError),

	#[error(transparent)]
	Solver(#[from] SolverError),

	#[error("route request failed: {0}")]
	Router(#[from] RouterError),

	#[error(transparent)]
	Submit(#[from] SubmitError),
}

/// What a buyer is shown before confirming: the listing price and the
/// source amount the solver settled on.
#[derive(Debug, Clone)]
pub struct CheckoutQuote {
	/// Listing price in base units of the settlement denom
	pub price: u128,
	/// Source amount to spend, in display units
	pub source_amount: f64,
	/// The route backing the amount; absent for identity purchases
	pub route: Option<SwapRoute>,
}

/// End-to-end purchase flow for a single listing
pub struct CheckoutService {
	market: Arc<dyn MarketApi>,
	router: Arc<dyn SwapRouter>,
	solver: AmountSolver,
	submitter: Submitter,
	registry: ChainRegistry,
	settlement: Asset,
}

impl CheckoutService {
	pub fn new(
		market: Arc<dyn MarketApi>,
		router: Arc<dyn SwapRouter>,
		solver: AmountSolver,
		submitter: Submitter,
		registry: ChainRegistry,
		settlement: Asset,
	) -> Self {
		Self {
			market,
			router,
			solver,
			submitter,
			registry,
			settlement,
		}
	}

	pub fn submitter(&self) -> &Submitter {
		&self.submitter
	}

	/// Price a listing in the buyer's chosen asset.
	pub async fn quote(
		&self,
		collection: &str,
		token_id: u64,
		source_denom: &str,
	) -> Result<CheckoutQuote, CheckoutError> {
		let source = self.asset(source_denom)?.clone();
		let token = self
			.market
			.token(collection, &token_id.to_string())
			.await?;
		let price = parse_base_units(&token.price).ok_or_else(|| CheckoutError::InvalidPrice {
			price: token.price.clone(),
		})?;
		let price_display = from_base_units(price, self.settlement.decimals);

		debug!(
			target: TRACING_TARGET,
			collection,
			token_id,
			price_display,
			source = %source.denom,
			"quoting listing"
		);

		let source_amount = self.solver.solve(price_display, &source).await?;

		let route = if source.denom == self.settlement.denom {
			None
		} else {
			Some(
				self.router
					.route(&RouteRequest::new(
						to_base_units(source_amount, self.settlement.decimals),
						IbcDenom::new(&source.denom, &source.chain_id),
						IbcDenom::new(&self.settlement.denom, &self.settlement.chain_id),
					))
					.await?,
			)
		};

		Ok(CheckoutQuote {
			price,
			source_amount,
			route,
		})
	}

	/// Buy a listing with the chosen asset: quote, then submit.
	pub async fn buy(
		&self,
		collection: &str,
		token_id: u64,
		source_denom: &str,
	) -> Result<SubmissionReceipt, CheckoutError> {
		let quote = self.quote(collection, token_id, source_denom).await?;
		let purchase = Purchase {
			collection: collection.to_string(),
			token_id,
			price: quote.price,
		};

		let receipt = match &quote.route {
			Some(route) => self.submitter.submit(route, &purchase).await?,
			None => self.submitter.submit_purchase(&purchase).await?,
		};

		Ok(receipt)
	}

	fn asset(&self, denom: &str) -> Result<&Asset, CheckoutError> {
		self.registry
			.asset(denom)
			.ok_or_else(|| CheckoutError::UnknownAsset {
				denom: denom.to_string(),
			})
	}
}
