//! Amount solver configuration and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prices::PriceFeedError;
use crate::routes::RouterError;

/// Result type for solver operations
pub type SolverResult<T> = Result<T, SolverError>;

/// How the solver searches for the source amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SolveStrategy {
	/// Bisect between wide bounds, then refine linearly. Converges in
	/// O(log range) quote calls; the production default.
	Bisection,
	/// Seed from price-feed ratios and step up linearly. A slow fallback
	/// for when the quote surface is too irregular for bisection.
	PriceSeeded,
}

impl Default for SolveStrategy {
	fn default() -> Self {
		Self::Bisection
	}
}

#[derive(Error, Debug)]
pub enum SolverError {
	#[error("target amount must be positive, got {value}")]
	InvalidTarget { value: f64 },

	#[error("asset {denom} is not in the configured asset list")]
	UnknownAsset { denom: String },

	#[error("quote service failed: {0}")]
	QuoteService(#[from] RouterError),

	#[error("price feed failed: {0}")]
	PriceFeed(#[from] PriceFeedError),

	#[error("no convergence after {iterations} quote calls")]
	NoConvergence { iterations: u32 },

	#[error("search superseded by a newer request")]
	Superseded,
}
