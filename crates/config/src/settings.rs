//! Configuration settings structures

use crossbuy_types::SolveStrategy;
use serde::{Deserialize, Serialize};

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
	pub home: HomeSettings,
	pub router: ServiceEndpoint,
	pub price_feed: ServiceEndpoint,
	pub graphql: ServiceEndpoint,
	pub solver: SolverSettings,
	pub submission: SubmissionSettings,
	pub logging: LoggingSettings,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			home: HomeSettings::default(),
			router: ServiceEndpoint {
				endpoint: "https://api.skip.money/v1".to_string(),
				timeout_ms: 30_000,
			},
			price_feed: ServiceEndpoint {
				endpoint: "https://coins.llama.fi".to_string(),
				timeout_ms: 10_000,
			},
			graphql: ServiceEndpoint {
				endpoint: "https://graphql.mainnet.stargaze-apis.com/graphql".to_string(),
				timeout_ms: 10_000,
			},
			solver: SolverSettings::default(),
			submission: SubmissionSettings::default(),
			logging: LoggingSettings::default(),
		}
	}
}

/// The home chain and its marketplace
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HomeSettings {
	pub chain_id: String,
	pub settlement_denom: String,
	pub marketplace_address: String,
}

impl Default for HomeSettings {
	fn default() -> Self {
		Self {
			chain_id: "stargaze-1".to_string(),
			settlement_denom: "ustars".to_string(),
			marketplace_address:
				"stars1fvhcnyddukcqfnt7nlwv3thm5we22lyxyxylr9h77cvgkcn43xfsvgv0pl".to_string(),
		}
	}
}

/// Endpoint plus request timeout for one external service
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceEndpoint {
	pub endpoint: String,
	pub timeout_ms: u64,
}

/// Amount solver tuning
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SolverSettings {
	pub strategy: SolveStrategy,
	/// Hard ceiling on quote calls per search
	pub max_iterations: u32,
	/// Search precision in display units; also the refinement step
	pub precision: f64,
	pub low_bound: f64,
	pub high_bound: f64,
	/// Inflation applied to the price-seeded starting guess (0.01 = 1%)
	pub seed_safety_margin: f64,
}

impl Default for SolverSettings {
	fn default() -> Self {
		Self {
			strategy: SolveStrategy::Bisection,
			max_iterations: 96,
			precision: 0.001,
			low_bound: 0.000_001,
			high_bound: 9_999_999.999_999,
			seed_safety_margin: 0.01,
		}
	}
}

/// Submission pipeline tuning
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SubmissionSettings {
	/// Slippage tolerance forwarded to the message builder, in percent
	pub slippage_tolerance_percent: String,
	/// Balance poll cadence while waiting for a hop to arrive
	pub poll_interval_ms: u64,
	/// Ceiling on a single hop's confirmation wait
	pub confirmation_timeout_secs: u64,
	/// Validity window stamped on the purchase message
	pub purchase_expiry_days: i64,
}

impl Default for SubmissionSettings {
	fn default() -> Self {
		Self {
			slippage_tolerance_percent: "5.0".to_string(),
			poll_interval_ms: 1_000,
			confirmation_timeout_secs: 300,
			purchase_expiry_days: 7,
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Compact,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}
