//! Blockchain asset/token models

use serde::{Deserialize, Serialize};

/// Supported blockchain asset/token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Asset {
	/// Bank denom (e.g. "ustars", "uosmo")
	pub denom: String,
	/// Display symbol (e.g. "STARS", "OSMO")
	pub symbol: String,
	/// Chain ID where this asset lives
	pub chain_id: String,
	/// Number of decimal places between the denom and display units
	pub decimals: u8,
	/// Identifier on the external price feed, if the asset is priced
	pub coingecko_id: Option<String>,
}

impl Asset {
	pub fn new(
		denom: impl Into<String>,
		symbol: impl Into<String>,
		chain_id: impl Into<String>,
		decimals: u8,
		coingecko_id: Option<&str>,
	) -> Self {
		Self {
			denom: denom.into(),
			symbol: symbol.into(),
			chain_id: chain_id.into(),
			decimals,
			coingecko_id: coingecko_id.map(str::to_string),
		}
	}
}

/// Common asset constants
impl Asset {
	pub fn stars() -> Self {
		Self::new("ustars", "STARS", "stargaze-1", 6, Some("stargaze"))
	}

	pub fn atom() -> Self {
		Self::new("uatom", "ATOM", "cosmoshub-4", 6, Some("cosmos"))
	}

	pub fn osmo() -> Self {
		Self::new("uosmo", "OSMO", "osmosis-1", 6, Some("osmosis"))
	}

	pub fn axl_usdc() -> Self {
		Self::new("uusdc", "axlUSDC", "axelar-dojo-1", 6, Some("usd-coin"))
	}

	pub fn luna() -> Self {
		Self::new("uluna", "LUNA", "phoenix-1", 6, Some("terra-luna-2"))
	}
}
