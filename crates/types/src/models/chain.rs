//! Chain registry metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// Static metadata for a chain the engine can touch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainInfo {
	pub chain_id: String,
	pub chain_name: String,
	/// RPC endpoint used for both query and signing connections
	pub rpc_endpoint: String,
	/// Fee tokens accepted for gas on this chain, preferred first
	pub fee_tokens: Vec<FeeToken>,
}

impl ChainInfo {
	/// Gas price derived from the chain's preferred fee token, if any
	pub fn gas_price(&self) -> Option<GasPrice> {
		self.fee_tokens.first().map(|fee| GasPrice {
			amount: fee.average_gas_price,
			denom: fee.denom.clone(),
		})
	}
}

/// Fee metadata for one gas denom
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeToken {
	pub denom: String,
	pub average_gas_price: f64,
}

/// Gas price in the cosmos-sdk "0.025uosmo" shape
#[derive(Debug, Clone, PartialEq)]
pub struct GasPrice {
	pub amount: f64,
	pub denom: String,
}

impl fmt::Display for GasPrice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.amount, self.denom)
	}
}
