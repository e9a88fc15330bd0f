//! Static chain registry and asset list
//!
//! The engine only ever touches chains and assets from this registry; it is
//! the source of RPC endpoints and gas fee metadata.

use crossbuy_types::{Asset, ChainInfo, FeeToken};
use serde::{Deserialize, Serialize};

/// Template for the node proxy endpoints, `{}` replaced by the chain id
const NODE_ENDPOINT_TEMPLATE: &str = "https://ibc.fun/nodes/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainRegistry {
	pub chains: Vec<ChainInfo>,
	pub assets: Vec<Asset>,
}

impl ChainRegistry {
	pub fn chain(&self, chain_id: &str) -> Option<&ChainInfo> {
		self.chains.iter().find(|chain| chain.chain_id == chain_id)
	}

	pub fn asset(&self, denom: &str) -> Option<&Asset> {
		self.assets.iter().find(|asset| asset.denom == denom)
	}

	pub fn asset_by_symbol(&self, symbol: &str) -> Option<&Asset> {
		self.assets.iter().find(|asset| asset.symbol == symbol)
	}
}

fn chain(chain_id: &str, chain_name: &str, fee_denom: &str, average_gas_price: f64) -> ChainInfo {
	ChainInfo {
		chain_id: chain_id.to_string(),
		chain_name: chain_name.to_string(),
		rpc_endpoint: format!("{NODE_ENDPOINT_TEMPLATE}{chain_id}"),
		fee_tokens: vec![FeeToken {
			denom: fee_denom.to_string(),
			average_gas_price,
		}],
	}
}

impl Default for ChainRegistry {
	fn default() -> Self {
		Self {
			chains: vec![
				chain("stargaze-1", "stargaze", "ustars", 1.1),
				chain("cosmoshub-4", "cosmoshub", "uatom", 0.025),
				chain("osmosis-1", "osmosis", "uosmo", 0.025),
				chain("axelar-dojo-1", "axelar", "uaxl", 0.007),
				chain("phoenix-1", "terra2", "uluna", 0.015),
			],
			assets: vec![
				Asset::stars(),
				Asset::atom(),
				Asset::osmo(),
				Asset::axl_usdc(),
				Asset::luna(),
			],
		}
	}
}
