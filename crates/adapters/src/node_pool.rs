//! Per-chain node connection pool
//!
//! Query connections are cached for the lifetime of the pool; signing
//! connections are built fresh per use since they bind a signer and gas
//! price. The pool is an owned object: drop it and the session's
//! connections go with it.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crossbuy_types::{
	ChainInfo, ChainNode, GasPrice, NodeConnector, NodeResult, OfflineSigner, SigningNode,
};

const TRACING_TARGET: &str = "crossbuy::node_pool";

#[derive(Debug, Clone)]
pub struct NodePool {
	connector: Arc<dyn NodeConnector>,
	clients: Arc<DashMap<String, Arc<dyn ChainNode>>>,
}

impl NodePool {
	pub fn new(connector: Arc<dyn NodeConnector>) -> Self {
		Self {
			connector,
			clients: Arc::new(DashMap::new()),
		}
	}

	/// Get the cached query connection for a chain, connecting on first use.
	pub async fn query_node(&self, chain: &ChainInfo) -> NodeResult<Arc<dyn ChainNode>> {
		if let Some(node) = self.clients.get(&chain.chain_id) {
			return Ok(node.clone());
		}

		debug!(
			target: TRACING_TARGET,
			chain_id = %chain.chain_id,
			endpoint = %chain.rpc_endpoint,
			"connecting query node"
		);
		let node = self.connector.connect(chain).await?;

		// A concurrent connect may have won; keep whichever landed first
		let entry = self
			.clients
			.entry(chain.chain_id.clone())
			.or_insert_with(|| node.clone());
		Ok(entry.clone())
	}

	/// Build a signing connection; never cached.
	pub async fn signing_node(
		&self,
		chain: &ChainInfo,
		signer: Arc<dyn OfflineSigner>,
		gas_price: GasPrice,
	) -> NodeResult<Arc<dyn SigningNode>> {
		debug!(
			target: TRACING_TARGET,
			chain_id = %chain.chain_id,
			gas_price = %gas_price,
			"connecting signing node"
		);
		self.connector.connect_signing(chain, signer, gas_price).await
	}

	/// Number of cached query connections
	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}

	/// Drop all cached connections
	pub fn clear(&self) {
		self.clients.clear();
	}
}
