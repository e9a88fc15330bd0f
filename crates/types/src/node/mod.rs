//! Chain node seams: read queries and signing/broadcast

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

use crate::messages::ChainMessage;
use crate::models::{ChainInfo, GasPrice};
use crate::wallet::OfflineSigner;

/// Result type for chain node operations
pub type NodeResult<T> = Result<T, NodeError>;

#[derive(Error, Debug)]
pub enum NodeError {
	#[error("could not connect to {endpoint}: {reason}")]
	Connection { endpoint: String, reason: String },

	#[error("query failed: {reason}")]
	Query { reason: String },

	#[error("broadcast failed: {reason}")]
	Broadcast { reason: String },
}

/// The result of a broadcast transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TxReceipt {
	pub tx_hash: String,
	pub height: u64,
	/// ABCI result code; zero is success
	pub code: u32,
	#[serde(default)]
	pub raw_log: Option<String>,
}

impl TxReceipt {
	pub fn is_success(&self) -> bool {
		self.code == 0
	}
}

/// Read-only connection to one chain
#[async_trait]
pub trait ChainNode: Send + Sync + Debug {
	/// Spendable balance of `denom` for `address`, in base units.
	async fn balance(&self, address: &str, denom: &str) -> NodeResult<u128>;

	/// Smart query against a CosmWasm contract.
	async fn query_contract(
		&self,
		contract: &str,
		query: &serde_json::Value,
	) -> NodeResult<serde_json::Value>;
}

/// Signing connection to one chain, bound to a signer and gas price
#[async_trait]
pub trait SigningNode: Send + Sync {
	async fn sign_and_broadcast(
		&self,
		sender: &str,
		messages: &[ChainMessage],
	) -> NodeResult<TxReceipt>;
}

/// Factory for chain connections, one per registry entry
#[async_trait]
pub trait NodeConnector: Send + Sync + Debug {
	async fn connect(&self, chain: &ChainInfo) -> NodeResult<Arc<dyn ChainNode>>;

	async fn connect_signing(
		&self,
		chain: &ChainInfo,
		signer: Arc<dyn OfflineSigner>,
		gas_price: GasPrice,
	) -> NodeResult<Arc<dyn SigningNode>>;
}
