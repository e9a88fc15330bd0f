//! Mock chain nodes sharing one in-memory ledger
//!
//! Broadcasting an IBC transfer credits the receiver's balance, so the
//! submitter's confirmation polling sees funds "arrive" exactly the way it
//! would on a live chain, minus the relay latency.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crossbuy::types::{
	ChainInfo, ChainMessage, ChainNode, GasPrice, NodeConnector, NodeError, NodeResult,
	OfflineSigner, SigningNode, TxReceipt,
};

/// Shared ledger and event log behind every mock node
#[derive(Debug, Default)]
pub struct ChainState {
	/// (address, denom) -> base-unit balance
	balances: Mutex<HashMap<(String, String), u128>>,
	/// Everything that happened, in order: broadcasts, credits, purchases
	pub log: Mutex<Vec<String>>,
	/// Broadcasts on this chain fail
	pub fail_broadcast_on: Mutex<Option<String>>,
	/// When false, transfers stop crediting the receiver (funds never
	/// arrive and confirmation times out)
	pub credit_on_broadcast: Mutex<bool>,
}

impl ChainState {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			credit_on_broadcast: Mutex::new(true),
			..Self::default()
		})
	}

	pub fn balance_of(&self, address: &str, denom: &str) -> u128 {
		self.balances
			.lock()
			.unwrap()
			.get(&(address.to_string(), denom.to_string()))
			.copied()
			.unwrap_or(0)
	}

	pub fn credit(&self, address: &str, denom: &str, amount: u128) {
		let mut balances = self.balances.lock().unwrap();
		*balances
			.entry((address.to_string(), denom.to_string()))
			.or_insert(0) += amount;
	}

	pub fn events(&self) -> Vec<String> {
		self.log.lock().unwrap().clone()
	}

	fn record(&self, event: String) {
		self.log.lock().unwrap().push(event);
	}

	pub fn fail_broadcasts_on(&self, chain_id: &str) {
		*self.fail_broadcast_on.lock().unwrap() = Some(chain_id.to_string());
	}

	pub fn stop_crediting(&self) {
		*self.credit_on_broadcast.lock().unwrap() = false;
	}
}

#[derive(Debug)]
pub struct MockNode {
	state: Arc<ChainState>,
	chain_id: String,
}

#[async_trait]
impl ChainNode for MockNode {
	async fn balance(&self, address: &str, denom: &str) -> NodeResult<u128> {
		Ok(self.state.balance_of(address, denom))
	}

	async fn query_contract(
		&self,
		_contract: &str,
		_query: &serde_json::Value,
	) -> NodeResult<serde_json::Value> {
		Ok(serde_json::Value::Null)
	}
}

pub struct MockSigningNode {
	state: Arc<ChainState>,
	chain_id: String,
}

#[async_trait]
impl SigningNode for MockSigningNode {
	async fn sign_and_broadcast(
		&self,
		_sender: &str,
		messages: &[ChainMessage],
	) -> NodeResult<TxReceipt> {
		if self.state.fail_broadcast_on.lock().unwrap().as_deref() == Some(self.chain_id.as_str()) {
			return Err(NodeError::Broadcast {
				reason: format!("node on {} refused the tx", self.chain_id),
			});
		}

		for message in messages {
			match message {
				ChainMessage::IbcTransfer(transfer) => {
					self.state
						.record(format!("broadcast:{}:transfer", self.chain_id));
					if *self.state.credit_on_broadcast.lock().unwrap() {
						self.state.credit(
							&transfer.receiver,
							&transfer.token.denom,
							transfer.token.units(),
						);
						self.state.record(format!("credit:{}", transfer.receiver));
					}
				},
				ChainMessage::ExecuteContract(execute) => {
					let funds = execute
						.funds
						.iter()
						.map(|coin| format!("{}{}", coin.amount, coin.denom))
						.collect::<Vec<_>>()
						.join(",");
					self.state.record(format!(
						"broadcast:{}:execute:{}:funds:{}",
						self.chain_id, execute.contract, funds
					));
				},
			}
		}

		Ok(TxReceipt {
			tx_hash: format!("TX-{}-{}", self.chain_id, self.state.events().len()),
			height: 100,
			code: 0,
			raw_log: None,
		})
	}
}

/// Connector handing out nodes bound to the shared state
#[derive(Debug)]
pub struct MockConnector {
	state: Arc<ChainState>,
}

impl MockConnector {
	pub fn new(state: Arc<ChainState>) -> Self {
		Self { state }
	}
}

#[async_trait]
impl NodeConnector for MockConnector {
	async fn connect(&self, chain: &ChainInfo) -> NodeResult<Arc<dyn ChainNode>> {
		Ok(Arc::new(MockNode {
			state: self.state.clone(),
			chain_id: chain.chain_id.clone(),
		}))
	}

	async fn connect_signing(
		&self,
		chain: &ChainInfo,
		_signer: Arc<dyn OfflineSigner>,
		_gas_price: GasPrice,
	) -> NodeResult<Arc<dyn SigningNode>> {
		Ok(Arc::new(MockSigningNode {
			state: self.state.clone(),
			chain_id: chain.chain_id.clone(),
		}))
	}
}
