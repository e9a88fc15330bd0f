//! Mock swap router with a configurable quote surface

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use crossbuy::types::{
	from_base_units, to_base_units, MessagePlan, MessagesRequest, MultihopMessage, RouteRequest,
	RouterError, RouterResult, SwapRoute, SwapRouter, IBC_TRANSFER_TYPE_URL,
};

/// Router double: quotes `amount_in * ratio` and emits one IBC transfer
/// per configured hop chain, each delivering the full output to the
/// user's home address.
#[derive(Debug)]
pub struct MockRouter {
	/// Output per unit of input, applied in display units
	pub ratio: f64,
	/// Origin chain of each hop, in plan order
	pub hop_chains: Vec<String>,
	pub home_chain: String,
	pub settlement_denom: String,
	pub route_calls: AtomicUsize,
	pub msgs_calls: AtomicUsize,
	pub fail_routes: bool,
	pub fail_msgs: bool,
}

impl MockRouter {
	pub fn new(ratio: f64, hop_chains: &[&str]) -> Self {
		Self {
			ratio,
			hop_chains: hop_chains.iter().map(|s| s.to_string()).collect(),
			home_chain: "stargaze-1".to_string(),
			settlement_denom: "ustars".to_string(),
			route_calls: AtomicUsize::new(0),
			msgs_calls: AtomicUsize::new(0),
			fail_routes: false,
			fail_msgs: false,
		}
	}

	pub fn route_calls(&self) -> usize {
		self.route_calls.load(Ordering::SeqCst)
	}

	pub fn msgs_calls(&self) -> usize {
		self.msgs_calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl SwapRouter for MockRouter {
	async fn route(&self, request: &RouteRequest) -> RouterResult<SwapRoute> {
		self.route_calls.fetch_add(1, Ordering::SeqCst);
		if self.fail_routes {
			return Err(RouterError::Status {
				code: 500,
				body: "route backend down".to_string(),
			});
		}

		let amount_in: u128 = request
			.amount_in
			.parse()
			.map_err(|_| RouterError::InvalidResponse {
				reason: "bad amountIn".to_string(),
			})?;
		let out = from_base_units(amount_in, 6) * self.ratio;

		let mut chain_ids = self.hop_chains.clone();
		if !chain_ids.contains(&self.home_chain) {
			chain_ids.push(self.home_chain.clone());
		}

		Ok(SwapRoute {
			source_asset: request.source_asset.clone(),
			dest_asset: request.dest_asset.clone(),
			amount_in: request.amount_in.clone(),
			user_swap: serde_json::json!({"swapVenue": "mock-dex"}),
			user_swap_amount_out: to_base_units(out, 6).to_string(),
			fee_swap: None,
			pre_swap_hops: vec![serde_json::json!({"port": "transfer"})],
			post_swap_hops: Vec::new(),
			chain_ids,
		})
	}

	async fn messages(&self, request: &MessagesRequest) -> RouterResult<MessagePlan> {
		self.msgs_calls.fetch_add(1, Ordering::SeqCst);
		if self.fail_msgs {
			return Err(RouterError::Status {
				code: 500,
				body: "msgs backend down".to_string(),
			});
		}

		let home_address = request
			.chain_ids_to_addresses
			.get(&self.home_chain)
			.cloned()
			.ok_or_else(|| RouterError::InvalidResponse {
				reason: "missing home address".to_string(),
			})?;

		let requested = self
			.hop_chains
			.iter()
			.map(|chain_id| {
				let sender = request
					.chain_ids_to_addresses
					.get(chain_id)
					.cloned()
					.unwrap_or_default();
				MultihopMessage {
					chain_id: chain_id.clone(),
					msg_type_url: IBC_TRANSFER_TYPE_URL.to_string(),
					msg: serde_json::json!({
						"source_port": "transfer",
						"source_channel": "channel-75",
						"token": {
							"denom": self.settlement_denom,
							"amount": request.user_swap_amount_out,
						},
						"sender": sender,
						"receiver": home_address,
						"timeout_timestamp": "1900000000000000000",
						"memo": ""
					})
					.to_string(),
				}
			})
			.collect();

		Ok(MessagePlan { requested })
	}
}
