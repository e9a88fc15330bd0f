//! Router response payloads

use serde::{Deserialize, Serialize};

use crate::messages::ChainMessage;
use crate::models::{from_base_units, parse_base_units};
use crate::routes::errors::RouterError;
use crate::routes::request::IbcDenom;
use crate::routes::RouterResult;

/// A quoted swap route.
///
/// Hop entries and swap legs are opaque to this engine; they are echoed
/// back verbatim when requesting the message plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapRoute {
	pub source_asset: IbcDenom,
	pub dest_asset: IbcDenom,

	/// Base-unit input amount this route was quoted for
	pub amount_in: String,

	pub user_swap: serde_json::Value,
	/// Base-unit output amount the route nets the user
	pub user_swap_amount_out: String,
	#[serde(default)]
	pub fee_swap: Option<serde_json::Value>,

	#[serde(default)]
	pub pre_swap_hops: Vec<serde_json::Value>,
	#[serde(default)]
	pub post_swap_hops: Vec<serde_json::Value>,

	/// Every chain the route touches, in hop order
	#[serde(default)]
	pub chain_ids: Vec<String>,
}

impl SwapRoute {
	/// Quoted output in base units
	pub fn amount_out_units(&self) -> RouterResult<u128> {
		parse_base_units(&self.user_swap_amount_out).ok_or_else(|| RouterError::InvalidResponse {
			reason: format!("bad userSwapAmountOut: {}", self.user_swap_amount_out),
		})
	}

	/// Quoted output in display units
	pub fn amount_out_display(&self, decimals: u8) -> RouterResult<f64> {
		Ok(from_base_units(self.amount_out_units()?, decimals))
	}
}

/// Ordered message plan returned by the message builder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessagePlan {
	pub requested: Vec<MultihopMessage>,
}

/// One chain-native message in a plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultihopMessage {
	pub chain_id: String,
	pub msg_type_url: String,
	/// JSON-encoded chain-native payload
	pub msg: String,
}

impl MultihopMessage {
	/// Decode the JSON payload into its typed chain message.
	pub fn decode(&self) -> RouterResult<ChainMessage> {
		ChainMessage::from_plan(&self.msg_type_url, &self.msg)
	}
}
