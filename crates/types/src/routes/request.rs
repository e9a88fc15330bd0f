//! Router request payloads (camelCase JSON on the wire)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::routes::response::SwapRoute;

/// An asset pinned to the chain it lives on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct IbcDenom {
	pub denom: String,
	pub chain_id: String,
}

impl IbcDenom {
	pub fn new(denom: impl Into<String>, chain_id: impl Into<String>) -> Self {
		Self {
			denom: denom.into(),
			chain_id: chain_id.into(),
		}
	}
}

/// Route quote request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
	/// Base-unit input amount
	pub amount_in: String,
	pub source_asset: IbcDenom,
	pub dest_asset: IbcDenom,
	pub cumulative_affiliate_fee_bps: String,
}

impl RouteRequest {
	pub fn new(amount_in: u128, source_asset: IbcDenom, dest_asset: IbcDenom) -> Self {
		Self {
			amount_in: amount_in.to_string(),
			source_asset,
			dest_asset,
			cumulative_affiliate_fee_bps: "0".to_string(),
		}
	}
}

/// Message plan request: a quoted route plus the user's per-chain addresses
/// and the slippage tolerance applied to the user swap leg.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessagesRequest {
	pub pre_swap_hops: Vec<serde_json::Value>,
	pub post_swap_hops: Vec<serde_json::Value>,

	pub chain_ids_to_addresses: HashMap<String, String>,

	pub source_asset: IbcDenom,
	pub dest_asset: IbcDenom,
	pub amount_in: String,

	pub user_swap: serde_json::Value,
	pub user_swap_amount_out: String,
	pub user_swap_slippage_tolerance_percent: String,

	pub fee_swap: Option<serde_json::Value>,
	pub affiliates: Vec<serde_json::Value>,
}

impl MessagesRequest {
	/// Build the plan request from a quoted route, echoing the route fields
	/// the way the message builder expects them.
	pub fn from_route(
		route: &SwapRoute,
		addresses: HashMap<String, String>,
		slippage_tolerance_percent: &str,
	) -> Self {
		Self {
			pre_swap_hops: route.pre_swap_hops.clone(),
			post_swap_hops: route.post_swap_hops.clone(),
			chain_ids_to_addresses: addresses,
			source_asset: route.source_asset.clone(),
			dest_asset: route.dest_asset.clone(),
			amount_in: route.amount_in.clone(),
			user_swap: route.user_swap.clone(),
			user_swap_amount_out: route.user_swap_amount_out.clone(),
			user_swap_slippage_tolerance_percent: slippage_tolerance_percent.to_string(),
			fee_swap: route.fee_swap.clone(),
			affiliates: Vec::new(),
		}
	}
}
