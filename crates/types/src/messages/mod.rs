//! Typed chain-native messages
//!
//! Message plans arrive as JSON strings tagged with a proto type URL; these
//! are the two message shapes the engine signs and broadcasts.

use serde::{Deserialize, Serialize};

use crate::models::Coin;
use crate::routes::errors::RouterError;
use crate::routes::RouterResult;

pub const IBC_TRANSFER_TYPE_URL: &str = "/ibc.applications.transfer.v1.MsgTransfer";
pub const EXECUTE_CONTRACT_TYPE_URL: &str = "/cosmwasm.wasm.v1.MsgExecuteContract";

/// A chain-native message ready for signing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChainMessage {
	IbcTransfer(IbcTransferMsg),
	ExecuteContract(ExecuteContractMsg),
}

impl ChainMessage {
	/// Decode a plan payload according to its type URL.
	pub fn from_plan(type_url: &str, msg_json: &str) -> RouterResult<Self> {
		match type_url {
			IBC_TRANSFER_TYPE_URL => Ok(Self::IbcTransfer(serde_json::from_str(msg_json)?)),
			EXECUTE_CONTRACT_TYPE_URL => Ok(Self::ExecuteContract(serde_json::from_str(msg_json)?)),
			other => Err(RouterError::UnknownMessageType {
				type_url: other.to_string(),
			}),
		}
	}

	pub fn type_url(&self) -> &'static str {
		match self {
			Self::IbcTransfer(_) => IBC_TRANSFER_TYPE_URL,
			Self::ExecuteContract(_) => EXECUTE_CONTRACT_TYPE_URL,
		}
	}

	/// The account that must sign this message
	pub fn sender(&self) -> &str {
		match self {
			Self::IbcTransfer(msg) => &msg.sender,
			Self::ExecuteContract(msg) => &msg.sender,
		}
	}
}

/// IBC fungible token transfer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IbcTransferMsg {
	pub source_port: String,
	pub source_channel: String,
	pub token: Coin,
	pub sender: String,
	pub receiver: String,
	/// Passed through untouched; the plan decides the timeout policy
	#[serde(default)]
	pub timeout_height: serde_json::Value,
	#[serde(default)]
	pub timeout_timestamp: serde_json::Value,
	#[serde(default)]
	pub memo: Option<String>,
}

/// CosmWasm contract execution, JSON payload carried as base64 bytes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecuteContractMsg {
	pub sender: String,
	pub contract: String,
	#[serde(with = "base64_bytes")]
	pub msg: Vec<u8>,
	#[serde(default)]
	pub funds: Vec<Coin>,
}

impl ExecuteContractMsg {
	/// Build an execute message from a JSON payload.
	pub fn new(
		sender: impl Into<String>,
		contract: impl Into<String>,
		payload: &serde_json::Value,
		funds: Vec<Coin>,
	) -> Self {
		Self {
			sender: sender.into(),
			contract: contract.into(),
			msg: payload.to_string().into_bytes(),
			funds,
		}
	}

	/// The JSON payload, when it parses as JSON
	pub fn payload(&self) -> Option<serde_json::Value> {
		serde_json::from_slice(&self.msg).ok()
	}
}

mod base64_bytes {
	use base64::engine::general_purpose::STANDARD;
	use base64::Engine;
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&STANDARD.encode(bytes))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
		let encoded = String::deserialize(deserializer)?;
		STANDARD
			.decode(encoded.as_bytes())
			.map_err(serde::de::Error::custom)
	}
}
