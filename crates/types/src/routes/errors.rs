//! Error types for router operations

use thiserror::Error;

/// Errors surfaced by the swap routing service
#[derive(Error, Debug)]
pub enum RouterError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("router returned status {code}: {body}")]
	Status { code: u16, body: String },

	#[error("router response could not be decoded: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("router response is malformed: {reason}")]
	InvalidResponse { reason: String },

	#[error("unknown message type in plan: {type_url}")]
	UnknownMessageType { type_url: String },
}
