//! Submission pipeline types: purchase intent, status, receipts, errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{NodeError, TxReceipt};
use crate::routes::RouterError;
use crate::wallet::WalletError;

/// Result type for submission operations
pub type SubmitResult<T> = Result<T, SubmitError>;

/// The marketplace purchase the submission funds and executes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Purchase {
	pub collection: String,
	pub token_id: u64,
	/// Listing price in base units of the settlement denom
	pub price: u128,
}

/// Where a submission currently is.
///
/// Hops move through signing, broadcasting and balance confirmation in
/// order; any failure jumps straight to `Failed` and ends the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum SubmissionStatus {
	Idle,
	AwaitingWalletAuth,
	Signing { chain_id: String },
	Broadcasting { chain_id: String },
	ConfirmingBalance { chain_id: String },
	PurchaseSigning,
	PurchaseBroadcasting,
	Done,
	Failed { reason: String },
}

impl SubmissionStatus {
	/// Whether a submission in this state still holds the pending flag
	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Idle | Self::Done | Self::Failed { .. })
	}
}

/// Receipts for one completed submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionReceipt {
	pub submission_id: String,
	/// One receipt per hop, in broadcast order
	pub hops: Vec<TxReceipt>,
	pub purchase: TxReceipt,
}

#[derive(Error, Debug)]
pub enum SubmitError {
	#[error("no wallet with signing capability is available")]
	WalletUnavailable,

	#[error("wallet authorization was rejected: {reason}")]
	UserRejected { reason: String },

	#[error("could not resolve an address for chain {chain_id}")]
	AddressResolution { chain_id: String },

	#[error("chain {chain_id} is not in the registry")]
	ChainNotFound { chain_id: String },

	#[error("no fee token configured for chain {chain_id}")]
	MissingFeeInfo { chain_id: String },

	#[error("message plan request failed: {0}")]
	MessagePlan(#[from] RouterError),

	#[error("signing failed on {chain_id}: {reason}")]
	Signing { chain_id: String, reason: String },

	#[error("broadcast failed on {chain_id}: {reason}")]
	BroadcastFailure { chain_id: String, reason: String },

	#[error("funds did not arrive at {chain_id} within {waited_secs}s")]
	ConfirmationTimeout { chain_id: String, waited_secs: u64 },

	#[error("node error: {0}")]
	Node(#[from] NodeError),
}

impl From<WalletError> for SubmitError {
	fn from(err: WalletError) -> Self {
		match err {
			WalletError::Unavailable => Self::WalletUnavailable,
			WalletError::Rejected { reason } => Self::UserRejected { reason },
			WalletError::KeyNotFound { chain_id }
			| WalletError::AddressResolution { chain_id } => Self::AddressResolution { chain_id },
			WalletError::Signing { reason } => Self::Signing {
				chain_id: String::new(),
				reason,
			},
		}
	}
}
