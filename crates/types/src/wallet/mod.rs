//! Wallet capability seam
//!
//! The browser-injected wallet becomes an injected trait so the submitter
//! can be driven by test doubles. Ledger-backed keys only support amino
//! signing, which is why the signer comes in two flavours.

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

#[derive(Error, Debug)]
pub enum WalletError {
	#[error("no wallet with signing capability is available")]
	Unavailable,

	#[error("wallet authorization was rejected: {reason}")]
	Rejected { reason: String },

	#[error("wallet has no key for chain {chain_id}")]
	KeyNotFound { chain_id: String },

	#[error("could not resolve an address for chain {chain_id}")]
	AddressResolution { chain_id: String },

	#[error("signing failed: {reason}")]
	Signing { reason: String },
}

/// A key the wallet holds for one chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletKey {
	pub name: String,
	pub bech32_address: String,
	/// Hardware keys sign amino only
	pub is_nano_ledger: bool,
}

/// One account exposed by an offline signer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
	pub address: String,
}

/// An offline signer scoped to a single chain
#[async_trait]
pub trait OfflineSigner: Send + Sync + Debug {
	async fn accounts(&self) -> WalletResult<Vec<AccountInfo>>;
}

/// The injected wallet capability set
#[async_trait]
pub trait Wallet: Send + Sync + Debug {
	/// Request authorization for the given chains in one user-facing step.
	async fn enable(&self, chain_ids: &[String]) -> WalletResult<()>;

	async fn key(&self, chain_id: &str) -> WalletResult<WalletKey>;

	fn offline_signer(&self, chain_id: &str) -> WalletResult<Arc<dyn OfflineSigner>>;

	fn offline_signer_amino(&self, chain_id: &str) -> WalletResult<Arc<dyn OfflineSigner>>;

	/// The user's address on a chain: the first account of the signer.
	async fn address(&self, chain_id: &str) -> WalletResult<String> {
		let signer = self.offline_signer(chain_id)?;
		let accounts = signer.accounts().await?;
		accounts
			.into_iter()
			.next()
			.map(|account| account.address)
			.ok_or_else(|| WalletError::AddressResolution {
				chain_id: chain_id.to_string(),
			})
	}

	/// Pick the signer flavour the key supports.
	async fn signer_for_key(&self, chain_id: &str) -> WalletResult<Arc<dyn OfflineSigner>> {
		let key = self.key(chain_id).await?;
		if key.is_nano_ledger {
			self.offline_signer_amino(chain_id)
		} else {
			self.offline_signer(chain_id)
		}
	}
}
