//! Mock wallet with capability switches

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crossbuy::types::{
	AccountInfo, OfflineSigner, Wallet, WalletError, WalletKey, WalletResult,
};

#[derive(Debug)]
pub struct MockSigner {
	address: String,
}

#[async_trait]
impl OfflineSigner for MockSigner {
	async fn accounts(&self) -> WalletResult<Vec<AccountInfo>> {
		Ok(vec![AccountInfo {
			address: self.address.clone(),
		}])
	}
}

/// Wallet double: fails fast when unavailable, records what it enabled
#[derive(Debug, Default)]
pub struct MockWallet {
	/// No signing capability at all when false
	pub available: bool,
	/// Decline the enable prompt
	pub reject: bool,
	/// Chains whose key reports as a Ledger device
	pub ledger_chains: HashSet<String>,
	/// Chain sets passed to `enable`, in call order
	pub enabled: Mutex<Vec<Vec<String>>>,
	/// How many amino signers were handed out
	pub amino_signers: Mutex<usize>,
}

impl MockWallet {
	pub fn available() -> Self {
		Self {
			available: true,
			..Self::default()
		}
	}

	pub fn unavailable() -> Self {
		Self::default()
	}

	pub fn rejecting() -> Self {
		Self {
			available: true,
			reject: true,
			..Self::default()
		}
	}

	pub fn with_ledger(chain_id: &str) -> Self {
		Self {
			available: true,
			ledger_chains: HashSet::from([chain_id.to_string()]),
			..Self::default()
		}
	}

	fn address(&self, chain_id: &str) -> String {
		format!("addr-{chain_id}")
	}

	fn check_available(&self) -> WalletResult<()> {
		if self.available {
			Ok(())
		} else {
			Err(WalletError::Unavailable)
		}
	}
}

#[async_trait]
impl Wallet for MockWallet {
	async fn enable(&self, chain_ids: &[String]) -> WalletResult<()> {
		self.check_available()?;
		if self.reject {
			return Err(WalletError::Rejected {
				reason: "request declined".to_string(),
			});
		}
		self.enabled.lock().unwrap().push(chain_ids.to_vec());
		Ok(())
	}

	async fn key(&self, chain_id: &str) -> WalletResult<WalletKey> {
		self.check_available()?;
		Ok(WalletKey {
			name: "test-key".to_string(),
			bech32_address: self.address(chain_id),
			is_nano_ledger: self.ledger_chains.contains(chain_id),
		})
	}

	fn offline_signer(&self, chain_id: &str) -> WalletResult<Arc<dyn OfflineSigner>> {
		self.check_available()?;
		Ok(Arc::new(MockSigner {
			address: self.address(chain_id),
		}))
	}

	fn offline_signer_amino(&self, chain_id: &str) -> WalletResult<Arc<dyn OfflineSigner>> {
		self.check_available()?;
		*self.amino_signers.lock().unwrap() += 1;
		Ok(Arc::new(MockSigner {
			address: self.address(chain_id),
		}))
	}
}
