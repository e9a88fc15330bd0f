//! Multi-hop submitter
//!
//! Turns a quoted route into signed transactions: enables the wallet for
//! every involved chain, fetches the message plan, then signs and
//! broadcasts hop by hop. A hop is only considered done once the
//! settlement balance at the destination visibly grows; only then is the
//! marketplace purchase broadcast. Hops are strictly sequential because
//! each later hop spends what the previous one delivered.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use crossbuy_adapters::NodePool;
use crossbuy_config::ChainRegistry;
use crossbuy_types::{
	ChainInfo, ChainMessage, Coin, ExecuteContractMsg, MessagesRequest, Purchase,
	SubmissionReceipt, SubmissionStatus, SubmitError, SubmitResult, SwapRoute, SwapRouter,
	TxReceipt, Wallet,
};

const TRACING_TARGET: &str = "crossbuy::submitter";

/// Submission pipeline tuning
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
	pub home_chain_id: String,
	pub settlement_denom: String,
	pub marketplace_address: String,
	/// Slippage tolerance forwarded to the message builder, in percent
	pub slippage_tolerance_percent: String,
	/// Balance poll cadence while waiting for a hop to arrive
	pub poll_interval: Duration,
	/// Ceiling on a single hop's confirmation wait
	pub confirmation_timeout: Duration,
	/// Validity window stamped on the purchase message
	pub purchase_expiry_days: i64,
}

impl Default for SubmitterConfig {
	fn default() -> Self {
		Self {
			home_chain_id: "stargaze-1".to_string(),
			settlement_denom: "ustars".to_string(),
			marketplace_address:
				"stars1fvhcnyddukcqfnt7nlwv3thm5we22lyxyxylr9h77cvgkcn43xfsvgv0pl".to_string(),
			slippage_tolerance_percent: "5.0".to_string(),
			poll_interval: Duration::from_secs(1),
			confirmation_timeout: Duration::from_secs(300),
			purchase_expiry_days: 7,
		}
	}
}

/// Drives one submission at a time and publishes its progress
pub struct Submitter {
	router: Arc<dyn SwapRouter>,
	wallet: Arc<dyn Wallet>,
	pool: NodePool,
	registry: ChainRegistry,
	config: SubmitterConfig,
	status: watch::Sender<SubmissionStatus>,
	pending: Arc<AtomicBool>,
}

/// Clears the pending flag on every exit path
struct PendingGuard {
	flag: Arc<AtomicBool>,
}

impl PendingGuard {
	fn acquire(flag: &Arc<AtomicBool>) -> Self {
		flag.store(true, Ordering::SeqCst);
		Self { flag: flag.clone() }
	}
}

impl Drop for PendingGuard {
	fn drop(&mut self) {
		self.flag.store(false, Ordering::SeqCst);
	}
}

impl Submitter {
	pub fn new(
		router: Arc<dyn SwapRouter>,
		wallet: Arc<dyn Wallet>,
		pool: NodePool,
		registry: ChainRegistry,
		config: SubmitterConfig,
	) -> Self {
		let (status, _) = watch::channel(SubmissionStatus::Idle);
		Self {
			router,
			wallet,
			pool,
			registry,
			config,
			status,
			pending: Arc::new(AtomicBool::new(false)),
		}
	}

	/// Watch submission progress
	pub fn status(&self) -> watch::Receiver<SubmissionStatus> {
		self.status.subscribe()
	}

	/// Whether a submission currently holds the pending flag
	pub fn is_pending(&self) -> bool {
		self.pending.load(Ordering::SeqCst)
	}

	/// Execute a full cross-chain purchase: every hop of the route, then
	/// the marketplace buy. Any failure aborts the rest of the pipeline.
	pub async fn submit(
		&self,
		route: &SwapRoute,
		purchase: &Purchase,
	) -> SubmitResult<SubmissionReceipt> {
		let _pending = PendingGuard::acquire(&self.pending);

		let result = self.run(route, purchase).await;
		match &result {
			Ok(receipt) => {
				debug!(
					target: TRACING_TARGET,
					submission_id = %receipt.submission_id,
					hops = receipt.hops.len(),
					"submission complete"
				);
				let _ = self.status.send_replace(SubmissionStatus::Done);
			},
			Err(err) => {
				warn!(target: TRACING_TARGET, error = %err, "submission failed");
				let _ = self.status.send_replace(SubmissionStatus::Failed {
					reason: err.to_string(),
				});
			},
		}

		result
	}

	/// Purchase with settlement funds already on the home chain: no hops,
	/// just the marketplace execute message.
	pub async fn submit_purchase(&self, purchase: &Purchase) -> SubmitResult<SubmissionReceipt> {
		let _pending = PendingGuard::acquire(&self.pending);

		let result = self.run_purchase_only(purchase).await;
		match &result {
			Ok(_) => {
				let _ = self.status.send_replace(SubmissionStatus::Done);
			},
			Err(err) => {
				let _ = self.status.send_replace(SubmissionStatus::Failed {
					reason: err.to_string(),
				});
			},
		}

		result
	}

	async fn run(
		&self,
		route: &SwapRoute,
		purchase: &Purchase,
	) -> SubmitResult<SubmissionReceipt> {
		let chain_ids = self.involved_chains(route);

		let _ = self.status.send_replace(SubmissionStatus::AwaitingWalletAuth);
		self.wallet.enable(&chain_ids).await?;

		let mut addresses: HashMap<String, String> = HashMap::new();
		for chain_id in &chain_ids {
			let address = self.wallet.address(chain_id).await.map_err(|_| {
				SubmitError::AddressResolution {
					chain_id: chain_id.clone(),
				}
			})?;
			addresses.insert(chain_id.clone(), address);
		}

		let plan = self
			.router
			.messages(&MessagesRequest::from_route(
				route,
				addresses.clone(),
				&self.config.slippage_tolerance_percent,
			))
			.await?;

		let home_chain = self.chain(&self.config.home_chain_id)?;
		let home_node = self.pool.query_node(home_chain).await?;
		let recipient = addresses
			.get(&self.config.home_chain_id)
			.cloned()
			.ok_or_else(|| SubmitError::AddressResolution {
				chain_id: self.config.home_chain_id.clone(),
			})?;

		let mut hops: Vec<TxReceipt> = Vec::with_capacity(plan.requested.len());

		for message in &plan.requested {
			let decoded = message.decode()?;
			let chain = self.chain(&message.chain_id)?;
			let gas_price =
				chain
					.gas_price()
					.ok_or_else(|| SubmitError::MissingFeeInfo {
						chain_id: chain.chain_id.clone(),
					})?;

			let _ = self.status.send_replace(SubmissionStatus::Signing {
				chain_id: chain.chain_id.clone(),
			});
			let signer = self.wallet.signer_for_key(&message.chain_id).await?;
			let signing_node = self.pool.signing_node(chain, signer, gas_price).await?;

			// snapshot before broadcasting so the poll below cannot miss a
			// fast arrival
			let balance_before = home_node
				.balance(&recipient, &self.config.settlement_denom)
				.await?;

			let _ = self.status.send_replace(SubmissionStatus::Broadcasting {
				chain_id: chain.chain_id.clone(),
			});
			let receipt = signing_node
				.sign_and_broadcast(decoded.sender(), std::slice::from_ref(&decoded))
				.await
				.map_err(|err| SubmitError::BroadcastFailure {
					chain_id: chain.chain_id.clone(),
					reason: err.to_string(),
				})?;
			if !receipt.is_success() {
				return Err(SubmitError::BroadcastFailure {
					chain_id: chain.chain_id.clone(),
					reason: receipt
						.raw_log
						.clone()
						.unwrap_or_else(|| format!("tx failed with code {}", receipt.code)),
				});
			}

			debug!(
				target: TRACING_TARGET,
				chain_id = %chain.chain_id,
				tx_hash = %receipt.tx_hash,
				"hop broadcast, waiting for funds"
			);

			let _ = self.status.send_replace(SubmissionStatus::ConfirmingBalance {
				chain_id: chain.chain_id.clone(),
			});
			self.wait_for_arrival(home_node.as_ref(), &recipient, balance_before)
				.await?;

			hops.push(receipt);
		}

		let purchase_receipt = self.execute_purchase(purchase, &recipient).await?;

		Ok(SubmissionReceipt {
			submission_id: Uuid::new_v4().to_string(),
			hops,
			purchase: purchase_receipt,
		})
	}

	async fn run_purchase_only(&self, purchase: &Purchase) -> SubmitResult<SubmissionReceipt> {
		let home = vec![self.config.home_chain_id.clone()];

		let _ = self.status.send_replace(SubmissionStatus::AwaitingWalletAuth);
		self.wallet.enable(&home).await?;

		let recipient = self
			.wallet
			.address(&self.config.home_chain_id)
			.await
			.map_err(|_| SubmitError::AddressResolution {
				chain_id: self.config.home_chain_id.clone(),
			})?;

		let purchase_receipt = self.execute_purchase(purchase, &recipient).await?;

		Ok(SubmissionReceipt {
			submission_id: Uuid::new_v4().to_string(),
			hops: Vec::new(),
			purchase: purchase_receipt,
		})
	}

	/// The chains a submission touches: every hop chain plus home.
	fn involved_chains(&self, route: &SwapRoute) -> Vec<String> {
		let mut chain_ids = route.chain_ids.clone();
		if !chain_ids.contains(&self.config.home_chain_id) {
			chain_ids.push(self.config.home_chain_id.clone());
		}
		chain_ids
	}

	fn chain(&self, chain_id: &str) -> SubmitResult<&ChainInfo> {
		self.registry
			.chain(chain_id)
			.ok_or_else(|| SubmitError::ChainNotFound {
				chain_id: chain_id.to_string(),
			})
	}

	/// Poll the settlement balance until it exceeds the snapshot.
	async fn wait_for_arrival(
		&self,
		home_node: &dyn crossbuy_types::ChainNode,
		recipient: &str,
		balance_before: u128,
	) -> SubmitResult<()> {
		let denom = &self.config.settlement_denom;
		let poll = async {
			loop {
				let balance = home_node.balance(recipient, denom).await?;
				if balance > balance_before {
					debug!(
						target: TRACING_TARGET,
						balance_before, balance, "funds arrived"
					);
					return Ok(());
				}
				tokio::time::sleep(self.config.poll_interval).await;
			}
		};

		match tokio::time::timeout(self.config.confirmation_timeout, poll).await {
			Ok(result) => result,
			Err(_) => Err(SubmitError::ConfirmationTimeout {
				chain_id: self.config.home_chain_id.clone(),
				waited_secs: self.config.confirmation_timeout.as_secs(),
			}),
		}
	}

	/// Build, sign and broadcast the marketplace buy on the home chain.
	async fn execute_purchase(
		&self,
		purchase: &Purchase,
		sender: &str,
	) -> SubmitResult<TxReceipt> {
		let home_chain = self.chain(&self.config.home_chain_id)?;
		let gas_price =
			home_chain
				.gas_price()
				.ok_or_else(|| SubmitError::MissingFeeInfo {
					chain_id: home_chain.chain_id.clone(),
				})?;

		let _ = self.status.send_replace(SubmissionStatus::PurchaseSigning);
		let signer = self.wallet.signer_for_key(&self.config.home_chain_id).await?;
		let signing_node = self.pool.signing_node(home_chain, signer, gas_price).await?;

		// expiry in the chain's nanosecond time unit
		let expires_nanos =
			(Utc::now() + chrono::Duration::days(self.config.purchase_expiry_days))
				.timestamp_millis() as i128
				* 1_000_000;

		let payload = serde_json::json!({
			"buy_now": {
				"collection": purchase.collection,
				"token_id": purchase.token_id,
				"expires": expires_nanos.to_string(),
			}
		});
		let message = ChainMessage::ExecuteContract(ExecuteContractMsg::new(
			sender,
			&self.config.marketplace_address,
			&payload,
			vec![Coin::new(purchase.price, &self.config.settlement_denom)],
		));

		let _ = self.status.send_replace(SubmissionStatus::PurchaseBroadcasting);
		let receipt = signing_node
			.sign_and_broadcast(sender, std::slice::from_ref(&message))
			.await
			.map_err(|err| SubmitError::BroadcastFailure {
				chain_id: home_chain.chain_id.clone(),
				reason: err.to_string(),
			})?;
		if !receipt.is_success() {
			return Err(SubmitError::BroadcastFailure {
				chain_id: home_chain.chain_id.clone(),
				reason: receipt
					.raw_log
					.clone()
					.unwrap_or_else(|| format!("tx failed with code {}", receipt.code)),
			});
		}

		Ok(receipt)
	}
}
