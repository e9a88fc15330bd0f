//! Crossbuy Types
//!
//! Shared models and traits for the crossbuy checkout engine.
//! This crate contains all domain models organized by business entity.

pub mod market;
pub mod messages;
pub mod models;
pub mod node;
pub mod prices;
pub mod routes;
pub mod solver;
pub mod submission;
pub mod wallet;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use models::{
	from_base_units, parse_base_units, to_base_units, Asset, ChainInfo, Coin, FeeToken, GasPrice,
	DISPLAY_DECIMALS,
};

pub use routes::{
	IbcDenom, MessagePlan, MessagesRequest, MultihopMessage, RouteRequest, RouterError,
	RouterResult, SwapRoute, SwapRouter,
};

pub use prices::{PriceFeed, PriceFeedError, PriceFeedResult};

pub use market::{
	Ask, Collection, CollectionTokenCounts, MarketApi, MarketError, MarketResult, Media, SaleType,
	Token, WalletAccount,
};

pub use messages::{
	ChainMessage, ExecuteContractMsg, IbcTransferMsg, EXECUTE_CONTRACT_TYPE_URL,
	IBC_TRANSFER_TYPE_URL,
};

pub use wallet::{AccountInfo, OfflineSigner, Wallet, WalletError, WalletKey, WalletResult};

pub use node::{ChainNode, NodeConnector, NodeError, NodeResult, SigningNode, TxReceipt};

pub use solver::{SolveStrategy, SolverError, SolverResult};

pub use submission::{Purchase, SubmissionReceipt, SubmissionStatus, SubmitError, SubmitResult};
