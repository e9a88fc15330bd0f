//! Swap route domain model and the router service seam

use async_trait::async_trait;
use std::fmt::Debug;

pub mod errors;
pub mod request;
pub mod response;

pub use errors::RouterError;
pub use request::{IbcDenom, MessagesRequest, RouteRequest};
pub use response::{MessagePlan, MultihopMessage, SwapRoute};

/// Result type for router operations
pub type RouterResult<T> = Result<T, RouterError>;

/// Seam to the external swap routing service.
///
/// The router is the only oracle the amount solver consults, and the only
/// source of executable message plans for the submitter.
#[async_trait]
pub trait SwapRouter: Send + Sync + Debug {
	/// Quote a route: how much `dest_asset` does `amount_in` of
	/// `source_asset` buy, and through which chains.
	async fn route(&self, request: &RouteRequest) -> RouterResult<SwapRoute>;

	/// Decompose a quoted route into chain-native messages, one per hop,
	/// addressed with the user's per-chain accounts.
	async fn messages(&self, request: &MessagesRequest) -> RouterResult<MessagePlan>;
}
