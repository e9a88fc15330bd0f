//! Crossbuy Adapters
//!
//! HTTP clients for the external collaborators (swap router, price feed,
//! marketplace GraphQL API) and the per-chain node connection pool.

pub mod client_cache;
pub mod market;
pub mod node_pool;
pub mod price;
pub mod router;

pub use client_cache::{EndpointConfig, HttpClientCache};
pub use market::MarketClient;
pub use node_pool::NodePool;
pub use price::DefiLlamaFeed;
pub use router::SolveRouter;
