//! Shared domain models used across adapters, the solver, and the submitter

pub mod amount;
pub mod asset;
pub mod chain;

pub use amount::{from_base_units, parse_base_units, to_base_units, Coin, DISPLAY_DECIMALS};
pub use asset::Asset;
pub use chain::{ChainInfo, FeeToken, GasPrice};
