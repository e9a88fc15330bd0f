//! Crossbuy Service
//!
//! Core logic for cross-chain checkout: the amount solver, the multi-hop
//! submitter, and the flow that ties them to marketplace data.

pub mod checkout;
pub mod solver;
pub mod submitter;

pub use checkout::{CheckoutError, CheckoutQuote, CheckoutService};
pub use solver::{AmountSolver, SolverConfig};
pub use submitter::{Submitter, SubmitterConfig};
