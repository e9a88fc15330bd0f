//! Display-unit / base-unit amount conversions
//!
//! Wire amounts are integer strings in the denom's base units; the solver
//! works on display-unit floats. Six decimals is the norm for the chains
//! this engine targets.

use serde::{Deserialize, Serialize};

/// Default number of decimals between display and base units
pub const DISPLAY_DECIMALS: u8 = 6;

/// Convert a display-unit amount into integer base units.
///
/// The amount is rounded to `decimals` places first, so values produced by
/// the solver's float arithmetic map onto a stable integer.
pub fn to_base_units(amount: f64, decimals: u8) -> u128 {
	let scale = 10f64.powi(decimals as i32);
	let clamped = if amount.is_finite() && amount > 0.0 {
		amount
	} else {
		0.0
	};
	(clamped * scale).round() as u128
}

/// Convert integer base units back into a display-unit amount.
pub fn from_base_units(units: u128, decimals: u8) -> f64 {
	let scale = 10f64.powi(decimals as i32);
	units as f64 / scale
}

/// Parse a base-unit amount string as produced by chain nodes and the router.
pub fn parse_base_units(s: &str) -> Option<u128> {
	s.trim().parse::<u128>().ok()
}

/// A chain-native coin: base-unit amount plus denom
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coin {
	pub denom: String,
	/// Base-unit amount, kept as a string to match the chain wire format
	pub amount: String,
}

impl Coin {
	pub fn new(amount: u128, denom: impl Into<String>) -> Self {
		Self {
			denom: denom.into(),
			amount: amount.to_string(),
		}
	}

	/// Base-unit amount as an integer, zero when malformed
	pub fn units(&self) -> u128 {
		parse_base_units(&self.amount).unwrap_or(0)
	}
}
