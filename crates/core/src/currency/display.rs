//! Currency display metadata and final rounding.
//!
//! CRITICAL: all internal arithmetic stays at full decimal precision;
//! rounding happens only here, at display time, using banker's rounding
//! (round half to even) to minimize cumulative errors.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Display metadata for one currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 currency code (unique key).
    pub code: String,
    /// Display symbol, e.g. `$`.
    pub symbol: String,
    /// Number of decimal places shown for amounts in this currency.
    pub decimal_places: u32,
}

impl Currency {
    /// Formats an amount for display, rounding to this currency's decimal
    /// places.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        format!("{}{}", self.symbol, round_display(amount, self.decimal_places))
    }
}

/// Rounds a value for display using banker's rounding.
#[must_use]
pub fn round_display(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}
