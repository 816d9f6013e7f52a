//! FX rate table and reporting-currency normalization.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A normalized amount together with its conversion status.
///
/// `is_converted == false` means no usable rate was known and the amount is
/// still in its native currency; callers must surface that flag rather than
/// present the figure as if it were the reporting currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Converted {
    /// The resulting amount.
    pub amount: Decimal,
    /// Whether the amount is actually in the reporting currency.
    pub is_converted: bool,
}

impl Converted {
    /// A zero amount in the reporting currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            amount: Decimal::ZERO,
            is_converted: true,
        }
    }
}

/// Live FX rates keyed by currency code.
///
/// Each rate is expressed as units of that currency per one reporting unit.
/// The reporting currency's own rate is always 1 and is never stored or
/// looked up. The table holds one live value per currency; the report does
/// not model historical per-date rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    reporting: String,
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Creates a rate table for the given reporting currency.
    #[must_use]
    pub fn new(reporting: impl Into<String>, rates: HashMap<String, Decimal>) -> Self {
        Self {
            reporting: reporting.into(),
            rates,
        }
    }

    /// The reporting currency code.
    #[must_use]
    pub fn reporting(&self) -> &str {
        &self.reporting
    }

    /// Converts a native-currency amount into the reporting currency.
    ///
    /// With a missing or zero rate the conversion is undefined: the amount
    /// is returned unchanged with `is_converted == false` (a safe no-op,
    /// never a crash).
    #[must_use]
    pub fn to_reporting(&self, amount: Decimal, currency_code: &str) -> Converted {
        if currency_code == self.reporting {
            return Converted {
                amount,
                is_converted: true,
            };
        }

        match self.rates.get(currency_code) {
            Some(rate) if !rate.is_zero() => Converted {
                amount: amount / rate,
                is_converted: true,
            },
            _ => {
                debug!(currency = currency_code, "no usable FX rate, amount left unconverted");
                Converted {
                    amount,
                    is_converted: false,
                }
            }
        }
    }
}
