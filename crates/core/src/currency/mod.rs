//! Normalization into the reporting currency.

pub mod display;
pub mod rates;

#[cfg(test)]
mod rates_props;

pub use display::{round_display, Currency};
pub use rates::{Converted, RateTable};
