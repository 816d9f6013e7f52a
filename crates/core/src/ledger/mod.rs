//! Movements and running balance reconstruction.
//!
//! This module implements the ledger side of the report:
//! - Movement and account domain types
//! - Total ordering of movements within an account
//! - Running balance reconstruction with opening-balance seeding

pub mod balance;
pub mod movement;

#[cfg(test)]
mod balance_props;

pub use balance::{reconstruct, BalanceSnapshot};
pub use movement::{Account, Category, Movement};
