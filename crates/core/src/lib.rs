//! Core reporting logic for Tesoro.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, balance reconstruction, and pivot
//! aggregation live here.
//!
//! # Modules
//!
//! - `ledger` - Movements and running balance reconstruction
//! - `currency` - Normalization into the reporting currency
//! - `pivot` - Column axes and the sparse aggregate value map
//! - `report` - Report assembly and flat materialization
//! - `fetch` - Fact retriever interface to the ledger store
//! - `engine` - Fetch/compute cycles guarded by generation tokens

pub mod currency;
pub mod engine;
pub mod fetch;
pub mod ledger;
pub mod pivot;
pub mod report;
