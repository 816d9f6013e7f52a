//! Fact retriever interface to the ledger store.
//!
//! The core never talks to a database directly; it consumes paginated
//! streams of movements plus small reference sets (accounts, categories,
//! FX rates) through the [`FactRetriever`] trait.

pub mod memory;
pub mod retriever;

pub use memory::{LedgerSnapshot, MemoryRetriever};
pub use retriever::{
    drain_movements, drain_opening_movements, FactRetriever, FetchError, MovementFilter,
};
