//! Shared types and configuration for Tesoro.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for bulk fact retrieval
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
