//! Report assembly and flat materialization.
//!
//! Composes the axis tree, the value map, and the currency normalizer into
//! row/column cell values and grand totals, plus the flat row-major table
//! consumed by export collaborators.

pub mod assembler;
pub mod error;
pub mod request;

#[cfg(test)]
mod tests;

pub use assembler::{MaterializedReport, PivotReport, ReportRow};
pub use error::ReportError;
pub use request::{DateWindow, ReportRequest};
