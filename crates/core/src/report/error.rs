//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::fetch::FetchError;

/// Errors that can surface from a report cycle.
///
/// None of these is fatal to the process: a fetch failure means the report
/// is unavailable (no partial or stale report is shown), and everything
/// else in the core recovers by flagging or skipping.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The ledger store could not be read.
    #[error("report unavailable, fact retrieval failed: {0}")]
    Fetch(String),

    /// Invalid date window.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },
}

impl From<FetchError> for ReportError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err.to_string())
    }
}
