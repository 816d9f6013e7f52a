//! Immutable report request values.
//!
//! A request carries every filter of one compute cycle as an explicit
//! value; there is no shared mutable filter state between cycles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tesoro_shared::types::{AccountId, CategoryId};

use super::error::ReportError;
use crate::ledger::Movement;

/// Optional reporting window over movement dates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DateWindow {
    /// Inclusive window start; movements before it only seed the opening
    /// balance.
    pub from: Option<NaiveDate>,
    /// Inclusive window end.
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    /// Validates that the window is not inverted.
    pub fn validate(&self) -> Result<(), ReportError> {
        match (self.from, self.to) {
            (Some(start), Some(end)) if start > end => {
                Err(ReportError::InvalidDateRange { start, end })
            }
            _ => Ok(()),
        }
    }

    /// Returns true when the date falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// All filters of one fetch/compute cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Accounts to report on; empty means all active accounts.
    pub accounts: Vec<AccountId>,
    /// Categories to display; empty means all. This is a *display* filter:
    /// balance reconstruction always runs over the unfiltered history.
    pub categories: Vec<CategoryId>,
    /// Reporting window.
    pub window: DateWindow,
}

impl ReportRequest {
    /// Returns true when the movement's category passes the display filter.
    #[must_use]
    pub fn matches_category(&self, movement: &Movement) -> bool {
        self.categories.is_empty()
            || movement
                .category_id
                .is_some_and(|id| self.categories.contains(&id))
    }
}
