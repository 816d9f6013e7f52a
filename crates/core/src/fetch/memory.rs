//! In-memory fact retriever.
//!
//! Backs the CLI driver (which loads a JSON snapshot) and the engine tests.
//! Behaves like the real store: filtered, paginated, unordered.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesoro_shared::types::AccountId;
use tesoro_shared::types::{PageRequest, PageResponse};

use super::retriever::{FactRetriever, FetchError, MovementFilter};
use crate::ledger::{Account, Category, Movement};

/// A complete in-memory copy of the ledger facts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// All movements.
    pub movements: Vec<Movement>,
    /// All accounts.
    pub accounts: Vec<Account>,
    /// All categories.
    pub categories: Vec<Category>,
    /// Live FX rates, units per reporting unit.
    pub fx_rates: HashMap<String, Decimal>,
}

/// Fact retriever serving from a [`LedgerSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct MemoryRetriever {
    snapshot: LedgerSnapshot,
}

impl MemoryRetriever {
    /// Creates a retriever over the given snapshot.
    #[must_use]
    pub fn new(snapshot: LedgerSnapshot) -> Self {
        Self { snapshot }
    }

    fn paginate(movements: Vec<Movement>, page: PageRequest) -> PageResponse<Movement> {
        let total = movements.len() as u64;
        let start = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let data: Vec<Movement> = movements
            .into_iter()
            .skip(start)
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();
        PageResponse::new(data, page.page, page.per_page, total)
    }
}

impl FactRetriever for MemoryRetriever {
    async fn fetch_movements(
        &self,
        filter: &MovementFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Movement>, FetchError> {
        let matching: Vec<Movement> = self
            .snapshot
            .movements
            .iter()
            .filter(|m| filter.accounts.is_empty() || filter.accounts.contains(&m.account_id))
            .filter(|m| {
                filter.categories.is_empty()
                    || m.category_id
                        .is_some_and(|id| filter.categories.contains(&id))
            })
            .filter(|m| filter.date_from.is_none_or(|from| m.date >= from))
            .filter(|m| filter.date_to.is_none_or(|to| m.date <= to))
            .cloned()
            .collect();
        Ok(Self::paginate(matching, page))
    }

    async fn fetch_opening_movements(
        &self,
        accounts: &[AccountId],
        before: NaiveDate,
        page: PageRequest,
    ) -> Result<PageResponse<Movement>, FetchError> {
        let matching: Vec<Movement> = self
            .snapshot
            .movements
            .iter()
            .filter(|m| accounts.is_empty() || accounts.contains(&m.account_id))
            .filter(|m| m.date < before)
            .cloned()
            .collect();
        Ok(Self::paginate(matching, page))
    }

    async fn fetch_fx_rates(&self) -> Result<HashMap<String, Decimal>, FetchError> {
        Ok(self.snapshot.fx_rates.clone())
    }

    async fn fetch_accounts(&self) -> Result<Vec<Account>, FetchError> {
        Ok(self.snapshot.accounts.clone())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        Ok(self.snapshot.categories.clone())
    }
}
