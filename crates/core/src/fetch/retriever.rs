//! The fact retriever trait and page-draining helpers.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesoro_shared::types::{AccountId, CategoryId};
use tesoro_shared::types::{PageRequest, PageResponse};
use thiserror::Error;

use crate::ledger::{Account, Category, Movement};

/// Opaque store/network failure while fetching facts.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct FetchError(pub String);

/// Filter pushed down to the ledger store when fetching movements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovementFilter {
    /// Restrict to these accounts; empty means all.
    pub accounts: Vec<AccountId>,
    /// Restrict to these categories; empty means all.
    pub categories: Vec<CategoryId>,
    /// Inclusive lower date bound.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub date_to: Option<NaiveDate>,
}

/// Paginated bulk access to ledger facts.
///
/// The source does not guarantee any ordering; the core sorts explicitly.
/// Implementations are expected to be cheap to call repeatedly, since
/// every compute cycle re-fetches its whole snapshot.
#[allow(async_fn_in_trait)]
pub trait FactRetriever {
    /// Fetches one page of movements matching the filter.
    async fn fetch_movements(
        &self,
        filter: &MovementFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Movement>, FetchError>;

    /// Fetches one page of movements of the given accounts dated strictly
    /// before `before`; used only for opening-balance computation.
    ///
    /// An empty `accounts` slice means all accounts, matching the
    /// `MovementFilter` semantics; it must never be read as "none", or
    /// every unrestricted request would see zero opening balances.
    async fn fetch_opening_movements(
        &self,
        accounts: &[AccountId],
        before: NaiveDate,
        page: PageRequest,
    ) -> Result<PageResponse<Movement>, FetchError>;

    /// Fetches the live FX rate per currency code, expressed as units of
    /// that currency per one reporting unit.
    async fn fetch_fx_rates(&self) -> Result<HashMap<String, Decimal>, FetchError>;

    /// Fetches all accounts.
    async fn fetch_accounts(&self) -> Result<Vec<Account>, FetchError>;

    /// Fetches all categories.
    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError>;
}

/// Drains every page of movements matching the filter.
///
/// Supports unbounded result sizes by walking pages until the stream's
/// last page is reached.
pub async fn drain_movements<R: FactRetriever>(
    retriever: &R,
    filter: &MovementFilter,
    page_size: u32,
) -> Result<Vec<Movement>, FetchError> {
    let mut all = Vec::new();
    let mut page = 1u32;
    loop {
        let response = retriever
            .fetch_movements(filter, PageRequest::new(page, page_size))
            .await?;
        let is_last = response.is_last();
        all.extend(response.data);
        if is_last {
            return Ok(all);
        }
        page += 1;
    }
}

/// Drains every page of pre-window movements of the given accounts.
pub async fn drain_opening_movements<R: FactRetriever>(
    retriever: &R,
    accounts: &[AccountId],
    before: NaiveDate,
    page_size: u32,
) -> Result<Vec<Movement>, FetchError> {
    let mut all = Vec::new();
    let mut page = 1u32;
    loop {
        let response = retriever
            .fetch_opening_movements(accounts, before, PageRequest::new(page, page_size))
            .await?;
        let is_last = response.is_last();
        all.extend(response.data);
        if is_last {
            return Ok(all);
        }
        page += 1;
    }
}
