//! Fetch/compute cycles guarded by generation tokens.
//!
//! Every filter change starts a new cycle: fetch an immutable fact
//! snapshot, compute balances and the pivot cube into fresh structures,
//! then apply the result only if no newer cycle has been issued since.
//! Nothing is ever patched in place, so no fine-grained locking is needed.

pub mod state;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use tesoro_shared::config::{FetchConfig, ReportingConfig};
use tesoro_shared::types::AccountId;
use tracing::{debug, info};

use crate::currency::RateTable;
use crate::fetch::{drain_movements, drain_opening_movements, FactRetriever, MovementFilter};
use crate::ledger::{reconstruct, Account, BalanceSnapshot, Movement};
use crate::pivot::facts_from_movements;
use crate::report::{PivotReport, ReportError, ReportRequest};

pub use state::{CycleState, Generation};

/// One displayed ledger row: a movement and its reconstructed balance.
#[derive(Debug, Clone, Copy)]
pub struct LedgerRow<'a> {
    /// The movement.
    pub movement: &'a Movement,
    /// True bank balance as of and including this movement.
    pub balance: Decimal,
}

/// The immutable result of one completed cycle.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    /// Token of the cycle that produced this result.
    pub generation: Generation,
    /// The request this result answers.
    pub request: ReportRequest,
    /// Window movements in display order (per account, total order).
    pub movements: Vec<Movement>,
    /// Reconstructed balances over the full (unfiltered) history.
    pub balances: BalanceSnapshot,
    /// The assembled pivot report.
    pub report: PivotReport,
}

impl ReportOutcome {
    /// Ledger rows for display, with the request's category filter applied.
    ///
    /// Filtering here only selects which `(movement, balance)` pairs are
    /// shown; the balances themselves were reconstructed from the full
    /// history and are never recomputed for a subset.
    #[must_use]
    pub fn ledger_rows(&self) -> Vec<LedgerRow<'_>> {
        self.movements
            .iter()
            .filter(|movement| self.request.matches_category(movement))
            .filter_map(|movement| {
                let balance = self.balances.balance_of(movement.id)?;
                Some(LedgerRow { movement, balance })
            })
            .collect()
    }
}

/// Drives fetch/compute cycles against a fact retriever.
///
/// Cycles may be started concurrently (a user changing filters while an
/// older fetch is in flight); the newest issued cycle always wins, even
/// when an older cycle's I/O completes later. Superseded results are
/// discarded at the generation-token check, cooperatively.
pub struct ReportEngine<R> {
    retriever: R,
    reporting: ReportingConfig,
    fetch: FetchConfig,
    issued: AtomicU64,
    state: Mutex<CycleState>,
    latest: Mutex<Option<Arc<ReportOutcome>>>,
}

impl<R: FactRetriever> ReportEngine<R> {
    /// Creates an engine over the given retriever and configuration.
    #[must_use]
    pub fn new(retriever: R, reporting: ReportingConfig, fetch: FetchConfig) -> Self {
        Self {
            retriever,
            reporting,
            fetch,
            issued: AtomicU64::new(0),
            state: Mutex::new(CycleState::Idle),
            latest: Mutex::new(None),
        }
    }

    /// Issues the next generation token. The cycle that holds the highest
    /// issued token is the only one whose result will be applied.
    pub fn begin(&self) -> Generation {
        Generation(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// State of the most recently issued cycle.
    pub fn state(&self) -> CycleState {
        *self.state.lock().expect("state lock poisoned")
    }

    /// The currently applied result, if any cycle has completed.
    pub fn latest(&self) -> Option<Arc<ReportOutcome>> {
        self.latest.lock().expect("latest lock poisoned").clone()
    }

    /// Runs one full cycle for the request.
    ///
    /// Returns `Ok(None)` when the cycle was superseded before completion;
    /// that is not an error, the newer cycle's result stands.
    pub async fn run(
        &self,
        request: ReportRequest,
    ) -> Result<Option<Arc<ReportOutcome>>, ReportError> {
        let token = self.begin();
        self.run_with_token(token, request).await
    }

    /// Runs a cycle under an already-issued token.
    pub async fn run_with_token(
        &self,
        token: Generation,
        request: ReportRequest,
    ) -> Result<Option<Arc<ReportOutcome>>, ReportError> {
        request.window.validate()?;
        self.transition_if_current(token, CycleState::Fetching(token));

        let outcome = match self.fetch_and_compute(token, request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.transition_if_current(token, CycleState::Failed(token));
                return Err(err);
            }
        };

        let outcome = Arc::new(outcome);
        if !self.apply_if_newest(&outcome) {
            debug!(%token, "cycle superseded, result discarded");
            return Ok(None);
        }
        self.transition_if_current(token, CycleState::Ready(token));
        info!(
            %token,
            movements = outcome.movements.len(),
            skipped = outcome.balances.skipped(),
            "report cycle applied"
        );
        Ok(Some(outcome))
    }

    async fn fetch_and_compute(
        &self,
        token: Generation,
        request: ReportRequest,
    ) -> Result<ReportOutcome, ReportError> {
        // The category filter stays out of the store query: balances must
        // be reconstructed from the unfiltered history, and the pivot
        // applies it in-core as a display selection.
        let filter = MovementFilter {
            accounts: request.accounts.clone(),
            categories: Vec::new(),
            date_from: request.window.from,
            date_to: request.window.to,
        };

        let page_size = self.fetch.page_size;
        let mut movements = drain_movements(&self.retriever, &filter, page_size).await?;
        let opening = match request.window.from {
            Some(from) => {
                drain_opening_movements(&self.retriever, &request.accounts, from, page_size)
                    .await?
            }
            None => Vec::new(),
        };
        let (fx_rates, accounts, categories) = tokio::try_join!(
            self.retriever.fetch_fx_rates(),
            self.retriever.fetch_accounts(),
            self.retriever.fetch_categories(),
        )?;

        self.transition_if_current(token, CycleState::Computing(token));

        let account_map: HashMap<AccountId, Account> =
            accounts.into_iter().map(|a| (a.id, a)).collect();
        let balances = reconstruct(&movements, &opening, &account_map);

        let displayed: Vec<Movement> = movements
            .iter()
            .filter(|m| request.matches_category(m))
            .cloned()
            .collect();
        let facts = facts_from_movements(&displayed, &account_map);
        let report = PivotReport::build(
            &facts,
            RateTable::new(self.reporting.currency.clone(), fx_rates),
            &categories,
            &self.reporting.preferred_currencies,
        );

        movements.sort_by_key(|m| (m.account_id, m.sort_key()));

        Ok(ReportOutcome {
            generation: token,
            request,
            movements,
            balances,
            report,
        })
    }

    fn is_current(&self, token: Generation) -> bool {
        token.0 == self.issued.load(Ordering::SeqCst)
    }

    /// Stores the outcome as the applied result, returning false when it
    /// was superseded instead.
    ///
    /// The freshness check and the store happen under one lock, and the
    /// applied generation only ever increases: a newer token can still be
    /// issued between the check and the store, but a slower older cycle can
    /// never replace a newer cycle's already-applied result.
    fn apply_if_newest(&self, outcome: &Arc<ReportOutcome>) -> bool {
        let mut latest = self.latest.lock().expect("latest lock poisoned");
        let replaced_by_newer = latest
            .as_ref()
            .is_some_and(|applied| applied.generation >= outcome.generation);
        if replaced_by_newer || !self.is_current(outcome.generation) {
            return false;
        }
        *latest = Some(Arc::clone(outcome));
        true
    }

    /// Updates the shared state only while the token is still the newest;
    /// the check runs under the state lock and a token older than the
    /// state's own generation never wins, so a superseded cycle cannot
    /// clobber the newer cycle's state.
    fn transition_if_current(&self, token: Generation, next: CycleState) {
        let mut state = self.state.lock().expect("state lock poisoned");
        let superseded = state.generation().is_some_and(|current| current > token);
        if !superseded && self.is_current(token) {
            *state = next;
        }
    }
}
