//! Running balance reconstruction.
//!
//! Rebuilds a per-account running balance from an unordered snapshot of
//! movements, optionally seeded with opening balances folded from the
//! movements that precede the reporting window.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tesoro_shared::types::{AccountId, MovementId};
use tracing::warn;

use super::movement::{Account, Movement};

/// Balances derived from one immutable movement snapshot.
///
/// `by_movement` maps each movement to the cumulative account balance as of
/// and including that movement. It is a pure function of the full movement
/// history of the account and never depends on which subset of movements is
/// currently displayed.
#[derive(Debug, Clone, Default)]
pub struct BalanceSnapshot {
    opening_by_account: HashMap<AccountId, Decimal>,
    by_movement: HashMap<MovementId, Decimal>,
    skipped: u64,
}

impl BalanceSnapshot {
    /// Balance of the account immediately before the reporting window.
    ///
    /// An account with no pre-window movements has opening balance zero;
    /// that is not an error.
    #[must_use]
    pub fn opening_balance(&self, account: AccountId) -> Decimal {
        self.opening_by_account
            .get(&account)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Cumulative balance as of and including the given movement.
    #[must_use]
    pub fn balance_of(&self, movement: MovementId) -> Option<Decimal> {
        self.by_movement.get(&movement).copied()
    }

    /// Number of movements excluded because they referenced an unknown or
    /// inactive account.
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Number of movements with a reconstructed balance.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_movement.len()
    }

    /// Returns true when no balances were reconstructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_movement.is_empty()
    }
}

/// Reconstructs running balances for a window of movements.
///
/// `opening_movements` must contain every movement of the same accounts
/// dated before the window start; they are folded (in any order, category
/// ignored) into the opening balance so that a balance shown inside the
/// window equals the true bank balance at that point rather than one that
/// resets at the window boundary.
///
/// Movements referencing an unknown or inactive account are excluded
/// entirely and counted, never an error. Category filtering must be applied
/// strictly *after* this pass, by selecting which `(movement, balance)`
/// pairs to display; recomputing balances over a filtered subset silently
/// corrupts the displayed history.
#[must_use]
pub fn reconstruct(
    movements: &[Movement],
    opening_movements: &[Movement],
    accounts: &HashMap<AccountId, Account>,
) -> BalanceSnapshot {
    let mut snapshot = BalanceSnapshot::default();

    for movement in opening_movements {
        if !is_reportable(movement, accounts, &mut snapshot.skipped) {
            continue;
        }
        *snapshot
            .opening_by_account
            .entry(movement.account_id)
            .or_insert(Decimal::ZERO) += movement.net();
    }

    let mut per_account: HashMap<AccountId, Vec<&Movement>> = HashMap::new();
    for movement in movements {
        if !is_reportable(movement, accounts, &mut snapshot.skipped) {
            continue;
        }
        per_account
            .entry(movement.account_id)
            .or_default()
            .push(movement);
    }

    for (account_id, mut account_movements) in per_account {
        account_movements.sort_by_key(|m| m.sort_key());

        let mut running = snapshot
            .opening_by_account
            .get(&account_id)
            .copied()
            .unwrap_or(Decimal::ZERO);
        for movement in account_movements {
            running += movement.net();
            snapshot.by_movement.insert(movement.id, running);
        }
    }

    snapshot
}

fn is_reportable(
    movement: &Movement,
    accounts: &HashMap<AccountId, Account>,
    skipped: &mut u64,
) -> bool {
    match accounts.get(&movement.account_id) {
        Some(account) if account.active => true,
        Some(_) => {
            warn!(
                movement_id = %movement.id,
                account_id = %movement.account_id,
                "movement references inactive account, excluded from reporting"
            );
            *skipped += 1;
            false
        }
        None => {
            warn!(
                movement_id = %movement.id,
                account_id = %movement.account_id,
                "movement references unknown account, excluded from reporting"
            );
            *skipped += 1;
            false
        }
    }
}
