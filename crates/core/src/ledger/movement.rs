//! Ledger movement domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesoro_shared::types::{AccountId, CategoryId, MovementId};

/// One ledger entry: a debit or credit against an account on a date.
///
/// At most one of `debit`/`credit` is meaningfully nonzero; the net
/// contribution is always `credit - debit`. The core treats movements as
/// immutable within one computation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    /// Unique movement ID.
    pub id: MovementId,
    /// The account this movement belongs to.
    pub account_id: AccountId,
    /// Calendar day of the movement (no time component).
    pub date: NaiveDate,
    /// Debit amount, if any.
    pub debit: Option<Decimal>,
    /// Credit amount, if any.
    pub credit: Option<Decimal>,
    /// External-system correlation number, also the ordering tie-break
    /// within a date.
    pub external_reference: Option<i64>,
    /// Optional category; `None` falls into the uncategorized bucket.
    pub category_id: Option<CategoryId>,
    /// Free-text description, not relevant to any computation.
    #[serde(default)]
    pub description: Option<String>,
}

impl Movement {
    /// Net contribution of this movement to its account balance.
    ///
    /// Amounts are taken as-is; the ledger store is the source of truth,
    /// so negative or absurd values are never clamped here.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.credit.unwrap_or(Decimal::ZERO) - self.debit.unwrap_or(Decimal::ZERO)
    }

    /// Total-order key within an account: date ascending, then external
    /// reference ascending, with missing references sorted last among
    /// same-date movements. The movement id breaks any remaining tie so
    /// the order is total.
    ///
    /// The same key must drive both balance reconstruction and row display,
    /// otherwise displayed balances would not match the displayed order.
    #[must_use]
    pub fn sort_key(&self) -> (NaiveDate, i64, MovementId) {
        (
            self.date,
            self.external_reference.unwrap_or(i64::MAX),
            self.id,
        )
    }
}

/// A bank account owning movements.
///
/// An account belongs to exactly one currency, one bank, and one company.
/// Only active accounts participate in reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// ISO 4217 currency code of the account.
    pub currency: String,
    /// Bank name.
    pub bank: String,
    /// Company name.
    pub company: String,
    /// Inactive accounts are excluded from reporting.
    pub active: bool,
}

/// A movement category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
}
