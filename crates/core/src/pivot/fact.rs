//! Pre-aggregated pivot facts.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesoro_shared::types::{AccountId, CategoryId};

use crate::ledger::{Account, Movement};

/// Value-typed composite key for a bank/company column group.
///
/// Used directly as a hash-map key; never a concatenated string, which
/// would be ambiguous to parse and open to collisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    /// Bank name.
    pub bank: String,
    /// Company name.
    pub company: String,
}

impl GroupKey {
    /// Sort label for axis ordering: bank name then company name.
    #[must_use]
    pub fn sort_label(&self) -> String {
        format!("{}{}", self.bank, self.company)
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.bank, self.company)
    }
}

/// Net amount contributed by one movement to one pivot cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotFact {
    /// Category row; `None` is the uncategorized bucket.
    pub category_id: Option<CategoryId>,
    /// Currency of the owning account.
    pub currency: String,
    /// Bank/company column group of the owning account.
    pub group: GroupKey,
    /// Movement date.
    pub date: NaiveDate,
    /// Net amount (`credit - debit`).
    pub net: Decimal,
}

/// Derives one pivot fact per movement of a known, active account.
///
/// Movements of unknown or inactive accounts contribute nothing; the
/// balance pass counts and logs those, so they are silently dropped here.
/// An absent category stays `None` so the uncategorized bucket is never
/// dropped from totals.
#[must_use]
pub fn facts_from_movements(
    movements: &[Movement],
    accounts: &HashMap<AccountId, Account>,
) -> Vec<PivotFact> {
    movements
        .iter()
        .filter_map(|movement| {
            let account = accounts
                .get(&movement.account_id)
                .filter(|account| account.active)?;
            Some(PivotFact {
                category_id: movement.category_id,
                currency: account.currency.clone(),
                group: GroupKey {
                    bank: account.bank.clone(),
                    company: account.company.clone(),
                },
                date: movement.date,
                net: movement.net(),
            })
        })
        .collect()
}
