//! Column axis derivation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fact::{GroupKey, PivotFact};

/// The full column hierarchy of one report.
///
/// Rebuilt from scratch whenever the underlying fact set changes; it is
/// never incrementally patched. Only combinations present in the facts
/// appear, so there are no empty placeholder columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisTree {
    /// Currency groups in display order.
    pub currencies: Vec<CurrencyAxis>,
}

/// One currency group of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyAxis {
    /// ISO 4217 currency code.
    pub code: String,
    /// Bank/company groups within this currency, ordered alphabetically
    /// by bank + company.
    pub groups: Vec<GroupAxis>,
}

/// One bank/company group of columns within a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAxis {
    /// The bank/company pair.
    pub key: GroupKey,
    /// Distinct dates present, ascending. The rendered group is terminated
    /// by one synthetic total column that is not part of this list.
    pub dates: Vec<NaiveDate>,
}

/// One leaf column of the flattened header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisColumn {
    /// A single date cell within a currency/group.
    Date {
        /// Currency code.
        currency: String,
        /// Bank/company group.
        group: GroupKey,
        /// Cell date.
        date: NaiveDate,
    },
    /// The synthetic total terminating one bank/company group.
    GroupTotal {
        /// Currency code.
        currency: String,
        /// Bank/company group.
        group: GroupKey,
    },
    /// The reporting-currency grand total appended after all currencies.
    GrandTotal,
}

impl AxisTree {
    /// Returns true when no facts produced any column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Flattens the hierarchy into leaf columns in render order: each
    /// group's dates followed by its total, and one grand-total column at
    /// the very end.
    #[must_use]
    pub fn columns(&self) -> Vec<AxisColumn> {
        let mut columns = Vec::new();
        for currency in &self.currencies {
            for group in &currency.groups {
                for date in &group.dates {
                    columns.push(AxisColumn::Date {
                        currency: currency.code.clone(),
                        group: group.key.clone(),
                        date: *date,
                    });
                }
                columns.push(AxisColumn::GroupTotal {
                    currency: currency.code.clone(),
                    group: group.key.clone(),
                });
            }
        }
        columns.push(AxisColumn::GrandTotal);
        columns
    }
}

/// Derives the column hierarchy from the facts at hand.
///
/// Currencies are ordered by the preference list first, then alphabetically
/// for any code not in the list; unknown codes never fail the builder.
#[must_use]
pub fn build_axes(facts: &[PivotFact], preferred: &[String]) -> AxisTree {
    let mut per_currency: BTreeMap<String, BTreeMap<GroupKey, BTreeSet<NaiveDate>>> =
        BTreeMap::new();
    for fact in facts {
        per_currency
            .entry(fact.currency.clone())
            .or_default()
            .entry(fact.group.clone())
            .or_default()
            .insert(fact.date);
    }

    let mut codes: Vec<String> = per_currency.keys().cloned().collect();
    codes.sort_by_key(|code| currency_rank(code, preferred));

    let currencies = codes
        .into_iter()
        .map(|code| {
            let mut groups: Vec<GroupAxis> = per_currency
                .remove(&code)
                .unwrap_or_default()
                .into_iter()
                .map(|(key, dates)| GroupAxis {
                    key,
                    dates: dates.into_iter().collect(),
                })
                .collect();
            groups.sort_by_key(|group| group.key.sort_label());
            CurrencyAxis { code, groups }
        })
        .collect();

    AxisTree { currencies }
}

/// Preference-list rank for a currency code; codes outside the list sort
/// after all listed codes, alphabetically.
fn currency_rank(code: &str, preferred: &[String]) -> (usize, String) {
    match preferred.iter().position(|p| p == code) {
        Some(index) => (index, String::new()),
        None => (preferred.len(), code.to_string()),
    }
}
