//! Sparse aggregate store with O(1) cell lookup.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tesoro_shared::types::CategoryId;

use super::fact::{GroupKey, PivotFact};

/// Key of one pivot cell within a category row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    /// Currency code.
    pub currency: String,
    /// Bank/company group.
    pub group: GroupKey,
    /// Cell date.
    pub date: NaiveDate,
}

/// Accumulated net amounts keyed by category, then by cell.
///
/// Built once per fact snapshot and never mutated afterwards; a filter
/// change rebuilds the whole map from the new facts.
#[derive(Debug, Clone, Default)]
pub struct ValueMap {
    cells: HashMap<Option<CategoryId>, HashMap<CellKey, Decimal>>,
}

impl ValueMap {
    /// Accumulates facts into the two-level map, summing duplicates
    /// (multiple movements can contribute to the same cell).
    #[must_use]
    pub fn build(facts: &[PivotFact]) -> Self {
        let mut cells: HashMap<Option<CategoryId>, HashMap<CellKey, Decimal>> = HashMap::new();
        for fact in facts {
            let key = CellKey {
                currency: fact.currency.clone(),
                group: fact.group.clone(),
                date: fact.date,
            };
            *cells
                .entry(fact.category_id)
                .or_default()
                .entry(key)
                .or_insert(Decimal::ZERO) += fact.net;
        }
        Self { cells }
    }

    /// Value of one cell.
    ///
    /// With `date = Some(d)` this is the exact cell, zero when absent
    /// (absence means no movements occurred there, not an error). With
    /// `date = None` (the total column) it is the sum over all dates of
    /// the same (currency, group) prefix, computed by summing matching
    /// entries at call time rather than from a maintained running total.
    #[must_use]
    pub fn get(
        &self,
        category: Option<CategoryId>,
        currency: &str,
        group: &GroupKey,
        date: Option<NaiveDate>,
    ) -> Decimal {
        let Some(row) = self.cells.get(&category) else {
            return Decimal::ZERO;
        };

        match date {
            Some(date) => row
                .get(&CellKey {
                    currency: currency.to_string(),
                    group: group.clone(),
                    date,
                })
                .copied()
                .unwrap_or(Decimal::ZERO),
            None => row
                .iter()
                .filter(|(key, _)| key.currency == currency && &key.group == group)
                .map(|(_, net)| *net)
                .sum(),
        }
    }

    /// Category rows present in the facts, `None` (uncategorized) included.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<Option<CategoryId>> {
        self.cells.keys().copied().collect()
    }

    /// Returns true when the map holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
