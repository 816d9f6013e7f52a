//! Pivot report assembly.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tesoro_shared::types::CategoryId;

use crate::currency::{Converted, RateTable};
use crate::ledger::Category;
use crate::pivot::{build_axes, AxisColumn, AxisTree, GroupKey, PivotFact, ValueMap};

/// Row label used for movements without a category.
const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Row label of the synthetic total row across all categories.
const TOTAL_LABEL: &str = "TOTAL";

/// One assembled pivot report over an immutable fact snapshot.
///
/// Owns the axis tree, the value map, and the rate table; every accessor is
/// a pure read. A filter change builds an entirely new report.
#[derive(Debug, Clone)]
pub struct PivotReport {
    axes: AxisTree,
    values: ValueMap,
    rates: RateTable,
    category_names: HashMap<CategoryId, String>,
}

/// One row of the flat materialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    /// Category of this row; `None` for the uncategorized bucket and for
    /// the TOTAL row.
    pub category_id: Option<CategoryId>,
    /// Display label.
    pub label: String,
    /// Cell values aligned with the report's flat columns; date and
    /// group-total cells are native currency, the grand-total cell is in
    /// the reporting currency.
    pub cells: Vec<Converted>,
}

/// Flat row-major materialization for export collaborators (CSV/Excel/PDF).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterializedReport {
    /// Flat header columns.
    pub columns: Vec<AxisColumn>,
    /// Category rows followed by the TOTAL row.
    pub rows: Vec<ReportRow>,
}

impl PivotReport {
    /// Assembles a report from pivot facts.
    #[must_use]
    pub fn build(
        facts: &[PivotFact],
        rates: RateTable,
        categories: &[Category],
        preferred_currencies: &[String],
    ) -> Self {
        Self {
            axes: build_axes(facts, preferred_currencies),
            values: ValueMap::build(facts),
            rates,
            category_names: categories
                .iter()
                .map(|c| (c.id, c.name.clone()))
                .collect(),
        }
    }

    /// The column hierarchy, for header rendering.
    #[must_use]
    pub fn axes(&self) -> &AxisTree {
        &self.axes
    }

    /// The rate table backing reporting-currency cells.
    #[must_use]
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Value of one cell, `date = None` meaning the group's total column.
    ///
    /// With `in_reporting` the native value is normalized per cell; a zero
    /// amount is trivially converted and never flagged. Without it the
    /// native-currency value is returned as-is.
    #[must_use]
    pub fn get_cell(
        &self,
        category: Option<CategoryId>,
        currency: &str,
        group: &GroupKey,
        date: Option<NaiveDate>,
        in_reporting: bool,
    ) -> Converted {
        let native = self.values.get(category, currency, group, date);
        if !in_reporting {
            return Converted {
                amount: native,
                is_converted: true,
            };
        }
        if native.is_zero() {
            return Converted::zero();
        }
        self.rates.to_reporting(native, currency)
    }

    /// Row total of one category, always in the reporting currency.
    ///
    /// Each group-total cell is normalized before summation; raw amounts of
    /// different currencies are never added together. The result is flagged
    /// unconverted if any nonzero contributing cell had no usable rate.
    #[must_use]
    pub fn row_total(&self, category: Option<CategoryId>) -> Converted {
        self.sum_in_reporting(Some(category))
    }

    /// Grand total across all categories, in the reporting currency.
    #[must_use]
    pub fn grand_total(&self) -> Converted {
        self.sum_in_reporting(None)
    }

    /// Flattens the report into the row-major table consumed by exporters.
    ///
    /// Rows are categories ordered by name with the uncategorized bucket
    /// last, followed by one TOTAL row.
    #[must_use]
    pub fn materialize(&self) -> MaterializedReport {
        let columns = self.axes.columns();

        let mut rows: Vec<ReportRow> = self
            .ordered_categories()
            .into_iter()
            .map(|category| ReportRow {
                category_id: category,
                label: self.category_label(category),
                cells: self.row_cells(&columns, category),
            })
            .collect();
        rows.push(self.total_row(&columns));

        MaterializedReport { columns, rows }
    }

    /// Categories present, ordered by display name, uncategorized last.
    fn ordered_categories(&self) -> Vec<Option<CategoryId>> {
        let mut present: Vec<Option<CategoryId>> = self.values.categories().into_iter().collect();
        present.sort_by_key(|category| match category {
            Some(id) => (0, self.category_label(Some(*id))),
            None => (1, String::new()),
        });
        present
    }

    fn category_label(&self, category: Option<CategoryId>) -> String {
        match category {
            Some(id) => self
                .category_names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| id.to_string()),
            None => UNCATEGORIZED_LABEL.to_string(),
        }
    }

    fn row_cells(&self, columns: &[AxisColumn], category: Option<CategoryId>) -> Vec<Converted> {
        columns
            .iter()
            .map(|column| match column {
                AxisColumn::Date {
                    currency,
                    group,
                    date,
                } => self.get_cell(category, currency, group, Some(*date), false),
                AxisColumn::GroupTotal { currency, group } => {
                    self.get_cell(category, currency, group, None, false)
                }
                AxisColumn::GrandTotal => self.row_total(category),
            })
            .collect()
    }

    fn total_row(&self, columns: &[AxisColumn]) -> ReportRow {
        let categories = self.values.categories();
        let cells = columns
            .iter()
            .map(|column| match column {
                AxisColumn::Date {
                    currency,
                    group,
                    date,
                } => {
                    // Same currency within a column, safe to sum natively.
                    let amount: Decimal = categories
                        .iter()
                        .map(|category| {
                            self.values.get(*category, currency, group, Some(*date))
                        })
                        .sum();
                    Converted {
                        amount,
                        is_converted: true,
                    }
                }
                AxisColumn::GroupTotal { currency, group } => {
                    let amount: Decimal = categories
                        .iter()
                        .map(|category| self.values.get(*category, currency, group, None))
                        .sum();
                    Converted {
                        amount,
                        is_converted: true,
                    }
                }
                AxisColumn::GrandTotal => self.grand_total(),
            })
            .collect();

        ReportRow {
            category_id: None,
            label: TOTAL_LABEL.to_string(),
            cells,
        }
    }

    /// Sums every group-total cell in the reporting currency, over one
    /// category or over all of them.
    fn sum_in_reporting(&self, category: Option<Option<CategoryId>>) -> Converted {
        let categories: Vec<Option<CategoryId>> = match category {
            Some(single) => vec![single],
            None => self.values.categories().into_iter().collect(),
        };

        let mut total = Decimal::ZERO;
        let mut all_converted = true;
        for currency in &self.axes.currencies {
            for group in &currency.groups {
                for category in &categories {
                    let native = self.values.get(*category, &currency.code, &group.key, None);
                    if native.is_zero() {
                        continue;
                    }
                    let converted = self.rates.to_reporting(native, &currency.code);
                    total += converted.amount;
                    all_converted &= converted.is_converted;
                }
            }
        }

        Converted {
            amount: total,
            is_converted: all_converted,
        }
    }
}
