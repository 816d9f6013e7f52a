//! Tests for report assembly.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tesoro_shared::types::CategoryId;

use crate::currency::RateTable;
use crate::ledger::Category;
use crate::pivot::{AxisColumn, GroupKey, PivotFact};

use super::assembler::PivotReport;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn group(bank: &str) -> GroupKey {
    GroupKey {
        bank: bank.to_string(),
        company: "Holdings".to_string(),
    }
}

fn fact(
    category: Option<CategoryId>,
    currency: &str,
    bank: &str,
    day: u32,
    net: Decimal,
) -> PivotFact {
    PivotFact {
        category_id: category,
        currency: currency.to_string(),
        group: group(bank),
        date: date(day),
        net,
    }
}

fn rates() -> RateTable {
    // 20 MXN per USD.
    RateTable::new("USD", HashMap::from([("MXN".to_string(), dec!(20))]))
}

fn preferred() -> Vec<String> {
    vec!["USD".to_string(), "EUR".to_string(), "MXN".to_string()]
}

fn category(name: &str) -> Category {
    Category {
        id: CategoryId::new(),
        name: name.to_string(),
    }
}

#[test]
fn test_get_cell_native_and_reporting() {
    let rent = category("Rent");
    let facts = vec![fact(Some(rent.id), "MXN", "Norte", 5, dec!(200))];
    let report = PivotReport::build(&facts, rates(), &[rent.clone()], &preferred());

    let native = report.get_cell(Some(rent.id), "MXN", &group("Norte"), Some(date(5)), false);
    assert_eq!(native.amount, dec!(200));
    assert!(native.is_converted);

    let reporting = report.get_cell(Some(rent.id), "MXN", &group("Norte"), Some(date(5)), true);
    assert_eq!(reporting.amount, dec!(10));
    assert!(reporting.is_converted);
}

#[test]
fn test_get_cell_total_column() {
    let facts = vec![
        fact(None, "USD", "Norte", 5, dec!(100)),
        fact(None, "USD", "Norte", 10, dec!(5)),
    ];
    let report = PivotReport::build(&facts, rates(), &[], &preferred());

    let total = report.get_cell(None, "USD", &group("Norte"), None, false);
    assert_eq!(total.amount, dec!(105));
}

#[test]
fn test_row_total_normalizes_before_summing() {
    let rent = category("Rent");
    let facts = vec![
        fact(Some(rent.id), "USD", "Norte", 5, dec!(100)),
        fact(Some(rent.id), "MXN", "Andino", 5, dec!(200)),
    ];
    let report = PivotReport::build(&facts, rates(), &[rent.clone()], &preferred());

    // 100 USD + 200 MXN / 20 = 110 USD, never 300 of anything.
    let total = report.row_total(Some(rent.id));
    assert_eq!(total.amount, dec!(110));
    assert!(total.is_converted);
}

#[test]
fn test_row_total_flags_missing_rate() {
    let rent = category("Rent");
    let facts = vec![
        fact(Some(rent.id), "USD", "Norte", 5, dec!(100)),
        fact(Some(rent.id), "XYZ", "Andino", 5, dec!(50)),
    ];
    let report = PivotReport::build(&facts, rates(), &[rent.clone()], &preferred());

    let total = report.row_total(Some(rent.id));
    assert!(!total.is_converted);
}

#[test]
fn test_grand_total_spans_categories() {
    let rent = category("Rent");
    let facts = vec![
        fact(Some(rent.id), "USD", "Norte", 5, dec!(100)),
        fact(None, "MXN", "Norte", 5, dec!(200)),
    ];
    let report = PivotReport::build(&facts, rates(), &[rent], &preferred());

    let grand = report.grand_total();
    assert_eq!(grand.amount, dec!(110));
    assert!(grand.is_converted);
}

#[test]
fn test_materialize_row_order_and_total_row() {
    let zinc = category("Zinc");
    let alpha = category("Alpha");
    let facts = vec![
        fact(Some(zinc.id), "USD", "Norte", 5, dec!(10)),
        fact(Some(alpha.id), "USD", "Norte", 5, dec!(20)),
        fact(None, "USD", "Norte", 5, dec!(30)),
    ];
    let report = PivotReport::build(
        &facts,
        rates(),
        &[zinc.clone(), alpha.clone()],
        &preferred(),
    );

    let table = report.materialize();
    let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Alpha", "Zinc", "Uncategorized", "TOTAL"]);
}

#[test]
fn test_materialize_cells_align_with_columns() {
    let rent = category("Rent");
    let facts = vec![
        fact(Some(rent.id), "USD", "Norte", 5, dec!(100)),
        fact(Some(rent.id), "USD", "Norte", 10, dec!(-30)),
    ];
    let report = PivotReport::build(&facts, rates(), &[rent.clone()], &preferred());

    let table = report.materialize();
    assert_eq!(table.columns.len(), 4); // 2 dates + group total + grand total
    assert!(matches!(table.columns[3], AxisColumn::GrandTotal));

    let row = &table.rows[0];
    assert_eq!(row.cells.len(), table.columns.len());
    assert_eq!(row.cells[0].amount, dec!(100));
    assert_eq!(row.cells[1].amount, dec!(-30));
    assert_eq!(row.cells[2].amount, dec!(70)); // group total
    assert_eq!(row.cells[3].amount, dec!(70)); // grand total, USD already

    let total_row = table.rows.last().unwrap();
    assert_eq!(total_row.label, "TOTAL");
    assert_eq!(total_row.cells[3].amount, report.grand_total().amount);
}

#[test]
fn test_unknown_category_falls_back_to_id_label() {
    let unknown = CategoryId::new();
    let facts = vec![fact(Some(unknown), "USD", "Norte", 5, dec!(1))];
    let report = PivotReport::build(&facts, rates(), &[], &preferred());

    let table = report.materialize();
    assert_eq!(table.rows[0].label, unknown.to_string());
}
