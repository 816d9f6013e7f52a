//! Property-based tests for the pivot value map.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tesoro_shared::types::CategoryId;
use uuid::Uuid;

use super::axes::build_axes;
use super::fact::{GroupKey, PivotFact};
use super::values::ValueMap;

/// Strategy for a fact drawn from a small dimension pool so cells collide.
fn fact_strategy() -> impl Strategy<Value = PivotFact> {
    (
        prop::option::of(0u8..3),
        0u8..3,
        0u8..3,
        1u32..15,
        -100_000i64..100_000,
    )
        .prop_map(|(category, currency, bank, day, net)| PivotFact {
            category_id: category.map(|n| CategoryId::from_uuid(Uuid::from_u128(u128::from(n)))),
            currency: ["USD", "EUR", "MXN"][usize::from(currency)].to_string(),
            group: GroupKey {
                bank: ["Norte", "Andino", "Pacifico"][usize::from(bank)].to_string(),
                company: "Holdings".to_string(),
            },
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            net: Decimal::new(net, 2),
        })
}

fn facts_strategy() -> impl Strategy<Value = Vec<PivotFact>> {
    prop::collection::vec(fact_strategy(), 0..60)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Rebuilding axes and values from the same snapshot yields identical
    /// structures and identical lookups.
    #[test]
    fn prop_rebuild_is_idempotent(facts in facts_strategy()) {
        let preferred = vec!["USD".to_string()];
        prop_assert_eq!(build_axes(&facts, &preferred), build_axes(&facts, &preferred));

        let first = ValueMap::build(&facts);
        let second = ValueMap::build(&facts);
        for fact in &facts {
            prop_assert_eq!(
                first.get(fact.category_id, &fact.currency, &fact.group, Some(fact.date)),
                second.get(fact.category_id, &fact.currency, &fact.group, Some(fact.date))
            );
        }
    }

    /// For every group, the total column equals the sum of its date cells.
    #[test]
    fn prop_group_total_equals_sum_of_dates(facts in facts_strategy()) {
        let preferred = vec!["USD".to_string()];
        let tree = build_axes(&facts, &preferred);
        let map = ValueMap::build(&facts);

        for category in map.categories() {
            for currency in &tree.currencies {
                for group in &currency.groups {
                    let by_dates: Decimal = group
                        .dates
                        .iter()
                        .map(|date| map.get(category, &currency.code, &group.key, Some(*date)))
                        .sum();
                    prop_assert_eq!(
                        map.get(category, &currency.code, &group.key, None),
                        by_dates
                    );
                }
            }
        }
    }

    /// Every cell value equals the sum of the facts that share its key.
    #[test]
    fn prop_cells_accumulate_facts(facts in facts_strategy()) {
        let map = ValueMap::build(&facts);

        for fact in &facts {
            let expected: Decimal = facts
                .iter()
                .filter(|other| {
                    other.category_id == fact.category_id
                        && other.currency == fact.currency
                        && other.group == fact.group
                        && other.date == fact.date
                })
                .map(|other| other.net)
                .sum();
            prop_assert_eq!(
                map.get(fact.category_id, &fact.currency, &fact.group, Some(fact.date)),
                expected
            );
        }
    }
}
