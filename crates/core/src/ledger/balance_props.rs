//! Property-based tests for balance reconstruction.

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tesoro_shared::types::{AccountId, MovementId};

use super::balance::reconstruct;
use super::movement::{Account, Movement};

/// Strategy for a movement amount in cents (positive, two decimals).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for one movement of the given account.
fn movement_strategy(account_id: AccountId) -> impl Strategy<Value = Movement> {
    (
        amount_strategy(),
        any::<bool>(),
        0u32..120,
        prop::option::of(0i64..1000),
    )
        .prop_map(move |(amount, is_credit, day_offset, reference)| {
            let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            Movement {
                id: MovementId::new(),
                account_id,
                date: base + chrono::Days::new(u64::from(day_offset)),
                debit: (!is_credit).then_some(amount),
                credit: is_credit.then_some(amount),
                external_reference: reference,
                category_id: None,
                description: None,
            }
        })
}

fn movements_strategy(account_id: AccountId, max: usize) -> impl Strategy<Value = Vec<Movement>> {
    prop::collection::vec(movement_strategy(account_id), 1..=max)
}

fn single_account_map(account_id: AccountId) -> HashMap<AccountId, Account> {
    HashMap::from([(
        account_id,
        Account {
            id: account_id,
            currency: "USD".to_string(),
            bank: "Norte".to_string(),
            company: "Holdings".to_string(),
            active: true,
        },
    )])
}

/// Balance recorded for the chronologically last movement of an account.
fn final_balance(movements: &[Movement], accounts: &HashMap<AccountId, Account>) -> Decimal {
    let snapshot = reconstruct(movements, &[], accounts);
    let last = movements
        .iter()
        .max_by_key(|m| m.sort_key())
        .expect("at least one movement");
    snapshot.balance_of(last.id).expect("balance present")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The balance of the last movement in total order equals the sum of
    /// `credit - debit` over every movement of the account.
    #[test]
    fn prop_final_balance_equals_sum_of_nets(
        movements in movements_strategy(AccountId::from_uuid(uuid::Uuid::nil()), 20),
    ) {
        let account_id = movements[0].account_id;
        let accounts = single_account_map(account_id);

        let expected: Decimal = movements.iter().map(Movement::net).sum();
        prop_assert_eq!(final_balance(&movements, &accounts), expected);
    }

    /// Opening balance plus the windowed sum equals the unwindowed final
    /// balance, for any window split point.
    #[test]
    fn prop_opening_plus_window_equals_unwindowed(
        movements in movements_strategy(AccountId::from_uuid(uuid::Uuid::nil()), 20),
        split_day in 0u32..120,
    ) {
        let account_id = movements[0].account_id;
        let accounts = single_account_map(account_id);
        let window_start =
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(u64::from(split_day));

        let opening: Vec<Movement> = movements
            .iter()
            .filter(|m| m.date < window_start)
            .cloned()
            .collect();
        let windowed: Vec<Movement> = movements
            .iter()
            .filter(|m| m.date >= window_start)
            .cloned()
            .collect();

        let snapshot = reconstruct(&windowed, &opening, &accounts);
        let windowed_sum: Decimal = windowed.iter().map(Movement::net).sum();
        let unwindowed: Decimal = movements.iter().map(Movement::net).sum();

        prop_assert_eq!(snapshot.opening_balance(account_id) + windowed_sum, unwindowed);
    }

    /// Reconstruction is deterministic and independent of input order.
    #[test]
    fn prop_input_order_is_irrelevant(
        movements in movements_strategy(AccountId::from_uuid(uuid::Uuid::nil()), 20),
    ) {
        let account_id = movements[0].account_id;
        let accounts = single_account_map(account_id);

        let forward = reconstruct(&movements, &[], &accounts);
        let mut reversed = movements.clone();
        reversed.reverse();
        let backward = reconstruct(&reversed, &[], &accounts);

        for movement in &movements {
            prop_assert_eq!(forward.balance_of(movement.id), backward.balance_of(movement.id));
        }
    }

    /// Every reportable movement receives a balance.
    #[test]
    fn prop_every_movement_has_a_balance(
        movements in movements_strategy(AccountId::from_uuid(uuid::Uuid::nil()), 20),
    ) {
        let account_id = movements[0].account_id;
        let accounts = single_account_map(account_id);
        let snapshot = reconstruct(&movements, &[], &accounts);

        prop_assert_eq!(snapshot.len(), movements.len());
        prop_assert_eq!(snapshot.skipped(), 0);
    }
}
