//! Property-based tests for currency normalization.

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::rates::RateTable;

/// Strategy for amounts with up to two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for positive rates with up to four decimal places.
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|n| Decimal::new(n, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting an amount already in the reporting currency is a no-op.
    #[test]
    fn prop_reporting_currency_identity(amount in amount_strategy()) {
        let table = RateTable::new("USD", HashMap::new());
        let converted = table.to_reporting(amount, "USD");
        prop_assert_eq!(converted.amount, amount);
        prop_assert!(converted.is_converted);
    }

    /// `to_reporting(x, C) * rate` recovers x within rounding tolerance.
    #[test]
    fn prop_round_trip_within_tolerance(
        amount in amount_strategy(),
        rate in rate_strategy(),
    ) {
        let table = RateTable::new("USD", HashMap::from([("MXN".to_string(), rate)]));
        let converted = table.to_reporting(amount, "MXN");

        prop_assert!(converted.is_converted);
        let recovered = converted.amount * rate;
        let tolerance = Decimal::new(1, 2);
        prop_assert!((recovered - amount).abs() <= tolerance);
    }

    /// A missing rate always yields the original amount, flagged.
    #[test]
    fn prop_missing_rate_is_flagged_noop(amount in amount_strategy()) {
        let table = RateTable::new("USD", HashMap::new());
        let converted = table.to_reporting(amount, "XYZ");
        prop_assert_eq!(converted.amount, amount);
        prop_assert!(!converted.is_converted);
    }
}
