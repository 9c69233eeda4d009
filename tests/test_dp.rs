use proptest::prelude::*;
use rstest::rstest;

use algokit::dp::{
    climb_stairs, climb_stairs_memo, climb_stairs_rolling, climb_stairs_tab, fibonacci,
    fibonacci_memo, fibonacci_rolling, fibonacci_tab, house_robber, knapsack, knapsack_memo,
    knapsack_rolling, knapsack_selection, knapsack_tab, max_subarray, max_subarray_memo,
    max_subarray_or_empty, max_subarray_span, DpStrategy, Span,
};
use algokit::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const STRATEGIES: [DpStrategy; 3] = [
    DpStrategy::Memoized,
    DpStrategy::Tabulated,
    DpStrategy::Rolling,
];

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(2, 1)]
#[case(10, 55)]
#[case(50, 12_586_269_025)]
fn test_fibonacci(#[case] n: i64, #[case] expected: u128) {
    for strategy in STRATEGIES {
        assert_eq!(fibonacci(n, strategy).unwrap(), expected);
    }
}

#[rstest]
fn test_fibonacci_forms_agree_up_to_30() {
    for n in 0..=30 {
        let memo = fibonacci_memo(n).unwrap();
        assert_eq!(memo, fibonacci_tab(n).unwrap(), "n = {n}");
        assert_eq!(memo, fibonacci_rolling(n).unwrap(), "n = {n}");
    }
}

#[rstest]
#[case(-1)]
#[case(-100)]
fn test_negative_n_is_invalid_input(#[case] n: i64) {
    for strategy in STRATEGIES {
        assert!(fibonacci(n, strategy).unwrap_err().is_invalid_input());
        assert!(climb_stairs(n, strategy).unwrap_err().is_invalid_input());
    }
    assert!(climb_stairs(0, DpStrategy::Tabulated).unwrap_err().is_invalid_input());
}

#[rstest]
fn test_climb_stairs_forms_agree() {
    for n in 1..=40 {
        let memo = climb_stairs_memo(n).unwrap();
        assert_eq!(memo, climb_stairs_tab(n).unwrap());
        assert_eq!(memo, climb_stairs_rolling(n).unwrap());
        assert_eq!(memo, fibonacci_rolling(n + 1).unwrap());
    }
}

#[rstest]
#[case(&[2, 7, 9, 3, 1], 12)]
#[case(&[1, 2, 3, 1], 4)]
#[case(&[], 0)]
#[case(&[5], 5)]
#[case(&[2, 1, 1, 2], 4)]
fn test_house_robber(#[case] values: &[i64], #[case] expected: i64) {
    for strategy in STRATEGIES {
        assert_eq!(house_robber(values, strategy).unwrap(), expected);
    }
}

#[rstest]
fn test_house_robber_rejects_negative_values() {
    for strategy in STRATEGIES {
        assert!(house_robber(&[1, -2, 3], strategy).unwrap_err().is_invalid_input());
    }
}

#[rstest]
fn test_house_robber_at_i64_limit() {
    for strategy in STRATEGIES {
        assert_eq!(house_robber(&[i64::MAX, 0], strategy).unwrap(), i64::MAX);
        assert_eq!(house_robber(&[0, i64::MAX, 0], strategy).unwrap(), i64::MAX);
        let err = house_robber(&[i64::MAX, 0, 1], strategy).unwrap_err();
        assert!(err.is_invalid_input());
    }
}

#[rstest]
#[case(&[-2, 1, -3, 4, -1, 2, 1, -5, 4], Some(6))]
#[case(&[-3, -1, -2], Some(-1))]
#[case(&[5], Some(5))]
#[case(&[], None)]
#[case(&[i64::MIN, -1], Some(-1))]
#[case(&[i64::MIN, i64::MIN], Some(i64::MIN))]
#[case(&[i64::MAX, i64::MIN, i64::MAX], Some(i64::MAX))]
#[case(&[-1, i64::MAX, -1], Some(i64::MAX))]
#[case(&[i64::MAX, 1], Some(i64::MAX))]
fn test_max_subarray(#[case] seq: &[i64], #[case] expected: Option<i64>) {
    assert_eq!(max_subarray(seq), expected);
    assert_eq!(max_subarray_memo(seq), expected);
}

#[rstest]
fn test_max_subarray_variants() {
    assert_eq!(max_subarray_or_empty(&[-3, -1, -2]), 0);
    assert_eq!(max_subarray_or_empty(&[]), 0);
    assert_eq!(max_subarray_or_empty(&[-1, 3]), 3);
    assert_eq!(
        max_subarray_span(&[-2, 1, -3, 4, -1, 2, 1, -5, 4]),
        Some(Span {
            sum: 6,
            start: 3,
            end: 6,
        })
    );
    assert_eq!(
        max_subarray_span(&[i64::MIN, -1, i64::MIN]),
        Some(Span {
            sum: -1,
            start: 1,
            end: 1,
        })
    );
}

#[rstest]
fn test_knapsack() {
    let (weights, values) = ([1, 3, 4, 5], [1, 4, 5, 7]);
    for strategy in STRATEGIES {
        assert_eq!(knapsack(&weights, &values, 7, strategy).unwrap(), 9);
        assert_eq!(knapsack(&weights, &values, 0, strategy).unwrap(), 0);
        assert_eq!(knapsack(&[], &[], 10, strategy).unwrap(), 0);
    }
    assert_eq!(knapsack_selection(&weights, &values, 7).unwrap(), (9, vec![1, 2]));
}

#[rstest]
#[case(&[1, 2], &[1], 3)]
#[case(&[1, 2], &[1, 2], -1)]
#[case(&[1, -2], &[1, 2], 3)]
#[case(&[1, 2], &[1, -2], 3)]
#[case(&[1, 1], &[i64::MAX, 1], 2)]
fn test_knapsack_rejects_malformed_input(
    #[case] weights: &[i64],
    #[case] values: &[i64],
    #[case] capacity: i64,
) {
    for strategy in STRATEGIES {
        let err = knapsack(weights, values, capacity, strategy).unwrap_err();
        assert!(err.is_invalid_input());
    }
    let err = knapsack_selection(weights, values, capacity).unwrap_err();
    assert!(err.is_invalid_input());
}

#[rstest]
fn test_knapsack_at_i64_limit() {
    for strategy in STRATEGIES {
        let best = knapsack(&[1, 1], &[i64::MAX - 1, 1], 2, strategy).unwrap();
        assert_eq!(best, i64::MAX);
    }
}

fn knapsack_input() -> impl Strategy<Value = (Vec<i64>, Vec<i64>, i64)> {
    (0usize..8).prop_flat_map(|items| {
        (
            prop::collection::vec(0i64..12, items),
            prop::collection::vec(0i64..30, items),
            0i64..25,
        )
    })
}

proptest! {
    #[test]
    fn prop_knapsack_forms_agree_and_selection_fits(
        (weights, values, capacity) in knapsack_input()
    ) {
        let memo = knapsack_memo(&weights, &values, capacity).unwrap();
        prop_assert_eq!(memo, knapsack_tab(&weights, &values, capacity).unwrap());
        prop_assert_eq!(memo, knapsack_rolling(&weights, &values, capacity).unwrap());

        let (best, chosen) = knapsack_selection(&weights, &values, capacity).unwrap();
        prop_assert_eq!(best, memo);
        prop_assert!(chosen.iter().map(|&i| weights[i]).sum::<i64>() <= capacity);
        prop_assert_eq!(chosen.iter().map(|&i| values[i]).sum::<i64>(), best);
    }

    #[test]
    fn prop_house_robber_forms_agree(values in prop::collection::vec(0i64..100, 0..40)) {
        let memo = house_robber(&values, DpStrategy::Memoized).unwrap();
        prop_assert_eq!(memo, house_robber(&values, DpStrategy::Tabulated).unwrap());
        prop_assert_eq!(memo, house_robber(&values, DpStrategy::Rolling).unwrap());
    }

    #[test]
    fn prop_kadane_matches_brute_force(seq in prop::collection::vec(-50i64..50, 1..40)) {
        let brute = (0..seq.len())
            .flat_map(|i| (i..seq.len()).map(move |j| (i, j)))
            .map(|(i, j)| seq[i..=j].iter().sum::<i64>())
            .max();
        prop_assert_eq!(max_subarray(&seq), brute);
        prop_assert_eq!(max_subarray_memo(&seq), brute);
    }

    #[test]
    fn prop_kadane_never_overflows(seq in prop::collection::vec(any::<i64>(), 1..20)) {
        let brute = (0..seq.len())
            .flat_map(|i| (i..seq.len()).map(move |j| (i, j)))
            .map(|(i, j)| seq[i..=j].iter().map(|&x| i128::from(x)).sum::<i128>())
            .max()
            .map(|best| i64::try_from(best).unwrap_or(i64::MAX));
        prop_assert_eq!(max_subarray(&seq), brute);
        prop_assert_eq!(max_subarray_memo(&seq), brute);
    }
}
