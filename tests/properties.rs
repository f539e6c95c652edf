//! Property-based tests using proptest.
use proptest::prelude::*;
use typed_collection::{Collection, Value};

// ============================================================================
// STRATEGIES
// ============================================================================

fn ints_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-20i64..20, 0..24)
}

fn words_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-c]{1,2}").unwrap(), 0..12)
}

fn ints(xs: &[i64]) -> Collection {
    Collection::new("integer", xs.iter().copied()).unwrap()
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn group_places_every_element_exactly_once(xs in ints_strategy()) {
        let c = ints(&xs);
        let negative = |x: &Value, _: usize| x.as_i64().unwrap() < 0;
        let even = |x: &Value, _: usize| x.as_i64().unwrap() % 2 == 0;
        let buckets = c.group(&[&negative, &even]).unwrap();

        prop_assert_eq!(buckets.len(), 3);
        prop_assert_eq!(buckets.iter().map(Collection::count).sum::<usize>(), xs.len());
        let mut regrouped: Vec<i64> = buckets.iter().flat_map(|b| b.iter().filter_map(Value::as_i64)).collect();
        let mut original = xs.clone();
        regrouped.sort_unstable();
        original.sort_unstable();
        prop_assert_eq!(regrouped, original);
        prop_assert!(buckets[0].all(|x, i| negative(x, i)));
        prop_assert!(buckets[1].all(|x, i| !negative(x, i) && even(x, i)));
    }

    #[test]
    fn unordered_equality_is_symmetric(a in words_strategy(), b in words_strategy()) {
        let ca = Collection::new("string", a.iter().map(String::as_str)).unwrap();
        let cb = Collection::new("string", b.iter().map(String::as_str)).unwrap();
        prop_assert_eq!(ca.is_equal_collection(&cb, false), cb.is_equal_collection(&ca, false));
    }

    #[test]
    fn unordered_equality_accepts_any_permutation(mut xs in ints_strategy(), seed in any::<u64>()) {
        let a = ints(&xs);
        if !xs.is_empty() {
            let k = (seed % xs.len() as u64) as usize;
            xs.rotate_left(k);
        }
        let b = ints(&xs);
        prop_assert!(a.is_equal_collection(&b, false));
    }

    #[test]
    fn slice_stays_within_bounds(xs in ints_strategy(), offset in -30isize..30, length in proptest::option::of(-30isize..30)) {
        let c = ints(&xs);
        let sliced = c.slice(offset, length).unwrap();
        prop_assert!(sliced.count() <= xs.len());
        // the slice is a contiguous run of the original
        let got: Vec<i64> = sliced.iter().filter_map(Value::as_i64).collect();
        prop_assert!(got.is_empty() || xs.windows(got.len()).any(|w| w == got.as_slice()));
    }

    #[test]
    fn mixed_input_never_sneaks_past_the_guard(xs in ints_strategy(), bad_at in 0usize..24) {
        let mut values: Vec<Value> = xs.iter().copied().map(Value::from).collect();
        let at = bad_at.min(values.len());
        values.insert(at, Value::from("intruder"));
        prop_assert!(Collection::new("integer", values).is_err());

        let mut c = ints(&[]);
        let _ = c.push_elements(xs.iter().copied().map(Value::from).chain([Value::from(0.5)]));
        prop_assert!(c.iter().all(|x| c.descriptor().is_valid(x)));
        prop_assert_eq!(c.count(), xs.len());
    }

    #[test]
    fn fold_right_mirrors_fold_left(xs in ints_strategy()) {
        let c = ints(&xs);
        let left = c.fold_left(Vec::new(), |mut acc, _, i| { acc.push(i); acc });
        let mut right = c.fold_right(Vec::new(), |mut acc, _, i| { acc.push(i); acc });
        right.reverse();
        prop_assert_eq!(left, right);
    }
}
