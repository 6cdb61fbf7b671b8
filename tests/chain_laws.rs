//! Property-based tests for the chaining laws.
//!
//! Every wrapper must satisfy:
//!
//! - **Left Identity**: `success(a).bind(f)` holds what `f(a)` returns
//! - **Right Identity**: `m.bind(Ok) == m`
//! - **Associativity**: `m.bind(f).bind(g)` agrees with `m.bind(|x| f(x).and_then(g))`
//! - **Short-circuit**: a failed wrapper is unchanged by any number of binds

use monadic::chain::Chain;
use monadic::outcome::{Diagnostic, Outcome};
use proptest::prelude::*;

fn halve(value: i32) -> Result<i32, String> {
    if value % 2 == 0 {
        Ok(value / 2)
    } else {
        Err(format!("{value} is odd"))
    }
}

fn decrement(value: i32) -> Result<i32, String> {
    value.checked_sub(1).ok_or_else(|| "underflow".to_string())
}

fn failed_outcome() -> impl Strategy<Value = Outcome<i32>> {
    ".{0,16}".prop_map(|message| Outcome::failure(Diagnostic::new(message)))
}

fn any_outcome() -> impl Strategy<Value = Outcome<i32>> {
    prop_oneof![any::<i32>().prop_map(Outcome::success), failed_outcome()]
}

// =============================================================================
// Outcome<i32> Property Tests
// =============================================================================

proptest! {
    /// Left Identity: binding onto a fresh success runs the transform on the value
    #[test]
    fn prop_outcome_left_identity(value in any::<i32>()) {
        let bound = Outcome::success(value).bind(halve);
        let direct = halve(value);
        prop_assert_eq!(bound.value().copied(), direct.clone().ok());
        prop_assert_eq!(
            bound.diagnostic().map(|diagnostic| diagnostic.error().to_string()),
            direct.err()
        );
    }

    /// Right Identity: binding Ok returns the original outcome
    #[test]
    fn prop_outcome_right_identity(outcome in any_outcome()) {
        let result = outcome.clone().bind(Ok::<i32, String>);
        prop_assert_eq!(result, outcome);
    }

    /// Associativity: chaining two binds agrees with binding their composition
    #[test]
    fn prop_outcome_associativity(outcome in any_outcome()) {
        let left = outcome.clone().bind(halve).bind(decrement);
        let right = outcome.bind(|value| halve(value).and_then(decrement));
        prop_assert_eq!(left.is_ok(), right.is_ok());
        prop_assert_eq!(left.value(), right.value());
        prop_assert_eq!(
            left.diagnostic().map(|diagnostic| diagnostic.error().to_string()),
            right.diagnostic().map(|diagnostic| diagnostic.error().to_string())
        );
    }

    /// Short-circuit: repeated binds never change a failure
    #[test]
    fn prop_outcome_failure_is_absorbing(outcome in failed_outcome(), repeats in 1usize..5) {
        let mut chained = outcome.clone();
        for _ in 0..repeats {
            chained = chained.bind(halve);
        }
        prop_assert_eq!(chained, outcome);
    }

    /// Map composition: mapping twice equals mapping the composed function
    #[test]
    fn prop_outcome_map_composition(value in any::<i32>()) {
        let function1 = |n: i32| n.wrapping_add(1);
        let function2 = |n: i32| n.wrapping_mul(2);

        let left = Outcome::success(value).map(function1).map(function2);
        let right = Outcome::success(value).map(|x| function2(function1(x)));

        prop_assert_eq!(left, right);
    }
}

// =============================================================================
// Generic Chain Property Tests
// =============================================================================

fn right_identity_holds<C>(wrapper: C) -> bool
where
    C: Chain<Inner = i32> + Clone + PartialEq,
    C::WithType<i32>: PartialEq<C>,
{
    wrapper.clone().bind(Ok::<i32, String>) == wrapper
}

#[cfg(feature = "sequence")]
mod sequence_laws {
    use super::*;
    use monadic::sequence::{MonadicList, OutcomeList};

    proptest! {
        /// Right Identity for MonadicList<i32>
        #[test]
        fn prop_monadic_list_right_identity(values in prop::collection::vec(any::<i32>(), 0..20)) {
            prop_assert!(right_identity_holds(MonadicList::new(values)));
        }

        /// Right Identity for OutcomeList<i32>
        #[test]
        fn prop_outcome_list_right_identity(values in prop::collection::vec(any::<i32>(), 0..20)) {
            prop_assert!(right_identity_holds(OutcomeList::from_values(values)));
        }

        /// Associativity for MonadicList<i32>
        #[test]
        fn prop_monadic_list_associativity(values in prop::collection::vec(any::<i32>(), 0..20)) {
            let list = MonadicList::new(values);
            let left = list.clone().bind(halve).bind(decrement);
            let right = list.bind(|value| halve(value).and_then(decrement));
            prop_assert_eq!(left.is_ok(), right.is_ok());
            prop_assert_eq!(left, right);
        }

        /// Associativity for OutcomeList<i32> whose elements all survive the first bind
        ///
        /// Once an element fails the list stops chaining, so the two sides only
        /// line up element by element when the first transform succeeds everywhere.
        #[test]
        fn prop_outcome_list_associativity(
            values in prop::collection::vec((-1000i32..1000).prop_map(|value| value * 2), 0..20)
        ) {
            let list = OutcomeList::from_values(values);
            let left = list.clone().bind(halve).bind(decrement);
            let right = list.bind(|value| halve(value).and_then(decrement));
            prop_assert_eq!(left.failed_indices(), right.failed_indices());
            prop_assert_eq!(left.successes().collect::<Vec<_>>(), right.successes().collect::<Vec<_>>());
        }

        /// Left Identity for MonadicList: a bind equals mapping the transform over the elements
        #[test]
        fn prop_monadic_list_left_identity(values in prop::collection::vec(any::<i32>(), 0..20)) {
            let expected: Result<Vec<i32>, String> = values.iter().copied().map(halve).collect();
            let bound = MonadicList::new(values).bind(halve);
            match expected {
                Ok(halves) => prop_assert_eq!(bound.unwrap(), halves),
                Err(message) => {
                    prop_assert_eq!(
                        bound.diagnostic().map(|diagnostic| diagnostic.error().to_string()),
                        Some(message)
                    );
                }
            }
        }

        /// Short-circuit: a failed list keeps its diagnostic through binds
        #[test]
        fn prop_failed_monadic_list_is_absorbing(message in ".{0,16}") {
            let diagnostic = Diagnostic::new(message);
            let failed: MonadicList<i32> = MonadicList::failure(vec![1, 2], diagnostic.clone());
            let chained = failed.bind(halve).bind(decrement);
            prop_assert_eq!(chained.diagnostic(), Some(&diagnostic));
        }

        /// Short-circuit: same-type operations keep a failed list's elements and diagnostic
        #[test]
        fn prop_failed_monadic_list_keeps_elements(
            values in prop::collection::vec(any::<i32>(), 0..20),
            repeats in 1usize..6,
        ) {
            let diagnostic = Diagnostic::new("failed upstream");
            let mut list = MonadicList::failure(values.clone(), diagnostic.clone());
            for _ in 0..repeats {
                list = list.try_map(halve).filter(|value| value % 3 == 0).try_map(decrement);
            }
            prop_assert_eq!(list.elements(), values.as_slice());
            prop_assert_eq!(list.diagnostic(), Some(&diagnostic));
        }

        /// Short-circuit: a failed OutcomeList keeps its length and original diagnostics
        ///
        /// Elements that had not failed become skipped failures in place; the
        /// diagnostics of elements that failed first stay at their indices.
        #[test]
        fn prop_failed_outcome_list_keeps_shape(
            values in prop::collection::vec(any::<i32>(), 1..20).prop_filter(
                "needs an odd value",
                |values| values.iter().any(|value| value % 2 != 0),
            ),
            repeats in 1usize..6,
        ) {
            let failed = OutcomeList::from_values(values.clone()).bind(halve);
            let original: Vec<Option<Diagnostic>> =
                failed.iter().map(|element| element.diagnostic().cloned()).collect();

            let mut list = failed;
            for _ in 0..repeats {
                list = list
                    .map(|value| vec![value, value])
                    .flatten()
                    .bind(decrement)
                    .map(|value| value.to_string())
                    .bind(|text: String| text.parse::<i32>());
            }

            prop_assert_eq!(list.len(), values.len());
            prop_assert_eq!(list.failed_indices(), (0..values.len()).collect::<Vec<_>>());
            for (element, before) in list.iter().zip(&original) {
                if let Some(before) = before {
                    prop_assert_eq!(element.diagnostic(), Some(before));
                } else {
                    let error = element.diagnostic().map(|diagnostic| diagnostic.error().to_string());
                    prop_assert_eq!(error.as_deref(), Some("skipped because the list had already failed"));
                }
            }
        }
    }
}

#[test]
fn outcome_satisfies_generic_right_identity() {
    assert!(right_identity_holds(Outcome::success(3)));
}
