//! Unit tests for the Outcome<T> type.
//!
//! Outcome holds either a value or the diagnostic of why there is none:
//! - `Success(T)`: the chain has produced a value so far
//! - `Failure(Diagnostic)`: a transform failed; later transforms are skipped

use monadic::error::TransformPanicked;
use monadic::outcome::{Diagnostic, Outcome};
use rstest::rstest;

fn half(value: i32) -> Result<i32, String> {
    if value % 2 == 0 {
        Ok(value / 2)
    } else {
        Err(format!("{value} is odd"))
    }
}

// =============================================================================
// Construction and Queries
// =============================================================================

#[rstest]
fn outcome_success_is_ok() {
    let outcome = Outcome::success(42);
    assert!(outcome.is_ok());
    assert!(!outcome.is_err());
    assert_eq!(outcome.value(), Some(&42));
    assert!(outcome.diagnostic().is_none());
}

#[rstest]
fn outcome_failure_is_err() {
    let outcome: Outcome<i32> = Outcome::failure(Diagnostic::new("boom"));
    assert!(outcome.is_err());
    assert!(!outcome.is_ok());
    assert_eq!(outcome.value(), None);
    assert_eq!(outcome.diagnostic().map(|diagnostic| diagnostic.error().to_string()), Some("boom".to_string()));
}

#[rstest]
fn outcome_from_result() {
    let success: Outcome<i32> = Outcome::from(Ok(1));
    let failure: Outcome<i32> = Outcome::from(Err(Diagnostic::new("boom")));
    assert_eq!(success, Outcome::success(1));
    assert!(failure.is_err());
}

// =============================================================================
// Extraction
// =============================================================================

#[rstest]
fn outcome_unwrap_success() {
    assert_eq!(Outcome::success("value").unwrap(), "value");
}

#[rstest]
#[should_panic(expected = "called `Outcome::unwrap()` on a `Failure` value")]
fn outcome_unwrap_failure_panics() {
    let outcome: Outcome<i32> = Outcome::failure(Diagnostic::new("boom"));
    let _ = outcome.unwrap();
}

#[rstest]
fn outcome_unwrap_or_else_receives_diagnostic() {
    let outcome: Outcome<usize> = Outcome::failure(Diagnostic::new("four"));
    assert_eq!(outcome.unwrap_or_else(|diagnostic| diagnostic.error().to_string().len()), 4);
}

#[rstest]
fn outcome_unwrap_or_on_success_ignores_default() {
    assert_eq!(Outcome::success(1).unwrap_or(2), 1);
}

#[rstest]
fn outcome_into_result() {
    assert_eq!(Outcome::success(1).into_result().ok(), Some(1));
    let failure: Outcome<i32> = Outcome::failure(Diagnostic::new("boom"));
    assert!(failure.into_result().is_err());
}

// =============================================================================
// Chaining
// =============================================================================

#[rstest]
#[case(8, Some(4))]
#[case(7, None)]
fn outcome_bind_applies_transform(#[case] input: i32, #[case] expected: Option<i32>) {
    let outcome = Outcome::success(input).bind(half);
    assert_eq!(outcome.value().copied(), expected);
}

#[rstest]
fn outcome_bind_records_diagnostic() {
    let outcome = Outcome::success(7).bind(half);
    let diagnostic = outcome.unwrap_err();
    assert_eq!(diagnostic.error().to_string(), "7 is odd");
    assert_eq!(diagnostic.value(), Some("7"));
    assert!(diagnostic.function().is_some_and(|name| name.ends_with("half")));
    assert_eq!(diagnostic.args(), None);
}

#[rstest]
fn outcome_bind_with_records_args() {
    let outcome = Outcome::success(10).bind_with(
        |value: i32, divisor: &i32| value.checked_div(*divisor).ok_or("division by zero"),
        0,
    );
    let diagnostic = outcome.unwrap_err();
    assert_eq!(diagnostic.error().to_string(), "division by zero");
    assert_eq!(diagnostic.args(), Some("0"));
    assert_eq!(diagnostic.value(), Some("10"));
}

#[rstest]
fn outcome_failure_short_circuits() {
    let failed: Outcome<i32> = Outcome::failure(Diagnostic::new("first"));
    let mut calls = 0;
    let chained = failed.clone().bind(|value| {
        calls += 1;
        half(value)
    });
    assert_eq!(calls, 0);
    assert_eq!(chained, failed);
}

#[rstest]
fn outcome_first_failure_wins() {
    let outcome = Outcome::success(6)
        .bind(half)
        .bind(half)
        .bind(|_| Err::<i32, _>("never reached"));
    assert_eq!(outcome.unwrap_err().error().to_string(), "3 is odd");
}

#[rstest]
fn outcome_map_captures_panic() {
    let outcome = Outcome::success(1).map(|_: i32| -> i32 { panic!("kaboom") });
    let diagnostic = outcome.unwrap_err();
    let panicked = diagnostic.error().downcast_ref::<TransformPanicked>();
    assert_eq!(panicked.map(|error| error.message.as_str()), Some("kaboom"));
}

#[rstest]
fn outcome_bind_accepts_boxed_errors() {
    let outcome = Outcome::success("x").bind(|text: &str| {
        text.parse::<u8>()
            .map_err(|error| -> monadic::error::BoxError { Box::new(error) })
    });
    assert!(outcome.is_err());
}

// =============================================================================
// Flatten
// =============================================================================

#[rstest]
fn outcome_flatten_success_expands() {
    let outcomes = Outcome::success(vec![1, 2, 3]).flatten();
    assert_eq!(
        outcomes,
        vec![Outcome::success(1), Outcome::success(2), Outcome::success(3)]
    );
}

#[rstest]
fn outcome_flatten_failure_is_single() {
    let failed: Outcome<Vec<i32>> = Outcome::failure(Diagnostic::new("boom"));
    let outcomes = failed.flatten();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_err());
}

#[rstest]
fn outcome_flatten_empty_success_is_empty() {
    assert!(Outcome::success(Vec::<i32>::new()).flatten().is_empty());
}

// =============================================================================
// Equality and Display
// =============================================================================

#[rstest]
fn outcome_equality() {
    assert_eq!(Outcome::success(1), Outcome::success(1));
    assert_ne!(Outcome::success(1), Outcome::success(2));
    let failure: Outcome<i32> = Outcome::failure(Diagnostic::new("boom"));
    assert_ne!(failure, Outcome::success(1));
    assert_eq!(failure.clone(), failure);
}

#[rstest]
fn outcome_display() {
    assert_eq!(Outcome::success(5).to_string(), "Success(5)");
    let failure: Outcome<i32> = Outcome::failure(Diagnostic::new("boom"));
    assert_eq!(failure.to_string(), "Failure(boom)");
}

#[rstest]
fn diagnostic_display_contains_fields() {
    let diagnostic = Outcome::success(3).bind(half).unwrap_err();
    let rendered = diagnostic.to_string();
    assert!(rendered.starts_with("error: 3 is odd"));
    assert!(rendered.contains("\n\tvalue: 3"));
    assert!(rendered.contains("\n\tfunction: "));
}
