//! Error types for wrapper construction and transform capture.
//!
//! Two tiers of failure exist in this crate:
//!
//! - Failures raised by caller-supplied transforms are *data*: they are
//!   captured into a [`Diagnostic`](crate::outcome::Diagnostic) and never
//!   escape the chaining operation. [`TransformPanicked`] is the error
//!   recorded when a transform panics instead of returning `Err`, and
//!   [`Skipped`] marks elements a failed list did not transform.
//! - Misuse at construction time is a programmer error and is returned as
//!   [`ConstructionError`] from the fallible constructors.

use std::any::Any;
use std::fmt;

/// The error bound accepted from caller-supplied transforms.
///
/// Anything convertible into this box can be returned from a transform:
/// concrete error types, `String` and `&str` messages alike.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Recorded when a transform or predicate panics during a chaining operation.
///
/// # Examples
///
/// ```rust
/// use monadic::outcome::Outcome;
///
/// let outcome = Outcome::success(0).map(|divisor: i32| 10 / divisor);
/// let diagnostic = outcome.unwrap_err();
/// assert!(diagnostic.error().to_string().starts_with("transform panicked"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformPanicked {
    /// The panic payload, when it was a string.
    pub message: String,
}

impl TransformPanicked {
    pub(crate) fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "<non-string panic payload>".to_string());
        Self { message }
    }
}

impl fmt::Display for TransformPanicked {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "transform panicked: {}", self.message)
    }
}

impl std::error::Error for TransformPanicked {}

/// Recorded for an element that was not transformed because its list had
/// already failed.
///
/// A failed [`OutcomeList`](crate::sequence::OutcomeList) chained into a new
/// element type keeps its length and order: successful elements have no value
/// of the new type, so each becomes a `Failure` carrying this error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// The error of the list-level failure, if the list had one.
    pub cause: Option<String>,
}

impl fmt::Display for Skipped {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "skipped because the list had already failed")?;
        if let Some(cause) = &self.cause {
            write!(formatter, ": {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Skipped {}

/// Represents invalid arguments passed to a wrapper constructor.
///
/// These are never turned into failed wrappers: the caller receives them
/// directly from the `try_*` constructors.
///
/// # Examples
///
/// ```rust
/// use monadic::error::ConstructionError;
///
/// let error = ConstructionError::MixedElements { values: 2, outcomes: 1 };
/// assert_eq!(
///     error.to_string(),
///     "elements must be either all outcomes or all plain values, got 2 values and 1 outcomes"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The input was not a sequence at all.
    NotASequence {
        /// The kind of value that was supplied instead.
        kind: &'static str,
    },
    /// The elements do not share a single kind.
    Heterogeneous {
        /// A count per observed kind, in order of first appearance.
        counts: Vec<(&'static str, usize)>,
    },
    /// Plain values and outcomes were mixed in one input.
    MixedElements {
        /// Number of plain values.
        values: usize,
        /// Number of already-wrapped outcomes.
        outcomes: usize,
    },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotASequence { kind } => {
                write!(formatter, "expected a sequence of elements, got {kind}")
            }
            Self::Heterogeneous { counts } => {
                write!(
                    formatter,
                    "all elements should be of the same kind, got the following kind counts:"
                )?;
                for (kind, count) in counts {
                    write!(formatter, "\n\t{kind}: {count}")?;
                }
                Ok(())
            }
            Self::MixedElements { values, outcomes } => write!(
                formatter,
                "elements must be either all outcomes or all plain values, \
                 got {values} values and {outcomes} outcomes"
            ),
        }
    }
}

impl std::error::Error for ConstructionError {}
