//! Outcome type - a value or the diagnostic of why there is none.
//!
//! [`Outcome<T>`] is either `Success(T)` or `Failure(Diagnostic)`. Chaining
//! operations run caller-supplied transforms on successful values and capture
//! every error they produce into a [`Diagnostic`], so a long chain never has to
//! check for failure between steps:
//!
//! - [`Outcome::bind`] short-circuits on `Failure` and otherwise runs the
//!   transform, capturing `Err` results and panics.
//! - [`Outcome::flatten`] expands a sequence-valued outcome into one outcome
//!   per element.
//!
//! # Laws
//!
//! For a transform `f` that returns `Ok` and any `g`:
//!
//! ```text
//! Outcome::success(a).bind(f) == Outcome::success(f(a)?)      (left identity)
//! m.bind(Ok) == m                                             (right identity)
//! m.bind(f).bind(g) == m.bind(|x| f(x).and_then(g))          (associativity)
//! failure.bind(f) == failure                                  (short-circuit)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use monadic::outcome::Outcome;
//!
//! let parsed = Outcome::success("21")
//!     .bind(|text: &str| text.parse::<i32>())
//!     .map(|number| number * 2);
//! assert_eq!(parsed.unwrap(), 42);
//!
//! let failed = Outcome::success("twenty-one")
//!     .bind(|text: &str| text.parse::<i32>())
//!     .map(|number| number * 2);
//! assert!(failed.is_err());
//! assert_eq!(failed.unwrap_or(0), 0);
//! ```

mod diagnostic;

pub use diagnostic::Diagnostic;
pub(crate) use diagnostic::{Invocation, capture};

use std::fmt;

use crate::error::BoxError;

/// The outcome of a computation: a value, or a diagnostic explaining the failure.
///
/// Outcomes compare equal when both are `Success` with equal values, or both
/// are `Failure` with equal diagnostics. Comparing against anything that is
/// not an `Outcome` is rejected by the compiler:
///
/// ```rust,compile_fail
/// use monadic::outcome::Outcome;
///
/// let outcome = Outcome::success(1);
/// let _ = outcome == 1;
/// ```
#[derive(Clone, PartialEq, Debug)]
pub enum Outcome<T> {
    /// The computation produced a value.
    Success(T),
    /// The computation failed; the diagnostic records why.
    Failure(Diagnostic),
}

impl<T> Outcome<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Wraps a value as a successful outcome.
    #[inline]
    pub const fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Creates a failed outcome from a diagnostic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::outcome::{Diagnostic, Outcome};
    ///
    /// let outcome: Outcome<i32> = Outcome::failure(Diagnostic::new("no value"));
    /// assert!(outcome.is_err());
    /// ```
    #[inline]
    pub const fn failure(diagnostic: Diagnostic) -> Self {
        Self::Failure(diagnostic)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns `true` if this is a `Success`.
    #[inline]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` if this is a `Failure`.
    #[inline]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns a reference to the value of a `Success`.
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the diagnostic of a `Failure`.
    #[inline]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Success(_) => None,
            Self::Failure(diagnostic) => Some(diagnostic),
        }
    }

    /// Borrows the successful value, cloning the diagnostic of a failure.
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(diagnostic) => Outcome::Failure(diagnostic.clone()),
        }
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// Returns the successful value, consuming the outcome.
    ///
    /// # Panics
    ///
    /// Panics if this is a `Failure`; the panic message carries the
    /// diagnostic's error. Use [`Outcome::unwrap_or`] or
    /// [`Outcome::into_result`] when failure is expected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::outcome::Outcome;
    ///
    /// assert_eq!(Outcome::success(3).unwrap(), 3);
    /// ```
    #[inline]
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(diagnostic) => panic!(
                "called `Outcome::unwrap()` on a `Failure` value: {}",
                diagnostic.error()
            ),
        }
    }

    /// Returns the diagnostic, consuming the outcome.
    ///
    /// # Panics
    ///
    /// Panics if this is a `Success`.
    #[inline]
    #[track_caller]
    pub fn unwrap_err(self) -> Diagnostic {
        match self {
            Self::Success(_) => panic!("called `Outcome::unwrap_err()` on a `Success` value"),
            Self::Failure(diagnostic) => diagnostic,
        }
    }

    /// Returns the successful value, or `default` on failure.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => default,
        }
    }

    /// Returns the successful value, or computes one from the diagnostic.
    #[inline]
    pub fn unwrap_or_else<F>(self, function: F) -> T
    where
        F: FnOnce(Diagnostic) -> T,
    {
        match self {
            Self::Success(value) => value,
            Self::Failure(diagnostic) => function(diagnostic),
        }
    }

    /// Converts into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the diagnostic if this is a `Failure`.
    #[inline]
    pub fn into_result(self) -> Result<T, Diagnostic> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(diagnostic) => Err(diagnostic),
        }
    }

    /// Re-types a failure; a success is handed back unchanged.
    #[cfg_attr(not(feature = "sequence"), allow(dead_code))]
    pub(crate) fn retype_failure<U>(self) -> Result<Outcome<U>, T> {
        match self {
            Self::Success(value) => Err(value),
            Self::Failure(diagnostic) => Ok(Outcome::Failure(diagnostic)),
        }
    }

    // =========================================================================
    // Chaining
    // =========================================================================

    /// Applies a fallible transform to the successful value.
    ///
    /// A `Failure` is returned unchanged and the transform is never called.
    /// On `Success`, the transform runs once: `Ok(u)` becomes `Success(u)`,
    /// while an `Err` or a panic becomes a `Failure` whose diagnostic records
    /// the error, the rendered input value and the transform's name.
    ///
    /// `T: Clone` is required because the input is cloned before every call,
    /// so it can still be rendered into the diagnostic after the transform
    /// has consumed or unwound it. Values that cannot be cloned cannot be
    /// chained:
    ///
    /// ```rust,compile_fail
    /// use monadic::outcome::Outcome;
    ///
    /// #[derive(Debug)]
    /// struct Handle(u32);
    ///
    /// let _ = Outcome::success(Handle(1)).bind(|handle: Handle| Ok::<_, String>(handle.0));
    /// ```
    ///
    /// For expensive inputs, chain an `Rc`/`Arc` or a reference instead.
    ///
    /// # Panics
    ///
    /// A panicking transform does not unwind out of this call; it becomes a
    /// [`TransformPanicked`](crate::error::TransformPanicked) failure. The
    /// process-wide panic hook still runs first, so the default hook prints
    /// the panic message to stderr. Install a quiet hook with
    /// [`std::panic::set_hook`] to capture silently.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::outcome::Outcome;
    ///
    /// let halve = |number: i32| {
    ///     if number % 2 == 0 { Ok(number / 2) } else { Err(format!("{number} is odd")) }
    /// };
    ///
    /// assert_eq!(Outcome::success(8).bind(halve).bind(halve).unwrap(), 2);
    ///
    /// let failed = Outcome::success(6).bind(halve).bind(halve).bind(halve);
    /// let diagnostic = failed.unwrap_err();
    /// assert_eq!(diagnostic.error().to_string(), "3 is odd");
    /// assert_eq!(diagnostic.value(), Some("3"));
    /// ```
    pub fn bind<U, E, F>(self, transform: F) -> Outcome<U>
    where
        T: Clone + fmt::Debug,
        F: FnOnce(T) -> Result<U, E>,
        E: Into<BoxError>,
    {
        self.apply(&Invocation::of::<F>(), |value| {
            transform(value).map_err(Into::into)
        })
    }

    /// Applies a fallible transform that also receives extra arguments.
    ///
    /// Behaves like [`Outcome::bind`]; on failure the diagnostic additionally
    /// records the `Debug` rendering of `args`.
    pub fn bind_with<U, A, E, F>(self, transform: F, args: A) -> Outcome<U>
    where
        T: Clone + fmt::Debug,
        A: fmt::Debug,
        F: FnOnce(T, &A) -> Result<U, E>,
        E: Into<BoxError>,
    {
        let invocation = Invocation::of::<F>().with_args(&args);
        self.apply(&invocation, |value| {
            transform(value, &args).map_err(Into::into)
        })
    }

    /// Applies an infallible transform; a panic is still captured as a failure.
    ///
    /// Clones the input on every call, like [`Outcome::bind`].
    pub fn map<U, F>(self, function: F) -> Outcome<U>
    where
        T: Clone + fmt::Debug,
        F: FnOnce(T) -> U,
    {
        self.apply(&Invocation::of::<F>(), |value| Ok(function(value)))
    }

    pub(crate) fn apply<U, F>(self, invocation: &Invocation, call: F) -> Outcome<U>
    where
        T: Clone + fmt::Debug,
        F: FnOnce(T) -> Result<U, BoxError>,
    {
        match self {
            Self::Failure(diagnostic) => Outcome::Failure(diagnostic),
            Self::Success(value) => {
                let input = value.clone();
                match capture(|| call(input)) {
                    Ok(result) => Outcome::Success(result),
                    Err(error) => Outcome::Failure(invocation.diagnose(error, &value)),
                }
            }
        }
    }
}

impl<T: IntoIterator> Outcome<T> {
    /// Expands a sequence-valued outcome into one outcome per element.
    ///
    /// A `Success` holding a sequence yields a `Success` for each of its
    /// items, in order. A `Failure` yields itself as the single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::outcome::{Diagnostic, Outcome};
    ///
    /// let expanded = Outcome::success(vec![1, 2]).flatten();
    /// assert_eq!(expanded, vec![Outcome::success(1), Outcome::success(2)]);
    ///
    /// let failed: Outcome<Vec<i32>> = Outcome::failure(Diagnostic::new("gone"));
    /// assert_eq!(failed.flatten().len(), 1);
    /// ```
    pub fn flatten(self) -> Vec<Outcome<T::Item>> {
        match self {
            Self::Success(items) => items.into_iter().map(Outcome::Success).collect(),
            Self::Failure(diagnostic) => vec![Outcome::Failure(diagnostic)],
        }
    }
}

impl<T> From<Result<T, Diagnostic>> for Outcome<T> {
    fn from(result: Result<T, Diagnostic>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(diagnostic) => Self::Failure(diagnostic),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => write!(formatter, "Success({value})"),
            Self::Failure(diagnostic) => write!(formatter, "Failure({})", diagnostic.error()),
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Outcome<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Success(value) => serializer.serialize_newtype_variant("Outcome", 0, "Success", value),
            Self::Failure(diagnostic) => {
                serializer.serialize_newtype_variant("Outcome", 1, "Failure", diagnostic)
            }
        }
    }
}
