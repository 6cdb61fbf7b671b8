//! The structured failure record attached to failed wrappers.
//!
//! A [`Diagnostic`] is the only way a failure is reported by the chaining
//! operations: errors returned (or panics raised) by caller-supplied
//! transforms are captured at the call site and turned into one of these.
//! Its fields form a stable contract for code that inspects failures:
//!
//! | field      | content                                                 |
//! |------------|---------------------------------------------------------|
//! | `trace`    | formatted backtrace of the library's capture point      |
//! | `error`    | the causing error                                       |
//! | `value`    | `Debug` rendering of the input the transform received   |
//! | `function` | type name of the transform                              |
//! | `args`     | `Debug` rendering of the extra arguments, if any        |
//!
//! The trace is captured with [`Backtrace::capture`], so it is only
//! populated when `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE` enables it. It is
//! taken after the transform has returned or unwound, so it shows the
//! chaining call inside this crate and its callers, never the frames inside
//! the transform. For the panic site itself, record a backtrace from a panic
//! hook.

use std::any::type_name;
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::{BoxError, Skipped, TransformPanicked};

/// A structured record describing why a wrapper failed.
///
/// # Examples
///
/// ```rust
/// use monadic::outcome::{Diagnostic, Outcome};
///
/// let outcome = Outcome::success("forty-two").bind_with(
///     |text: &str, radix: &u32| i64::from_str_radix(text, *radix),
///     10,
/// );
///
/// let diagnostic = outcome.diagnostic().unwrap();
/// assert_eq!(diagnostic.value(), Some("\"forty-two\""));
/// assert_eq!(diagnostic.args(), Some("10"));
/// assert_eq!(diagnostic.error().to_string(), "invalid digit found in string");
/// ```
#[derive(Clone)]
pub struct Diagnostic {
    trace: String,
    error: Arc<dyn std::error::Error + Send + Sync>,
    value: Option<String>,
    function: Option<&'static str>,
    args: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic for `error`, capturing the current backtrace.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::outcome::Diagnostic;
    ///
    /// let diagnostic = Diagnostic::new("connection refused");
    /// assert_eq!(diagnostic.error().to_string(), "connection refused");
    /// assert_eq!(diagnostic.value(), None);
    /// ```
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            trace: Backtrace::capture().to_string(),
            error: Arc::from(error.into()),
            value: None,
            function: None,
            args: None,
        }
    }

    /// Records the `Debug` rendering of the value that caused the failure.
    #[must_use]
    pub fn with_value<V: fmt::Debug + ?Sized>(mut self, value: &V) -> Self {
        self.value = Some(format!("{value:?}"));
        self
    }

    /// Records the name of the function that failed.
    #[must_use]
    pub const fn with_function(mut self, function: &'static str) -> Self {
        self.function = Some(function);
        self
    }

    /// Records the `Debug` rendering of the extra arguments.
    #[must_use]
    pub fn with_args<A: fmt::Debug + ?Sized>(mut self, args: &A) -> Self {
        self.args = Some(format!("{args:?}"));
        self
    }

    /// The formatted backtrace captured when the failure was recorded.
    ///
    /// The backtrace starts at the point where this crate recorded the
    /// failure, after the transform returned its error or after
    /// `catch_unwind` returned from a panic. Frames of the transform itself,
    /// including the location of a panic, are not part of it.
    pub fn trace(&self) -> &str {
        &self.trace
    }

    /// The error that caused the failure.
    pub fn error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.error
    }

    /// The rendered input of the failing transform.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The type name of the failing transform.
    pub const fn function(&self) -> Option<&'static str> {
        self.function
    }

    /// The rendered extra arguments of the failing transform.
    pub fn args(&self) -> Option<&str> {
        self.args.as_deref()
    }
}

impl PartialEq for Diagnostic {
    fn eq(&self, other: &Self) -> bool {
        let same_error =
            Arc::ptr_eq(&self.error, &other.error) || self.error.to_string() == other.error.to_string();
        same_error
            && self.trace == other.trace
            && self.value == other.value
            && self.function == other.function
            && self.args == other.args
    }
}

impl fmt::Debug for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Diagnostic")
            .field("error", &self.error)
            .field("value", &self.value)
            .field("function", &self.function)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "error: {}", self.error)?;
        if let Some(value) = &self.value {
            write!(formatter, "\n\tvalue: {value}")?;
        }
        if let Some(function) = self.function {
            write!(formatter, "\n\tfunction: {function}")?;
        }
        if let Some(args) = &self.args {
            write!(formatter, "\n\targs: {args}")?;
        }
        write!(formatter, "\n\ttrace: {}", self.trace)
    }
}

impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.error)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Diagnostic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Diagnostic", 5)?;
        state.serialize_field("trace", &self.trace)?;
        state.serialize_field("error", &self.error.to_string())?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("function", &self.function)?;
        state.serialize_field("args", &self.args)?;
        state.end()
    }
}

// =============================================================================
// Capture
// =============================================================================

/// Identifies a caller-supplied transform for the diagnostics it may produce.
#[derive(Debug, Clone)]
pub(crate) struct Invocation {
    function: &'static str,
    args: Option<String>,
}

impl Invocation {
    pub(crate) fn of<F>() -> Self {
        Self {
            function: type_name::<F>(),
            args: None,
        }
    }

    /// Names an operation of this crate rather than a caller closure.
    #[cfg_attr(not(feature = "sequence"), allow(dead_code))]
    pub(crate) const fn named(function: &'static str) -> Self {
        Self {
            function,
            args: None,
        }
    }

    pub(crate) fn with_args<A: fmt::Debug>(mut self, args: &A) -> Self {
        self.args = Some(format!("{args:?}"));
        self
    }

    /// Records that the transform was never run on `value` because the
    /// enclosing list had already failed with `cause`.
    #[cfg_attr(not(feature = "sequence"), allow(dead_code))]
    pub(crate) fn skipped<V: fmt::Debug + ?Sized>(&self, value: &V, cause: Option<&Diagnostic>) -> Diagnostic {
        let error = Skipped {
            cause: cause.map(|diagnostic| diagnostic.error().to_string()),
        };
        Diagnostic {
            args: self.args.clone(),
            ..Diagnostic::new(error)
                .with_value(value)
                .with_function(self.function)
        }
    }

    pub(crate) fn diagnose<V: fmt::Debug + ?Sized>(&self, error: BoxError, value: &V) -> Diagnostic {
        tracing::debug!(
            function = self.function,
            error = %error,
            "transform failed, capturing diagnostic"
        );
        let diagnostic = Diagnostic::new(error)
            .with_value(value)
            .with_function(self.function);
        match &self.args {
            Some(args) => Diagnostic {
                args: Some(args.clone()),
                ..diagnostic
            },
            None => diagnostic,
        }
    }
}

/// Runs a caller-supplied call, turning a panic into an error.
pub(crate) fn capture<U, F>(call: F) -> Result<U, BoxError>
where
    F: FnOnce() -> Result<U, BoxError>,
{
    panic::catch_unwind(AssertUnwindSafe(call))
        .unwrap_or_else(|payload| Err(TransformPanicked::from_payload(&*payload).into()))
}
