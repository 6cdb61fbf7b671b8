//! The chaining contract shared by every wrapper in this crate.
//!
//! [`Outcome`], [`MonadicList`] and [`OutcomeList`] all
//! follow the same rules: a failed wrapper short-circuits every later
//! operation, a successful one runs the transform and captures any failure
//! into a [`Diagnostic`]. [`Chain`] names that contract so generic code can be
//! written once for all three.
//!
//! Rust has no higher-kinded types, so "the same wrapper over another element
//! type" is expressed with a Generic Associated Type on [`TypeConstructor`].
//!
//! # Laws
//!
//! For every implementation and any transform `f` that returns `Ok`:
//!
//! ```text
//! failed.bind(g) keeps the diagnostic of failed          (short-circuit)
//! m.bind(Ok) == m                                        (right identity)
//! m.bind(f).bind(g) == m.bind(|x| f(x).and_then(g))      (associativity)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use monadic::chain::Chain;
//! use monadic::outcome::Outcome;
//! use monadic::sequence::MonadicList;
//!
//! fn parse_all<C>(wrapper: C) -> C::WithType<i64>
//! where
//!     C: Chain<Inner = String>,
//! {
//!     wrapper.bind(|text: String| text.trim().parse::<i64>())
//! }
//!
//! let single = parse_all(Outcome::success(" 7 ".to_string()));
//! assert_eq!(single.unwrap(), 7);
//!
//! let many = parse_all(MonadicList::new(vec!["1".to_string(), "x".to_string()]));
//! assert!(many.is_err());
//! ```
//!
//! [`Outcome`]: crate::outcome::Outcome
//! [`MonadicList`]: crate::sequence::MonadicList
//! [`OutcomeList`]: crate::sequence::OutcomeList

use std::fmt;

use crate::error::BoxError;
use crate::outcome::{Diagnostic, Outcome};

/// A trait representing a type constructor.
///
/// `Inner` is the element type the wrapper is currently applied to and
/// `WithType<B>` is the same wrapper applied to `B`.
///
/// # Laws
///
/// `<F as TypeConstructor>::WithType<F::Inner>` is `F` itself.
pub trait TypeConstructor {
    /// The element type this wrapper is applied to.
    type Inner;

    /// The same wrapper applied to a different element type.
    type WithType<B>: TypeConstructor<Inner = B>;
}

/// Short-circuiting, failure-capturing chaining.
pub trait Chain: TypeConstructor + Sized {
    /// Returns `true` if no failure has been recorded.
    fn is_ok(&self) -> bool;

    /// Returns `true` if a failure has been recorded.
    #[inline]
    fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// The wrapper-level diagnostic, if any.
    ///
    /// For an [`OutcomeList`](crate::sequence::OutcomeList) that failed only
    /// because some of its elements failed, this is `None`; the element
    /// diagnostics are reachable through the elements themselves.
    fn diagnostic(&self) -> Option<&Diagnostic>;

    /// Applies a fallible transform to the wrapped value(s).
    fn bind<B, E, F>(self, transform: F) -> Self::WithType<B>
    where
        Self::Inner: Clone + fmt::Debug,
        F: FnMut(Self::Inner) -> Result<B, E>,
        E: Into<BoxError>;

    /// Applies an infallible transform to the wrapped value(s).
    fn map<B, F>(self, function: F) -> Self::WithType<B>
    where
        Self::Inner: Clone + fmt::Debug,
        F: FnMut(Self::Inner) -> B;
}

// =============================================================================
// Implementations
// =============================================================================

impl<T> TypeConstructor for Outcome<T> {
    type Inner = T;
    type WithType<B> = Outcome<B>;
}

impl<T> Chain for Outcome<T> {
    #[inline]
    fn is_ok(&self) -> bool {
        Self::is_ok(self)
    }

    #[inline]
    fn diagnostic(&self) -> Option<&Diagnostic> {
        Self::diagnostic(self)
    }

    fn bind<B, E, F>(self, transform: F) -> Outcome<B>
    where
        Self::Inner: Clone + fmt::Debug,
        F: FnMut(T) -> Result<B, E>,
        E: Into<BoxError>,
    {
        Self::bind(self, transform)
    }

    fn map<B, F>(self, function: F) -> Outcome<B>
    where
        Self::Inner: Clone + fmt::Debug,
        F: FnMut(T) -> B,
    {
        Self::map(self, function)
    }
}

#[cfg(feature = "sequence")]
mod sequence_impls {
    use super::{BoxError, Chain, Diagnostic, TypeConstructor, fmt};
    use crate::sequence::{MonadicList, OutcomeList};

    impl<T> TypeConstructor for MonadicList<T> {
        type Inner = T;
        type WithType<B> = MonadicList<B>;
    }

    impl<T> Chain for MonadicList<T> {
        #[inline]
        fn is_ok(&self) -> bool {
            Self::is_ok(self)
        }

        #[inline]
        fn diagnostic(&self) -> Option<&Diagnostic> {
            Self::diagnostic(self)
        }

        fn bind<B, E, F>(self, transform: F) -> MonadicList<B>
        where
            Self::Inner: Clone + fmt::Debug,
            F: FnMut(T) -> Result<B, E>,
            E: Into<BoxError>,
        {
            Self::bind(self, transform)
        }

        fn map<B, F>(self, function: F) -> MonadicList<B>
        where
            Self::Inner: Clone + fmt::Debug,
            F: FnMut(T) -> B,
        {
            Self::map(self, function)
        }
    }

    impl<T> TypeConstructor for OutcomeList<T> {
        type Inner = T;
        type WithType<B> = OutcomeList<B>;
    }

    impl<T> Chain for OutcomeList<T> {
        #[inline]
        fn is_ok(&self) -> bool {
            Self::is_ok(self)
        }

        #[inline]
        fn diagnostic(&self) -> Option<&Diagnostic> {
            Self::diagnostic(self)
        }

        fn bind<B, E, F>(self, transform: F) -> OutcomeList<B>
        where
            Self::Inner: Clone + fmt::Debug,
            F: FnMut(T) -> Result<B, E>,
            E: Into<BoxError>,
        {
            Self::bind(self, transform)
        }

        fn map<B, F>(self, function: F) -> OutcomeList<B>
        where
            Self::Inner: Clone + fmt::Debug,
            F: FnMut(T) -> B,
        {
            Self::map(self, function)
        }
    }
}
