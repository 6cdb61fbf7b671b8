//! # monadic
//!
//! Failure-capturing wrappers for chaining fallible transforms.
//!
//! ## Overview
//!
//! Every wrapper in this crate either holds values or a recorded failure.
//! Chaining a transform onto a successful wrapper runs it and captures any
//! error (or panic) it produces into a structured [`Diagnostic`]; chaining
//! onto a failed wrapper does nothing and keeps the first diagnostic.
//!
//! - **[`Outcome`]**: a single value or a failure.
//! - **[`MonadicList`]**: a list of values that fails as a whole.
//! - **[`OutcomeList`]**: a list of outcomes, failing per element.
//! - **[`Chain`]**: the contract shared by all three.
//!
//! ## Panics
//!
//! Panics raised by transforms are caught with [`std::panic::catch_unwind`]
//! and recorded as [`TransformPanicked`] failures. Catching happens after the
//! process-wide panic hook has run, so the default hook still prints every
//! captured panic to stderr. Replace the hook to capture silently:
//!
//! ```rust
//! use monadic::prelude::*;
//!
//! let previous = std::panic::take_hook();
//! std::panic::set_hook(Box::new(|_| {}));
//! let outcome = Outcome::success(0).map(|divisor: i32| 1 / divisor);
//! std::panic::set_hook(previous);
//!
//! let error = outcome.unwrap_err();
//! assert!(error.error().downcast_ref::<TransformPanicked>().is_some());
//! ```
//!
//! Only unwinding panics can be captured; with `panic = "abort"` the process
//! exits.
//!
//! ## Cloning
//!
//! Chaining requires `T: Clone`: each input is cloned before the transform
//! runs, so it can be rendered into the diagnostic on failure.
//!
//! ## Feature Flags
//!
//! - `sequence`: the list wrappers (default)
//! - `serde`: `Serialize` impls and the `serde_json::Value` dynamic layer (default)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use monadic::prelude::*;
//!
//! let total = Outcome::success("21")
//!     .bind(|text: &str| text.parse::<i32>())
//!     .map(|number| number * 2);
//! assert_eq!(total.unwrap(), 42);
//!
//! let failed = Outcome::success("twenty-one")
//!     .bind(|text: &str| text.parse::<i32>())
//!     .map(|number| number * 2);
//! assert_eq!(failed.diagnostic().and_then(Diagnostic::value), Some("\"twenty-one\""));
//! ```
//!
//! [`Diagnostic`]: outcome::Diagnostic
//! [`Outcome`]: outcome::Outcome
//! [`MonadicList`]: sequence::MonadicList
//! [`OutcomeList`]: sequence::OutcomeList
//! [`Chain`]: chain::Chain
//! [`TransformPanicked`]: error::TransformPanicked

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use monadic::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chain::{Chain, TypeConstructor};
    pub use crate::error::{BoxError, ConstructionError, Skipped, TransformPanicked};
    pub use crate::outcome::{Diagnostic, Outcome};

    #[cfg(feature = "sequence")]
    pub use crate::sequence::{Dynamic, Element, MonadicList, OutcomeList};
}

pub mod chain;
pub mod error;
pub mod outcome;

#[cfg(feature = "sequence")]
pub mod sequence;

static_assertions::assert_impl_all!(outcome::Diagnostic: Send, Sync, Clone, std::error::Error);
static_assertions::assert_impl_all!(outcome::Outcome<String>: Send, Sync, Clone);

#[cfg(feature = "sequence")]
static_assertions::assert_impl_all!(sequence::MonadicList<String>: Send, Sync, Clone);
#[cfg(feature = "sequence")]
static_assertions::assert_impl_all!(sequence::OutcomeList<String>: Send, Sync, Clone);
