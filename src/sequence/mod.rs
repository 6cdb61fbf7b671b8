//! List-oriented wrappers.
//!
//! - [`MonadicList`]: uniformly typed elements with one list-level failure
//!   state; a failing transform fails the whole list.
//! - [`OutcomeList`]: elements are [`Outcome`](crate::outcome::Outcome)s, so
//!   failures are tracked per element and aggregated for the list.
//! - [`Dynamic`]: runtime-typed elements (`serde_json::Value` with the
//!   `serde` feature) that need homogeneity and nesting checked at run time.
//!
//! # Examples
//!
//! ```rust
//! use monadic::sequence::{MonadicList, OutcomeList};
//!
//! // All-or-nothing: one bad element fails the list.
//! let strict = MonadicList::new(vec!["1", "two", "3"]).bind(|text: &str| text.parse::<i32>());
//! assert!(strict.is_err());
//!
//! // Per element: the bad element fails on its own.
//! let lenient = OutcomeList::from_values(vec!["1", "two", "3"]).bind(|text: &str| text.parse::<i32>());
//! assert_eq!(lenient.successes().sum::<i32>(), 4);
//! ```

mod dynamic;
mod monadic_list;
mod outcome_list;

pub use dynamic::Dynamic;
pub use monadic_list::MonadicList;
pub use outcome_list::{Element, OutcomeList};
