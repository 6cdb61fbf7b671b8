//! `MonadicList` - element-wise chaining with all-or-nothing failure.

use std::fmt;

use crate::error::BoxError;
use crate::outcome::{Diagnostic, Invocation, capture};

/// A list of uniformly typed elements with a single, list-level failure state.
///
/// Transforms apply to every element in order. The first element whose
/// transform fails aborts the whole operation: the resulting list is failed,
/// and its diagnostic records the error, the transform's name and the
/// rendered pre-operation elements. Elements carry no failure state of their
/// own; see [`OutcomeList`](crate::sequence::OutcomeList) for per-element
/// failure tracking.
///
/// A failed list keeps its pre-operation elements when the failing operation
/// preserves the element type: [`MonadicList::try_map`], the filters and the
/// dynamic operations. When the element type changes (`bind` to a new type,
/// `flatten`), there is no value of the new type to keep, so the failed list
/// is empty and the old elements survive only as the diagnostic's rendered
/// value. Use `try_map` for same-type transforms whose inputs must remain
/// inspectable after a failure.
///
/// Two lists are equal when their elements are equal and either both or
/// neither have failed; diagnostics are not compared.
///
/// # Examples
///
/// ```rust
/// use monadic::sequence::MonadicList;
///
/// let evens = MonadicList::new(1..=6).filter(|number| number % 2 == 0);
/// assert_eq!(evens, MonadicList::new(vec![2, 4, 6]));
///
/// let parsed = MonadicList::new(vec!["1", "2", "x"]).bind(|text: &str| text.parse::<i32>());
/// assert!(parsed.is_err());
/// assert_eq!(parsed.diagnostic().unwrap().value(), Some("[\"1\", \"2\", \"x\"]"));
/// ```
#[derive(Clone, Debug)]
pub struct MonadicList<T> {
    elements: Vec<T>,
    failure: Option<Diagnostic>,
}

impl<T> MonadicList<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a successful list from any sequence of elements.
    pub fn new<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            elements: elements.into_iter().collect(),
            failure: None,
        }
    }

    /// Creates a failed list that retains `elements` for inspection.
    pub const fn failure(elements: Vec<T>, diagnostic: Diagnostic) -> Self {
        Self {
            elements,
            failure: Some(diagnostic),
        }
    }

    fn short_circuit(diagnostic: Diagnostic) -> Self {
        Self::failure(Vec::new(), diagnostic)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns `true` if no failure has been recorded.
    #[inline]
    pub const fn is_ok(&self) -> bool {
        self.failure.is_none()
    }

    /// Returns `true` if a failure has been recorded.
    #[inline]
    pub const fn is_err(&self) -> bool {
        self.failure.is_some()
    }

    /// The diagnostic of the first failure, if any.
    #[inline]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        self.failure.as_ref()
    }

    /// The current elements.
    #[inline]
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Returns the elements, whether or not the list has failed.
    #[inline]
    pub fn unwrap(self) -> Vec<T> {
        self.elements
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns a fresh iterator over the elements.
    ///
    /// Every call starts from the first element, and any number of iterators
    /// may be alive at once.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    // =========================================================================
    // Chaining
    // =========================================================================

    /// Applies a fallible transform to every element.
    ///
    /// Short-circuits if the list has already failed. Otherwise the transform
    /// runs on each element in order; the first `Err` or panic fails the
    /// whole list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::sequence::MonadicList;
    ///
    /// let doubled = MonadicList::new(vec![1, 2, 3]).bind(|number: i32| number.checked_mul(2).ok_or("overflow"));
    /// assert_eq!(doubled.unwrap(), vec![2, 4, 6]);
    /// ```
    pub fn bind<U, E, F>(self, mut transform: F) -> MonadicList<U>
    where
        T: Clone + fmt::Debug,
        F: FnMut(T) -> Result<U, E>,
        E: Into<BoxError>,
    {
        self.apply(&Invocation::of::<F>(), |value| transform(value).map_err(Into::into))
    }

    /// Like [`MonadicList::bind`], with extra arguments passed to every call
    /// and recorded in the diagnostic on failure.
    pub fn bind_with<U, A, E, F>(self, mut transform: F, args: A) -> MonadicList<U>
    where
        T: Clone + fmt::Debug,
        A: fmt::Debug,
        F: FnMut(T, &A) -> Result<U, E>,
        E: Into<BoxError>,
    {
        let invocation = Invocation::of::<F>().with_args(&args);
        self.apply(&invocation, |value| transform(value, &args).map_err(Into::into))
    }

    /// Applies an infallible transform to every element; panics are captured.
    pub fn map<U, F>(self, mut function: F) -> MonadicList<U>
    where
        T: Clone + fmt::Debug,
        F: FnMut(T) -> U,
    {
        self.apply(&Invocation::of::<F>(), |value| Ok(function(value)))
    }

    /// Applies a fallible transform that keeps the element type.
    ///
    /// Behaves like [`MonadicList::bind`], except that a failure keeps the
    /// pre-operation elements instead of an empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::sequence::MonadicList;
    ///
    /// let checked = MonadicList::new(vec![100_u8, 200]).try_map(|number| number.checked_add(60).ok_or("overflow"));
    /// assert!(checked.is_err());
    /// assert_eq!(checked.elements(), &[100, 200]);
    /// ```
    pub fn try_map<E, F>(self, mut transform: F) -> Self
    where
        T: Clone + fmt::Debug,
        F: FnMut(T) -> Result<T, E>,
        E: Into<BoxError>,
    {
        self.revise(&Invocation::of::<F>(), |value| transform(value).map_err(Into::into))
    }

    /// Like [`MonadicList::try_map`], with extra arguments.
    pub fn try_map_with<A, E, F>(self, mut transform: F, args: A) -> Self
    where
        T: Clone + fmt::Debug,
        A: fmt::Debug,
        F: FnMut(T, &A) -> Result<T, E>,
        E: Into<BoxError>,
    {
        let invocation = Invocation::of::<F>().with_args(&args);
        self.revise(&invocation, |value| transform(value, &args).map_err(Into::into))
    }

    /// Applies a fallible, sequence-producing transform to every element and
    /// concatenates the results.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::sequence::MonadicList;
    ///
    /// let expanded = MonadicList::new(vec![1, 2])
    ///     .bind_and_flatten(|number: i32| Ok::<_, String>(vec![number; number as usize]));
    /// assert_eq!(expanded.unwrap(), vec![1, 2, 2]);
    /// ```
    pub fn bind_and_flatten<U, E, F>(self, transform: F) -> MonadicList<U::Item>
    where
        T: Clone + fmt::Debug,
        U: IntoIterator,
        F: FnMut(T) -> Result<U, E>,
        E: Into<BoxError>,
    {
        self.bind(transform).flatten()
    }

    /// Like [`MonadicList::bind_and_flatten`], with extra arguments.
    pub fn bind_and_flatten_with<U, A, E, F>(self, transform: F, args: A) -> MonadicList<U::Item>
    where
        T: Clone + fmt::Debug,
        U: IntoIterator,
        A: fmt::Debug,
        F: FnMut(T, &A) -> Result<U, E>,
        E: Into<BoxError>,
    {
        self.bind_with(transform, args).flatten()
    }

    /// Keeps the elements for which `predicate` returns `true`, in order.
    ///
    /// A panicking predicate fails the whole list, which then retains its
    /// original elements.
    pub fn filter<F>(self, mut predicate: F) -> Self
    where
        T: fmt::Debug,
        F: FnMut(&T) -> bool,
    {
        self.select(&Invocation::of::<F>(), |value| Ok(predicate(value)))
    }

    /// Keeps the elements for which a fallible predicate returns `Ok(true)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::sequence::MonadicList;
    ///
    /// let small = MonadicList::new(vec![1, 5, 2]).try_filter(|number: &i32| {
    ///     if *number > 4 { Err("too large") } else { Ok(true) }
    /// });
    /// assert!(small.is_err());
    /// assert_eq!(small.elements(), &[1, 5, 2]);
    /// ```
    pub fn try_filter<E, F>(self, mut predicate: F) -> Self
    where
        T: fmt::Debug,
        F: FnMut(&T) -> Result<bool, E>,
        E: Into<BoxError>,
    {
        self.select(&Invocation::of::<F>(), |value| predicate(value).map_err(Into::into))
    }

    /// Like [`MonadicList::try_filter`], with extra arguments.
    pub fn filter_with<A, E, F>(self, mut predicate: F, args: A) -> Self
    where
        T: fmt::Debug,
        A: fmt::Debug,
        F: FnMut(&T, &A) -> Result<bool, E>,
        E: Into<BoxError>,
    {
        let invocation = Invocation::of::<F>().with_args(&args);
        self.select(&invocation, |value| predicate(value, &args).map_err(Into::into))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Runs `call` over clones of every element, stopping at the first failure.
    pub(crate) fn run<U, F>(&self, invocation: &Invocation, mut call: F) -> Result<Vec<U>, Diagnostic>
    where
        T: Clone + fmt::Debug,
        F: FnMut(T) -> Result<U, BoxError>,
    {
        capture(|| {
            self.elements
                .iter()
                .cloned()
                .map(&mut call)
                .collect::<Result<Vec<U>, BoxError>>()
        })
        .map_err(|error| invocation.diagnose(error, &self.elements))
    }

    fn apply<U, F>(self, invocation: &Invocation, call: F) -> MonadicList<U>
    where
        T: Clone + fmt::Debug,
        F: FnMut(T) -> Result<U, BoxError>,
    {
        if let Some(diagnostic) = self.failure {
            return MonadicList::short_circuit(diagnostic);
        }
        match self.run(invocation, call) {
            Ok(results) => MonadicList::new(results),
            Err(diagnostic) => MonadicList::short_circuit(diagnostic),
        }
    }

    fn revise<F>(self, invocation: &Invocation, call: F) -> Self
    where
        T: Clone + fmt::Debug,
        F: FnMut(T) -> Result<T, BoxError>,
    {
        if self.is_err() {
            return self;
        }
        match self.run(invocation, call) {
            Ok(results) => Self::new(results),
            Err(diagnostic) => Self::failure(self.elements, diagnostic),
        }
    }

    fn select<F>(self, invocation: &Invocation, mut keep: F) -> Self
    where
        T: fmt::Debug,
        F: FnMut(&T) -> Result<bool, BoxError>,
    {
        if self.is_err() {
            return self;
        }
        let verdicts = capture(|| {
            self.elements
                .iter()
                .map(&mut keep)
                .collect::<Result<Vec<bool>, BoxError>>()
        });
        match verdicts {
            Ok(verdicts) => Self::new(
                self.elements
                    .into_iter()
                    .zip(verdicts)
                    .filter_map(|(element, verdict)| verdict.then_some(element)),
            ),
            Err(error) => {
                let diagnostic = invocation.diagnose(error, &self.elements);
                Self::failure(self.elements, diagnostic)
            }
        }
    }
}

impl<T: IntoIterator> MonadicList<T> {
    /// Concatenates the inner sequences into one list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::sequence::MonadicList;
    ///
    /// let nested = MonadicList::new(vec![vec![1, 2], vec![], vec![3]]);
    /// assert_eq!(nested.flatten().unwrap(), vec![1, 2, 3]);
    /// ```
    pub fn flatten(self) -> MonadicList<T::Item> {
        match self.failure {
            Some(diagnostic) => MonadicList::short_circuit(diagnostic),
            None => MonadicList::new(self.elements.into_iter().flatten()),
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: PartialEq> PartialEq for MonadicList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.is_ok() == other.is_ok() && self.elements == other.elements
    }
}

/// Renders `[a, b, c]`, suffixed with ` (failed: error)` for a failed list.
impl<T: fmt::Display> fmt::Display for MonadicList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")?;
        if let Some(diagnostic) = &self.failure {
            write!(formatter, " (failed: {})", diagnostic.error())?;
        }
        Ok(())
    }
}

impl<T> Default for MonadicList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for MonadicList<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}

impl<T> FromIterator<T> for MonadicList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T> IntoIterator for MonadicList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a MonadicList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for MonadicList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("MonadicList", 2)?;
        state.serialize_field("elements", &self.elements)?;
        state.serialize_field("failure", &self.failure)?;
        state.end()
    }
}
