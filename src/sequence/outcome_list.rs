//! `OutcomeList` - a list of outcomes with per-element failure.

use std::fmt;

use crate::error::{BoxError, ConstructionError};
use crate::outcome::{Diagnostic, Invocation, Outcome};

/// One input element for [`OutcomeList::try_from_elements`].
///
/// Lets a caller hand over plain values and outcomes through one type; the
/// constructor rejects inputs that mix the two.
#[derive(Clone, Debug, PartialEq)]
pub enum Element<T> {
    /// A plain value, wrapped as a successful outcome on construction.
    Value(T),
    /// An already-wrapped outcome.
    Outcome(Outcome<T>),
}

/// A list whose elements are [`Outcome`]s.
///
/// Chaining operations run [`Outcome::bind`] on every element independently,
/// so some elements may fail while others succeed. The list as a whole counts
/// as failed when a list-level failure was recorded *or* any element is a
/// `Failure`; once failed, every later chaining operation short-circuits.
///
/// A list-level diagnostic is only recorded when a list-level operation
/// fails, which happens when a filter predicate fails.
///
/// Equality compares the element outcomes only.
///
/// # Examples
///
/// ```rust
/// use monadic::sequence::OutcomeList;
///
/// let squares = OutcomeList::from_values(vec![1, 2, 3]).map(|number| number * number);
/// assert_eq!(squares, OutcomeList::from_values(vec![1, 4, 9]));
///
/// let parsed = OutcomeList::from_values(vec!["1", "x", "3"]).bind(|text: &str| text.parse::<i32>());
/// assert!(parsed.is_err());
/// assert_eq!(parsed.failed_indices(), vec![1]);
/// assert_eq!(parsed.successes().copied().collect::<Vec<_>>(), vec![1, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct OutcomeList<T> {
    elements: Vec<Outcome<T>>,
    failure: Option<Diagnostic>,
    failed: bool,
}

impl<T> OutcomeList<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    fn assemble(elements: Vec<Outcome<T>>, failure: Option<Diagnostic>) -> Self {
        let failed = failure.is_some() || elements.iter().any(Outcome::is_err);
        Self {
            elements,
            failure,
            failed,
        }
    }

    /// Wraps every value as a successful outcome.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::assemble(values.into_iter().map(Outcome::Success).collect(), None)
    }

    /// Builds a list from outcomes; the list is failed if any of them is.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Outcome<T>>,
    {
        Self::assemble(outcomes.into_iter().collect(), None)
    }

    /// Creates a list with a list-level failure.
    pub fn failure(outcomes: Vec<Outcome<T>>, diagnostic: Diagnostic) -> Self {
        Self::assemble(outcomes, Some(diagnostic))
    }

    /// Builds a list from elements that must be all values or all outcomes.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::MixedElements`] if the input contains both
    /// plain values and outcomes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::outcome::Outcome;
    /// use monadic::sequence::{Element, OutcomeList};
    ///
    /// let mixed = vec![Element::Value(0), Element::Outcome(Outcome::success(1))];
    /// assert!(OutcomeList::try_from_elements(mixed).is_err());
    ///
    /// let plain = vec![Element::Value(0), Element::Value(1)];
    /// assert_eq!(
    ///     OutcomeList::try_from_elements(plain).unwrap(),
    ///     OutcomeList::from_values(vec![0, 1]),
    /// );
    /// ```
    pub fn try_from_elements(elements: Vec<Element<T>>) -> Result<Self, ConstructionError> {
        let values = elements
            .iter()
            .filter(|element| matches!(element, Element::Value(_)))
            .count();
        let outcomes = elements.len() - values;
        if values > 0 && outcomes > 0 {
            return Err(ConstructionError::MixedElements { values, outcomes });
        }
        Ok(Self::from_outcomes(elements.into_iter().map(|element| match element {
            Element::Value(value) => Outcome::Success(value),
            Element::Outcome(outcome) => outcome,
        })))
    }

    /// Carries a failed list over to a new element type, keeping its length
    /// and order. Failures pass through; each success becomes a failure
    /// recording that `invocation` skipped it.
    fn short_circuit<U>(self, invocation: &Invocation) -> OutcomeList<U>
    where
        T: fmt::Debug,
    {
        let cause = self.failure.as_ref();
        let elements = self
            .elements
            .into_iter()
            .map(|outcome| match outcome.retype_failure() {
                Ok(failure) => failure,
                Err(value) => Outcome::Failure(invocation.skipped(&value, cause)),
            })
            .collect();
        OutcomeList::assemble(elements, self.failure)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns `true` if neither the list nor any element has failed.
    #[inline]
    pub const fn is_ok(&self) -> bool {
        !self.failed
    }

    /// Returns `true` if the list or any element has failed.
    #[inline]
    pub const fn is_err(&self) -> bool {
        self.failed
    }

    /// The list-level diagnostic, if a list-level operation failed.
    #[inline]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        self.failure.as_ref()
    }

    /// The element outcomes.
    #[inline]
    pub fn outcomes(&self) -> &[Outcome<T>] {
        &self.elements
    }

    /// Returns the element outcomes, whether or not the list has failed.
    #[inline]
    pub fn unwrap(self) -> Vec<Outcome<T>> {
        self.elements
    }

    /// Positions of the failed elements.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(index, outcome)| outcome.is_err().then_some(index))
            .collect()
    }

    /// Iterates over the values of the successful elements.
    pub fn successes(&self) -> impl Iterator<Item = &T> {
        self.elements.iter().filter_map(Outcome::value)
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

    /// Returns a fresh iterator over the element outcomes.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Outcome<T>> {
        self.elements.iter()
    }

    // =========================================================================
    // Chaining
    // =========================================================================

    /// Binds a fallible transform on every element.
    ///
    /// Short-circuits if the list has failed. Otherwise each element runs
    /// through [`Outcome::bind`], so a failing element becomes a `Failure`
    /// without affecting its neighbours, and the list is failed afterwards if
    /// any element is.
    ///
    /// A failed list short-circuits into the new element type without
    /// running the transform. Length and order are kept: failed elements and
    /// the list diagnostic carry over unchanged, and each successful element
    /// becomes a `Failure` with a [`Skipped`](crate::error::Skipped) error and its rendered value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::sequence::OutcomeList;
    ///
    /// let parsed = OutcomeList::from_values(vec!["1", "x", "3"]).bind(|text: &str| text.parse::<i32>());
    /// assert_eq!(parsed.failed_indices(), vec![1]);
    ///
    /// let doubled = parsed.map(|number| number * 2);
    /// assert_eq!(doubled.len(), 3);
    /// assert_eq!(doubled.failed_indices(), vec![0, 1, 2]);
    /// ```
    pub fn bind<U, E, F>(self, mut transform: F) -> OutcomeList<U>
    where
        T: Clone + fmt::Debug,
        F: FnMut(T) -> Result<U, E>,
        E: Into<BoxError>,
    {
        self.apply(&Invocation::of::<F>(), |value| transform(value).map_err(Into::into))
    }

    /// Like [`OutcomeList::bind`], with extra arguments passed to every call.
    pub fn bind_with<U, A, E, F>(self, mut transform: F, args: A) -> OutcomeList<U>
    where
        T: Clone + fmt::Debug,
        A: fmt::Debug,
        F: FnMut(T, &A) -> Result<U, E>,
        E: Into<BoxError>,
    {
        let invocation = Invocation::of::<F>().with_args(&args);
        self.apply(&invocation, |value| transform(value, &args).map_err(Into::into))
    }

    /// Applies an infallible transform on every element; panics are captured
    /// per element.
    pub fn map<U, F>(self, mut function: F) -> OutcomeList<U>
    where
        T: Clone + fmt::Debug,
        F: FnMut(T) -> U,
    {
        self.apply(&Invocation::of::<F>(), |value| Ok(function(value)))
    }

    /// Binds a sequence-producing transform on every element and flattens
    /// each result in the same pass.
    ///
    /// Equivalent to `bind` followed by `flatten` without building the
    /// intermediate list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::sequence::OutcomeList;
    ///
    /// let pairs = OutcomeList::from_values(vec![1, 2, 3])
    ///     .bind_and_flatten(|number: i32| Ok::<_, String>(vec![number, number * number]));
    /// assert_eq!(pairs, OutcomeList::from_values(vec![1, 1, 2, 4, 3, 9]));
    /// ```
    pub fn bind_and_flatten<U, E, F>(self, mut transform: F) -> OutcomeList<U::Item>
    where
        T: Clone + fmt::Debug,
        U: IntoIterator,
        F: FnMut(T) -> Result<U, E>,
        E: Into<BoxError>,
    {
        self.apply_flattened(&Invocation::of::<F>(), |value| transform(value).map_err(Into::into))
    }

    /// Like [`OutcomeList::bind_and_flatten`], with extra arguments.
    pub fn bind_and_flatten_with<U, A, E, F>(self, mut transform: F, args: A) -> OutcomeList<U::Item>
    where
        T: Clone + fmt::Debug,
        U: IntoIterator,
        A: fmt::Debug,
        F: FnMut(T, &A) -> Result<U, E>,
        E: Into<BoxError>,
    {
        let invocation = Invocation::of::<F>().with_args(&args);
        self.apply_flattened(&invocation, |value| transform(value, &args).map_err(Into::into))
    }

    /// Keeps the elements whose predicate outcome is `Success(true)`.
    ///
    /// The predicate is bound through [`Outcome`] on each element. If it
    /// fails for any element, the whole list fails at the list level,
    /// retaining its original elements and the predicate's diagnostic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::sequence::OutcomeList;
    ///
    /// let evens = OutcomeList::from_values(0..10).filter(|number| number % 2 == 0);
    /// assert_eq!(evens, OutcomeList::from_values(vec![0, 2, 4, 6, 8]));
    /// ```
    pub fn filter<F>(self, mut predicate: F) -> Self
    where
        T: fmt::Debug,
        F: FnMut(&T) -> bool,
    {
        self.select(&Invocation::of::<F>(), |value| Ok(predicate(value)))
    }

    /// Keeps the elements for which a fallible predicate returns `Ok(true)`.
    pub fn try_filter<E, F>(self, mut predicate: F) -> Self
    where
        T: fmt::Debug,
        F: FnMut(&T) -> Result<bool, E>,
        E: Into<BoxError>,
    {
        self.select(&Invocation::of::<F>(), |value| predicate(value).map_err(Into::into))
    }

    /// Like [`OutcomeList::try_filter`], with extra arguments.
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

    fn apply<U, F>(self, invocation: &Invocation, mut call: F) -> OutcomeList<U>
    where
        T: Clone + fmt::Debug,
        F: FnMut(T) -> Result<U, BoxError>,
    {
        if self.failed {
            return self.short_circuit(invocation);
        }
        let elements = self
            .elements
            .into_iter()
            .map(|outcome| outcome.apply(invocation, &mut call))
            .collect();
        OutcomeList::assemble(elements, None)
    }

    fn apply_flattened<U, F>(self, invocation: &Invocation, mut call: F) -> OutcomeList<U::Item>
    where
        T: Clone + fmt::Debug,
        U: IntoIterator,
        F: FnMut(T) -> Result<U, BoxError>,
    {
        if self.failed {
            return self.short_circuit(invocation);
        }
        let mut flattened = Vec::with_capacity(self.elements.len());
        for outcome in self.elements {
            flattened.extend(outcome.apply(invocation, &mut call).flatten());
        }
        OutcomeList::assemble(flattened, None)
    }

    fn select<F>(self, invocation: &Invocation, mut keep: F) -> Self
    where
        T: fmt::Debug,
        F: FnMut(&T) -> Result<bool, BoxError>,
    {
        if self.failed {
            return self;
        }
        let verdicts = self
            .elements
            .iter()
            .map(|outcome| outcome.as_ref().apply(invocation, &mut keep).into_result())
            .collect::<Result<Vec<bool>, Diagnostic>>();
        match verdicts {
            Ok(verdicts) => Self::assemble(
                self.elements
                    .into_iter()
                    .zip(verdicts)
                    .filter_map(|(outcome, verdict)| verdict.then_some(outcome))
                    .collect(),
                None,
            ),
            Err(diagnostic) => Self::failure(self.elements, diagnostic),
        }
    }
}

impl<T: IntoIterator> OutcomeList<T> {
    /// Expands every sequence-valued element into one outcome per item.
    ///
    /// Each element goes through [`Outcome::flatten`] and the expansions are
    /// concatenated in order.
    pub fn flatten(self) -> OutcomeList<T::Item>
    where
        T: fmt::Debug,
    {
        if self.failed {
            return self.short_circuit(&Invocation::named("OutcomeList::flatten"));
        }
        OutcomeList::assemble(
            self.elements.into_iter().flat_map(Outcome::flatten).collect(),
            None,
        )
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: PartialEq> PartialEq for OutcomeList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: fmt::Display> fmt::Display for OutcomeList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (index, outcome) in self.elements.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{outcome}")?;
        }
        write!(formatter, "]")?;
        if let Some(diagnostic) = &self.failure {
            write!(formatter, " (failed: {})", diagnostic.error())?;
        }
        Ok(())
    }
}

impl<T> Default for OutcomeList<T> {
    fn default() -> Self {
        Self::assemble(Vec::new(), None)
    }
}

impl<T> From<Vec<Outcome<T>>> for OutcomeList<T> {
    fn from(outcomes: Vec<Outcome<T>>) -> Self {
        Self::from_outcomes(outcomes)
    }
}

impl<T> IntoIterator for OutcomeList<T> {
    type Item = Outcome<T>;
    type IntoIter = std::vec::IntoIter<Outcome<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OutcomeList<T> {
    type Item = &'a Outcome<T>;
    type IntoIter = std::slice::Iter<'a, Outcome<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for OutcomeList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("OutcomeList", 3)?;
        state.serialize_field("elements", &self.elements)?;
        state.serialize_field("failed", &self.failed)?;
        state.serialize_field("failure", &self.failure)?;
        state.end()
    }
}
