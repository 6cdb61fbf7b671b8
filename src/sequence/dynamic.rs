//! Runtime-typed elements.
//!
//! A typed `MonadicList<T>` is homogeneous by construction and its `flatten`
//! only exists when `T` is a sequence. Runtime-typed values such as
//! `serde_json::Value` need those guarantees checked while the program runs:
//! a JSON array may hold numbers and strings side by side, and any element
//! may or may not be an array. The [`Dynamic`] trait exposes what those
//! checks need, and the operations in this module perform them.

use std::fmt;

use crate::error::{BoxError, ConstructionError};
use crate::outcome::{Diagnostic, Invocation};
use crate::sequence::MonadicList;

/// A value whose kind is only known at run time.
pub trait Dynamic: Sized {
    /// A short name for the runtime kind of this value, e.g. `"integer"`.
    fn kind(&self) -> &'static str;

    /// Returns `true` if this value is a sequence of further values.
    fn is_sequence(&self) -> bool;

    /// Splits a sequence into its items; any other value is handed back.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged if it is not a sequence.
    fn into_sequence(self) -> Result<Vec<Self>, Self>;
}

#[cfg(feature = "serde")]
impl Dynamic for serde_json::Value {
    fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(number) if number.is_f64() => "float",
            Self::Number(_) => "integer",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    fn is_sequence(&self) -> bool {
        self.is_array()
    }

    fn into_sequence(self) -> Result<Vec<Self>, Self> {
        match self {
            Self::Array(items) => Ok(items),
            other => Err(other),
        }
    }
}

/// Counts the elements per kind, in order of first appearance.
fn kind_counts<T: Dynamic>(elements: &[T]) -> Vec<(&'static str, usize)> {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for element in elements {
        let kind = element.kind();
        match counts.iter_mut().find(|(seen, _)| *seen == kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((kind, 1)),
        }
    }
    counts
}

fn check_homogeneous<T: Dynamic>(elements: &[T]) -> Result<(), ConstructionError> {
    let counts = kind_counts(elements);
    if counts.len() > 1 {
        return Err(ConstructionError::Heterogeneous { counts });
    }
    Ok(())
}

impl<T: Dynamic> MonadicList<T> {
    /// Creates a list after checking that every element has the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::Heterogeneous`] with a count per kind if
    /// the elements do not share one kind.
    pub fn try_new(elements: Vec<T>) -> Result<Self, ConstructionError> {
        check_homogeneous(&elements)?;
        Ok(Self::new(elements))
    }

    /// Re-checks homogeneity after chaining operations.
    ///
    /// `bind` and `map` cannot see element kinds, so a transform on dynamic
    /// elements may return values of mixed kinds. This turns such a list into
    /// a failed one, keeping its elements and recording a
    /// [`ConstructionError::Heterogeneous`] diagnostic.
    pub fn revalidate(self) -> Self
    where
        T: fmt::Debug,
    {
        if self.is_err() {
            return self;
        }
        match check_homogeneous(self.elements()) {
            Ok(()) => self,
            Err(error) => {
                let diagnostic = Diagnostic::new(error)
                    .with_value(self.elements())
                    .with_function("MonadicList::revalidate");
                Self::failure(self.into_iter().collect(), diagnostic)
            }
        }
    }

    /// Concatenates the elements when every one of them is a sequence.
    ///
    /// If any element is not a sequence, a warning is logged and the list is
    /// returned unchanged; it does not become failed. A flattened result
    /// whose items are of mixed kinds fails the list, which keeps its
    /// original elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::sequence::MonadicList;
    /// use serde_json::json;
    ///
    /// let nested = MonadicList::from_json(json!([[1, 2], [3]])).unwrap();
    /// assert_eq!(nested.flatten_nested().unwrap(), vec![json!(1), json!(2), json!(3)]);
    ///
    /// let scalars = MonadicList::from_json(json!([1, 2])).unwrap();
    /// let unchanged = scalars.clone().flatten_nested();
    /// assert!(unchanged.is_ok());
    /// assert_eq!(unchanged, scalars);
    /// ```
    pub fn flatten_nested(self) -> Self
    where
        T: Clone + fmt::Debug,
    {
        if self.is_err() {
            return self;
        }
        if !self.iter().all(T::is_sequence) {
            tracing::warn!(
                elements = self.len(),
                "can only flatten when every element is a sequence, leaving the list unchanged"
            );
            return self;
        }
        let flattened = self
            .iter()
            .cloned()
            .flat_map(|element| element.into_sequence().unwrap_or_default())
            .collect();
        self.rebuild(flattened, &Invocation::named("MonadicList::flatten_nested"))
    }

    /// Binds a kind-preserving transform, then flattens the results if the
    /// *original* elements were all sequences.
    ///
    /// The flatten decision is taken on the elements before the transform,
    /// not on its results:
    ///
    /// - original elements not all sequences: a warning is logged and the
    ///   unflattened results are returned;
    /// - original elements all sequences: every result is flattened, and a
    ///   result that is not a sequence fails the list.
    ///
    /// Failures keep the original elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::sequence::MonadicList;
    /// use serde_json::{Value, json};
    ///
    /// let pair = |value: Value| Ok::<_, String>(json!([value.clone(), value]));
    ///
    /// // Scalars in: the results are left nested.
    /// let scalars = MonadicList::from_json(json!([1, 2])).unwrap();
    /// assert_eq!(
    ///     scalars.bind_and_flatten_nested(pair).unwrap(),
    ///     vec![json!([1, 1]), json!([2, 2])],
    /// );
    ///
    /// // Sequences in: the results are flattened.
    /// let arrays = MonadicList::from_json(json!([[1], [2]])).unwrap();
    /// assert_eq!(
    ///     arrays.bind_and_flatten_nested(pair).unwrap(),
    ///     vec![json!([1]), json!([1]), json!([2]), json!([2])],
    /// );
    /// ```
    pub fn bind_and_flatten_nested<E, F>(self, mut transform: F) -> Self
    where
        T: Clone + fmt::Debug,
        F: FnMut(T) -> Result<T, E>,
        E: Into<BoxError>,
    {
        if self.is_err() {
            return self;
        }
        let invocation = Invocation::of::<F>();
        let results = match self.run(&invocation, |value| transform(value).map_err(Into::into)) {
            Ok(results) => results,
            Err(diagnostic) => return Self::failure(self.into_iter().collect(), diagnostic),
        };
        if !self.iter().all(T::is_sequence) {
            tracing::warn!(
                elements = self.len(),
                "flattening requires every original element to be a sequence, returning results unflattened"
            );
            return self.rebuild(results, &invocation);
        }
        let mut flattened = Vec::new();
        for result in results {
            match result.into_sequence() {
                Ok(items) => flattened.extend(items),
                Err(item) => {
                    let error = ConstructionError::NotASequence { kind: item.kind() };
                    let diagnostic = invocation.diagnose(error.into(), self.elements());
                    return Self::failure(self.into_iter().collect(), diagnostic);
                }
            }
        }
        self.rebuild(flattened, &invocation)
    }

    /// Replaces the elements of `self` with `elements` if they are
    /// homogeneous; otherwise fails, keeping the elements of `self`.
    fn rebuild(self, elements: Vec<T>, invocation: &Invocation) -> Self
    where
        T: fmt::Debug,
    {
        match check_homogeneous(&elements) {
            Ok(()) => Self::new(elements),
            Err(error) => {
                let diagnostic = invocation.diagnose(error.into(), self.elements());
                Self::failure(self.into_iter().collect(), diagnostic)
            }
        }
    }
}

#[cfg(feature = "serde")]
impl MonadicList<serde_json::Value> {
    /// Creates a list from a JSON array of same-kind values.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::NotASequence`] if `value` is not an
    /// array, and [`ConstructionError::Heterogeneous`] if its items are of
    /// mixed kinds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use monadic::error::ConstructionError;
    /// use monadic::sequence::MonadicList;
    /// use serde_json::json;
    ///
    /// assert!(MonadicList::from_json(json!([1, 2, 3])).is_ok());
    /// assert_eq!(
    ///     MonadicList::from_json(json!([1, "a", 2])).unwrap_err(),
    ///     ConstructionError::Heterogeneous { counts: vec![("integer", 2), ("string", 1)] },
    /// );
    /// ```
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConstructionError> {
        match value.into_sequence() {
            Ok(items) => Self::try_new(items),
            Err(other) => Err(ConstructionError::NotASequence { kind: other.kind() }),
        }
    }
}
