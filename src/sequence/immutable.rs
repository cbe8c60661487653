//! Immutable ordered sequence with copy-producing withers.
//!
//! This module provides [`ImmutableSequence`], a fixed-content ordered
//! container. Its contents are stored once in a shared, read-only slice;
//! "updating" a sequence always builds a new one.
//!
//! # Overview
//!
//! | Operation        | Complexity |
//! |------------------|------------|
//! | `empty`          | O(1)       |
//! | `clone`          | O(1)       |
//! | `get` / `len`    | O(1)       |
//! | `contains`       | O(n)       |
//! | `with`           | O(n)       |
//! | `without`        | O(n)       |
//! | `without_all`    | O(n * m)   |
//!
//! # Examples
//!
//! ```rust
//! use fluent_sequence::sequence::ImmutableSequence;
//!
//! let sequence = ImmutableSequence::of(["x", "y", "x"]);
//!
//! // Removing by index removes every element equal to the value there
//! let removed = sequence.without_index(0).unwrap();
//! assert_eq!(removed, ["y"]);
//!
//! // The original is preserved
//! assert_eq!(sequence.len(), 3);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::Index;

use tracing::{debug, trace};

use super::SequenceBuilder;
use crate::ReferenceCounter;
use crate::error::SequenceError;
use crate::stream::Streamable;

/// An immutable, ordered sequence of elements.
///
/// The zero-length sequence has a single canonical representation that owns
/// no allocation. Every constructor, wither and transformation that ends up
/// with no elements produces it, so [`is_canonical_empty`](Self::is_canonical_empty)
/// and [`ptr_eq`](Self::ptr_eq) can test emptiness by identity.
///
/// Cloning is O(1): clones share the same read-only storage.
///
/// # Examples
///
/// ```rust
/// use fluent_sequence::sequence::ImmutableSequence;
///
/// let sequence = ImmutableSequence::of([1, 2, 3, 4]);
/// let odd = sequence.without_all([2, 4]);
/// assert_eq!(odd, [1, 3]);
/// ```
pub struct ImmutableSequence<E> {
    /// `None` is the canonical empty sequence; `Some` is never empty.
    elements: Option<ReferenceCounter<[E]>>,
}

impl<E> ImmutableSequence<E> {
    /// Returns the canonical empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let first: ImmutableSequence<i32> = ImmutableSequence::empty();
    /// let second: ImmutableSequence<i32> = ImmutableSequence::empty();
    /// assert!(ImmutableSequence::ptr_eq(&first, &second));
    /// ```
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self { elements: None }
    }

    /// Freezes `elements`, normalizing the zero-length case.
    pub(crate) fn from_vec(elements: Vec<E>) -> Self {
        if elements.is_empty() {
            Self::empty()
        } else {
            Self {
                elements: Some(ReferenceCounter::from(elements)),
            }
        }
    }

    /// Creates a sequence from a fixed list of elements.
    ///
    /// Accepts arrays, vectors, or anything else that can be iterated by
    /// value. No elements yields the canonical empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let letters = ImmutableSequence::of(["a", "b"]);
    /// assert_eq!(letters.len(), 2);
    ///
    /// let none: ImmutableSequence<&str> = ImmutableSequence::of([]);
    /// assert!(none.is_canonical_empty());
    /// ```
    #[must_use]
    pub fn of<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        Self::from_vec(elements.into_iter().collect())
    }

    /// Creates a sequence from possibly-missing elements.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::NullElement`] with the position of the first
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::error::SequenceError;
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let result = ImmutableSequence::try_of_nullable([Some("a"), None]);
    /// assert_eq!(result, Err(SequenceError::NullElement { position: 1 }));
    /// ```
    pub fn try_of_nullable<I>(elements: I) -> Result<Self, SequenceError>
    where
        I: IntoIterator<Item = Option<E>>,
    {
        elements
            .into_iter()
            .enumerate()
            .map(|(position, element)| {
                element.ok_or_else(|| {
                    debug!(position, "rejected null element");
                    SequenceError::NullElement { position }
                })
            })
            .collect::<Result<Vec<E>, SequenceError>>()
            .map(Self::from_vec)
    }

    /// Returns a new [`SequenceBuilder`].
    #[inline]
    #[must_use]
    pub const fn builder() -> SequenceBuilder<E> {
        SequenceBuilder::new()
    }

    /// Returns `true` if this is the canonical empty sequence.
    ///
    /// Since every empty sequence is canonical this is equivalent to
    /// [`is_empty`](Self::is_empty), but documents intent at call sites that
    /// rely on identity.
    #[inline]
    #[must_use]
    pub const fn is_canonical_empty(&self) -> bool {
        self.elements.is_none()
    }

    /// Returns `true` if both sequences share the same storage.
    ///
    /// Two canonical empty sequences are always identical.
    #[must_use]
    pub fn ptr_eq(left: &Self, right: &Self) -> bool {
        match (&left.elements, &right.elements) {
            (None, None) => true,
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Returns the elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        self.elements.as_deref().unwrap_or(&[])
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if the sequence has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_canonical_empty()
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&E> {
        self.as_slice().get(index)
    }

    /// Returns the first element.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&E> {
        self.as_slice().first()
    }

    /// Returns the last element.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&E> {
        self.as_slice().last()
    }

    /// Returns an iterator over references to the elements, front to back.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.as_slice().iter()
    }
}

impl<E: PartialEq> ImmutableSequence<E> {
    /// Returns `true` if any element equals `element`.
    #[must_use]
    pub fn contains(&self, element: &E) -> bool {
        self.as_slice().contains(element)
    }

    /// Returns the position of the first element equal to `element`.
    #[must_use]
    pub fn index_of(&self, element: &E) -> Option<usize> {
        self.iter().position(|candidate| candidate == element)
    }

    /// Returns the position of the last element equal to `element`.
    #[must_use]
    pub fn last_index_of(&self, element: &E) -> Option<usize> {
        self.iter().rposition(|candidate| candidate == element)
    }
}

impl<E: Clone> ImmutableSequence<E> {
    /// Creates a sequence by cloning every element of a borrowed collection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let source = vec![String::from("a"), String::from("b")];
    /// let sequence = ImmutableSequence::copy_of(&source);
    /// assert_eq!(sequence, source);
    /// ```
    #[must_use]
    pub fn copy_of<'a, I>(collection: I) -> Self
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        Self::of(collection.into_iter().cloned())
    }

    fn appending<I>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let elements = elements.into_iter();
        let mut builder = SequenceBuilder::with_capacity(self.len() + elements.size_hint().0);
        builder.add_all(self.iter().cloned()).add_all(elements);
        let result = builder.build();
        trace!(before = self.len(), after = result.len(), "appended to sequence");
        result
    }

    fn retaining<P>(&self, mut keep: P) -> Self
    where
        P: FnMut(&E) -> bool,
    {
        let result = Self::from_vec(self.iter().filter(|element| keep(element)).cloned().collect());
        trace!(before = self.len(), after = result.len(), "removed from sequence");
        result
    }

    /// Returns a new sequence with `element` appended.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let sequence = ImmutableSequence::of(["a", "b"]);
    /// assert_eq!(sequence.with("c"), ["a", "b", "c"]);
    /// assert_eq!(sequence, ["a", "b"]);
    /// ```
    #[must_use]
    pub fn with(&self, element: E) -> Self {
        self.appending(std::iter::once(element))
    }

    /// Returns a new sequence with every element of `elements` appended in
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let sequence = ImmutableSequence::of([1]);
    /// assert_eq!(sequence.with_all([2, 3]), [1, 2, 3]);
    /// assert_eq!(sequence.with_all(vec![4]), [1, 4]);
    /// ```
    #[must_use]
    pub fn with_all<I>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        self.appending(elements)
    }

    /// Appends a possibly-missing element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::NullElement`] if `element` is `None`; the
    /// reported position is where the element would have been placed.
    pub fn try_with_nullable(&self, element: Option<E>) -> Result<Self, SequenceError> {
        element.map(|element| self.with(element)).ok_or_else(|| {
            debug!(position = self.len(), "rejected null element");
            SequenceError::NullElement {
                position: self.len(),
            }
        })
    }

    /// Returns a new sequence without the element at `index`.
    ///
    /// Unlike [`without_index`](Self::without_index), this is purely
    /// positional: other elements equal to the removed one are kept.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let sequence = ImmutableSequence::of(["x", "y", "x"]);
    /// assert_eq!(sequence.remove_at(0).unwrap(), ["y", "x"]);
    /// ```
    pub fn remove_at(&self, index: usize) -> Result<Self, SequenceError> {
        self.check_index(index)?;
        let result = Self::from_vec(
            self.iter()
                .enumerate()
                .filter(|(position, _)| *position != index)
                .map(|(_, element)| element.clone())
                .collect(),
        );
        trace!(index, after = result.len(), "removed position from sequence");
        Ok(result)
    }

    fn check_index(&self, index: usize) -> Result<(), SequenceError> {
        if index < self.len() {
            Ok(())
        } else {
            debug!(index, length = self.len(), "index out of bounds");
            Err(SequenceError::IndexOutOfBounds {
                index,
                length: self.len(),
            })
        }
    }
}

impl<E: Clone + PartialEq> ImmutableSequence<E> {
    /// Returns a new sequence with **every** element equal to `element`
    /// removed.
    ///
    /// If nothing matches, the result has the same contents as `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let sequence = ImmutableSequence::of(["a", "b", "a"]);
    /// assert_eq!(sequence.without(&"a"), ["b"]);
    /// assert_eq!(sequence.without(&"z"), ["a", "b", "a"]);
    /// ```
    #[must_use]
    pub fn without(&self, element: &E) -> Self {
        self.retaining(|candidate| candidate != element)
    }

    /// Returns a new sequence with every element equal to the element
    /// currently at `index` removed.
    ///
    /// This removes by value, not by position: duplicates of the value at
    /// `index` elsewhere in the sequence are removed too. Use
    /// [`remove_at`](Self::remove_at) for positional removal.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let sequence = ImmutableSequence::of(["x", "y", "x"]);
    /// assert_eq!(sequence.without_index(0).unwrap(), ["y"]);
    /// assert!(sequence.without_index(3).is_err());
    /// ```
    pub fn without_index(&self, index: usize) -> Result<Self, SequenceError> {
        self.check_index(index)?;
        Ok(self.without(&self.as_slice()[index]))
    }

    /// Returns a new sequence with every element contained in `exclusions`
    /// removed, all occurrences included.
    ///
    /// Exclusions may be given by value or by reference.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let sequence = ImmutableSequence::of([1, 2, 3, 4, 2]);
    /// assert_eq!(sequence.without_all([2, 4]), [1, 3]);
    ///
    /// let exclusions = ImmutableSequence::of([1, 3]);
    /// assert_eq!(sequence.without_all(&exclusions), [2, 4, 2]);
    /// ```
    #[must_use]
    pub fn without_all<I>(&self, exclusions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        let exclusions: Vec<I::Item> = exclusions.into_iter().collect();
        self.retaining(|candidate| {
            !exclusions
                .iter()
                .any(|excluded| excluded.borrow() == candidate)
        })
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An owning iterator over elements of an [`ImmutableSequence`].
///
/// Elements are cloned out of the shared storage, which may be referenced by
/// other sequences.
pub struct ImmutableSequenceIntoIterator<E> {
    /// Storage of the consumed sequence (`None` when it was empty)
    elements: Option<ReferenceCounter<[E]>>,
    /// Next position to yield from the front
    front: usize,
    /// One past the next position to yield from the back
    back: usize,
}

impl<E: Clone> Iterator for ImmutableSequenceIntoIterator<E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let element = self.elements.as_deref()?[self.front].clone();
        self.front += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<E: Clone> DoubleEndedIterator for ImmutableSequenceIntoIterator<E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.elements.as_deref()?[self.back].clone())
    }
}

impl<E: Clone> ExactSizeIterator for ImmutableSequenceIntoIterator<E> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<E> Clone for ImmutableSequence<E> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
        }
    }
}

impl<E> Default for ImmutableSequence<E> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<E> FromIterator<E> for ImmutableSequence<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl<E: Clone> IntoIterator for ImmutableSequence<E> {
    type Item = E;
    type IntoIter = ImmutableSequenceIntoIterator<E>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        ImmutableSequenceIntoIterator {
            back: self.len(),
            elements: self.elements,
            front: 0,
        }
    }
}

impl<'a, E> IntoIterator for &'a ImmutableSequence<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E> From<Vec<E>> for ImmutableSequence<E> {
    fn from(elements: Vec<E>) -> Self {
        Self::from_vec(elements)
    }
}

impl<E, const N: usize> From<[E; N]> for ImmutableSequence<E> {
    fn from(elements: [E; N]) -> Self {
        Self::of(elements)
    }
}

impl<E: Clone> From<&[E]> for ImmutableSequence<E> {
    fn from(elements: &[E]) -> Self {
        Self::copy_of(elements)
    }
}

impl<E> AsRef<[E]> for ImmutableSequence<E> {
    fn as_ref(&self) -> &[E] {
        self.as_slice()
    }
}

impl<E> Index<usize> for ImmutableSequence<E> {
    type Output = E;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<E: PartialEq> PartialEq for ImmutableSequence<E> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<E: Eq> Eq for ImmutableSequence<E> {}

impl<E: PartialEq> PartialEq<[E]> for ImmutableSequence<E> {
    fn eq(&self, other: &[E]) -> bool {
        self.as_slice() == other
    }
}

impl<E: PartialEq, const N: usize> PartialEq<[E; N]> for ImmutableSequence<E> {
    fn eq(&self, other: &[E; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<E: PartialEq> PartialEq<Vec<E>> for ImmutableSequence<E> {
    fn eq(&self, other: &Vec<E>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<E: PartialOrd> PartialOrd for ImmutableSequence<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<E: Ord> Ord for ImmutableSequence<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<E: Hash> Hash for ImmutableSequence<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<E: fmt::Debug> fmt::Debug for ImmutableSequence<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<E: fmt::Display> fmt::Display for ImmutableSequence<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (position, element) in self.iter().enumerate() {
            if position > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

static_assertions::assert_impl_all!(ImmutableSequence<i32>: Send, Sync);
static_assertions::assert_impl_all!(ImmutableSequence<String>: Send, Sync);
static_assertions::assert_not_impl_any!(ImmutableSequence<std::rc::Rc<i32>>: Send, Sync);

// =============================================================================
// Streamable Implementation
// =============================================================================

impl<E: Clone> Streamable for ImmutableSequence<E> {
    type Element = E;

    fn stream(&self) -> impl Iterator<Item = E> {
        self.iter().cloned()
    }

    fn from_stream<I>(stream: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let result = Self::of(stream);
        trace!(length = result.len(), "rebuilt sequence from stream");
        result
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<E: serde::Serialize> serde::Serialize for ImmutableSequence<E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct ImmutableSequenceVisitor<E> {
    marker: std::marker::PhantomData<E>,
}

#[cfg(feature = "serde")]
impl<'de, E> serde::de::Visitor<'de> for ImmutableSequenceVisitor<E>
where
    E: serde::Deserialize<'de>,
{
    type Value = ImmutableSequence<E>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut builder = SequenceBuilder::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            builder.add(element);
        }
        Ok(builder.build())
    }
}

#[cfg(feature = "serde")]
impl<'de, E> serde::Deserialize<'de> for ImmutableSequence<E>
where
    E: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(ImmutableSequenceVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty() {
        let sequence: ImmutableSequence<i32> = ImmutableSequence::empty();
        assert_eq!(format!("{sequence}"), "[]");
    }

    #[rstest]
    fn test_display_elements() {
        let sequence = ImmutableSequence::of([1, 2, 3]);
        assert_eq!(format!("{sequence}"), "[1, 2, 3]");
    }

    #[rstest]
    fn test_debug() {
        let sequence = ImmutableSequence::of(["a"]);
        assert_eq!(format!("{sequence:?}"), "[\"a\"]");
    }

    // =========================================================================
    // Canonical Empty Tests
    // =========================================================================

    #[rstest]
    fn test_empty_is_identical() {
        let first: ImmutableSequence<String> = ImmutableSequence::empty();
        let second: ImmutableSequence<String> = ImmutableSequence::of([]);
        let third: ImmutableSequence<String> = ImmutableSequence::default();
        assert!(ImmutableSequence::ptr_eq(&first, &second));
        assert!(ImmutableSequence::ptr_eq(&second, &third));
    }

    #[rstest]
    fn test_drained_sequence_is_canonical() {
        let sequence = ImmutableSequence::of([7, 7]);
        assert!(sequence.without(&7).is_canonical_empty());
        assert!(sequence.without_index(1).unwrap().is_canonical_empty());
    }

    #[rstest]
    fn test_non_empty_not_identical_to_rebuilt_copy() {
        let sequence = ImmutableSequence::of([1, 2]);
        let copy = ImmutableSequence::copy_of(&sequence);
        assert_eq!(sequence, copy);
        assert!(!ImmutableSequence::ptr_eq(&sequence, &copy));
        assert!(ImmutableSequence::ptr_eq(&sequence, &sequence.clone()));
    }

    // =========================================================================
    // Read Access Tests
    // =========================================================================

    #[rstest]
    fn test_read_access() {
        let sequence = ImmutableSequence::of(["a", "b", "a"]);
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.get(1), Some(&"b"));
        assert_eq!(sequence.get(3), None);
        assert_eq!(sequence.first(), Some(&"a"));
        assert_eq!(sequence.last(), Some(&"a"));
        assert_eq!(sequence[1], "b");
        assert!(sequence.contains(&"b"));
        assert!(!sequence.contains(&"c"));
        assert_eq!(sequence.index_of(&"a"), Some(0));
        assert_eq!(sequence.last_index_of(&"a"), Some(2));
        assert_eq!(sequence.index_of(&"c"), None);
    }

    #[rstest]
    fn test_into_iter_both_ends() {
        let sequence = ImmutableSequence::of([1, 2, 3]);
        let mut iterator = sequence.into_iter();
        assert_eq!(iterator.len(), 3);
        assert_eq!(iterator.next(), Some(1));
        assert_eq!(iterator.next_back(), Some(3));
        assert_eq!(iterator.next(), Some(2));
        assert_eq!(iterator.next(), None);
        assert_eq!(iterator.next_back(), None);
    }

    #[rstest]
    fn test_into_iter_empty() {
        let sequence: ImmutableSequence<String> = ImmutableSequence::empty();
        let mut iterator = sequence.into_iter();
        assert_eq!(iterator.len(), 0);
        assert_eq!(iterator.next(), None);
        assert_eq!(iterator.next_back(), None);
    }

    #[rstest]
    fn test_into_iter_leaves_shared_storage_intact() {
        let sequence = ImmutableSequence::of([String::from("a"), String::from("b")]);
        let shared = sequence.clone();
        let collected: Vec<String> = sequence.into_iter().rev().collect();
        assert_eq!(collected, vec![String::from("b"), String::from("a")]);
        assert_eq!(shared, [String::from("a"), String::from("b")]);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![0])]
    #[case(vec![1, 2, 3])]
    fn test_is_empty_agrees_with_canonical_empty(#[case] elements: Vec<i32>) {
        let sequence = ImmutableSequence::of(elements.clone());
        assert_eq!(sequence.is_empty(), elements.is_empty());
        assert_eq!(sequence.is_canonical_empty(), sequence.is_empty());
        assert_eq!(sequence.len() == 0, sequence.is_empty());
    }

    // =========================================================================
    // Wither Tests
    // =========================================================================

    #[rstest]
    fn test_with_appends() {
        let sequence = ImmutableSequence::of(["a", "b"]);
        assert_eq!(sequence.with("c"), ["a", "b", "c"]);
        assert_eq!(sequence, ["a", "b"]);
    }

    #[rstest]
    fn test_with_on_empty() {
        let sequence = ImmutableSequence::empty().with(1);
        assert_eq!(sequence, [1]);
    }

    #[rstest]
    fn test_with_all_empty_batch() {
        let sequence = ImmutableSequence::of([1, 2]);
        assert_eq!(sequence.with_all(Vec::new()), [1, 2]);
    }

    #[rstest]
    #[case(vec![1, 2, 1, 3], 1, vec![2, 3])]
    #[case(vec![1, 2, 3], 4, vec![1, 2, 3])]
    #[case(vec![5, 5, 5], 5, vec![])]
    fn test_without_removes_all_occurrences(
        #[case] elements: Vec<i32>,
        #[case] removed: i32,
        #[case] expected: Vec<i32>,
    ) {
        let sequence = ImmutableSequence::of(elements);
        assert_eq!(sequence.without(&removed), expected);
    }

    #[rstest]
    fn test_without_index_out_of_bounds() {
        let sequence = ImmutableSequence::of(["a"]);
        assert_eq!(
            sequence.without_index(5),
            Err(SequenceError::IndexOutOfBounds { index: 5, length: 1 })
        );
    }

    #[rstest]
    fn test_remove_at_out_of_bounds_on_empty() {
        let sequence: ImmutableSequence<i32> = ImmutableSequence::empty();
        assert!(sequence.remove_at(0).unwrap_err().is_out_of_bounds());
    }

    #[rstest]
    fn test_try_with_nullable() {
        let sequence = ImmutableSequence::of([1]);
        assert_eq!(sequence.try_with_nullable(Some(2)).unwrap(), [1, 2]);
        assert_eq!(
            sequence.try_with_nullable(None),
            Err(SequenceError::NullElement { position: 1 })
        );
    }

    #[rstest]
    fn test_try_of_nullable_all_present() {
        let sequence = ImmutableSequence::try_of_nullable([Some('a'), Some('b')]).unwrap();
        assert_eq!(sequence, ['a', 'b']);
    }

    // =========================================================================
    // Ordering and Hashing Tests
    // =========================================================================

    #[rstest]
    fn test_ordering_is_lexicographic() {
        let shorter = ImmutableSequence::of([1, 2]);
        let longer = ImmutableSequence::of([1, 2, 0]);
        let bigger = ImmutableSequence::of([2]);
        assert!(shorter < longer);
        assert!(longer < bigger);
    }

    #[rstest]
    fn test_hash_consistent_with_eq() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ImmutableSequence::of([1, 2]));
        assert!(set.contains(&ImmutableSequence::copy_of(&[1, 2])));
    }
}
