//! Mutable staging area for building an [`ImmutableSequence`].

use super::ImmutableSequence;
use crate::ReferenceCounter;

/// Accumulates elements and freezes them into an immutable result.
///
/// A builder is the only mutable state involved in constructing a sequence.
/// It is consumed by [`build`](Self::build), so nothing can observe the
/// elements changing after the sequence exists.
///
/// # Examples
///
/// ```rust
/// use fluent_sequence::sequence::SequenceBuilder;
///
/// let mut builder = SequenceBuilder::new();
/// builder.add(1).add(2).add_all([3, 4]);
/// let sequence = builder.build();
/// assert_eq!(sequence, [1, 2, 3, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct SequenceBuilder<E> {
    elements: Vec<E>,
}

impl<E> SequenceBuilder<E> {
    /// Creates an empty builder.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Creates an empty builder with room for `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Appends one element.
    #[inline]
    pub fn add(&mut self, element: E) -> &mut Self {
        self.elements.push(element);
        self
    }

    /// Appends every element of `elements` in iteration order.
    pub fn add_all<I>(&mut self, elements: I) -> &mut Self
    where
        I: IntoIterator<Item = E>,
    {
        self.elements.extend(elements);
        self
    }

    /// Moves the contents of `other` after the contents of `self`.
    ///
    /// This is the merge step used when partial results built on separate
    /// partitions are combined; the left partition always comes first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::SequenceBuilder;
    ///
    /// let mut left = SequenceBuilder::new();
    /// left.add("a");
    /// let mut right = SequenceBuilder::new();
    /// right.add("b");
    ///
    /// assert_eq!(left.append(right).build(), ["a", "b"]);
    /// ```
    #[must_use]
    pub fn append(mut self, mut other: Self) -> Self {
        self.elements.append(&mut other.elements);
        self
    }

    /// Returns the number of elements added so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing has been added.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Freezes the builder into an [`ImmutableSequence`].
    ///
    /// An empty builder yields the canonical empty sequence.
    #[must_use]
    pub fn build(self) -> ImmutableSequence<E> {
        ImmutableSequence::from_vec(self.elements)
    }

    /// Freezes the builder into a plain shared slice.
    #[must_use]
    pub fn build_slice(self) -> ReferenceCounter<[E]> {
        ReferenceCounter::from(self.elements)
    }
}

impl<E> Default for SequenceBuilder<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Extend<E> for SequenceBuilder<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_is_empty() {
        let builder: SequenceBuilder<i32> = SequenceBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.len(), 0);
    }

    #[rstest]
    fn test_add_chains() {
        let mut builder = SequenceBuilder::with_capacity(2);
        builder.add('x').add('y');
        assert_eq!(builder.len(), 2);
        assert_eq!(builder.build(), ['x', 'y']);
    }

    #[rstest]
    fn test_append_keeps_left_first() {
        let mut left = SequenceBuilder::new();
        left.add_all([1, 2]);
        let mut right = SequenceBuilder::new();
        right.add_all([3, 4]);
        assert_eq!(left.append(right).build(), [1, 2, 3, 4]);
    }

    #[rstest]
    fn test_empty_build_is_canonical() {
        let sequence = SequenceBuilder::<String>::new().build();
        assert!(sequence.is_canonical_empty());
    }

    #[rstest]
    fn test_build_slice() {
        let mut builder = SequenceBuilder::new();
        builder.extend(["a", "b"]);
        let slice = builder.build_slice();
        assert_eq!(&*slice, &["a", "b"]);
    }
}
