//! Chainable transformations for any rebuildable container.
//!
//! This module provides the [`Streamable`] trait. A container implements two
//! primitives:
//!
//! - [`stream`](Streamable::stream): a fresh, single-pass iterator over its
//!   elements
//! - [`from_stream`](Streamable::from_stream): rebuild a container of the same
//!   type from an iterator
//!
//! and receives every other operation for free. Operations returning a
//! container always go through `from_stream`, so the result has the same
//! concrete type as the receiver.
//!
//! # Examples
//!
//! ```rust
//! use fluent_sequence::sequence::ImmutableSequence;
//! use fluent_sequence::stream::Streamable;
//!
//! let numbers = ImmutableSequence::of([5, 3, 8, 3, 1]);
//!
//! let result: ImmutableSequence<i32> = numbers.distinct().sorted().limit(3);
//! assert_eq!(result, [1, 3, 5]);
//!
//! let total = numbers.reduce(0, |accumulator, element| accumulator + element);
//! assert_eq!(total, 20);
//! ```
//!
//! # Implementing `Streamable`
//!
//! ```rust
//! use fluent_sequence::stream::Streamable;
//!
//! #[derive(Debug, PartialEq)]
//! struct Tags(Vec<String>);
//!
//! impl Streamable for Tags {
//!     type Element = String;
//!
//!     fn stream(&self) -> impl Iterator<Item = String> {
//!         self.0.iter().cloned()
//!     }
//!
//!     fn from_stream<I>(stream: I) -> Self
//!     where
//!         I: IntoIterator<Item = String>,
//!     {
//!         Self(stream.into_iter().collect())
//!     }
//! }
//!
//! let tags = Tags(vec!["b".into(), "a".into()]);
//! assert_eq!(tags.sorted(), Tags(vec!["a".into(), "b".into()]));
//! ```

mod sort;

use std::cmp::Ordering;
use std::hash::Hash;

use crate::collector::Collector;
use crate::error::SequenceError;

#[cfg(feature = "fxhash")]
type SeenSet<T> = rustc_hash::FxHashSet<T>;

#[cfg(not(feature = "fxhash"))]
type SeenSet<T> = std::collections::HashSet<T>;

/// A container that can be viewed as an iterator and rebuilt from one.
///
/// # Required Methods
///
/// - `stream`: a fresh iterator over the elements, in order
/// - `from_stream`: rebuild a container from an iterator
///
/// # Provided Methods
///
/// Transformations (return `Self`): `filter`, `map`, `flat_map`, `distinct`,
/// `sorted`, `sorted_by`, `sorted_by_key`, `try_sorted`, `peek`, `limit`,
/// `skip`.
///
/// Terminal operations: `for_each_ordered`, `reduce`, `reduce_optional`,
/// `reduce_with`, `collect_with`, `collect_into`, `min_by`, `max_by`,
/// `any_match`, `all_match`, `none_match`, `find_first`, `find_any`, `count`.
///
/// Each operation takes its own view from `stream`; views are never reused
/// across calls. The chain is evaluated eagerly when its result is built.
pub trait Streamable: Sized {
    /// The type of the elements yielded by [`stream`](Self::stream).
    type Element;

    /// Returns a fresh iterator over the elements, front to back.
    fn stream(&self) -> impl Iterator<Item = Self::Element>;

    /// Builds a container of this type from `stream`.
    fn from_stream<I>(stream: I) -> Self
    where
        I: IntoIterator<Item = Self::Element>;

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Keeps only the elements matching `predicate`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    /// use fluent_sequence::stream::Streamable;
    ///
    /// let sequence = ImmutableSequence::of([1, 2, 3, 4]);
    /// assert_eq!(sequence.filter(|n| n % 2 == 0), [2, 4]);
    /// ```
    #[must_use]
    fn filter<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&Self::Element) -> bool,
    {
        Self::from_stream(self.stream().filter(predicate))
    }

    /// Replaces every element with `transform(element)`.
    #[must_use]
    fn map<F>(&self, transform: F) -> Self
    where
        F: FnMut(Self::Element) -> Self::Element,
    {
        Self::from_stream(self.stream().map(transform))
    }

    /// Replaces every element with the elements produced by `transform`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    /// use fluent_sequence::stream::Streamable;
    ///
    /// let sequence = ImmutableSequence::of([1, 2]);
    /// assert_eq!(sequence.flat_map(|n| [n, n * 10]), [1, 10, 2, 20]);
    /// ```
    #[must_use]
    fn flat_map<I, F>(&self, transform: F) -> Self
    where
        F: FnMut(Self::Element) -> I,
        I: IntoIterator<Item = Self::Element>,
    {
        Self::from_stream(self.stream().flat_map(transform))
    }

    /// Removes duplicate elements, keeping the first occurrence of each.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    /// use fluent_sequence::stream::Streamable;
    ///
    /// let sequence = ImmutableSequence::of(["b", "a", "b", "c", "a"]);
    /// assert_eq!(sequence.distinct(), ["b", "a", "c"]);
    /// ```
    #[must_use]
    fn distinct(&self) -> Self
    where
        Self::Element: Eq + Hash + Clone,
    {
        let mut seen = SeenSet::default();
        Self::from_stream(
            self.stream()
                .filter(|element| seen.insert(element.clone())),
        )
    }

    /// Sorts the elements by their natural order. Stable.
    #[must_use]
    fn sorted(&self) -> Self
    where
        Self::Element: Ord,
    {
        let mut elements: Vec<Self::Element> = self.stream().collect();
        elements.sort();
        Self::from_stream(elements)
    }

    /// Sorts the elements with `comparator`. Stable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    /// use fluent_sequence::stream::Streamable;
    ///
    /// let sequence = ImmutableSequence::of([1, 3, 2]);
    /// assert_eq!(sequence.sorted_by(|left, right| right.cmp(left)), [3, 2, 1]);
    /// ```
    #[must_use]
    fn sorted_by<C>(&self, comparator: C) -> Self
    where
        C: FnMut(&Self::Element, &Self::Element) -> Ordering,
    {
        let mut elements: Vec<Self::Element> = self.stream().collect();
        elements.sort_by(comparator);
        Self::from_stream(elements)
    }

    /// Sorts the elements by the key `extract` returns for each. Stable.
    #[must_use]
    fn sorted_by_key<K, F>(&self, extract: F) -> Self
    where
        K: Ord,
        F: FnMut(&Self::Element) -> K,
    {
        let mut elements: Vec<Self::Element> = self.stream().collect();
        elements.sort_by_key(extract);
        Self::from_stream(elements)
    }

    /// Sorts partially ordered elements by their natural order. Stable.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Incomparable`] when two elements, or one
    /// element with itself, have no defined ordering.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::error::SequenceError;
    /// use fluent_sequence::sequence::ImmutableSequence;
    /// use fluent_sequence::stream::Streamable;
    ///
    /// let readings = ImmutableSequence::of([2.5, 0.5, 1.0]);
    /// assert_eq!(readings.try_sorted().unwrap(), [0.5, 1.0, 2.5]);
    ///
    /// let broken = ImmutableSequence::of([1.0, f64::NAN]);
    /// assert!(matches!(
    ///     broken.try_sorted(),
    ///     Err(SequenceError::Incomparable { .. })
    /// ));
    /// ```
    fn try_sorted(&self) -> Result<Self, SequenceError>
    where
        Self::Element: PartialOrd,
    {
        let sorted = sort::checked_merge_sort(self.stream().enumerate().collect())?;
        Ok(Self::from_stream(
            sorted.into_iter().map(|(_, element)| element),
        ))
    }

    /// Runs `action` on every element as it passes through unchanged.
    #[must_use]
    fn peek<A>(&self, action: A) -> Self
    where
        A: FnMut(&Self::Element),
    {
        Self::from_stream(self.stream().inspect(action))
    }

    /// Keeps at most the first `max_size` elements.
    #[must_use]
    fn limit(&self, max_size: usize) -> Self {
        Self::from_stream(self.stream().take(max_size))
    }

    /// Drops the first `count` elements.
    #[must_use]
    fn skip(&self, count: usize) -> Self {
        Self::from_stream(self.stream().skip(count))
    }

    // =========================================================================
    // Terminal Operations
    // =========================================================================

    /// Runs `action` on every element in order.
    fn for_each_ordered<A>(&self, action: A)
    where
        A: FnMut(Self::Element),
    {
        self.stream().for_each(action);
    }

    /// Folds the elements into `identity` with `accumulator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    /// use fluent_sequence::stream::Streamable;
    ///
    /// let sequence = ImmutableSequence::of([1, 2, 3]);
    /// assert_eq!(sequence.reduce(10, |left, right| left + right), 16);
    /// ```
    fn reduce<F>(&self, identity: Self::Element, accumulator: F) -> Self::Element
    where
        F: FnMut(Self::Element, Self::Element) -> Self::Element,
    {
        self.stream().fold(identity, accumulator)
    }

    /// Folds the elements with `accumulator`, starting from the first.
    ///
    /// Returns `None` if there are no elements.
    fn reduce_optional<F>(&self, accumulator: F) -> Option<Self::Element>
    where
        F: FnMut(Self::Element, Self::Element) -> Self::Element,
    {
        self.stream().reduce(accumulator)
    }

    /// Folds the elements into a value of another type.
    ///
    /// `combiner` merges two partial results and must be associative with
    /// `identity` as its neutral element. A sequential fold has a single
    /// partition and never calls it; the parallel variants do.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    /// use fluent_sequence::stream::Streamable;
    ///
    /// let words = ImmutableSequence::of(["ab", "cde"]);
    /// let length = words.reduce_with(0, |total, word| total + word.len(), |a, b| a + b);
    /// assert_eq!(length, 5);
    /// ```
    fn reduce_with<U, F, C>(&self, identity: U, accumulator: F, _combiner: C) -> U
    where
        F: FnMut(U, Self::Element) -> U,
        C: FnMut(U, U) -> U,
    {
        self.stream().fold(identity, accumulator)
    }

    /// Accumulates the elements into a mutable container from `supplier`.
    ///
    /// `combiner` appends a second partial container into the first; see
    /// [`reduce_with`](Self::reduce_with) for when it runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    /// use fluent_sequence::stream::Streamable;
    ///
    /// let sequence = ImmutableSequence::of(['a', 'b']);
    /// let text = sequence.collect_with(
    ///     String::new,
    ///     |text, character| text.push(character),
    ///     |text, other| text.push_str(&other),
    /// );
    /// assert_eq!(text, "ab");
    /// ```
    fn collect_with<R, S, A, C>(&self, supplier: S, mut accumulator: A, _combiner: C) -> R
    where
        S: FnOnce() -> R,
        A: FnMut(&mut R, Self::Element),
        C: FnMut(&mut R, R),
    {
        let mut result = supplier();
        for element in self.stream() {
            accumulator(&mut result, element);
        }
        result
    }

    /// Accumulates the elements with a reusable [`Collector`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::collector::to_immutable_slice;
    /// use fluent_sequence::sequence::ImmutableSequence;
    /// use fluent_sequence::stream::Streamable;
    ///
    /// let sequence = ImmutableSequence::of([1, 2]);
    /// let slice = sequence.collect_into(to_immutable_slice());
    /// assert_eq!(&*slice, &[1, 2]);
    /// ```
    fn collect_into<C>(&self, collector: C) -> C::Output
    where
        C: Collector<Self::Element>,
    {
        collector.collect(self.stream())
    }

    /// Returns the least element according to `comparator`.
    ///
    /// The first of several equal minima wins.
    fn min_by<C>(&self, comparator: C) -> Option<Self::Element>
    where
        C: FnMut(&Self::Element, &Self::Element) -> Ordering,
    {
        self.stream().min_by(comparator)
    }

    /// Returns the greatest element according to `comparator`.
    ///
    /// The first of several equal maxima wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    /// use fluent_sequence::stream::Streamable;
    ///
    /// let words = ImmutableSequence::of(["bb", "a", "cc"]);
    /// let longest = words.max_by(|left, right| left.len().cmp(&right.len()));
    /// assert_eq!(longest, Some("bb"));
    /// ```
    fn max_by<C>(&self, mut comparator: C) -> Option<Self::Element>
    where
        C: FnMut(&Self::Element, &Self::Element) -> Ordering,
    {
        self.stream().reduce(|best, candidate| {
            if comparator(&candidate, &best) == Ordering::Greater {
                candidate
            } else {
                best
            }
        })
    }

    /// Returns `true` if any element matches `predicate`.
    fn any_match<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Element) -> bool,
    {
        self.stream().any(|element| predicate(&element))
    }

    /// Returns `true` if every element matches `predicate`.
    ///
    /// Vacuously `true` when there are no elements.
    fn all_match<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Element) -> bool,
    {
        self.stream().all(|element| predicate(&element))
    }

    /// Returns `true` if no element matches `predicate`.
    fn none_match<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&Self::Element) -> bool,
    {
        !self.any_match(predicate)
    }

    /// Returns the first element.
    fn find_first(&self) -> Option<Self::Element> {
        self.stream().next()
    }

    /// Returns some element. Sequential evaluation returns the first.
    fn find_any(&self) -> Option<Self::Element> {
        self.find_first()
    }

    /// Returns the number of elements.
    fn count(&self) -> usize {
        self.stream().count()
    }
}

impl<E: Clone> Streamable for Vec<E> {
    type Element = E;

    fn stream(&self) -> impl Iterator<Item = E> {
        self.iter().cloned()
    }

    fn from_stream<I>(stream: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        stream.into_iter().collect()
    }
}
