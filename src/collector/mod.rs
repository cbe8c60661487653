//! Reusable accumulation strategies.
//!
//! A [`Collector`] describes how to fold elements into a result in four
//! steps:
//!
//! 1. `supply` a fresh mutable accumulator
//! 2. `accumulate` one element into it
//! 3. `combine` two accumulators built on separate partitions
//! 4. `finish` an accumulator into the immutable result
//!
//! Because `combine` is part of the contract, the same collector drives both
//! sequential and parallel accumulation (the latter behind the `rayon`
//! feature).
//!
//! # Provided Collectors
//!
//! - [`to_immutable_slice`]: collects into a shared `Arc<[T]>`
//! - [`to_immutable_sequence`]: collects into an [`ImmutableSequence`]
//! - [`FnCollector`]: assembles a collector from closures
//!
//! # Examples
//!
//! ```rust
//! use fluent_sequence::collector::{CollectorExt, to_immutable_sequence};
//! use fluent_sequence::sequence::ImmutableSequence;
//!
//! let sequence: ImmutableSequence<&str> = ["a", "b", "c"]
//!     .into_iter()
//!     .collect_using(to_immutable_sequence());
//! assert_eq!(sequence, ["a", "b", "c"]);
//! ```

#[cfg(feature = "rayon")]
mod parallel;

#[cfg(feature = "rayon")]
pub use parallel::{ParallelCollectorExt, par_collect};

use tracing::trace;

use crate::ReferenceCounter;
use crate::sequence::{ImmutableSequence, SequenceBuilder};

/// An accumulation strategy folding elements of type `T` into an `Output`.
///
/// # Laws
///
/// For any accumulators `a`, `b`, `c` built by this collector:
///
/// ```text
/// combine(combine(a, b), c) == combine(a, combine(b, c))   // associativity
/// combine(supply(), a) == a == combine(a, supply())        // identity
/// ```
///
/// Elements accumulated into the left argument of `combine` precede those of
/// the right argument in the result.
pub trait Collector<T> {
    /// Mutable intermediate state.
    type Accumulator;
    /// Final result.
    type Output;

    /// Returns a fresh, empty accumulator.
    fn supply(&self) -> Self::Accumulator;

    /// Adds one element to `accumulator`.
    fn accumulate(&self, accumulator: &mut Self::Accumulator, element: T);

    /// Merges two partial accumulators, `left` first.
    fn combine(&self, left: Self::Accumulator, right: Self::Accumulator) -> Self::Accumulator;

    /// Turns an accumulator into the final result.
    fn finish(&self, accumulator: Self::Accumulator) -> Self::Output;

    /// Runs the collector over `elements` in a single partition.
    fn collect<I>(&self, elements: I) -> Self::Output
    where
        I: IntoIterator<Item = T>,
    {
        let mut accumulator = self.supply();
        for element in elements {
            self.accumulate(&mut accumulator, element);
        }
        self.finish(accumulator)
    }
}

impl<T, C: Collector<T>> Collector<T> for &C {
    type Accumulator = C::Accumulator;
    type Output = C::Output;

    #[inline]
    fn supply(&self) -> Self::Accumulator {
        (**self).supply()
    }

    #[inline]
    fn accumulate(&self, accumulator: &mut Self::Accumulator, element: T) {
        (**self).accumulate(accumulator, element);
    }

    #[inline]
    fn combine(&self, left: Self::Accumulator, right: Self::Accumulator) -> Self::Accumulator {
        (**self).combine(left, right)
    }

    #[inline]
    fn finish(&self, accumulator: Self::Accumulator) -> Self::Output {
        (**self).finish(accumulator)
    }
}

// =============================================================================
// Named Collectors
// =============================================================================

/// Collects into a plain shared slice. See [`to_immutable_slice`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToImmutableSlice;

impl<T> Collector<T> for ToImmutableSlice {
    type Accumulator = SequenceBuilder<T>;
    type Output = ReferenceCounter<[T]>;

    fn supply(&self) -> Self::Accumulator {
        SequenceBuilder::new()
    }

    fn accumulate(&self, accumulator: &mut Self::Accumulator, element: T) {
        accumulator.add(element);
    }

    fn combine(&self, left: Self::Accumulator, right: Self::Accumulator) -> Self::Accumulator {
        left.append(right)
    }

    fn finish(&self, accumulator: Self::Accumulator) -> Self::Output {
        trace!(length = accumulator.len(), "collected into slice");
        accumulator.build_slice()
    }
}

/// Collects into an [`ImmutableSequence`]. See [`to_immutable_sequence`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToImmutableSequence;

impl<T> Collector<T> for ToImmutableSequence {
    type Accumulator = SequenceBuilder<T>;
    type Output = ImmutableSequence<T>;

    fn supply(&self) -> Self::Accumulator {
        SequenceBuilder::new()
    }

    fn accumulate(&self, accumulator: &mut Self::Accumulator, element: T) {
        accumulator.add(element);
    }

    fn combine(&self, left: Self::Accumulator, right: Self::Accumulator) -> Self::Accumulator {
        left.append(right)
    }

    fn finish(&self, accumulator: Self::Accumulator) -> Self::Output {
        trace!(length = accumulator.len(), "collected into sequence");
        accumulator.build()
    }
}

/// Returns a collector producing a shared `Arc<[T]>` in encounter order.
///
/// # Examples
///
/// ```rust
/// use fluent_sequence::collector::{CollectorExt, to_immutable_slice};
///
/// let slice = (1..=3).collect_using(to_immutable_slice());
/// assert_eq!(&*slice, &[1, 2, 3]);
/// ```
#[must_use]
pub const fn to_immutable_slice() -> ToImmutableSlice {
    ToImmutableSlice
}

/// Returns a collector producing an [`ImmutableSequence`] in encounter order.
#[must_use]
pub const fn to_immutable_sequence() -> ToImmutableSequence {
    ToImmutableSequence
}

// =============================================================================
// Closure Collector
// =============================================================================

/// A collector assembled from four closures.
///
/// # Examples
///
/// ```rust
/// use fluent_sequence::collector::{CollectorExt, FnCollector};
///
/// let joined = FnCollector::new(
///     String::new,
///     |text: &mut String, word: &str| text.push_str(word),
///     |mut left: String, right: String| {
///         left.push_str(&right);
///         left
///     },
///     |text: String| text.to_uppercase(),
/// );
///
/// assert_eq!(["ab", "c"].into_iter().collect_using(&joined), "ABC");
/// ```
#[derive(Clone, Copy)]
pub struct FnCollector<S, A, C, F> {
    supplier: S,
    accumulator: A,
    combiner: C,
    finisher: F,
}

impl<S, A, C, F> FnCollector<S, A, C, F> {
    /// Creates a collector from its four steps.
    pub const fn new<T, R, O>(supplier: S, accumulator: A, combiner: C, finisher: F) -> Self
    where
        S: Fn() -> R,
        A: Fn(&mut R, T),
        C: Fn(R, R) -> R,
        F: Fn(R) -> O,
    {
        Self {
            supplier,
            accumulator,
            combiner,
            finisher,
        }
    }
}

impl<S, A, C, R> FnCollector<S, A, C, fn(R) -> R> {
    /// Creates a collector whose result is the accumulator itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::collector::{CollectorExt, FnCollector};
    ///
    /// let sum = FnCollector::without_finisher(
    ///     || 0,
    ///     |total: &mut i32, element: i32| *total += element,
    ///     |left: i32, right: i32| left + right,
    /// );
    /// assert_eq!((1..=4).collect_using(&sum), 10);
    /// ```
    pub fn without_finisher<T>(supplier: S, accumulator: A, combiner: C) -> Self
    where
        S: Fn() -> R,
        A: Fn(&mut R, T),
        C: Fn(R, R) -> R,
    {
        Self::new(supplier, accumulator, combiner, std::convert::identity)
    }
}

impl<T, R, O, S, A, C, F> Collector<T> for FnCollector<S, A, C, F>
where
    S: Fn() -> R,
    A: Fn(&mut R, T),
    C: Fn(R, R) -> R,
    F: Fn(R) -> O,
{
    type Accumulator = R;
    type Output = O;

    fn supply(&self) -> R {
        (self.supplier)()
    }

    fn accumulate(&self, accumulator: &mut R, element: T) {
        (self.accumulator)(accumulator, element);
    }

    fn combine(&self, left: R, right: R) -> R {
        (self.combiner)(left, right)
    }

    fn finish(&self, accumulator: R) -> O {
        (self.finisher)(accumulator)
    }
}

impl<S, A, C, F> std::fmt::Debug for FnCollector<S, A, C, F> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("FnCollector").finish_non_exhaustive()
    }
}

// =============================================================================
// Iterator Extension
// =============================================================================

/// Runs a [`Collector`] over any iterator.
pub trait CollectorExt: Iterator + Sized {
    /// Accumulates every remaining element with `collector`.
    fn collect_using<C>(self, collector: C) -> C::Output
    where
        C: Collector<Self::Item>,
    {
        collector.collect(self)
    }
}

impl<I: Iterator> CollectorExt for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_combine_keeps_left_first() {
        let collector = to_immutable_sequence();
        let mut left = Collector::<i32>::supply(&collector);
        collector.accumulate(&mut left, 1);
        let mut right = collector.supply();
        collector.accumulate(&mut right, 2);
        collector.accumulate(&mut right, 3);
        let merged = collector.combine(left, right);
        assert_eq!(collector.finish(merged), [1, 2, 3]);
    }

    #[rstest]
    fn test_combine_with_empty_is_identity() {
        let collector = to_immutable_slice();
        let mut filled = Collector::<char>::supply(&collector);
        collector.accumulate(&mut filled, 'a');
        let merged = collector.combine(collector.supply(), filled);
        assert_eq!(&*collector.finish(merged), &['a']);
    }

    #[rstest]
    fn test_empty_input_yields_canonical_empty() {
        let sequence: ImmutableSequence<u8> = std::iter::empty().collect_using(to_immutable_sequence());
        assert!(sequence.is_canonical_empty());
    }

    #[rstest]
    fn test_reference_collector() {
        let collector = ToImmutableSequence;
        let first: ImmutableSequence<i32> = (0..2).collect_using(&collector);
        let second: ImmutableSequence<i32> = (2..4).collect_using(&collector);
        assert_eq!(first, [0, 1]);
        assert_eq!(second, [2, 3]);
    }

    #[rstest]
    fn test_fn_collector_debug() {
        let collector = FnCollector::without_finisher(
            Vec::new,
            |elements: &mut Vec<i32>, element: i32| elements.push(element),
            |mut left: Vec<i32>, mut right: Vec<i32>| {
                left.append(&mut right);
                left
            },
        );
        assert_eq!(format!("{collector:?}"), "FnCollector { .. }");
    }
}
