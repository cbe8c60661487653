//! rayon support for [`ImmutableSequence`].

use rayon::prelude::*;

use super::ImmutableSequence;
use crate::collector::{Collector, par_collect};

impl<E: Sync> ImmutableSequence<E> {
    /// Returns a parallel iterator over references to the elements.
    #[must_use]
    pub fn par_iter(&self) -> rayon::slice::Iter<'_, E> {
        self.as_slice().par_iter()
    }
}

impl<E: Clone + Send + Sync> ImmutableSequence<E> {
    /// Accumulates the elements in parallel with `collector`.
    ///
    /// Partitions are merged with the collector's `combine` step; the result
    /// keeps the sequence order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::collector::to_immutable_sequence;
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let sequence: ImmutableSequence<i32> = (0..1_000).collect();
    /// let copy = sequence.par_collect_into(&to_immutable_sequence());
    /// assert_eq!(copy, sequence);
    /// ```
    pub fn par_collect_into<C>(&self, collector: &C) -> C::Output
    where
        C: Collector<E> + Sync,
        C::Accumulator: Send,
    {
        par_collect(self.par_iter().cloned(), collector)
    }

    /// Folds the elements in parallel.
    ///
    /// Every partition starts from a clone of `identity`, so `identity` must
    /// be neutral for `combiner`, and `combiner` must be associative. An
    /// empty sequence returns `identity` unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fluent_sequence::sequence::ImmutableSequence;
    ///
    /// let words = ImmutableSequence::of(["ab", "cde", "f"]);
    /// let length = words.par_reduce_with(0, |total, word| total + word.len(), |a, b| a + b);
    /// assert_eq!(length, 6);
    /// ```
    pub fn par_reduce_with<U, F, C>(&self, identity: U, accumulator: F, combiner: C) -> U
    where
        U: Clone + Send + Sync,
        F: Fn(U, E) -> U + Send + Sync,
        C: Fn(U, U) -> U + Send + Sync,
    {
        let reduced = self
            .par_iter()
            .cloned()
            .fold(|| identity.clone(), &accumulator)
            .reduce_with(&combiner);
        reduced.unwrap_or(identity)
    }
}

impl<E: Send> FromParallelIterator<E> for ImmutableSequence<E> {
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: IntoParallelIterator<Item = E>,
    {
        Self::from_vec(par_iter.into_par_iter().collect())
    }
}
