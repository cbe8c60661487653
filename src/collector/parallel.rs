//! Parallel accumulation with rayon.
//!
//! Each rayon split folds its elements into its own accumulator; the
//! accumulators are then merged pairwise with [`Collector::combine`]. rayon
//! merges adjacent splits in order, so collecting an indexed parallel
//! iterator preserves encounter order.

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use super::Collector;

/// Runs `collector` over a parallel iterator.
///
/// # Examples
///
/// ```rust
/// use fluent_sequence::collector::{par_collect, to_immutable_sequence};
///
/// let sequence = par_collect(vec![1, 2, 3], &to_immutable_sequence());
/// assert_eq!(sequence, [1, 2, 3]);
/// ```
pub fn par_collect<I, C>(elements: I, collector: &C) -> C::Output
where
    I: IntoParallelIterator,
    C: Collector<I::Item> + Sync,
    C::Accumulator: Send,
{
    let accumulator = elements
        .into_par_iter()
        .fold(
            || collector.supply(),
            |mut accumulator, element| {
                collector.accumulate(&mut accumulator, element);
                accumulator
            },
        )
        .reduce(|| collector.supply(), |left, right| collector.combine(left, right));
    collector.finish(accumulator)
}

/// Runs a [`Collector`] over any rayon parallel iterator.
pub trait ParallelCollectorExt: ParallelIterator {
    /// Accumulates every element with `collector`, merging partitions with
    /// its `combine` step.
    fn par_collect_using<C>(self, collector: &C) -> C::Output
    where
        C: Collector<Self::Item> + Sync,
        C::Accumulator: Send,
    {
        par_collect(self, collector)
    }
}

impl<I: ParallelIterator> ParallelCollectorExt for I {}
