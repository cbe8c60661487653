//! Error types for sequence operations.
//!
//! Every fallible operation in this crate returns [`SequenceError`]. Failures
//! are reported synchronously and never leave a partially built sequence
//! behind: the receiver of a failed wither is always untouched.

use thiserror::Error;

/// Errors produced by [`ImmutableSequence`](crate::sequence::ImmutableSequence)
/// withers and [`Streamable`](crate::stream::Streamable) operations.
///
/// # Examples
///
/// ```rust
/// use fluent_sequence::error::SequenceError;
/// use fluent_sequence::sequence::ImmutableSequence;
///
/// let sequence = ImmutableSequence::of(["a"]);
/// assert_eq!(
///     sequence.without_index(5),
///     Err(SequenceError::IndexOutOfBounds { index: 5, length: 1 })
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A missing element was supplied where every element must be present.
    #[error("invalid argument: element at position {position} is null")]
    NullElement {
        /// Position of the offending element in the input.
        position: usize,
    },

    /// An index was outside `0..length`.
    #[error("index {index} out of bounds for sequence of length {length}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Length of the sequence at the time of the call.
        length: usize,
    },

    /// Two elements have no defined natural ordering (e.g. `f64::NAN`).
    #[error("elements at positions {left} and {right} are not comparable")]
    Incomparable {
        /// Position of the first element of the failing comparison.
        left: usize,
        /// Position of the second element of the failing comparison.
        right: usize,
    },
}

impl SequenceError {
    /// Returns `true` for the invalid-argument family of errors.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::NullElement { .. })
    }

    /// Returns `true` if this is an out-of-bounds error.
    #[must_use]
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::IndexOutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        SequenceError::NullElement { position: 1 },
        "invalid argument: element at position 1 is null"
    )]
    #[case(
        SequenceError::IndexOutOfBounds { index: 5, length: 1 },
        "index 5 out of bounds for sequence of length 1"
    )]
    #[case(
        SequenceError::Incomparable { left: 0, right: 2 },
        "elements at positions 0 and 2 are not comparable"
    )]
    fn test_display(#[case] error: SequenceError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_classification() {
        assert!(SequenceError::NullElement { position: 0 }.is_invalid_argument());
        assert!(!SequenceError::NullElement { position: 0 }.is_out_of_bounds());
        assert!(SequenceError::IndexOutOfBounds { index: 1, length: 0 }.is_out_of_bounds());
        assert!(!SequenceError::Incomparable { left: 0, right: 1 }.is_invalid_argument());
    }

    #[rstest]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&SequenceError::NullElement { position: 0 });
    }
}
