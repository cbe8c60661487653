//! Immutable ordered sequences.
//!
//! - [`ImmutableSequence`]: fixed-content sequence with copy-producing withers
//! - [`SequenceBuilder`]: mutable staging area that freezes into a sequence
//!
//! # Withers
//!
//! Every "update" returns a new sequence and leaves the receiver unchanged:
//!
//! ```rust
//! use fluent_sequence::sequence::ImmutableSequence;
//!
//! let original = ImmutableSequence::of(["a", "b", "a"]);
//! let removed = original.without(&"a");
//!
//! assert_eq!(removed, ["b"]);
//! assert_eq!(original, ["a", "b", "a"]); // Original unchanged
//! ```
//!
//! # Canonical Empty
//!
//! Every zero-element sequence is the same allocation-free value:
//!
//! ```rust
//! use fluent_sequence::sequence::ImmutableSequence;
//!
//! let empty: ImmutableSequence<i32> = ImmutableSequence::empty();
//! let drained = ImmutableSequence::of([1]).without(&1);
//! assert!(ImmutableSequence::ptr_eq(&empty, &drained));
//! ```

mod builder;
mod immutable;
#[cfg(feature = "rayon")]
mod parallel;

pub use builder::SequenceBuilder;
pub use immutable::ImmutableSequence;
pub use immutable::ImmutableSequenceIntoIterator;
