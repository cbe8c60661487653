//! # fluent-sequence
//!
//! Immutable ordered sequences with copy-producing withers and a chainable
//! transformation layer.
//!
//! ## Overview
//!
//! - **[`ImmutableSequence`](sequence::ImmutableSequence)**: a fixed-content
//!   ordered container. `with`/`without` operations return new sequences and
//!   never touch the receiver.
//! - **[`Streamable`](stream::Streamable)**: a trait that gives any container
//!   able to produce an iterator over its elements, and rebuild itself from
//!   one, the whole family of `filter`/`map`/`sorted`/`reduce`/... operations.
//! - **[`Collector`](collector::Collector)**: reusable accumulation strategies
//!   with an associative merge step for parallel accumulation.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for `ImmutableSequence`
//! - `rayon`: parallel collection and reduction
//! - `fxhash`: use `rustc-hash` for `distinct()`
//! - `full`: enable all of the above
//!
//! ## Example
//!
//! ```rust
//! use fluent_sequence::prelude::*;
//!
//! let letters = ImmutableSequence::of(["a", "b"]);
//! let extended = letters.with("c");
//! assert_eq!(extended, ["a", "b", "c"]);
//! assert_eq!(letters, ["a", "b"]);
//!
//! let numbers = ImmutableSequence::of([1, 2, 3]);
//! let result: ImmutableSequence<i32> = numbers.map(|n| n * 2).filter(|n| *n > 2);
//! assert_eq!(result, [4, 6]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use fluent_sequence::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collector::*;
    pub use crate::error::SequenceError;
    pub use crate::sequence::*;
    pub use crate::stream::*;
}

pub mod collector;
pub mod error;
pub mod sequence;
pub mod stream;

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted pointer backing every sequence.
///
/// Always `Arc`: sequences are readable from any thread once built.
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;
