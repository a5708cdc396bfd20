//! Stable multi-key ordering.
//!
//! - `sorter`: sort-level descriptors and the index-permutation quicksort.
//! - `ordered`: the lazy `OrderedSequence` and its `then_by` chaining.

pub mod ordered;
pub mod sorter;

pub use ordered::{OrderedSequence, SortedDrain};
pub use sorter::{sort_permutation, Primary, SortDescriptor, ThenLevel};
