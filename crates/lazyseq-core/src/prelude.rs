//! Convenient re-exports for downstream crates.

pub use crate::comparer::{
    Comparer, DefaultEquality, DefaultOrder, EqualityComparer, KeyEquality, OptionEquality,
    PartialOrder,
};
pub use crate::config::QueryConfig;
pub use crate::error::{Error, Result};
pub use crate::sequence::{Sequence, Shape};
pub use crate::source::{
    from_iter, from_slice, from_vec, hash_set, list, ArraySource, HashSetSource, IterSource,
    SharedList,
};
