#![forbid(unsafe_code)]
//! lazyseq-mem: the containers lazy operators materialize into.
//!
//! Everything here is synchronous and single-owner: a container is created
//! inside one operator invocation and never shared across calls or threads
//! (a frozen [`Lookup`] is the exception; it is immutable and `Arc`-backed).
//!
//! Sizing policies come from `lazyseq_core::QueryConfig`.

pub mod buffer;
pub mod builder;
pub mod lookup;
pub mod set;

pub use buffer::{ArrayBuilder, Buffer};
pub use builder::LargeArrayBuilder;
pub use lookup::{Grouping, Lookup, LookupBuilder, LookupCursor, ResultSelected};
pub use set::Set;
