#![forbid(unsafe_code)]
//! lazyseq-core: the vocabulary every other lazyseq crate speaks.
//!
//! - `error`: the single error taxonomy and `Result` alias.
//! - `config`: serde-backed sizing knobs for buffers and hash containers.
//! - `comparer`: pluggable equality/hash and ordering collaborators.
//! - `sequence`: the restartable `Sequence` interface operators consume.
//! - `source`: host collections (array, shared list, iterable, hash set).

pub mod comparer;
pub mod config;
pub mod error;
pub mod prelude;
pub mod sequence;
pub mod source;

pub use comparer::{
    Comparer, DefaultEquality, DefaultOrder, EqualityComparer, KeyEquality, OptionEquality,
    PartialOrder,
};
pub use config::QueryConfig;
pub use error::{Error, Result};
pub use sequence::{Sequence, Shape};
