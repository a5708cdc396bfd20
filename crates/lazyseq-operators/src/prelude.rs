//! `use lazyseq_operators::prelude::*;` brings the operator surface into scope.

pub use crate::generate::{empty, range, repeat};
pub use crate::query::Query;
pub use crate::sort::OrderedSequence;
pub use crate::terminal::numeric::{Averageable, Extremum, Summable};
pub use lazyseq_core::prelude::*;
pub use lazyseq_mem::{Grouping, Lookup, Set};
