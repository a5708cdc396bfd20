#![forbid(unsafe_code)]
//! lazyseq: deferred, composable queries over restartable sequences.
//!
//! ```
//! use lazyseq::prelude::*;
//!
//! let evens = range(1, 15).unwrap().filter(|x| x % 2 == 0).to_vec();
//! assert_eq!(evens, vec![2, 4, 6, 8, 10, 12, 14]);
//! ```
//!
//! The member crates are re-exported whole for access to stage types.

pub use lazyseq_core;
pub use lazyseq_mem;
pub use lazyseq_operators;

pub use lazyseq_core::{Error, QueryConfig, Result, Sequence};
pub use lazyseq_operators::Query;

pub mod prelude {
    pub use lazyseq_operators::prelude::*;
}
