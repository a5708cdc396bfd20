#![forbid(unsafe_code)]
//! lazyseq-operators: lazy query stages and the terminal operators.
//!
//! - `traits`: the stage state machine (fresh / started / running / done).
//! - `filter`, `map`: shape-specialised filter and project stages with fusion.
//! - `partition`, `combine`, `set_ops`, `generate`: one-pass operators.
//! - `sort`: stable multi-key ordering.
//! - `group`, `join`: lookup-backed grouping and hash joins.
//! - `terminal`: eager counts, element access, aggregates and conversions.
//! - `query`: the `Query` extension trait exposing all of the above.

pub mod combine;
pub mod filter;
pub mod func;
pub mod generate;
pub mod group;
pub mod join;
pub mod map;
pub mod partition;
pub mod prelude;
pub mod query;
pub mod set_ops;
pub mod shape;
pub mod sort;
pub mod terminal;
pub mod traits;

pub use filter::{Where, WhereIndexed};
pub use generate::{empty, range, repeat};
pub use group::{GroupBy, GroupResult};
pub use join::{GroupJoin, Join};
pub use map::{Select, SelectIndexed, WhereSelect};
pub use query::Query;
pub use sort::OrderedSequence;
pub use terminal::numeric::{Averageable, Extremum, Summable};
pub use traits::{Cursor, Stage, StageHeader, StageState, Traversal};
