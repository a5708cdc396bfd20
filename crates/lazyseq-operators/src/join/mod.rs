//! Hash joins over the lookup.
//!
//! Both joins build a lookup of the inner sequence (null keys left out) on
//! the first `next`, then stream the outer sequence in order.
//! - `hash`: inner join, one result per matching (outer, inner) pair.
//! - `group`: group join, exactly one result per outer element.

pub mod group;
pub mod hash;

pub use group::{GroupJoin, GroupJoinIter};
pub use hash::{Join, JoinIter};
