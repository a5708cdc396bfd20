//! The source collaborator interface every operator consumes.
//!
//! A `Sequence` is a *factory* of traversals, not a traversal itself: each call
//! to [`Sequence::cursor`] must start an independent pass over the elements.
//! Everything else on the trait is optional and lets operators take shortcuts
//! (O(1) counts, index-addressed traversal, native membership tests).

use std::sync::Arc;

use crate::source::SharedList;

/// Physical layout of a source, resolved by stages once at construction.
pub enum Shape<T> {
    /// Immutable contiguous storage.
    Array(Arc<[T]>),
    /// Shared growable list; length is re-read on every step.
    List(SharedList<T>),
    /// Anything else: traverse through `Sequence::cursor`.
    Generic,
}

impl<T> Shape<T> {
    pub fn is_indexed(&self) -> bool {
        !matches!(self, Shape::Generic)
    }

    /// Current element count when index-addressable.
    pub fn len(&self) -> Option<usize> {
        match self {
            Shape::Array(items) => Some(items.len()),
            Shape::List(list) => Some(list.len()),
            Shape::Generic => None,
        }
    }
}

impl<T: Clone> Shape<T> {
    /// Element at `index` for index-addressable shapes.
    pub fn get(&self, index: usize) -> Option<T> {
        match self {
            Shape::Array(items) => items.get(index).cloned(),
            Shape::List(list) => list.get(index),
            Shape::Generic => None,
        }
    }
}

impl<T> Clone for Shape<T> {
    fn clone(&self) -> Self {
        match self {
            Shape::Array(items) => Shape::Array(Arc::clone(items)),
            Shape::List(list) => Shape::List(list.clone()),
            Shape::Generic => Shape::Generic,
        }
    }
}

impl<T> std::fmt::Debug for Shape<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Array(items) => write!(f, "Array(len={})", items.len()),
            Shape::List(list) => write!(f, "List(len={})", list.len()),
            Shape::Generic => write!(f, "Generic"),
        }
    }
}

/// A restartable, lazily produced sequence of values.
///
/// Invariants:
/// - `cursor()` never shares mutable traversal state with another cursor.
/// - Cloning a sequence clones its *configuration* (sources, closures,
///   comparers), never an in-flight traversal.
pub trait Sequence: Clone {
    type Item;
    type Cursor: Iterator<Item = Self::Item>;

    /// Start a fresh, independent traversal.
    fn cursor(&self) -> Self::Cursor;

    /// Traverse by value. Operator stages override this to hand themselves
    /// out as the cursor on first use instead of duplicating.
    fn into_cursor(self) -> Self::Cursor
    where
        Self: Sized,
    {
        self.cursor()
    }

    fn shape(&self) -> Shape<Self::Item> {
        Shape::Generic
    }

    /// Element count, only if it is known without traversing.
    fn fast_count(&self) -> Option<usize> {
        None
    }

    /// Membership test, only if the source answers it in better than linear time.
    fn fast_contains(&self, _value: &Self::Item) -> Option<bool> {
        None
    }
}

/// Implements `IntoIterator` for a sequence type by delegating to
/// [`Sequence::into_cursor`], so sequences work directly in `for` loops.
#[macro_export]
macro_rules! sequence_into_iter {
    (impl[$($gen:tt)*] $ty:ty) => {
        impl<$($gen)*> ::core::iter::IntoIterator for $ty
        where
            $ty: $crate::sequence::Sequence,
        {
            type Item = <$ty as $crate::sequence::Sequence>::Item;
            type IntoIter = <$ty as $crate::sequence::Sequence>::Cursor;

            fn into_iter(self) -> Self::IntoIter {
                $crate::sequence::Sequence::into_cursor(self)
            }
        }
    };
}
