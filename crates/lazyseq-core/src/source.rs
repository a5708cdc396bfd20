//! Host collection sources: the concrete collaborators queries start from.
//!
//! - [`ArraySource`]: immutable `Arc<[T]>`; array shape, O(1) count.
//! - [`SharedList`]: shared growable `Vec<T>`; list shape, O(1) count. Deferred
//!   queries observe pushes made before their traversal reaches them.
//! - [`IterSource`]: any `Clone + IntoIterator`; generic shape.
//! - [`HashSetSource`]: `Arc<HashSet<T>>`; O(1) count and native `contains`.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::sequence::{Sequence, Shape};
use crate::sequence_into_iter;

// ----- array -----

pub struct ArraySource<T> {
    items: Arc<[T]>,
}

impl<T> ArraySource<T> {
    pub fn new(items: impl Into<Arc<[T]>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Clone for ArraySource<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ArraySource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ArraySource<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items[..] == other.items[..]
    }
}

/// Index cursor over an `Arc<[T]>`.
pub struct ArrayCursor<T> {
    items: Arc<[T]>,
    index: usize,
}

impl<T> ArrayCursor<T> {
    pub fn new(items: Arc<[T]>) -> Self {
        Self { items, index: 0 }
    }
}

impl<T: Clone> Iterator for ArrayCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.index)?.clone();
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.items.len().saturating_sub(self.index);
        (left, Some(left))
    }
}

impl<T: Clone> Sequence for ArraySource<T> {
    type Item = T;
    type Cursor = ArrayCursor<T>;

    fn cursor(&self) -> ArrayCursor<T> {
        ArrayCursor::new(Arc::clone(&self.items))
    }

    fn shape(&self) -> Shape<T> {
        Shape::Array(Arc::clone(&self.items))
    }

    fn fast_count(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

sequence_into_iter!(impl[T: Clone] ArraySource<T>);

// ----- shared list -----

/// A growable list shared between the caller and the queries built on it.
pub struct SharedList<T> {
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T> SharedList<T> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(items)),
        }
    }

    // A panic while holding the lock cannot leave the Vec half-written, so a
    // poisoned lock is still safe to read.
    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn push(&self, item: T) {
        self.write().push(item);
    }

    pub fn extend(&self, items: impl IntoIterator<Item = T>) {
        self.write().extend(items);
    }

    pub fn clear(&self) {
        self.write().clear();
    }
}

impl<T: Clone> SharedList<T> {
    pub fn get(&self, index: usize) -> Option<T> {
        self.read().get(index).cloned()
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.read().clone()
    }
}

impl<T> Default for SharedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SharedList<T> {
    /// Clones the handle; both handles see the same list.
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SharedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.read().iter()).finish()
    }
}

pub struct ListCursor<T> {
    list: SharedList<T>,
    index: usize,
}

impl<T: Clone> Iterator for ListCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.list.get(self.index)?;
        self.index += 1;
        Some(item)
    }
}

impl<T: Clone> Sequence for SharedList<T> {
    type Item = T;
    type Cursor = ListCursor<T>;

    fn cursor(&self) -> ListCursor<T> {
        ListCursor {
            list: self.clone(),
            index: 0,
        }
    }

    fn shape(&self) -> Shape<T> {
        Shape::List(self.clone())
    }

    fn fast_count(&self) -> Option<usize> {
        Some(self.len())
    }
}

sequence_into_iter!(impl[T: Clone] SharedList<T>);

// ----- generic iterable -----

/// Wraps any cloneable iterable (ranges, `Vec`s, adapters over owned data).
/// Each traversal iterates a fresh clone.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iterable: I,
}

impl<I> IterSource<I> {
    pub fn new(iterable: I) -> Self {
        Self { iterable }
    }
}

impl<I> Sequence for IterSource<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;
    type Cursor = I::IntoIter;

    fn cursor(&self) -> I::IntoIter {
        self.iterable.clone().into_iter()
    }
}

sequence_into_iter!(impl[I: IntoIterator + Clone] IterSource<I>);

// ----- hash set -----

pub struct HashSetSource<T> {
    set: Arc<HashSet<T>>,
}

impl<T> HashSetSource<T> {
    pub fn new(set: HashSet<T>) -> Self {
        Self { set: Arc::new(set) }
    }
}

impl<T> Clone for HashSetSource<T> {
    fn clone(&self) -> Self {
        Self {
            set: Arc::clone(&self.set),
        }
    }
}

/// Snapshot cursor: iteration order is the set's own.
pub struct HashSetCursor<T> {
    items: std::vec::IntoIter<T>,
}

impl<T> Iterator for HashSetCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.items.next()
    }
}

impl<T: Hash + Eq + Clone> Sequence for HashSetSource<T> {
    type Item = T;
    type Cursor = HashSetCursor<T>;

    fn cursor(&self) -> HashSetCursor<T> {
        let items: Vec<T> = self.set.iter().cloned().collect();
        HashSetCursor {
            items: items.into_iter(),
        }
    }

    fn fast_count(&self) -> Option<usize> {
        Some(self.set.len())
    }

    fn fast_contains(&self, value: &T) -> Option<bool> {
        Some(self.set.contains(value))
    }
}

sequence_into_iter!(impl[T: Hash + Eq + Clone] HashSetSource<T>);

// ----- constructors -----

pub fn from_vec<T: Clone>(items: Vec<T>) -> ArraySource<T> {
    ArraySource::new(items)
}

pub fn from_slice<T: Clone>(items: &[T]) -> ArraySource<T> {
    ArraySource::new(items.to_vec())
}

pub fn from_iter<I: IntoIterator + Clone>(iterable: I) -> IterSource<I> {
    IterSource::new(iterable)
}

pub fn list<T: Clone>(items: Vec<T>) -> SharedList<T> {
    SharedList::from_vec(items)
}

pub fn hash_set<T: Hash + Eq + Clone>(items: impl IntoIterator<Item = T>) -> HashSetSource<T> {
    HashSetSource::new(items.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_cursors_are_independent() {
        let src = from_vec(vec![1, 2, 3]);
        let mut a = src.cursor();
        let mut b = src.cursor();
        assert_eq!(a.next(), Some(1));
        assert_eq!(a.next(), Some(2));
        assert_eq!(b.next(), Some(1));
        assert_eq!(src.fast_count(), Some(3));
    }

    #[test]
    fn list_cursor_sees_pushes() {
        let l = list(vec![1]);
        let mut c = l.cursor();
        assert_eq!(c.next(), Some(1));
        l.push(2);
        assert_eq!(c.next(), Some(2));
        assert_eq!(c.next(), None);
    }

    #[test]
    fn hash_set_answers_contains_natively() {
        let s = hash_set(vec![1, 2, 3]);
        assert_eq!(s.fast_contains(&2), Some(true));
        assert_eq!(s.fast_contains(&9), Some(false));
    }
}
