//! Growable buffers for materializing sequences of unknown length.
//!
//! [`ArrayBuilder`] is the simple doubling buffer. [`Buffer`] is the one-shot
//! "drain this sequence into contiguous storage" helper used by reverse, sort
//! and the conversion terminals. Sources with a known count or an exact size
//! hint fill an exactly sized [`ArrayBuilder`]; everything else goes through
//! the chunked [`LargeArrayBuilder`].

use lazyseq_core::{QueryConfig, Sequence};

use crate::builder::LargeArrayBuilder;

/// Amortized O(1) append with at most one final copy.
#[derive(Debug, Clone)]
pub struct ArrayBuilder<T> {
    items: Vec<T>,
    starting_capacity: usize,
    max_capacity: usize,
}

impl<T> ArrayBuilder<T> {
    pub fn new() -> Self {
        Self::with_config(QueryConfig::global())
    }

    pub fn with_config(cfg: &QueryConfig) -> Self {
        Self {
            items: Vec::new(),
            starting_capacity: cfg.buffer_starting_capacity,
            max_capacity: cfg.buffer_max_capacity,
        }
    }

    /// Preallocate exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let cfg = QueryConfig::global();
        Self {
            items: Vec::with_capacity(capacity),
            starting_capacity: cfg.buffer_starting_capacity,
            max_capacity: cfg.buffer_max_capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn add(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            self.grow();
        }
        self.items.push(item);
    }

    pub fn add_range(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.add(item);
        }
    }

    fn grow(&mut self) {
        let cap = self.items.capacity();
        let next = if cap == 0 {
            self.starting_capacity
        } else {
            cap.saturating_mul(2)
        };
        let next = next.min(self.max_capacity).max(cap + 1);
        self.items.reserve_exact(next - self.items.len());
    }

    /// Exact-length result. Moves the backing storage without copying when it
    /// is already exactly full.
    pub fn into_boxed_slice(self) -> Box<[T]> {
        self.items.into_boxed_slice()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for ArrayBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for ArrayBuilder<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

/// A fully drained sequence.
#[derive(Debug, Clone)]
pub struct Buffer<T> {
    items: Vec<T>,
}

impl<T> Buffer<T> {
    /// Drain `source` by value. Countable sources are sized exactly up front.
    pub fn from_sequence<S>(source: S) -> Self
    where
        S: Sequence<Item = T>,
    {
        match source.fast_count() {
            Some(n) => Self::from_iter_exact(n, source.into_cursor()),
            None => Self::from_cursor(source.into_cursor()),
        }
    }

    /// Drain an iterator, preallocating when its size hint is exact.
    pub fn from_cursor(iter: impl Iterator<Item = T>) -> Self {
        match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Self::from_iter_exact(lower, iter),
            _ => Self::from_iter_unsized(iter),
        }
    }

    fn from_iter_exact(len: usize, iter: impl Iterator<Item = T>) -> Self {
        let mut builder = ArrayBuilder::with_capacity(len);
        builder.add_range(iter);
        Self {
            items: builder.into_vec(),
        }
    }

    /// Drain an iterator whose length is not known in advance.
    pub fn from_iter_unsized(iter: impl Iterator<Item = T>) -> Self {
        let mut builder = LargeArrayBuilder::new();
        builder.add_range(iter);
        Self {
            items: builder.into_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Remove from the back; reverse traversal drains this way.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> From<Vec<T>> for Buffer<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyseq_core::source::{from_iter, from_vec};

    #[test]
    fn builder_starts_small_and_doubles() {
        let cfg = QueryConfig::default();
        let mut b = ArrayBuilder::with_config(&cfg);
        assert_eq!(b.capacity(), 0);
        b.add(1);
        assert_eq!(b.capacity(), 4);
        b.add_range(2..=5);
        assert_eq!(b.capacity(), 8);
        assert_eq!(b.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn exactly_full_builder_moves_without_copy() {
        let cfg = QueryConfig::default();
        let mut b = ArrayBuilder::with_config(&cfg);
        b.add_range(0..4);
        let ptr = b.as_slice().as_ptr();
        let out = b.into_boxed_slice();
        assert_eq!(out.as_ptr(), ptr);
        assert_eq!(&*out, &[0, 1, 2, 3]);
    }

    #[test]
    fn buffer_preallocates_countable_sources() {
        let buf = Buffer::from_sequence(from_vec(vec![3, 1, 2]));
        assert_eq!(buf.as_slice(), &[3, 1, 2]);
        assert_eq!(buf.into_vec().capacity(), 3);
    }

    #[test]
    fn buffer_drains_generic_sources() {
        let mut buf = Buffer::from_sequence(from_iter(0..20));
        assert_eq!(buf.len(), 20);
        assert_eq!(buf.pop(), Some(19));
        assert_eq!(buf.as_slice()[0], 0);
    }

    #[test]
    fn exact_size_hint_fills_one_allocation() {
        let buf = Buffer::from_cursor(vec![5, 6, 7, 8, 9].into_iter());
        assert_eq!(buf.into_vec().capacity(), 5);

        let buf = Buffer::from_sequence(from_iter(0..11));
        assert_eq!(buf.into_vec().capacity(), 11);
    }

    #[test]
    fn unknown_length_goes_through_chunks() {
        let buf = Buffer::from_cursor((0..100).filter(|x| x % 3 == 0));
        let items = buf.into_vec();
        assert_eq!(items.len(), 34);
        assert_eq!(items.capacity(), 34);
        assert!(items.iter().copied().eq((0..100).step_by(3)));
    }
}
