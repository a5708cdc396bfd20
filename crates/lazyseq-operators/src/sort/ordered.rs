use lazyseq_core::{sequence_into_iter, Comparer, DefaultOrder, Sequence};
use lazyseq_mem::Buffer;

use super::sorter::{sort_permutation, SortDescriptor, ThenLevel};
use crate::traits::{Deferred, Materialize};

/// A source plus a chain of sort levels. Nothing is buffered or sorted until
/// the first element is requested; each traversal sorts afresh.
#[derive(Clone)]
pub struct OrderedSequence<S, D> {
    source: S,
    descriptor: D,
}

impl<S: Sequence, D> OrderedSequence<S, D> {
    pub fn new(source: S, descriptor: D) -> Self {
        Self { source, descriptor }
    }

    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }

    fn then<F, C>(self, key: F, comparer: C, descending: bool) -> OrderedSequence<S, ThenLevel<D, F, C>> {
        OrderedSequence {
            source: self.source,
            descriptor: ThenLevel::new(self.descriptor, key, comparer, descending),
        }
    }

    pub fn then_by<F, K>(self, key: F) -> OrderedSequence<S, ThenLevel<D, F, DefaultOrder>>
    where
        F: Fn(&S::Item) -> K + Clone,
        K: Ord,
    {
        self.then(key, DefaultOrder, false)
    }

    pub fn then_by_descending<F, K>(self, key: F) -> OrderedSequence<S, ThenLevel<D, F, DefaultOrder>>
    where
        F: Fn(&S::Item) -> K + Clone,
        K: Ord,
    {
        self.then(key, DefaultOrder, true)
    }

    pub fn then_by_with<F, K, C>(self, key: F, comparer: C) -> OrderedSequence<S, ThenLevel<D, F, C>>
    where
        F: Fn(&S::Item) -> K + Clone,
        C: Comparer<K>,
    {
        self.then(key, comparer, false)
    }

    pub fn then_by_descending_with<F, K, C>(
        self,
        key: F,
        comparer: C,
    ) -> OrderedSequence<S, ThenLevel<D, F, C>>
    where
        F: Fn(&S::Item) -> K + Clone,
        C: Comparer<K>,
    {
        self.then(key, comparer, true)
    }
}

/// Yields a buffer in permutation order, moving each element out once.
pub struct SortedDrain<T> {
    items: Vec<Option<T>>,
    order: std::vec::IntoIter<usize>,
}

impl<T> Iterator for SortedDrain<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let index = self.order.next()?;
        self.items[index].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<S, D> Materialize for OrderedSequence<S, D>
where
    S: Sequence,
    D: SortDescriptor<S::Item>,
{
    type Iter = SortedDrain<S::Item>;

    fn materialize(self) -> SortedDrain<S::Item> {
        let items = Buffer::from_sequence(self.source).into_vec();
        let order = sort_permutation(&self.descriptor, &items);
        #[cfg(feature = "tracing")]
        tracing::trace!(count = items.len(), "sorted");
        SortedDrain {
            items: items.into_iter().map(Some).collect(),
            order: order.into_iter(),
        }
    }
}

impl<S, D> Sequence for OrderedSequence<S, D>
where
    S: Sequence,
    D: SortDescriptor<S::Item>,
{
    type Item = S::Item;
    type Cursor = Deferred<Self>;

    fn cursor(&self) -> Deferred<Self> {
        Deferred::new(self.clone())
    }

    fn into_cursor(self) -> Deferred<Self> {
        Deferred::new(self)
    }

    fn fast_count(&self) -> Option<usize> {
        self.source.fast_count()
    }
}

sequence_into_iter!(impl[S, D] OrderedSequence<S, D>);
