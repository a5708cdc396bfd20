use lazyseq_core::source::ArraySource;
use lazyseq_core::{sequence_into_iter, EqualityComparer, Sequence};
use lazyseq_mem::{Lookup, LookupBuilder};

use crate::traits::{Deferred, Materialize};

#[derive(Clone)]
pub struct GroupJoin<O, I, OK, IK, R, C> {
    outer: O,
    inner: I,
    outer_key: OK,
    inner_key: IK,
    result: R,
    comparer: C,
}

impl<O, I, OK, IK, R, C> GroupJoin<O, I, OK, IK, R, C> {
    pub fn new(outer: O, inner: I, outer_key: OK, inner_key: IK, result: R, comparer: C) -> Self {
        Self {
            outer,
            inner,
            outer_key,
            inner_key,
            result,
            comparer,
        }
    }
}

/// One result per outer element; an outer element without matches is paired
/// with an empty sequence.
pub struct GroupJoinIter<OC, E, K, OK, R, C> {
    outer: Option<OC>,
    outer_key: OK,
    lookup: Lookup<K, E, C>,
    result: R,
}

impl<OC, E, K, OK, R, C, T> Iterator for GroupJoinIter<OC, E, K, OK, R, C>
where
    OC: Iterator,
    OK: Fn(&OC::Item) -> K,
    R: Fn(OC::Item, ArraySource<E>) -> T,
    C: EqualityComparer<K>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.outer.as_mut()?.next() {
            Some(outer) => {
                let matches = self.lookup.get(&(self.outer_key)(&outer));
                Some((self.result)(outer, matches))
            }
            None => {
                self.outer = None;
                None
            }
        }
    }
}

impl<O, I, OK, IK, R, C, K, T> Materialize for GroupJoin<O, I, OK, IK, R, C>
where
    O: Sequence,
    I: Sequence,
    OK: Fn(&O::Item) -> K,
    IK: Fn(&I::Item) -> K,
    R: Fn(O::Item, ArraySource<I::Item>) -> T,
    C: EqualityComparer<K>,
{
    type Iter = GroupJoinIter<O::Cursor, I::Item, K, OK, R, C>;

    fn materialize(self) -> Self::Iter {
        let lookup = LookupBuilder::create_for_join(self.inner.into_cursor(), self.inner_key, self.comparer);
        GroupJoinIter {
            outer: Some(self.outer.into_cursor()),
            outer_key: self.outer_key,
            lookup,
            result: self.result,
        }
    }
}

impl<O, I, OK, IK, R, C, K, T> Sequence for GroupJoin<O, I, OK, IK, R, C>
where
    O: Sequence,
    I: Sequence,
    OK: Fn(&O::Item) -> K + Clone,
    IK: Fn(&I::Item) -> K + Clone,
    R: Fn(O::Item, ArraySource<I::Item>) -> T + Clone,
    C: EqualityComparer<K>,
{
    type Item = T;
    type Cursor = Deferred<Self>;

    fn cursor(&self) -> Deferred<Self> {
        Deferred::new(self.clone())
    }

    fn into_cursor(self) -> Deferred<Self> {
        Deferred::new(self)
    }

    fn fast_count(&self) -> Option<usize> {
        self.outer.fast_count()
    }
}

sequence_into_iter!(impl[O, I, OK: Clone, IK: Clone, R: Clone, C] GroupJoin<O, I, OK, IK, R, C>);
