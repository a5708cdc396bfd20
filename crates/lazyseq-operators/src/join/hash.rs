use lazyseq_core::source::ArraySource;
use lazyseq_core::{sequence_into_iter, EqualityComparer, Sequence};
use lazyseq_mem::{Lookup, LookupBuilder};

use crate::traits::{Deferred, Materialize};

#[derive(Clone)]
pub struct Join<O, I, OK, IK, R, C> {
    outer: O,
    inner: I,
    outer_key: OK,
    inner_key: IK,
    result: R,
    comparer: C,
}

impl<O, I, OK, IK, R, C> Join<O, I, OK, IK, R, C> {
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

pub struct JoinIter<OC: Iterator, E, K, OK, R, C> {
    outer: Option<OC>,
    outer_key: OK,
    lookup: Lookup<K, E, C>,
    // Current outer element and its matches, walked by position.
    current: Option<(OC::Item, ArraySource<E>, usize)>,
    result: R,
}

impl<OC, E, K, OK, R, C, T> Iterator for JoinIter<OC, E, K, OK, R, C>
where
    OC: Iterator,
    OK: Fn(&OC::Item) -> K,
    R: Fn(&OC::Item, &E) -> T,
    C: EqualityComparer<K>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some((outer, matches, index)) = self.current.as_mut() {
                if let Some(inner) = matches.as_slice().get(*index) {
                    *index += 1;
                    return Some((self.result)(outer, inner));
                }
                self.current = None;
            }
            match self.outer.as_mut()?.next() {
                Some(outer) => {
                    let matches = self.lookup.get(&(self.outer_key)(&outer));
                    if !matches.is_empty() {
                        self.current = Some((outer, matches, 0));
                    }
                }
                None => {
                    self.outer = None;
                    return None;
                }
            }
        }
    }
}

impl<O, I, OK, IK, R, C, K, T> Materialize for Join<O, I, OK, IK, R, C>
where
    O: Sequence,
    I: Sequence,
    OK: Fn(&O::Item) -> K,
    IK: Fn(&I::Item) -> K,
    R: Fn(&O::Item, &I::Item) -> T,
    C: EqualityComparer<K>,
{
    type Iter = JoinIter<O::Cursor, I::Item, K, OK, R, C>;

    fn materialize(self) -> Self::Iter {
        let lookup = LookupBuilder::create_for_join(self.inner.into_cursor(), self.inner_key, self.comparer);
        JoinIter {
            outer: Some(self.outer.into_cursor()),
            outer_key: self.outer_key,
            lookup,
            current: None,
            result: self.result,
        }
    }
}

impl<O, I, OK, IK, R, C, K, T> Sequence for Join<O, I, OK, IK, R, C>
where
    O: Sequence,
    I: Sequence,
    OK: Fn(&O::Item) -> K + Clone,
    IK: Fn(&I::Item) -> K + Clone,
    R: Fn(&O::Item, &I::Item) -> T + Clone,
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
}

sequence_into_iter!(impl[O, I, OK: Clone, IK: Clone, R: Clone, C] Join<O, I, OK, IK, R, C>);
