//! group_by over the lookup.
//!
//! The lookup is built on the first `next` of each traversal; groups come
//! out in first-seen key order, elements in source order.

use lazyseq_core::source::ArraySource;
use lazyseq_core::{sequence_into_iter, EqualityComparer, Sequence};
use lazyseq_mem::lookup::{LookupCursor, ResultSelectedCursor};
use lazyseq_mem::{Grouping, LookupBuilder};

use crate::func::Selector;
use crate::traits::{Deferred, Materialize};

#[derive(Clone)]
pub struct GroupBy<S, KF, EF, C> {
    source: S,
    key: KF,
    element: EF,
    comparer: C,
}

impl<S, KF, EF, C> GroupBy<S, KF, EF, C> {
    pub fn new(source: S, key: KF, element: EF, comparer: C) -> Self {
        Self {
            source,
            key,
            element,
            comparer,
        }
    }

    /// Map each group through `selector(key, elements)` instead of yielding
    /// [`Grouping`]s.
    pub fn select_result<K, F, R>(self, selector: F) -> GroupResult<S, KF, EF, C, F>
    where
        S: Sequence,
        KF: Fn(&S::Item) -> K,
        EF: Selector<S::Item>,
        F: Fn(K, ArraySource<EF::Output>) -> R + Clone,
    {
        GroupResult {
            groups: self,
            selector,
        }
    }
}

impl<S, KF, EF, C, K> GroupBy<S, KF, EF, C>
where
    S: Sequence,
    KF: Fn(&S::Item) -> K,
    EF: Selector<S::Item>,
    C: EqualityComparer<K>,
{
    fn build(self) -> lazyseq_mem::Lookup<K, EF::Output, C> {
        let element = self.element;
        LookupBuilder::create(
            self.source.into_cursor(),
            self.key,
            move |item| element.select(item),
            self.comparer,
        )
    }
}

impl<S, KF, EF, C, K> Materialize for GroupBy<S, KF, EF, C>
where
    S: Sequence,
    KF: Fn(&S::Item) -> K,
    EF: Selector<S::Item>,
    C: EqualityComparer<K>,
    K: Clone,
{
    type Iter = LookupCursor<K, EF::Output, C>;

    fn materialize(self) -> Self::Iter {
        self.build().cursor()
    }
}

impl<S, KF, EF, C, K> Sequence for GroupBy<S, KF, EF, C>
where
    S: Sequence,
    KF: Fn(&S::Item) -> K + Clone,
    EF: Selector<S::Item> + Clone,
    C: EqualityComparer<K>,
    K: Clone,
{
    type Item = Grouping<K, EF::Output>;
    type Cursor = Deferred<Self>;

    fn cursor(&self) -> Deferred<Self> {
        Deferred::new(self.clone())
    }

    fn into_cursor(self) -> Deferred<Self> {
        Deferred::new(self)
    }
}

sequence_into_iter!(impl[S, KF: Clone, EF: Clone, C] GroupBy<S, KF, EF, C>);

/// Groups mapped through a result selector.
#[derive(Clone)]
pub struct GroupResult<S, KF, EF, C, F> {
    groups: GroupBy<S, KF, EF, C>,
    selector: F,
}

impl<S, KF, EF, C, F, K, R> Materialize for GroupResult<S, KF, EF, C, F>
where
    S: Sequence,
    KF: Fn(&S::Item) -> K,
    EF: Selector<S::Item>,
    C: EqualityComparer<K>,
    K: Clone,
    F: Fn(K, ArraySource<EF::Output>) -> R + Clone,
{
    type Iter = ResultSelectedCursor<K, EF::Output, C, F>;

    fn materialize(self) -> Self::Iter {
        self.groups
            .build()
            .apply_result_selector(self.selector)
            .into_cursor()
    }
}

impl<S, KF, EF, C, F, K, R> Sequence for GroupResult<S, KF, EF, C, F>
where
    S: Sequence,
    KF: Fn(&S::Item) -> K + Clone,
    EF: Selector<S::Item> + Clone,
    C: EqualityComparer<K>,
    K: Clone,
    F: Fn(K, ArraySource<EF::Output>) -> R + Clone,
{
    type Item = R;
    type Cursor = Deferred<Self>;

    fn cursor(&self) -> Deferred<Self> {
        Deferred::new(self.clone())
    }

    fn into_cursor(self) -> Deferred<Self> {
        Deferred::new(self)
    }
}

sequence_into_iter!(impl[S, KF: Clone, EF: Clone, C, F: Clone] GroupResult<S, KF, EF, C, F>);
