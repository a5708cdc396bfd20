//! Filter stages.
//!
//! [`Where`] is the shape-specialised filter stage. Chaining another filter
//! onto it fuses both predicates into one stage (`And`); chaining a projection
//! fuses into a [`WhereSelect`]. [`WhereIndexed`] is the plain one-pass form
//! whose predicate also sees the element index.

use lazyseq_core::{sequence_into_iter, Sequence};

use crate::func::{bump, And, Predicate};
use crate::map::WhereSelect;
use crate::shape::Upstream;
use crate::traits::{Cursor, Stage, StageHeader, StageState};

#[derive(Clone)]
pub struct Where<S: Sequence, P> {
    header: StageHeader,
    upstream: Upstream<S>,
    predicate: P,
}

impl<S: Sequence, P> Where<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self {
            header: StageHeader::new(),
            upstream: Upstream::new(source),
            predicate,
        }
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    /// Fuse another filter into this stage.
    pub fn filter<Q>(self, predicate: Q) -> Where<S, And<P, Q>>
    where
        Q: Fn(&S::Item) -> bool + Clone,
    {
        let mut upstream = self.upstream;
        upstream.close();
        Where {
            header: StageHeader::new(),
            upstream,
            predicate: And(self.predicate, predicate),
        }
    }

    /// Fuse a projection into this stage.
    pub fn map<F, R>(self, selector: F) -> WhereSelect<S, P, F>
    where
        F: Fn(S::Item) -> R + Clone,
    {
        let mut upstream = self.upstream;
        upstream.close();
        WhereSelect::from_parts(upstream, self.predicate, selector)
    }
}

impl<S, P> Stage for Where<S, P>
where
    S: Sequence,
    S::Item: Clone,
    P: Predicate<S::Item> + Clone,
{
    type Item = S::Item;

    fn header(&self) -> &StageHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut StageHeader {
        &mut self.header
    }

    fn advance(&mut self) -> Option<S::Item> {
        if self.header.state() == StageState::Started {
            self.upstream.open();
            self.header.set_state(StageState::Running);
        }
        while let Some(item) = self.upstream.pull() {
            if self.predicate.test(&item) {
                return Some(item);
            }
        }
        self.dispose();
        None
    }

    fn release(&mut self) {
        self.upstream.close();
    }
}

impl<S, P> Sequence for Where<S, P>
where
    S: Sequence,
    S::Item: Clone,
    P: Predicate<S::Item> + Clone,
{
    type Item = S::Item;
    type Cursor = Cursor<Self>;

    fn cursor(&self) -> Cursor<Self> {
        Cursor::duplicate_of(self)
    }

    fn into_cursor(self) -> Cursor<Self> {
        self.start()
    }
}

sequence_into_iter!(impl[S: Sequence, P] Where<S, P>);

/// Filter whose predicate receives `(element, index)`.
#[derive(Clone)]
pub struct WhereIndexed<S, F> {
    source: S,
    predicate: F,
}

impl<S, F> WhereIndexed<S, F> {
    pub fn new(source: S, predicate: F) -> Self {
        Self { source, predicate }
    }
}

pub struct WhereIndexedCursor<C, F> {
    upstream: Option<C>,
    predicate: F,
    index: usize,
}

impl<C, F> Iterator for WhereIndexedCursor<C, F>
where
    C: Iterator,
    F: Fn(&C::Item, usize) -> bool,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        let upstream = self.upstream.as_mut()?;
        for item in upstream.by_ref() {
            let index = bump(&mut self.index);
            if (self.predicate)(&item, index) {
                return Some(item);
            }
        }
        self.upstream = None;
        None
    }
}

impl<S, F> Sequence for WhereIndexed<S, F>
where
    S: Sequence,
    F: Fn(&S::Item, usize) -> bool + Clone,
{
    type Item = S::Item;
    type Cursor = WhereIndexedCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        WhereIndexedCursor {
            upstream: Some(self.source.cursor()),
            predicate: self.predicate.clone(),
            index: 0,
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        WhereIndexedCursor {
            upstream: Some(self.source.into_cursor()),
            predicate: self.predicate,
            index: 0,
        }
    }
}

sequence_into_iter!(impl[S, F] WhereIndexed<S, F>);

#[cfg(test)]
mod tests {
    use super::*;
    use lazyseq_core::source::{from_iter, from_vec, list};

    #[test]
    fn fused_filters_test_both_predicates() {
        let q = Where::new(from_vec((1..=20).collect::<Vec<_>>()), |x: &i32| x % 2 == 0)
            .filter(|x: &i32| x % 3 == 0);
        let out: Vec<i32> = q.into_cursor().collect();
        assert_eq!(out, vec![6, 12, 18]);
    }

    #[test]
    fn shapes_agree() {
        let pred = |x: &i32| *x > 2;
        let a: Vec<i32> = Where::new(from_vec(vec![1, 2, 3, 4]), pred).into_cursor().collect();
        let l: Vec<i32> = Where::new(list(vec![1, 2, 3, 4]), pred).into_cursor().collect();
        let g: Vec<i32> = Where::new(from_iter(vec![1, 2, 3, 4]), pred).into_cursor().collect();
        assert_eq!(a, vec![3, 4]);
        assert_eq!(a, l);
        assert_eq!(a, g);
    }

    #[test]
    fn first_traversal_reuses_then_duplicates() {
        let mut q = Where::new(from_vec(vec![1, 2, 3]), |x: &i32| *x != 2);
        {
            let t = q.traverse();
            assert!(t.is_reused());
            assert_eq!(t.collect::<Vec<_>>(), vec![1, 3]);
        }
        assert_eq!(q.header().state(), StageState::Done);
        let t = q.traverse();
        assert!(!t.is_reused());
        assert_eq!(t.collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn abandoned_traversal_disposes() {
        let mut q = Where::new(from_vec(vec![1, 2, 3]), |_: &i32| true);
        {
            let mut t = q.traverse();
            assert_eq!(t.next(), Some(1));
        }
        assert_eq!(q.header().state(), StageState::Done);
    }

    #[test]
    fn indexed_predicate_sees_positions() {
        let q = WhereIndexed::new(from_vec(vec![5, 5, 5, 5]), |_: &i32, i: usize| i % 2 == 1);
        assert_eq!(q.cursor().count(), 2);
    }
}
