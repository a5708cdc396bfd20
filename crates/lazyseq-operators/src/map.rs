//! Projection stages.
//!
//! [`WhereSelect`] is the fused filter+project stage; with the [`Always`]
//! predicate it is a plain projection ([`Select`]). Mapping it again composes
//! the projectors. Filtering it does *not* fuse: the stage's predicate runs
//! before projection, so a later filter over projected values gets its own
//! generic `Where` around this stage.

use lazyseq_core::{sequence_into_iter, Sequence};

use crate::func::{bump, Always, Compose, Predicate, Selector};
use crate::shape::Upstream;
use crate::traits::{Cursor, Stage, StageHeader, StageState};

#[derive(Clone)]
pub struct WhereSelect<S: Sequence, P, F> {
    header: StageHeader,
    upstream: Upstream<S>,
    predicate: P,
    selector: F,
}

/// Projection only.
pub type Select<S, F> = WhereSelect<S, Always, F>;

impl<S: Sequence, F> WhereSelect<S, Always, F> {
    pub fn new(source: S, selector: F) -> Self {
        Self::from_parts(Upstream::new(source), Always, selector)
    }
}

impl<S: Sequence, P, F> WhereSelect<S, P, F> {
    pub(crate) fn from_parts(upstream: Upstream<S>, predicate: P, selector: F) -> Self {
        Self {
            header: StageHeader::new(),
            upstream,
            predicate,
            selector,
        }
    }

    /// Compose another projection into this stage.
    pub fn map<G, R>(self, selector: G) -> WhereSelect<S, P, Compose<F, G>>
    where
        F: Selector<S::Item>,
        G: Fn(F::Output) -> R + Clone,
    {
        let mut upstream = self.upstream;
        upstream.close();
        WhereSelect::from_parts(upstream, self.predicate, Compose(self.selector, selector))
    }
}

impl<S, P, F> Stage for WhereSelect<S, P, F>
where
    S: Sequence,
    S::Item: Clone,
    P: Predicate<S::Item> + Clone,
    F: Selector<S::Item> + Clone,
{
    type Item = F::Output;

    fn header(&self) -> &StageHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut StageHeader {
        &mut self.header
    }

    fn advance(&mut self) -> Option<F::Output> {
        if self.header.state() == StageState::Started {
            self.upstream.open();
            self.header.set_state(StageState::Running);
        }
        while let Some(item) = self.upstream.pull() {
            if self.predicate.test(&item) {
                return Some(self.selector.select(item));
            }
        }
        self.dispose();
        None
    }

    fn release(&mut self) {
        self.upstream.close();
    }
}

impl<S, P, F> Sequence for WhereSelect<S, P, F>
where
    S: Sequence,
    S::Item: Clone,
    P: Predicate<S::Item> + Clone,
    F: Selector<S::Item> + Clone,
{
    type Item = F::Output;
    type Cursor = Cursor<Self>;

    fn cursor(&self) -> Cursor<Self> {
        Cursor::duplicate_of(self)
    }

    fn into_cursor(self) -> Cursor<Self> {
        self.start()
    }

    fn fast_count(&self) -> Option<usize> {
        if self.predicate.accepts_all() {
            self.upstream.fast_count()
        } else {
            None
        }
    }
}

sequence_into_iter!(impl[S: Sequence, P, F] WhereSelect<S, P, F>);

/// Projection whose selector receives `(element, index)`.
#[derive(Clone)]
pub struct SelectIndexed<S, F> {
    source: S,
    selector: F,
}

impl<S, F> SelectIndexed<S, F> {
    pub fn new(source: S, selector: F) -> Self {
        Self { source, selector }
    }
}

pub struct SelectIndexedCursor<C, F> {
    upstream: Option<C>,
    selector: F,
    index: usize,
}

impl<C, F, R> Iterator for SelectIndexedCursor<C, F>
where
    C: Iterator,
    F: Fn(C::Item, usize) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let upstream = self.upstream.as_mut()?;
        match upstream.next() {
            Some(item) => {
                let index = bump(&mut self.index);
                Some((self.selector)(item, index))
            }
            None => {
                self.upstream = None;
                None
            }
        }
    }
}

impl<S, F, R> Sequence for SelectIndexed<S, F>
where
    S: Sequence,
    F: Fn(S::Item, usize) -> R + Clone,
{
    type Item = R;
    type Cursor = SelectIndexedCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        SelectIndexedCursor {
            upstream: Some(self.source.cursor()),
            selector: self.selector.clone(),
            index: 0,
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        SelectIndexedCursor {
            upstream: Some(self.source.into_cursor()),
            selector: self.selector,
            index: 0,
        }
    }

    fn fast_count(&self) -> Option<usize> {
        self.source.fast_count()
    }
}

sequence_into_iter!(impl[S, F: Clone] SelectIndexed<S, F>);
