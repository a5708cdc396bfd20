//! take / skip / take_while / skip_while.
//!
//! Counts are signed: a count `<= 0` takes nothing or skips nothing. Each
//! cursor drops its upstream cursor as soon as it is done with it.

use lazyseq_core::{sequence_into_iter, Sequence};

use crate::func::{bump, IndexedPredicate};

fn clamp(count: isize) -> usize {
    usize::try_from(count).unwrap_or(0)
}

#[derive(Clone)]
pub struct Take<S> {
    source: S,
    count: usize,
}

impl<S> Take<S> {
    pub fn new(source: S, count: isize) -> Self {
        Self {
            source,
            count: clamp(count),
        }
    }
}

pub struct TakeCursor<C> {
    upstream: Option<C>,
    remaining: usize,
}

impl<C: Iterator> Iterator for TakeCursor<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        if self.remaining == 0 {
            self.upstream = None;
            return None;
        }
        match self.upstream.as_mut()?.next() {
            Some(item) => {
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.upstream = None;
                }
                Some(item)
            }
            None => {
                self.upstream = None;
                None
            }
        }
    }
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;
    type Cursor = TakeCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        TakeCursor {
            // Nothing to take: never open the source.
            upstream: (self.count > 0).then(|| self.source.cursor()),
            remaining: self.count,
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        TakeCursor {
            upstream: (self.count > 0).then(|| self.source.into_cursor()),
            remaining: self.count,
        }
    }

    fn fast_count(&self) -> Option<usize> {
        self.source.fast_count().map(|n| n.min(self.count))
    }
}

sequence_into_iter!(impl[S] Take<S>);

#[derive(Clone)]
pub struct Skip<S> {
    source: S,
    count: usize,
}

impl<S> Skip<S> {
    pub fn new(source: S, count: isize) -> Self {
        Self {
            source,
            count: clamp(count),
        }
    }
}

pub struct SkipCursor<C> {
    upstream: Option<C>,
    to_skip: usize,
}

impl<C: Iterator> Iterator for SkipCursor<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        let upstream = self.upstream.as_mut()?;
        while self.to_skip > 0 {
            self.to_skip -= 1;
            if upstream.next().is_none() {
                self.upstream = None;
                return None;
            }
        }
        let item = upstream.next();
        if item.is_none() {
            self.upstream = None;
        }
        item
    }
}

impl<S: Sequence> Sequence for Skip<S> {
    type Item = S::Item;
    type Cursor = SkipCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        SkipCursor {
            upstream: Some(self.source.cursor()),
            to_skip: self.count,
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        SkipCursor {
            upstream: Some(self.source.into_cursor()),
            to_skip: self.count,
        }
    }

    fn fast_count(&self) -> Option<usize> {
        self.source.fast_count().map(|n| n.saturating_sub(self.count))
    }
}

sequence_into_iter!(impl[S] Skip<S>);

/// Leading run of elements satisfying the predicate.
#[derive(Clone)]
pub struct TakeWhile<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> TakeWhile<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

pub struct TakeWhileCursor<C, P> {
    upstream: Option<C>,
    predicate: P,
    index: usize,
}

impl<C, P> Iterator for TakeWhileCursor<C, P>
where
    C: Iterator,
    P: IndexedPredicate<C::Item>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        let upstream = self.upstream.as_mut()?;
        if let Some(item) = upstream.next() {
            let index = bump(&mut self.index);
            if self.predicate.test_at(&item, index) {
                return Some(item);
            }
        }
        self.upstream = None;
        None
    }
}

impl<S, P> Sequence for TakeWhile<S, P>
where
    S: Sequence,
    P: IndexedPredicate<S::Item> + Clone,
{
    type Item = S::Item;
    type Cursor = TakeWhileCursor<S::Cursor, P>;

    fn cursor(&self) -> Self::Cursor {
        TakeWhileCursor {
            upstream: Some(self.source.cursor()),
            predicate: self.predicate.clone(),
            index: 0,
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        TakeWhileCursor {
            upstream: Some(self.source.into_cursor()),
            predicate: self.predicate,
            index: 0,
        }
    }
}

sequence_into_iter!(impl[S, P] TakeWhile<S, P>);

/// Everything from the first element failing the predicate onwards.
#[derive(Clone)]
pub struct SkipWhile<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> SkipWhile<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

pub struct SkipWhileCursor<C, P> {
    upstream: Option<C>,
    predicate: P,
    index: usize,
    yielding: bool,
}

impl<C, P> Iterator for SkipWhileCursor<C, P>
where
    C: Iterator,
    P: IndexedPredicate<C::Item>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        let upstream = self.upstream.as_mut()?;
        while let Some(item) = upstream.next() {
            if self.yielding {
                return Some(item);
            }
            let index = bump(&mut self.index);
            if !self.predicate.test_at(&item, index) {
                self.yielding = true;
                return Some(item);
            }
        }
        self.upstream = None;
        None
    }
}

impl<S, P> Sequence for SkipWhile<S, P>
where
    S: Sequence,
    P: IndexedPredicate<S::Item> + Clone,
{
    type Item = S::Item;
    type Cursor = SkipWhileCursor<S::Cursor, P>;

    fn cursor(&self) -> Self::Cursor {
        SkipWhileCursor {
            upstream: Some(self.source.cursor()),
            predicate: self.predicate.clone(),
            index: 0,
            yielding: false,
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        SkipWhileCursor {
            upstream: Some(self.source.into_cursor()),
            predicate: self.predicate,
            index: 0,
            yielding: false,
        }
    }
}

sequence_into_iter!(impl[S, P] SkipWhile<S, P>);
