//! distinct / union / intersect / except over the comparer-driven [`Set`].
//!
//! Every cursor owns a fresh set; nothing is shared between traversals.

use lazyseq_core::{sequence_into_iter, EqualityComparer, Sequence};
use lazyseq_mem::Set;

// ----- distinct -----

#[derive(Clone)]
pub struct Distinct<S, C> {
    source: S,
    comparer: C,
}

impl<S, C> Distinct<S, C> {
    pub fn new(source: S, comparer: C) -> Self {
        Self { source, comparer }
    }
}

pub struct DistinctCursor<I: Iterator, C> {
    upstream: Option<I>,
    seen: Set<I::Item, C>,
}

impl<I, C> Iterator for DistinctCursor<I, C>
where
    I: Iterator,
    I::Item: Clone,
    C: EqualityComparer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let upstream = self.upstream.as_mut()?;
        for item in upstream.by_ref() {
            if self.seen.add(item.clone()) {
                return Some(item);
            }
        }
        self.upstream = None;
        None
    }
}

impl<S, C> Sequence for Distinct<S, C>
where
    S: Sequence,
    S::Item: Clone,
    C: EqualityComparer<S::Item>,
{
    type Item = S::Item;
    type Cursor = DistinctCursor<S::Cursor, C>;

    fn cursor(&self) -> Self::Cursor {
        DistinctCursor {
            upstream: Some(self.source.cursor()),
            seen: Set::with_comparer(self.comparer.clone()),
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        DistinctCursor {
            upstream: Some(self.source.into_cursor()),
            seen: Set::with_comparer(self.comparer),
        }
    }
}

sequence_into_iter!(impl[S, C] Distinct<S, C>);

// ----- union -----

/// Distinct elements of `first` then of `second`, sharing one set.
#[derive(Clone)]
pub struct Union<A, B, C> {
    first: A,
    second: B,
    comparer: C,
}

impl<A, B, C> Union<A, B, C> {
    pub fn new(first: A, second: B, comparer: C) -> Self {
        Self {
            first,
            second,
            comparer,
        }
    }
}

pub struct UnionCursor<I: Iterator, B: Sequence, C> {
    first: Option<I>,
    pending: Option<B>,
    second: Option<B::Cursor>,
    seen: Set<I::Item, C>,
}

impl<I, B, C> Iterator for UnionCursor<I, B, C>
where
    I: Iterator,
    I::Item: Clone,
    B: Sequence<Item = I::Item>,
    C: EqualityComparer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(first) = self.first.as_mut() {
            for item in first.by_ref() {
                if self.seen.add(item.clone()) {
                    return Some(item);
                }
            }
            self.first = None;
        }
        if let Some(pending) = self.pending.take() {
            self.second = Some(pending.into_cursor());
        }
        let second = self.second.as_mut()?;
        for item in second.by_ref() {
            if self.seen.add(item.clone()) {
                return Some(item);
            }
        }
        self.second = None;
        None
    }
}

impl<A, B, C> Sequence for Union<A, B, C>
where
    A: Sequence,
    A::Item: Clone,
    B: Sequence<Item = A::Item>,
    C: EqualityComparer<A::Item>,
{
    type Item = A::Item;
    type Cursor = UnionCursor<A::Cursor, B, C>;

    fn cursor(&self) -> Self::Cursor {
        UnionCursor {
            first: Some(self.first.cursor()),
            pending: Some(self.second.clone()),
            second: None,
            seen: Set::with_comparer(self.comparer.clone()),
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        UnionCursor {
            first: Some(self.first.into_cursor()),
            pending: Some(self.second),
            second: None,
            seen: Set::with_comparer(self.comparer),
        }
    }
}

sequence_into_iter!(impl[A, B, C] Union<A, B, C>);

// ----- intersect / except -----

/// Shared cursor for intersect and except: `second` seeds the set on the first
/// `next`, then `first` is streamed through `keep`.
pub struct SeededCursor<I: Iterator, B, C> {
    upstream: Option<I>,
    seed: Option<B>,
    set: Set<I::Item, C>,
    intersect: bool,
}

impl<I, B, C> SeededCursor<I, B, C>
where
    I: Iterator,
    I::Item: Clone,
    B: Sequence<Item = I::Item>,
    C: EqualityComparer<I::Item>,
{
    fn keep(&mut self, item: &I::Item) -> bool {
        if self.intersect {
            // Removed on match, so repeats in `first` are emitted once.
            self.set.remove(item)
        } else {
            self.set.add(item.clone())
        }
    }
}

impl<I, B, C> Iterator for SeededCursor<I, B, C>
where
    I: Iterator,
    I::Item: Clone,
    B: Sequence<Item = I::Item>,
    C: EqualityComparer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(seed) = self.seed.take() {
            for item in seed.into_cursor() {
                self.set.add(item);
            }
        }
        while let Some(item) = self.upstream.as_mut()?.next() {
            if self.keep(&item) {
                return Some(item);
            }
        }
        self.upstream = None;
        None
    }
}

#[derive(Clone)]
pub struct Intersect<A, B, C> {
    first: A,
    second: B,
    comparer: C,
}

impl<A, B, C> Intersect<A, B, C> {
    pub fn new(first: A, second: B, comparer: C) -> Self {
        Self {
            first,
            second,
            comparer,
        }
    }
}

impl<A, B, C> Sequence for Intersect<A, B, C>
where
    A: Sequence,
    A::Item: Clone,
    B: Sequence<Item = A::Item>,
    C: EqualityComparer<A::Item>,
{
    type Item = A::Item;
    type Cursor = SeededCursor<A::Cursor, B, C>;

    fn cursor(&self) -> Self::Cursor {
        SeededCursor {
            upstream: Some(self.first.cursor()),
            seed: Some(self.second.clone()),
            set: Set::with_comparer(self.comparer.clone()),
            intersect: true,
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        SeededCursor {
            upstream: Some(self.first.into_cursor()),
            seed: Some(self.second),
            set: Set::with_comparer(self.comparer),
            intersect: true,
        }
    }
}

sequence_into_iter!(impl[A, B, C] Intersect<A, B, C>);

#[derive(Clone)]
pub struct Except<A, B, C> {
    first: A,
    second: B,
    comparer: C,
}

impl<A, B, C> Except<A, B, C> {
    pub fn new(first: A, second: B, comparer: C) -> Self {
        Self {
            first,
            second,
            comparer,
        }
    }
}

impl<A, B, C> Sequence for Except<A, B, C>
where
    A: Sequence,
    A::Item: Clone,
    B: Sequence<Item = A::Item>,
    C: EqualityComparer<A::Item>,
{
    type Item = A::Item;
    type Cursor = SeededCursor<A::Cursor, B, C>;

    fn cursor(&self) -> Self::Cursor {
        SeededCursor {
            upstream: Some(self.first.cursor()),
            seed: Some(self.second.clone()),
            set: Set::with_comparer(self.comparer.clone()),
            intersect: false,
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        SeededCursor {
            upstream: Some(self.first.into_cursor()),
            seed: Some(self.second),
            set: Set::with_comparer(self.comparer),
            intersect: false,
        }
    }
}

sequence_into_iter!(impl[A, B, C] Except<A, B, C>);
