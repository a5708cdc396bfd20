//! concat / zip / flat_map / default_if_empty / reverse.

use lazyseq_core::{sequence_into_iter, Sequence};
use lazyseq_mem::Buffer;

use crate::func::{bump, CollectionSelector, ResultSelector};
use crate::traits::{Deferred, Materialize};

// ----- concat -----

#[derive(Clone)]
pub struct Concat<A, B> {
    first: A,
    second: B,
}

impl<A, B> Concat<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

pub struct ConcatCursor<C, B: Sequence> {
    first: Option<C>,
    // The second source is opened only once the first is exhausted.
    pending: Option<B>,
    second: Option<B::Cursor>,
}

impl<C, B> Iterator for ConcatCursor<C, B>
where
    C: Iterator,
    B: Sequence<Item = C::Item>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        if let Some(first) = self.first.as_mut() {
            if let Some(item) = first.next() {
                return Some(item);
            }
            self.first = None;
        }
        if let Some(pending) = self.pending.take() {
            self.second = Some(pending.into_cursor());
        }
        let item = self.second.as_mut()?.next();
        if item.is_none() {
            self.second = None;
        }
        item
    }
}

impl<A, B> Sequence for Concat<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;
    type Cursor = ConcatCursor<A::Cursor, B>;

    fn cursor(&self) -> Self::Cursor {
        ConcatCursor {
            first: Some(self.first.cursor()),
            pending: Some(self.second.clone()),
            second: None,
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        ConcatCursor {
            first: Some(self.first.into_cursor()),
            pending: Some(self.second),
            second: None,
        }
    }

    fn fast_count(&self) -> Option<usize> {
        self.first
            .fast_count()?
            .checked_add(self.second.fast_count()?)
    }
}

sequence_into_iter!(impl[A, B] Concat<A, B>);

// ----- zip -----

#[derive(Clone)]
pub struct Zip<A, B, F> {
    first: A,
    second: B,
    combine: F,
}

impl<A, B, F> Zip<A, B, F> {
    pub fn new(first: A, second: B, combine: F) -> Self {
        Self {
            first,
            second,
            combine,
        }
    }
}

pub struct ZipCursor<CA, CB, F> {
    first: Option<CA>,
    second: Option<CB>,
    combine: F,
}

impl<CA, CB, F, R> Iterator for ZipCursor<CA, CB, F>
where
    CA: Iterator,
    CB: Iterator,
    F: Fn(CA::Item, CB::Item) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let pair = match (self.first.as_mut(), self.second.as_mut()) {
            (Some(a), Some(b)) => a.next().and_then(|x| b.next().map(|y| (x, y))),
            _ => None,
        };
        match pair {
            Some((x, y)) => Some((self.combine)(x, y)),
            None => {
                self.first = None;
                self.second = None;
                None
            }
        }
    }
}

impl<A, B, F, R> Sequence for Zip<A, B, F>
where
    A: Sequence,
    B: Sequence,
    F: Fn(A::Item, B::Item) -> R + Clone,
{
    type Item = R;
    type Cursor = ZipCursor<A::Cursor, B::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        ZipCursor {
            first: Some(self.first.cursor()),
            second: Some(self.second.cursor()),
            combine: self.combine.clone(),
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        ZipCursor {
            first: Some(self.first.into_cursor()),
            second: Some(self.second.into_cursor()),
            combine: self.combine,
        }
    }

    fn fast_count(&self) -> Option<usize> {
        Some(self.first.fast_count()?.min(self.second.fast_count()?))
    }
}

sequence_into_iter!(impl[A, B, F: Clone] Zip<A, B, F>);

// ----- flat_map -----

/// Flattens one level. `CS` picks each element's inner collection (optionally
/// seeing the outer index); `RS` combines outer and inner elements.
#[derive(Clone)]
pub struct FlatMap<S, CS, RS> {
    source: S,
    collections: CS,
    results: RS,
}

impl<S, CS, RS> FlatMap<S, CS, RS> {
    pub fn new(source: S, collections: CS, results: RS) -> Self {
        Self {
            source,
            collections,
            results,
        }
    }
}

type InnerIter<CS, T> = <<CS as CollectionSelector<T>>::Collection as IntoIterator>::IntoIter;

pub struct FlatMapCursor<C, CS, RS>
where
    C: Iterator,
    CS: CollectionSelector<C::Item>,
{
    upstream: Option<C>,
    current: Option<(C::Item, InnerIter<CS, C::Item>)>,
    collections: CS,
    results: RS,
    index: usize,
}

impl<C, CS, RS> Iterator for FlatMapCursor<C, CS, RS>
where
    C: Iterator,
    CS: CollectionSelector<C::Item>,
    RS: ResultSelector<C::Item, <CS::Collection as IntoIterator>::Item>,
{
    type Item = RS::Output;

    fn next(&mut self) -> Option<RS::Output> {
        loop {
            if let Some((outer, inner)) = self.current.as_mut() {
                if let Some(item) = inner.next() {
                    return Some(self.results.combine(outer, item));
                }
                self.current = None;
            }
            match self.upstream.as_mut()?.next() {
                Some(outer) => {
                    let index = bump(&mut self.index);
                    let inner = self.collections.collection(&outer, index).into_iter();
                    self.current = Some((outer, inner));
                }
                None => {
                    self.upstream = None;
                    return None;
                }
            }
        }
    }
}

impl<S, CS, RS> Sequence for FlatMap<S, CS, RS>
where
    S: Sequence,
    CS: CollectionSelector<S::Item> + Clone,
    RS: ResultSelector<S::Item, <CS::Collection as IntoIterator>::Item> + Clone,
{
    type Item = RS::Output;
    type Cursor = FlatMapCursor<S::Cursor, CS, RS>;

    fn cursor(&self) -> Self::Cursor {
        FlatMapCursor {
            upstream: Some(self.source.cursor()),
            current: None,
            collections: self.collections.clone(),
            results: self.results.clone(),
            index: 0,
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        FlatMapCursor {
            upstream: Some(self.source.into_cursor()),
            current: None,
            collections: self.collections,
            results: self.results,
            index: 0,
        }
    }
}

sequence_into_iter!(impl[S, CS, RS] FlatMap<S, CS, RS>);

// ----- default_if_empty -----

#[derive(Clone)]
pub struct DefaultIfEmpty<S, T> {
    source: S,
    default: T,
}

impl<S, T> DefaultIfEmpty<S, T> {
    pub fn new(source: S, default: T) -> Self {
        Self { source, default }
    }
}

pub struct DefaultIfEmptyCursor<C, T> {
    upstream: Option<C>,
    // Cleared by the first real element.
    default: Option<T>,
}

impl<C: Iterator<Item = T>, T> Iterator for DefaultIfEmptyCursor<C, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(upstream) = self.upstream.as_mut() {
            if let Some(item) = upstream.next() {
                self.default = None;
                return Some(item);
            }
            self.upstream = None;
        }
        self.default.take()
    }
}

impl<S, T> Sequence for DefaultIfEmpty<S, T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    type Item = T;
    type Cursor = DefaultIfEmptyCursor<S::Cursor, T>;

    fn cursor(&self) -> Self::Cursor {
        DefaultIfEmptyCursor {
            upstream: Some(self.source.cursor()),
            default: Some(self.default.clone()),
        }
    }

    fn into_cursor(self) -> Self::Cursor {
        DefaultIfEmptyCursor {
            upstream: Some(self.source.into_cursor()),
            default: Some(self.default),
        }
    }

    fn fast_count(&self) -> Option<usize> {
        self.source.fast_count().map(|n| n.max(1))
    }
}

sequence_into_iter!(impl[S, T: Clone] DefaultIfEmpty<S, T>);

// ----- reverse -----

/// Buffers the whole source on the first `next`, then yields back to front.
#[derive(Clone)]
pub struct Reverse<S> {
    source: S,
}

impl<S> Reverse<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

pub struct ReverseDrain<T> {
    buffer: Buffer<T>,
}

impl<T> Iterator for ReverseDrain<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.buffer.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.buffer.len(), Some(self.buffer.len()))
    }
}

impl<S: Sequence> Materialize for Reverse<S> {
    type Iter = ReverseDrain<S::Item>;

    fn materialize(self) -> ReverseDrain<S::Item> {
        ReverseDrain {
            buffer: Buffer::from_sequence(self.source),
        }
    }
}

impl<S: Sequence> Sequence for Reverse<S> {
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

sequence_into_iter!(impl[S] Reverse<S>);
