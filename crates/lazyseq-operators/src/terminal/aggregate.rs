//! Folds, comparer-driven extrema and sequence equality.

use std::cmp::Ordering;

use lazyseq_core::{Comparer, EqualityComparer, Error, Result, Sequence};

/// Reduce with the first element as the seed.
pub fn aggregate<S, F>(source: S, func: F) -> Result<S::Item>
where
    S: Sequence,
    F: Fn(S::Item, S::Item) -> S::Item,
{
    let mut cursor = source.into_cursor();
    let seed = cursor.next().ok_or(Error::EmptySequence)?;
    Ok(cursor.fold(seed, func))
}

pub fn aggregate_seeded<S, A, F>(source: S, seed: A, func: F) -> A
where
    S: Sequence,
    F: Fn(A, S::Item) -> A,
{
    source.into_cursor().fold(seed, func)
}

pub fn aggregate_with<S, A, F, R, G>(source: S, seed: A, func: F, result: G) -> R
where
    S: Sequence,
    F: Fn(A, S::Item) -> A,
    G: FnOnce(A) -> R,
{
    result(aggregate_seeded(source, seed, func))
}

pub fn sequence_equal<A, B>(first: A, second: B) -> bool
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    A::Item: PartialEq,
{
    if let (Some(x), Some(y)) = (first.fast_count(), second.fast_count()) {
        if x != y {
            return false;
        }
    }
    first.into_cursor().eq(second.into_cursor())
}

pub fn sequence_equal_with<A, B, C>(first: A, second: B, comparer: C) -> bool
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    C: EqualityComparer<A::Item>,
{
    if let (Some(x), Some(y)) = (first.fast_count(), second.fast_count()) {
        if x != y {
            return false;
        }
    }
    let mut left = first.into_cursor();
    let mut right = second.into_cursor();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if comparer.equals(&a, &b) => {}
            _ => return false,
        }
    }
}

fn pick_by<S, C>(source: S, comparer: C, keep: Ordering) -> Result<S::Item>
where
    S: Sequence,
    C: Comparer<S::Item>,
{
    let mut cursor = source.into_cursor();
    let mut best = cursor.next().ok_or(Error::EmptySequence)?;
    for item in cursor {
        if comparer.compare(&item, &best) == keep {
            best = item;
        }
    }
    Ok(best)
}

/// Smallest element under `comparer`; ties keep the earliest.
pub fn min_with<S, C>(source: S, comparer: C) -> Result<S::Item>
where
    S: Sequence,
    C: Comparer<S::Item>,
{
    pick_by(source, comparer, Ordering::Less)
}

/// Largest element under `comparer`; ties keep the earliest.
pub fn max_with<S, C>(source: S, comparer: C) -> Result<S::Item>
where
    S: Sequence,
    C: Comparer<S::Item>,
{
    pick_by(source, comparer, Ordering::Greater)
}
