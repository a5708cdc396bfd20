//! Terminal operators: each drives one eager traversal (or answers from an
//! O(1) shortcut) and returns a plain value.
//!
//! This module holds counting, quantifiers and containment; the rest live in
//! the submodules and are surfaced through `Query`.

pub mod aggregate;
pub mod convert;
pub mod element;
pub mod numeric;

use lazyseq_core::{EqualityComparer, Error, Result, Sequence};

pub fn count<S: Sequence>(source: S) -> Result<usize> {
    if let Some(n) = source.fast_count() {
        return Ok(n);
    }
    let mut n: usize = 0;
    for _ in source.into_cursor() {
        n = n.checked_add(1).ok_or(Error::Overflow("count"))?;
    }
    Ok(n)
}

pub fn count_by<S, P>(source: S, predicate: P) -> Result<usize>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    let mut n: usize = 0;
    for item in source.into_cursor() {
        if predicate(&item) {
            n = n.checked_add(1).ok_or(Error::Overflow("count"))?;
        }
    }
    Ok(n)
}

pub fn long_count<S: Sequence>(source: S) -> Result<u64> {
    if let Some(n) = source.fast_count() {
        return u64::try_from(n).map_err(|_| Error::Overflow("long_count"));
    }
    let mut n: u64 = 0;
    for _ in source.into_cursor() {
        n = n.checked_add(1).ok_or(Error::Overflow("long_count"))?;
    }
    Ok(n)
}

pub fn long_count_by<S, P>(source: S, predicate: P) -> Result<u64>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    let mut n: u64 = 0;
    for item in source.into_cursor() {
        if predicate(&item) {
            n = n.checked_add(1).ok_or(Error::Overflow("long_count"))?;
        }
    }
    Ok(n)
}

pub fn any<S: Sequence>(source: S) -> bool {
    match source.fast_count() {
        Some(n) => n > 0,
        None => source.into_cursor().next().is_some(),
    }
}

pub fn any_by<S, P>(source: S, predicate: P) -> bool
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    source.into_cursor().any(|item| predicate(&item))
}

pub fn all<S, P>(source: S, predicate: P) -> bool
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    source.into_cursor().all(|item| predicate(&item))
}

/// Asks the source first; falls back to a linear scan.
pub fn contains<S>(source: S, value: &S::Item) -> bool
where
    S: Sequence,
    S::Item: PartialEq,
{
    if let Some(found) = source.fast_contains(value) {
        return found;
    }
    source.into_cursor().any(|item| item == *value)
}

pub fn contains_with<S, C>(source: S, value: &S::Item, comparer: C) -> bool
where
    S: Sequence,
    C: EqualityComparer<S::Item>,
{
    source
        .into_cursor()
        .any(|item| comparer.equals(&item, value))
}
