//! first / last / single / element_at and their `_or_default` forms.
//!
//! `last*` and `element_at*` read array and list sources by index instead of
//! scanning, which is why they need `Item: Clone`.

use lazyseq_core::{Error, Result, Sequence};

pub fn first<S: Sequence>(source: S) -> Result<S::Item> {
    source.into_cursor().next().ok_or(Error::EmptySequence)
}

pub fn first_by<S, P>(source: S, predicate: P) -> Result<S::Item>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    source
        .into_cursor()
        .find(|item| predicate(item))
        .ok_or(Error::NoMatch)
}

pub fn first_or_default<S>(source: S) -> S::Item
where
    S: Sequence,
    S::Item: Default,
{
    first(source).unwrap_or_default()
}

pub fn first_or_default_by<S, P>(source: S, predicate: P) -> S::Item
where
    S: Sequence,
    S::Item: Default,
    P: Fn(&S::Item) -> bool,
{
    first_by(source, predicate).unwrap_or_default()
}

pub fn last<S>(source: S) -> Result<S::Item>
where
    S: Sequence,
    S::Item: Clone,
{
    let shape = source.shape();
    match shape.len() {
        Some(0) => Err(Error::EmptySequence),
        Some(len) => shape.get(len - 1).ok_or(Error::EmptySequence),
        None => source.into_cursor().last().ok_or(Error::EmptySequence),
    }
}

pub fn last_by<S, P>(source: S, predicate: P) -> Result<S::Item>
where
    S: Sequence,
    S::Item: Clone,
    P: Fn(&S::Item) -> bool,
{
    let shape = source.shape();
    if let Some(len) = shape.len() {
        // Indexed: scan backwards and stop at the first hit.
        return (0..len)
            .rev()
            .filter_map(|i| shape.get(i))
            .find(|item| predicate(item))
            .ok_or(Error::NoMatch);
    }
    let mut found = None;
    for item in source.into_cursor() {
        if predicate(&item) {
            found = Some(item);
        }
    }
    found.ok_or(Error::NoMatch)
}

pub fn last_or_default<S>(source: S) -> S::Item
where
    S: Sequence,
    S::Item: Clone + Default,
{
    last(source).unwrap_or_default()
}

pub fn last_or_default_by<S, P>(source: S, predicate: P) -> S::Item
where
    S: Sequence,
    S::Item: Clone + Default,
    P: Fn(&S::Item) -> bool,
{
    last_by(source, predicate).unwrap_or_default()
}

/// `Ok(None)` when empty, `MoreThanOne` when there is a second element.
fn single_opt<S: Sequence>(source: S) -> Result<Option<S::Item>> {
    let mut cursor = source.into_cursor();
    let Some(item) = cursor.next() else {
        return Ok(None);
    };
    if cursor.next().is_some() {
        return Err(Error::MoreThanOne);
    }
    Ok(Some(item))
}

fn single_opt_by<S, P>(source: S, predicate: P) -> Result<Option<S::Item>>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    let mut found = None;
    for item in source.into_cursor() {
        if predicate(&item) {
            if found.is_some() {
                return Err(Error::MoreThanOne);
            }
            found = Some(item);
        }
    }
    Ok(found)
}

pub fn single<S: Sequence>(source: S) -> Result<S::Item> {
    single_opt(source)?.ok_or(Error::EmptySequence)
}

pub fn single_by<S, P>(source: S, predicate: P) -> Result<S::Item>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    single_opt_by(source, predicate)?.ok_or(Error::NoMatch)
}

pub fn single_or_default<S>(source: S) -> Result<S::Item>
where
    S: Sequence,
    S::Item: Default,
{
    Ok(single_opt(source)?.unwrap_or_default())
}

pub fn single_or_default_by<S, P>(source: S, predicate: P) -> Result<S::Item>
where
    S: Sequence,
    S::Item: Default,
    P: Fn(&S::Item) -> bool,
{
    Ok(single_opt_by(source, predicate)?.unwrap_or_default())
}

fn element_at_opt<S>(source: S, index: isize) -> Option<S::Item>
where
    S: Sequence,
    S::Item: Clone,
{
    let index = usize::try_from(index).ok()?;
    let shape = source.shape();
    if shape.is_indexed() {
        return shape.get(index);
    }
    source.into_cursor().nth(index)
}

pub fn element_at<S>(source: S, index: isize) -> Result<S::Item>
where
    S: Sequence,
    S::Item: Clone,
{
    element_at_opt(source, index).ok_or(Error::OutOfRange { index })
}

pub fn element_at_or_default<S>(source: S, index: isize) -> S::Item
where
    S: Sequence,
    S::Item: Clone + Default,
{
    element_at_opt(source, index).unwrap_or_default()
}
