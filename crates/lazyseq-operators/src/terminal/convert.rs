//! Eager conversions into owned collections.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use lazyseq_core::source::SharedList;
use lazyseq_core::{DefaultEquality, EqualityComparer, Error, Result, Sequence};
use lazyseq_mem::{Buffer, Lookup, LookupBuilder, Set};

pub fn to_vec<S: Sequence>(source: S) -> Vec<S::Item> {
    Buffer::from_sequence(source).into_vec()
}

pub fn to_array<S: Sequence>(source: S) -> Box<[S::Item]> {
    to_vec(source).into_boxed_slice()
}

pub fn to_list<S: Sequence>(source: S) -> SharedList<S::Item> {
    SharedList::from_vec(to_vec(source))
}

/// Fails on the first repeated key, reporting the element's position.
pub fn to_dictionary<S, K, KF>(source: S, key: KF) -> Result<HashMap<K, S::Item>>
where
    S: Sequence,
    K: Hash + Eq,
    KF: Fn(&S::Item) -> K,
{
    to_dictionary_map(source, key, |item| item)
}

pub fn to_dictionary_map<S, K, V, KF, VF>(source: S, key: KF, value: VF) -> Result<HashMap<K, V>>
where
    S: Sequence,
    K: Hash + Eq,
    KF: Fn(&S::Item) -> K,
    VF: Fn(S::Item) -> V,
{
    let mut map = HashMap::with_capacity(source.fast_count().unwrap_or(0));
    for (index, item) in source.into_cursor().enumerate() {
        match map.entry(key(&item)) {
            Entry::Occupied(_) => return Err(Error::DuplicateKey { index }),
            Entry::Vacant(slot) => {
                slot.insert(value(item));
            }
        }
    }
    Ok(map)
}

pub fn to_lookup<S, K, KF>(source: S, key: KF) -> Lookup<K, S::Item, DefaultEquality>
where
    S: Sequence,
    K: Hash + Eq,
    KF: Fn(&S::Item) -> K,
{
    LookupBuilder::create(source.into_cursor(), key, |item| item, DefaultEquality)
}

pub fn to_lookup_with<S, K, E, KF, EF, C>(
    source: S,
    key: KF,
    element: EF,
    comparer: C,
) -> Lookup<K, E, C>
where
    S: Sequence,
    KF: Fn(&S::Item) -> K,
    EF: Fn(S::Item) -> E,
    C: EqualityComparer<K>,
{
    LookupBuilder::create(source.into_cursor(), key, element, comparer)
}

pub fn to_hash_set<S>(source: S) -> HashSet<S::Item>
where
    S: Sequence,
    S::Item: Hash + Eq,
{
    source.into_cursor().collect()
}

pub fn to_set_with<S, C>(source: S, comparer: C) -> Set<S::Item, C>
where
    S: Sequence,
    C: EqualityComparer<S::Item>,
{
    let mut set = Set::with_comparer(comparer);
    for item in source.into_cursor() {
        set.add(item);
    }
    set
}
