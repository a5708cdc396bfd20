//! Hash multimap ("lookup") backing group-by, joins and `to_lookup`.
//!
//! Groups live in an arena (`Vec`) and are addressed by index. Each group is
//! linked twice:
//! - into its hash bucket's chain (`hash_next`), for key lookup;
//! - into a circular list of all groups (`next`), in distinct-key insertion
//!   order. `last` points at the most recently created group, so enumeration
//!   starts at `nodes[last].next` and stops after yielding `last`.
//!
//! [`LookupBuilder`] is the mutable phase. [`LookupBuilder::freeze`] trims each
//! group to its exact length and produces an immutable, cheaply cloneable
//! [`Lookup`].

use std::sync::Arc;

use lazyseq_core::source::{ArrayCursor, ArraySource};
use lazyseq_core::{DefaultEquality, EqualityComparer, QueryConfig, Sequence, Shape};

use crate::set::masked_hash;

struct Node<K, E> {
    key: K,
    hash: u32,
    elements: Vec<E>,
    hash_next: Option<usize>,
    next: usize,
}

pub struct LookupBuilder<K, E, C = DefaultEquality> {
    buckets: Vec<Option<usize>>,
    nodes: Vec<Node<K, E>>,
    last: Option<usize>,
    comparer: C,
    group_capacity: usize,
}

impl<K, E, C: EqualityComparer<K>> LookupBuilder<K, E, C> {
    pub fn with_comparer(comparer: C) -> Self {
        Self::with_config(comparer, QueryConfig::global())
    }

    pub fn with_config(comparer: C, cfg: &QueryConfig) -> Self {
        Self {
            buckets: vec![None; cfg.hash_initial_buckets.max(1)],
            nodes: Vec::new(),
            last: None,
            comparer,
            group_capacity: cfg.group_initial_capacity.max(1),
        }
    }

    /// Group every item by `key_of`, storing `element_of(item)`.
    pub fn create<T, I, KF, EF>(items: I, key_of: KF, element_of: EF, comparer: C) -> Lookup<K, E, C>
    where
        I: IntoIterator<Item = T>,
        KF: Fn(&T) -> K,
        EF: Fn(T) -> E,
    {
        let mut builder = Self::with_comparer(comparer);
        for item in items {
            let key = key_of(&item);
            builder.add(key, element_of(item));
        }
        builder.freeze()
    }

    /// Lookup over the inner side of a join: items keyed by `key_of`. Items
    /// whose key is null are left out since they can never match.
    pub fn create_for_join<I, KF>(items: I, key_of: KF, comparer: C) -> Lookup<K, E, C>
    where
        I: IntoIterator<Item = E>,
        KF: Fn(&E) -> K,
    {
        let mut builder = Self::with_comparer(comparer);
        for item in items {
            let key = key_of(&item);
            if !builder.comparer.is_null(&key) {
                builder.add(key, item);
            }
        }
        builder.freeze()
    }

    /// Number of distinct keys so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Append `element` to the group for `key`, creating the group on first sight.
    pub fn add(&mut self, key: K, element: E) {
        if let Some(index) = self.get_grouping(key, true) {
            let elements = &mut self.nodes[index].elements;
            if elements.len() == elements.capacity() {
                let grow = elements.capacity().max(1);
                elements.reserve_exact(grow);
            }
            elements.push(element);
        }
    }

    /// Index of the group for `key`. With `create_if_missing` an absent group
    /// is allocated and linked in after the current last group.
    pub fn get_grouping(&mut self, key: K, create_if_missing: bool) -> Option<usize> {
        let hash = masked_hash(&self.comparer, &key);
        if let Some(found) = self.find(hash, &key) {
            return Some(found);
        }
        if !create_if_missing {
            return None;
        }

        if self.nodes.len() == self.buckets.len() {
            self.resize();
        }
        let index = self.nodes.len();
        let bucket = hash as usize % self.buckets.len();
        let next = match self.last {
            Some(last) => {
                let head = self.nodes[last].next;
                self.nodes[last].next = index;
                head
            }
            None => index,
        };
        self.nodes.push(Node {
            key,
            hash,
            elements: Vec::with_capacity(self.group_capacity),
            hash_next: self.buckets[bucket],
            next,
        });
        self.buckets[bucket] = Some(index);
        self.last = Some(index);
        Some(index)
    }

    fn find(&self, hash: u32, key: &K) -> Option<usize> {
        let mut cursor = self.buckets[hash as usize % self.buckets.len()];
        while let Some(i) = cursor {
            let node = &self.nodes[i];
            if node.hash == hash && self.comparer.equals(&node.key, key) {
                return Some(i);
            }
            cursor = node.hash_next;
        }
        None
    }

    fn resize(&mut self) {
        let new_size = self.nodes.len() * 2 + 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(from = self.buckets.len(), to = new_size, "lookup resize");
        let mut buckets = vec![None; new_size];
        if let Some(last) = self.last {
            let mut g = last;
            loop {
                g = self.nodes[g].next;
                let bucket = self.nodes[g].hash as usize % new_size;
                self.nodes[g].hash_next = buckets[bucket];
                buckets[bucket] = Some(g);
                if g == last {
                    break;
                }
            }
        }
        self.buckets = buckets;
    }

    /// Trim every group to its exact length and make the lookup immutable.
    pub fn freeze(self) -> Lookup<K, E, C> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|n| FrozenNode {
                key: n.key,
                hash: n.hash,
                elements: Arc::from(n.elements),
                hash_next: n.hash_next,
                next: n.next,
            })
            .collect();
        Lookup {
            inner: Arc::new(Inner {
                buckets: self.buckets,
                nodes,
                last: self.last,
                comparer: self.comparer,
            }),
        }
    }
}

// ----- frozen lookup -----

struct FrozenNode<K, E> {
    key: K,
    hash: u32,
    elements: Arc<[E]>,
    hash_next: Option<usize>,
    next: usize,
}

struct Inner<K, E, C> {
    buckets: Vec<Option<usize>>,
    nodes: Vec<FrozenNode<K, E>>,
    last: Option<usize>,
    comparer: C,
}

/// Immutable key -> ordered elements multimap.
pub struct Lookup<K, E, C = DefaultEquality> {
    inner: Arc<Inner<K, E, C>>,
}

impl<K, E, C> Clone for Lookup<K, E, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, E, C: EqualityComparer<K>> Lookup<K, E, C> {
    pub fn len(&self) -> usize {
        self.inner.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.nodes.is_empty()
    }

    fn find(&self, key: &K) -> Option<&FrozenNode<K, E>> {
        let inner = &*self.inner;
        let hash = masked_hash(&inner.comparer, key);
        let mut cursor = inner.buckets[hash as usize % inner.buckets.len()];
        while let Some(i) = cursor {
            let node = &inner.nodes[i];
            if node.hash == hash && inner.comparer.equals(&node.key, key) {
                return Some(node);
            }
            cursor = node.hash_next;
        }
        None
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Elements for `key`; an absent key yields an empty sequence.
    pub fn get(&self, key: &K) -> ArraySource<E> {
        match self.find(key) {
            Some(node) => ArraySource::new(Arc::clone(&node.elements)),
            None => ArraySource::empty(),
        }
    }

    /// `(key, elements)` pairs in distinct-key insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&K, &[E])> + '_ {
        walk(&*self.inner).map(move |i| {
            let node = &self.inner.nodes[i];
            (&node.key, &node.elements[..])
        })
    }

    /// Lazily map each group through `selector(key, elements)`.
    pub fn apply_result_selector<F, R>(&self, selector: F) -> ResultSelected<K, E, C, F>
    where
        F: Fn(K, ArraySource<E>) -> R + Clone,
    {
        ResultSelected {
            lookup: self.clone(),
            selector,
        }
    }
}

impl<K: std::fmt::Debug, E: std::fmt::Debug, C> std::fmt::Debug for Lookup<K, E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for i in walk(&*self.inner) {
            let node = &self.inner.nodes[i];
            map.entry(&node.key, &&node.elements[..]);
        }
        map.finish()
    }
}


/// Position in the circular group list.
#[derive(Debug, Clone, Copy)]
struct Walk {
    pos: Option<usize>,
    done: bool,
}

impl Walk {
    fn start<K, E, C>(inner: &Inner<K, E, C>) -> Self {
        Self {
            pos: None,
            done: inner.last.is_none(),
        }
    }

    fn step<K, E, C>(&mut self, inner: &Inner<K, E, C>) -> Option<usize> {
        if self.done {
            return None;
        }
        let last = inner.last?;
        let index = inner.nodes[self.pos.unwrap_or(last)].next;
        self.pos = Some(index);
        self.done = index == last;
        Some(index)
    }
}

fn walk<K, E, C>(inner: &Inner<K, E, C>) -> impl Iterator<Item = usize> + '_ {
    let mut w = Walk::start(inner);
    std::iter::from_fn(move || w.step(inner))
}

/// Yields one [`Grouping`] per distinct key, in insertion order.
pub struct LookupCursor<K, E, C> {
    lookup: Lookup<K, E, C>,
    walk: Walk,
}

impl<K: Clone, E, C> Iterator for LookupCursor<K, E, C> {
    type Item = Grouping<K, E>;

    fn next(&mut self) -> Option<Grouping<K, E>> {
        let inner = &*self.lookup.inner;
        let index = self.walk.step(inner)?;
        let node = &inner.nodes[index];
        Some(Grouping {
            key: node.key.clone(),
            elements: Arc::clone(&node.elements),
        })
    }
}

impl<K: Clone, E, C> Sequence for Lookup<K, E, C> {
    type Item = Grouping<K, E>;
    type Cursor = LookupCursor<K, E, C>;

    fn cursor(&self) -> LookupCursor<K, E, C> {
        LookupCursor {
            lookup: self.clone(),
            walk: Walk::start(&*self.inner),
        }
    }

    fn fast_count(&self) -> Option<usize> {
        Some(self.inner.nodes.len())
    }
}

lazyseq_core::sequence_into_iter!(impl[K: Clone, E, C] Lookup<K, E, C>);

// ----- grouping -----

/// One key and its elements, in first-seen order.
pub struct Grouping<K, E> {
    key: K,
    elements: Arc<[E]>,
}

impl<K, E> Grouping<K, E> {
    pub fn new(key: K, elements: impl Into<Arc<[E]>>) -> Self {
        Self {
            key,
            elements: elements.into(),
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_parts(self) -> (K, ArraySource<E>) {
        (self.key, ArraySource::new(self.elements))
    }
}

impl<K: Clone, E> Clone for Grouping<K, E> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            elements: Arc::clone(&self.elements),
        }
    }
}

impl<K: std::fmt::Debug, E: std::fmt::Debug> std::fmt::Debug for Grouping<K, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grouping")
            .field("key", &self.key)
            .field("elements", &&self.elements[..])
            .finish()
    }
}

impl<K: PartialEq, E: PartialEq> PartialEq for Grouping<K, E> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.elements[..] == other.elements[..]
    }
}

impl<K: Clone, E: Clone> Sequence for Grouping<K, E> {
    type Item = E;
    type Cursor = ArrayCursor<E>;

    fn cursor(&self) -> ArrayCursor<E> {
        ArrayCursor::new(Arc::clone(&self.elements))
    }

    fn shape(&self) -> Shape<E> {
        Shape::Array(Arc::clone(&self.elements))
    }

    fn fast_count(&self) -> Option<usize> {
        Some(self.elements.len())
    }
}

lazyseq_core::sequence_into_iter!(impl[K: Clone, E: Clone] Grouping<K, E>);

// ----- result selector -----

/// Groups mapped through `selector(key, elements)`, lazily.
pub struct ResultSelected<K, E, C, F> {
    lookup: Lookup<K, E, C>,
    selector: F,
}

impl<K, E, C, F: Clone> Clone for ResultSelected<K, E, C, F> {
    fn clone(&self) -> Self {
        Self {
            lookup: self.lookup.clone(),
            selector: self.selector.clone(),
        }
    }
}

pub struct ResultSelectedCursor<K, E, C, F> {
    groups: LookupCursor<K, E, C>,
    selector: F,
}

impl<K, E, C, F, R> Iterator for ResultSelectedCursor<K, E, C, F>
where
    K: Clone,
    F: Fn(K, ArraySource<E>) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let (key, elements) = self.groups.next()?.into_parts();
        Some((self.selector)(key, elements))
    }
}

impl<K, E, C, F, R> Sequence for ResultSelected<K, E, C, F>
where
    K: Clone,
    F: Fn(K, ArraySource<E>) -> R + Clone,
{
    type Item = R;
    type Cursor = ResultSelectedCursor<K, E, C, F>;

    fn cursor(&self) -> Self::Cursor {
        ResultSelectedCursor {
            groups: self.lookup.cursor(),
            selector: self.selector.clone(),
        }
    }

    fn fast_count(&self) -> Option<usize> {
        self.lookup.fast_count()
    }
}

lazyseq_core::sequence_into_iter!(impl[K: Clone, E, C, F: Clone] ResultSelected<K, E, C, F>);

#[cfg(test)]
mod tests {
    use super::*;
    use lazyseq_core::OptionEquality;

    fn by_parity(items: Vec<i32>) -> Lookup<bool, i32> {
        LookupBuilder::create(items, |x| x % 2 == 0, |x| x, DefaultEquality)
    }

    #[test]
    fn groups_keep_first_seen_key_order() {
        let lookup = by_parity(vec![3, 2, 5, 4, 7]);
        let groups: Vec<_> = lookup.groups().map(|(k, v)| (*k, v.to_vec())).collect();
        assert_eq!(groups, vec![(false, vec![3, 5, 7]), (true, vec![2, 4])]);
    }

    #[test]
    fn missing_key_yields_empty() {
        let lookup = by_parity(vec![1, 3]);
        assert!(lookup.get(&true).is_empty());
        assert_eq!(lookup.get(&false).as_slice(), &[1, 3]);
        assert!(lookup.contains_key(&false));
        assert!(!lookup.contains_key(&true));
    }

    #[test]
    fn group_elements_double_from_one() {
        let mut b: LookupBuilder<u8, u8> =
            LookupBuilder::with_config(DefaultEquality, &QueryConfig::default());
        b.add(0, 1);
        assert_eq!(b.nodes[0].elements.capacity(), 1);
        b.add(0, 2);
        assert_eq!(b.nodes[0].elements.capacity(), 2);
        b.add(0, 3);
        assert_eq!(b.nodes[0].elements.capacity(), 4);
    }

    #[test]
    fn buckets_grow_when_group_count_reaches_bucket_count() {
        let mut b: LookupBuilder<i32, i32> =
            LookupBuilder::with_config(DefaultEquality, &QueryConfig::default());
        for k in 0..7 {
            b.add(k, k);
        }
        assert_eq!(b.bucket_count(), 7);
        b.add(7, 7);
        assert_eq!(b.bucket_count(), 15);
        let lookup = b.freeze();
        let keys: Vec<i32> = lookup.groups().map(|(k, _)| *k).collect();
        assert_eq!(keys, (0..8).collect::<Vec<_>>());
        for k in 0..8 {
            assert_eq!(lookup.get(&k).as_slice(), &[k]);
        }
    }

    #[test]
    fn join_lookup_skips_null_keys() {
        let items = vec![(Some(1), "a"), (None, "b"), (Some(1), "c")];
        let lookup = LookupBuilder::create_for_join(items, |p| p.0, OptionEquality(DefaultEquality));
        assert_eq!(lookup.len(), 1);
        assert!(lookup.get(&None).is_empty());
        assert_eq!(lookup.get(&Some(1)).len(), 2);
    }

    #[test]
    fn result_selector_is_lazy_and_restartable() {
        let lookup = by_parity(vec![1, 2, 3]);
        let sizes = lookup.apply_result_selector(|k, v| (k, v.len()));
        let first: Vec<_> = sizes.cursor().collect();
        let second: Vec<_> = sizes.cursor().collect();
        assert_eq!(first, vec![(false, 2), (true, 1)]);
        assert_eq!(first, second);
    }
}
