//! Comparer-driven hash set backing distinct/union/intersect/except.
//!
//! Layout: a bucket array of chain heads plus a slot table. Slots are only ever
//! appended or recycled through the free list; the table (and the bucket array,
//! to `2 * count + 1`) is resized only when every slot is in use.

use lazyseq_core::{DefaultEquality, EqualityComparer, QueryConfig};

/// Hash used by the set and the lookup: non-negative, null keys hash to 0.
pub(crate) fn masked_hash<T: ?Sized, C: EqualityComparer<T>>(comparer: &C, value: &T) -> u32 {
    if comparer.is_null(value) {
        0
    } else {
        comparer.hash(value) & 0x7FFF_FFFF
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    hash: u32,
    /// `None` once the slot is on the free list.
    value: Option<T>,
    next: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Set<T, C = DefaultEquality> {
    buckets: Vec<Option<usize>>,
    slots: Vec<Slot<T>>,
    free_list: Option<usize>,
    len: usize,
    comparer: C,
}

impl<T: std::hash::Hash + Eq> Set<T, DefaultEquality> {
    pub fn new() -> Self {
        Self::with_comparer(DefaultEquality)
    }
}

impl<T: std::hash::Hash + Eq> Default for Set<T, DefaultEquality> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: EqualityComparer<T>> Set<T, C> {
    pub fn with_comparer(comparer: C) -> Self {
        Self::with_config(comparer, QueryConfig::global())
    }

    pub fn with_config(comparer: C, cfg: &QueryConfig) -> Self {
        let buckets = cfg.hash_initial_buckets.max(1);
        Self {
            buckets: vec![None; buckets],
            slots: Vec::with_capacity(buckets),
            free_list: None,
            len: 0,
            comparer,
        }
    }

    /// Live values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    fn find(&self, hash: u32, value: &T) -> Option<usize> {
        let mut cursor = self.buckets[self.bucket_of(hash)];
        while let Some(i) = cursor {
            let slot = &self.slots[i];
            if slot.hash == hash {
                if let Some(v) = &slot.value {
                    if self.comparer.equals(v, value) {
                        return Some(i);
                    }
                }
            }
            cursor = slot.next;
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(masked_hash(&self.comparer, value), value).is_some()
    }

    /// Returns `false` if an equal value was already present.
    pub fn add(&mut self, value: T) -> bool {
        let hash = masked_hash(&self.comparer, &value);
        if self.find(hash, &value).is_some() {
            return false;
        }

        let index = match self.free_list {
            Some(free) => {
                self.free_list = self.slots[free].next;
                free
            }
            None => {
                if self.slots.len() == self.buckets.len() {
                    self.resize();
                }
                self.slots.push(Slot {
                    hash: 0,
                    value: None,
                    next: None,
                });
                self.slots.len() - 1
            }
        };

        let bucket = self.bucket_of(hash);
        self.slots[index] = Slot {
            hash,
            value: Some(value),
            next: self.buckets[bucket],
        };
        self.buckets[bucket] = Some(index);
        self.len += 1;
        true
    }

    /// Returns `true` if an equal value was found and removed. The freed slot
    /// is reused by the next `add`.
    pub fn remove(&mut self, value: &T) -> bool {
        let hash = masked_hash(&self.comparer, value);
        let bucket = self.bucket_of(hash);
        let mut prev: Option<usize> = None;
        let mut cursor = self.buckets[bucket];
        while let Some(i) = cursor {
            let matches = self.slots[i].hash == hash
                && self.slots[i]
                    .value
                    .as_ref()
                    .is_some_and(|v| self.comparer.equals(v, value));
            if matches {
                let next = self.slots[i].next;
                match prev {
                    Some(p) => self.slots[p].next = next,
                    None => self.buckets[bucket] = next,
                }
                self.slots[i] = Slot {
                    hash: 0,
                    value: None,
                    next: self.free_list,
                };
                self.free_list = Some(i);
                self.len -= 1;
                return true;
            }
            prev = cursor;
            cursor = self.slots[i].next;
        }
        false
    }

    // Only called with an empty free list, so every slot is live.
    fn resize(&mut self) {
        let new_size = self.slots.len() * 2 + 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(from = self.buckets.len(), to = new_size, "set resize");
        let mut buckets = vec![None; new_size];
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let bucket = slot.hash as usize % new_size;
            slot.next = buckets[bucket];
            buckets[bucket] = Some(i);
        }
        self.buckets = buckets;
        self.slots.reserve_exact(new_size - self.slots.len());
    }

    /// Live values in slot order (insertion order until a slot is recycled).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|s| s.value.as_ref())
    }

    pub fn into_vec(self) -> Vec<T> {
        self.slots.into_iter().filter_map(|s| s.value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyseq_core::{KeyEquality, OptionEquality};

    #[test]
    fn add_reports_novelty() {
        let mut s = Set::new();
        assert!(s.add(1));
        assert!(s.add(2));
        assert!(!s.add(1));
        assert_eq!(s.len(), 2);
        assert!(s.contains(&2));
        assert!(!s.contains(&3));
    }

    #[test]
    fn resizes_to_twice_plus_one_when_full() {
        let mut s = Set::with_config(DefaultEquality, &QueryConfig::default());
        for i in 0..7 {
            s.add(i);
        }
        assert_eq!(s.bucket_count(), 7);
        s.add(7);
        assert_eq!(s.bucket_count(), 15);
        for i in 0..8 {
            assert!(s.contains(&i));
        }
    }

    #[test]
    fn removed_slots_are_recycled_before_growing() {
        let mut s = Set::with_config(DefaultEquality, &QueryConfig::default());
        for i in 0..7 {
            s.add(i);
        }
        assert!(s.remove(&3));
        assert!(!s.remove(&3));
        assert!(s.add(100));
        assert_eq!(s.bucket_count(), 7);
        assert_eq!(s.into_vec(), vec![0, 1, 2, 100, 4, 5, 6]);
    }

    #[test]
    fn custom_comparer_is_honoured() {
        let mut s = Set::with_comparer(KeyEquality(|v: &String| v.to_lowercase()));
        assert!(s.add("Hello".to_string()));
        assert!(!s.add("HELLO".to_string()));
        assert!(s.contains(&"hello".to_string()));
    }

    #[test]
    fn null_values_share_one_slot() {
        let mut s = Set::with_comparer(OptionEquality(DefaultEquality));
        assert!(s.add(None::<i32>));
        assert!(!s.add(None));
        assert!(s.add(Some(0)));
        assert_eq!(s.len(), 2);
    }
}
