//! Sort-level descriptors and the permutation sort.
//!
//! A descriptor chain is built outward: `order_by` creates a [`Primary`] level
//! and every `then_by` wraps the chain so far in a [`ThenLevel`]. Comparison
//! runs the other way: the primary key is compared first and each `then_by`
//! level only breaks ties left by its parent. Keys are projected once per sort
//! into one array per level.
//!
//! The sort itself is an unstable quicksort over an index map. It is stable
//! overall because [`sort_permutation`] falls back to comparing original
//! indices when every level reports equal.

use std::cmp::Ordering;

use lazyseq_core::Comparer;

pub trait SortDescriptor<T>: Clone {
    /// Projected keys of every level, computed once per sort.
    type Keys;

    fn compute_keys(&self, items: &[T]) -> Self::Keys;

    /// Compare elements `a` and `b` by key, most significant level first.
    /// Does not include the index tie-break.
    fn compare_keys(&self, keys: &Self::Keys, a: usize, b: usize) -> Ordering;
}

#[derive(Debug, Clone)]
pub struct Primary<F, C> {
    key: F,
    comparer: C,
    descending: bool,
}

impl<F, C> Primary<F, C> {
    pub fn new(key: F, comparer: C, descending: bool) -> Self {
        Self {
            key,
            comparer,
            descending,
        }
    }
}

fn directed(ord: Ordering, descending: bool) -> Ordering {
    if descending {
        ord.reverse()
    } else {
        ord
    }
}

impl<T, K, F, C> SortDescriptor<T> for Primary<F, C>
where
    F: Fn(&T) -> K + Clone,
    C: Comparer<K>,
{
    type Keys = Vec<K>;

    fn compute_keys(&self, items: &[T]) -> Vec<K> {
        items.iter().map(&self.key).collect()
    }

    fn compare_keys(&self, keys: &Vec<K>, a: usize, b: usize) -> Ordering {
        directed(self.comparer.compare(&keys[a], &keys[b]), self.descending)
    }
}

/// A `then_by` level wrapping the chain built so far.
#[derive(Debug, Clone)]
pub struct ThenLevel<P, F, C> {
    parent: P,
    key: F,
    comparer: C,
    descending: bool,
}

impl<P, F, C> ThenLevel<P, F, C> {
    pub fn new(parent: P, key: F, comparer: C, descending: bool) -> Self {
        Self {
            parent,
            key,
            comparer,
            descending,
        }
    }
}

impl<T, K, P, F, C> SortDescriptor<T> for ThenLevel<P, F, C>
where
    P: SortDescriptor<T>,
    F: Fn(&T) -> K + Clone,
    C: Comparer<K>,
{
    type Keys = (P::Keys, Vec<K>);

    fn compute_keys(&self, items: &[T]) -> Self::Keys {
        (
            self.parent.compute_keys(items),
            items.iter().map(&self.key).collect(),
        )
    }

    fn compare_keys(&self, keys: &Self::Keys, a: usize, b: usize) -> Ordering {
        self.parent.compare_keys(&keys.0, a, b).then_with(|| {
            directed(
                self.comparer.compare(&keys.1[a], &keys.1[b]),
                self.descending,
            )
        })
    }
}

/// Permutation of `0..items.len()` ordering `items` by `descriptor`, equal
/// keys kept in original order.
pub fn sort_permutation<T, D: SortDescriptor<T>>(descriptor: &D, items: &[T]) -> Vec<usize> {
    let mut map: Vec<usize> = (0..items.len()).collect();
    if map.len() < 2 {
        return map;
    }
    let keys = descriptor.compute_keys(items);
    let compare = |a: usize, b: usize| {
        if a == b {
            Ordering::Equal
        } else {
            descriptor.compare_keys(&keys, a, b).then(a.cmp(&b))
        }
    };
    let right = map.len() as isize - 1;
    quick_sort(&mut map, 0, right, &compare);
    map
}

// Hoare-style partition around the middle element; recurses into the smaller
// side and loops on the larger to keep the stack at O(log n).
fn quick_sort<F>(map: &mut [usize], mut left: isize, mut right: isize, compare: &F)
where
    F: Fn(usize, usize) -> Ordering,
{
    let len = map.len() as isize;
    loop {
        let mut i = left;
        let mut j = right;
        let pivot = map[(i + ((j - i) >> 1)) as usize];
        loop {
            while i < len && compare(pivot, map[i as usize]) == Ordering::Greater {
                i += 1;
            }
            while j >= 0 && compare(pivot, map[j as usize]) == Ordering::Less {
                j -= 1;
            }
            if i > j {
                break;
            }
            if i < j {
                map.swap(i as usize, j as usize);
            }
            i += 1;
            j -= 1;
            if i > j {
                break;
            }
        }
        if j - left <= right - i {
            if left < j {
                quick_sort(map, left, j, compare);
            }
            left = i;
        } else {
            if i < right {
                quick_sort(map, i, right, compare);
            }
            right = j;
        }
        if left >= right {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyseq_core::DefaultOrder;

    fn is_permutation(map: &[usize]) -> bool {
        let mut seen = vec![false; map.len()];
        map.iter().all(|&i| i < seen.len() && !std::mem::replace(&mut seen[i], true))
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (1, 'e')];
        let d = Primary::new(|p: &(i32, char)| p.0, DefaultOrder, false);
        let map = sort_permutation(&d, &items);
        let out: Vec<char> = map.iter().map(|&i| items[i].1).collect();
        assert_eq!(out, vec!['b', 'd', 'a', 'c', 'e']);
    }

    #[test]
    fn descending_does_not_reverse_ties() {
        let items = vec![(1, 'a'), (2, 'b'), (1, 'c'), (2, 'd')];
        let d = Primary::new(|p: &(i32, char)| p.0, DefaultOrder, true);
        let map = sort_permutation(&d, &items);
        let out: Vec<char> = map.iter().map(|&i| items[i].1).collect();
        assert_eq!(out, vec!['b', 'd', 'a', 'c']);
    }

    #[test]
    fn then_level_breaks_primary_ties() {
        let items = vec![(1, 3), (0, 9), (1, 1), (0, 2)];
        let d = ThenLevel::new(
            Primary::new(|p: &(i32, i32)| p.0, DefaultOrder, false),
            |p: &(i32, i32)| p.1,
            DefaultOrder,
            true,
        );
        let map = sort_permutation(&d, &items);
        let out: Vec<(i32, i32)> = map.iter().map(|&i| items[i]).collect();
        assert_eq!(out, vec![(0, 9), (0, 2), (1, 3), (1, 1)]);
    }

    #[test]
    fn large_input_is_a_sorted_permutation() {
        let items: Vec<u32> = (0..2000u32).map(|i| i.wrapping_mul(2_654_435_761) % 97).collect();
        let d = Primary::new(|x: &u32| *x, DefaultOrder, false);
        let map = sort_permutation(&d, &items);
        assert!(is_permutation(&map));
        for w in map.windows(2) {
            let (a, b) = (w[0], w[1]);
            assert!(items[a] < items[b] || (items[a] == items[b] && a < b));
        }
    }

    #[test]
    fn empty_and_single() {
        let d = Primary::new(|x: &i32| *x, DefaultOrder, false);
        assert!(sort_permutation(&d, &[] as &[i32]).is_empty());
        assert_eq!(sort_permutation(&d, &[7]), vec![0]);
    }
}
