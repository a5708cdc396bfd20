//! Pluggable equality and ordering collaborators.
//!
//! Operators never call `==`, `Hash` or `Ord` directly; they go through an
//! [`EqualityComparer`] or a [`Comparer`] supplied by the caller (or the
//! defaults below). Comparers are cloned into every lazy stage that needs them,
//! so they should be cheap to clone.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Equality + hashing used by hash sets, lookups, joins and set operators.
pub trait EqualityComparer<T: ?Sized>: Clone {
    fn equals(&self, a: &T, b: &T) -> bool;

    /// Hash of `value`. Containers mask the result to 31 bits.
    fn hash(&self, value: &T) -> u32;

    /// Null keys hash to 0 and are skipped when building a join lookup.
    fn is_null(&self, _value: &T) -> bool {
        false
    }
}

/// Uses the type's own `Eq` and `Hash`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultEquality;

impl<T: Hash + Eq + ?Sized> EqualityComparer<T> for DefaultEquality {
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }

    fn hash(&self, value: &T) -> u32 {
        hash_u32(value)
    }
}

/// Lifts a comparer over `Option<T>`; `None` is the null key.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionEquality<C>(pub C);

impl<T, C: EqualityComparer<T>> EqualityComparer<Option<T>> for OptionEquality<C> {
    fn equals(&self, a: &Option<T>, b: &Option<T>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(x), Some(y)) => self.0.equals(x, y),
            _ => false,
        }
    }

    fn hash(&self, value: &Option<T>) -> u32 {
        match value {
            Some(v) => self.0.hash(v),
            None => 0,
        }
    }

    fn is_null(&self, value: &Option<T>) -> bool {
        value.is_none()
    }
}

/// Compares values by a projected key (e.g. case-folded strings).
#[derive(Debug, Clone, Copy)]
pub struct KeyEquality<F>(pub F);

impl<T: ?Sized, K, F> EqualityComparer<T> for KeyEquality<F>
where
    F: Fn(&T) -> K + Clone,
    K: Hash + Eq,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.0)(a) == (self.0)(b)
    }

    fn hash(&self, value: &T) -> u32 {
        hash_u32(&(self.0)(value))
    }
}

/// Total order used by sorting and `min_with`/`max_with`.
pub trait Comparer<T: ?Sized>: Clone {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Uses the type's own `Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultOrder;

impl<T: Ord + ?Sized> Comparer<T> for DefaultOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Orders `PartialOrd` values (floats). Values that are not equal to
/// themselves (NaN) sort below everything else and equal to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialOrder;

impl<T: PartialOrd + ?Sized> Comparer<T> for PartialOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        match a.partial_cmp(b) {
            Some(ord) => ord,
            None => {
                #[allow(clippy::eq_op)]
                let (a_unordered, b_unordered) = (a != a, b != b);
                match (a_unordered, b_unordered) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    (false, false) => Ordering::Equal,
                }
            }
        }
    }
}

impl<T: ?Sized, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> Ordering + Clone,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Fold a std hash down to 32 bits.
pub fn hash_u32<T: Hash + ?Sized>(value: &T) -> u32 {
    let mut h = DefaultHasher::new();
    value.hash(&mut h);
    let full = h.finish();
    (full ^ (full >> 32)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_sorts_lowest() {
        let cmp = PartialOrder;
        assert_eq!(cmp.compare(&f64::NAN, &f64::NEG_INFINITY), Ordering::Less);
        assert_eq!(cmp.compare(&1.0, &f64::NAN), Ordering::Greater);
        assert_eq!(cmp.compare(&f64::NAN, &f64::NAN), Ordering::Equal);
    }

    #[test]
    fn option_equality_treats_none_as_null() {
        let eq = OptionEquality(DefaultEquality);
        assert!(eq.is_null(&None::<i32>));
        assert_eq!(eq.hash(&None::<i32>), 0);
        assert!(eq.equals(&Some(3), &Some(3)));
        assert!(!eq.equals(&Some(3), &None));
    }

    #[test]
    fn key_equality_projects() {
        let eq = KeyEquality(|s: &str| s.to_ascii_lowercase());
        assert!(eq.equals("Apple", "aPPLE"));
        assert_eq!(eq.hash("Apple"), eq.hash("APPLE"));
    }
}
