//! Sequence constructors: `range`, `repeat`, `empty`.

use std::marker::PhantomData;

use lazyseq_core::{sequence_into_iter, Error, Result, Sequence};

/// `count` consecutive integers starting at `start`.
#[derive(Debug, Clone, Copy)]
pub struct Range {
    start: i32,
    count: usize,
}

/// Fails if `count` is negative or the last value would overflow `i32`.
pub fn range(start: i32, count: i32) -> Result<Range> {
    if count < 0 {
        return Err(Error::invalid_argument("count", format!("{count} is negative")));
    }
    if i64::from(start) + i64::from(count) - 1 > i64::from(i32::MAX) {
        return Err(Error::invalid_argument(
            "count",
            format!("range starting at {start} with {count} elements overflows i32"),
        ));
    }
    Ok(Range {
        start,
        count: count as usize,
    })
}

pub struct RangeCursor {
    next: i64,
    end: i64,
}

impl Iterator for RangeCursor {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.next >= self.end {
            return None;
        }
        let value = self.next as i32;
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.end - self.next).max(0) as usize;
        (left, Some(left))
    }
}

impl Sequence for Range {
    type Item = i32;
    type Cursor = RangeCursor;

    fn cursor(&self) -> RangeCursor {
        let start = i64::from(self.start);
        RangeCursor {
            next: start,
            end: start + self.count as i64,
        }
    }

    fn fast_count(&self) -> Option<usize> {
        Some(self.count)
    }

    fn fast_contains(&self, value: &i32) -> Option<bool> {
        let offset = i64::from(*value) - i64::from(self.start);
        Some(offset >= 0 && offset < self.count as i64)
    }
}

sequence_into_iter!(impl[] Range);

/// One value repeated `count` times.
#[derive(Debug, Clone)]
pub struct Repeat<T> {
    value: T,
    count: usize,
}

/// Fails if `count` is negative.
pub fn repeat<T: Clone>(value: T, count: i32) -> Result<Repeat<T>> {
    if count < 0 {
        return Err(Error::invalid_argument("count", format!("{count} is negative")));
    }
    Ok(Repeat {
        value,
        count: count as usize,
    })
}

impl<T: Clone> Sequence for Repeat<T> {
    type Item = T;
    type Cursor = std::iter::Take<std::iter::Repeat<T>>;

    fn cursor(&self) -> Self::Cursor {
        std::iter::repeat(self.value.clone()).take(self.count)
    }

    fn fast_count(&self) -> Option<usize> {
        Some(self.count)
    }
}

sequence_into_iter!(impl[T: Clone] Repeat<T>);

/// A sequence with no elements.
pub struct Empty<T> {
    _marker: PhantomData<fn() -> T>,
}

pub fn empty<T>() -> Empty<T> {
    Empty {
        _marker: PhantomData,
    }
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        empty()
    }
}

impl<T> Copy for Empty<T> {}

impl<T> std::fmt::Debug for Empty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Empty")
    }
}

impl<T> Sequence for Empty<T> {
    type Item = T;
    type Cursor = std::iter::Empty<T>;

    fn cursor(&self) -> std::iter::Empty<T> {
        std::iter::empty()
    }

    fn fast_count(&self) -> Option<usize> {
        Some(0)
    }

    fn fast_contains(&self, _value: &T) -> Option<bool> {
        Some(false)
    }
}

sequence_into_iter!(impl[T] Empty<T>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_rejects_negative_and_overflowing_counts() {
        assert!(matches!(range(0, -1), Err(Error::InvalidArgument { .. })));
        assert!(range(i32::MAX, 1).is_ok());
        assert!(matches!(range(i32::MAX, 2), Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn range_yields_consecutive_values() {
        let r = range(-2, 5).unwrap();
        assert_eq!(r.cursor().collect::<Vec<_>>(), vec![-2, -1, 0, 1, 2]);
        assert_eq!(r.fast_contains(&2), Some(true));
        assert_eq!(r.fast_contains(&3), Some(false));
    }

    #[test]
    fn repeat_and_empty() {
        assert_eq!(repeat("x", 3).unwrap().cursor().count(), 3);
        assert!(repeat(1, -1).is_err());
        assert_eq!(empty::<u8>().cursor().next(), None);
    }
}
