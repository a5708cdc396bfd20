//! Numeric sum / min / max / average for the fixed element families.
//!
//! Integer sums are checked and fail with [`Error::Overflow`]. Nullable
//! (`Option`) families skip `None`, sum to a plain total, and report "no
//! values" as `Ok(None)` from min/max/average instead of an error.
//!
//! Float extrema follow one NaN rule for both widths: `min` returns NaN as
//! soon as it sees one, `max` lets any number replace a NaN.

use lazyseq_core::{Error, Result};

pub trait Summable: Sized {
    type Total;

    fn sum_all<I: Iterator<Item = Self>>(iter: I) -> Result<Self::Total>;
}

pub trait Extremum: Sized {
    fn min_all<I: Iterator<Item = Self>>(iter: I) -> Result<Self>;
    fn max_all<I: Iterator<Item = Self>>(iter: I) -> Result<Self>;
}

pub trait Averageable: Sized {
    type Average;

    fn average_all<I: Iterator<Item = Self>>(iter: I) -> Result<Self::Average>;
}

macro_rules! integer_numeric {
    ($($t:ty => $wide:ty),* $(,)?) => {$(
        impl Summable for $t {
            type Total = $t;

            fn sum_all<I: Iterator<Item = $t>>(mut iter: I) -> Result<$t> {
                iter.try_fold(0 as $t, |acc, x| acc.checked_add(x).ok_or(Error::Overflow("sum")))
            }
        }

        impl Summable for Option<$t> {
            type Total = $t;

            fn sum_all<I: Iterator<Item = Option<$t>>>(iter: I) -> Result<$t> {
                <$t>::sum_all(iter.flatten())
            }
        }

        impl Extremum for $t {
            fn min_all<I: Iterator<Item = $t>>(iter: I) -> Result<$t> {
                iter.min().ok_or(Error::EmptySequence)
            }

            fn max_all<I: Iterator<Item = $t>>(iter: I) -> Result<$t> {
                iter.max().ok_or(Error::EmptySequence)
            }
        }

        impl Extremum for Option<$t> {
            fn min_all<I: Iterator<Item = Option<$t>>>(iter: I) -> Result<Option<$t>> {
                Ok(iter.flatten().min())
            }

            fn max_all<I: Iterator<Item = Option<$t>>>(iter: I) -> Result<Option<$t>> {
                Ok(iter.flatten().max())
            }
        }

        impl Averageable for $t {
            type Average = f64;

            fn average_all<I: Iterator<Item = $t>>(iter: I) -> Result<f64> {
                <Option<$t>>::average_all(iter.map(Some))?.ok_or(Error::EmptySequence)
            }
        }

        impl Averageable for Option<$t> {
            type Average = Option<f64>;

            fn average_all<I: Iterator<Item = Option<$t>>>(iter: I) -> Result<Option<f64>> {
                let mut sum: $wide = 0;
                let mut count: u64 = 0;
                for x in iter.flatten() {
                    sum = sum
                        .checked_add(<$wide>::from(x))
                        .ok_or(Error::Overflow("average"))?;
                    count += 1;
                }
                if count == 0 {
                    return Ok(None);
                }
                Ok(Some(sum as f64 / count as f64))
            }
        }
    )*};
}

integer_numeric!(i32 => i64, i64 => i64, u32 => u64, u64 => u128);

fn float_min<I: Iterator<Item = f64>>(mut iter: I) -> Option<f64> {
    let mut value = iter.next()?;
    if value.is_nan() {
        return Some(value);
    }
    for x in iter {
        if x.is_nan() {
            return Some(x);
        }
        if x < value {
            value = x;
        }
    }
    Some(value)
}

fn float_max<I: Iterator<Item = f64>>(iter: I) -> Option<f64> {
    let mut best: Option<f64> = None;
    for x in iter {
        best = match best {
            Some(v) if !(x > v || v.is_nan()) => Some(v),
            _ => Some(x),
        };
    }
    best
}

fn float_average<I: Iterator<Item = f64>>(iter: I) -> Option<f64> {
    let mut sum = 0.0;
    let mut count: u64 = 0;
    for x in iter {
        sum += x;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

// f32 goes through f64 accumulators and is narrowed once at the end.
macro_rules! float_numeric {
    ($($t:ty),* $(,)?) => {$(
        impl Summable for $t {
            type Total = $t;

            fn sum_all<I: Iterator<Item = $t>>(iter: I) -> Result<$t> {
                Ok(iter.map(f64::from).sum::<f64>() as $t)
            }
        }

        impl Summable for Option<$t> {
            type Total = $t;

            fn sum_all<I: Iterator<Item = Option<$t>>>(iter: I) -> Result<$t> {
                <$t>::sum_all(iter.flatten())
            }
        }

        impl Extremum for $t {
            fn min_all<I: Iterator<Item = $t>>(iter: I) -> Result<$t> {
                float_min(iter.map(f64::from))
                    .map(|v| v as $t)
                    .ok_or(Error::EmptySequence)
            }

            fn max_all<I: Iterator<Item = $t>>(iter: I) -> Result<$t> {
                float_max(iter.map(f64::from))
                    .map(|v| v as $t)
                    .ok_or(Error::EmptySequence)
            }
        }

        impl Extremum for Option<$t> {
            fn min_all<I: Iterator<Item = Option<$t>>>(iter: I) -> Result<Option<$t>> {
                Ok(float_min(iter.flatten().map(f64::from)).map(|v| v as $t))
            }

            fn max_all<I: Iterator<Item = Option<$t>>>(iter: I) -> Result<Option<$t>> {
                Ok(float_max(iter.flatten().map(f64::from)).map(|v| v as $t))
            }
        }

        impl Averageable for $t {
            type Average = $t;

            fn average_all<I: Iterator<Item = $t>>(iter: I) -> Result<$t> {
                float_average(iter.map(f64::from))
                    .map(|v| v as $t)
                    .ok_or(Error::EmptySequence)
            }
        }

        impl Averageable for Option<$t> {
            type Average = Option<$t>;

            fn average_all<I: Iterator<Item = Option<$t>>>(iter: I) -> Result<Option<$t>> {
                Ok(float_average(iter.flatten().map(f64::from)).map(|v| v as $t))
            }
        }
    )*};
}

float_numeric!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_sum_overflow_is_reported() {
        let err = i32::sum_all([i32::MAX, 1].into_iter()).unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));
        assert_eq!(u64::sum_all([1u64, 2, 3].into_iter()).unwrap(), 6);
    }

    #[test]
    fn nullable_skips_none() {
        let values = [Some(3), None, Some(1)];
        assert_eq!(<Option<i32>>::sum_all(values.into_iter()).unwrap(), 4);
        assert_eq!(<Option<i32>>::min_all(values.into_iter()).unwrap(), Some(1));
        assert_eq!(<Option<i32>>::average_all(values.into_iter()).unwrap(), Some(2.0));
        assert_eq!(<Option<i32>>::max_all([None, None].into_iter()).unwrap(), None);
    }

    #[test]
    fn empty_non_nullable_fails() {
        assert!(matches!(i64::min_all(std::iter::empty()), Err(Error::EmptySequence)));
        assert!(matches!(f64::average_all(std::iter::empty()), Err(Error::EmptySequence)));
        assert_eq!(f64::sum_all(std::iter::empty()).unwrap(), 0.0);
    }

    #[test]
    fn nan_rules() {
        assert!(f64::min_all([1.0, f64::NAN, 0.5].into_iter()).unwrap().is_nan());
        assert_eq!(f64::max_all([f64::NAN, 1.0, 0.5].into_iter()).unwrap(), 1.0);
        assert!(f32::max_all([f32::NAN].into_iter()).unwrap().is_nan());
        assert!(f32::min_all([2.0f32, f32::NAN].into_iter()).unwrap().is_nan());
    }

    #[test]
    fn integer_average_uses_wide_sum() {
        let avg = i32::average_all([i32::MAX, i32::MAX].into_iter()).unwrap();
        assert_eq!(avg, f64::from(i32::MAX));
    }
}
