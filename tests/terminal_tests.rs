//! Terminal operators: element access, counting, aggregation, numerics, conversions

mod test_data_gen;

use lazyseq::prelude::*;
use rstest::rstest;
use test_data_gen::{one_to, people, Person};

#[test]
fn test_first_on_empty() {
    assert_eq!(empty::<i32>().first(), Err(Error::EmptySequence));
    assert_eq!(empty::<i32>().first_or_default(), 0);
    assert_eq!(empty::<String>().first_or_default(), String::new());
    assert_eq!(empty::<Option<u8>>().first_or_default(), None);
}

#[test]
fn test_first_last_with_predicates() {
    let data = from_vec(vec![4, 7, 10, 13]);
    assert_eq!(data.clone().first_by(|x| x % 2 == 1), Ok(7));
    assert_eq!(data.clone().last_by(|x| x % 2 == 0), Ok(10));
    assert_eq!(data.clone().first_by(|x| *x > 100), Err(Error::NoMatch));
    assert_eq!(data.clone().last_or_default_by(|x| *x > 100), 0);
    assert_eq!(data.clone().first_or_default_by(|x| *x > 5), 7);
    assert_eq!(data.last(), Ok(13));
}

#[rstest]
#[case::array(true)]
#[case::generic(false)]
fn test_last_on_both_shapes(#[case] indexed: bool) {
    let values = vec![2, 9, 4, 9, 1];
    let (last, last_nine) = if indexed {
        (from_vec(values.clone()).last(), from_vec(values).last_by(|x| *x == 9))
    } else {
        (from_iter(values.clone()).last(), from_iter(values).last_by(|x| *x == 9))
    };
    assert_eq!(last, Ok(1));
    assert_eq!(last_nine, Ok(9));
}

#[test]
fn test_single_cardinality() {
    assert_eq!(from_vec(vec![5]).single(), Ok(5));
    assert_eq!(from_vec(vec![5, 6]).single(), Err(Error::MoreThanOne));
    assert_eq!(empty::<i32>().single(), Err(Error::EmptySequence));
    assert_eq!(empty::<i32>().single_or_default(), Ok(0));
    assert_eq!(from_vec(vec![1, 2]).single_or_default(), Err(Error::MoreThanOne));

    let data = from_vec(one_to(10));
    assert_eq!(data.clone().single_by(|x| *x == 4), Ok(4));
    assert_eq!(data.clone().single_by(|x| *x > 8), Err(Error::MoreThanOne));
    assert_eq!(data.clone().single_by(|x| *x > 80), Err(Error::NoMatch));
    assert_eq!(data.single_or_default_by(|x| *x > 80), Ok(0));
}

#[rstest]
#[case(0, Ok(10))]
#[case(2, Ok(30))]
#[case(3, Err(Error::OutOfRange { index: 3 }))]
#[case(7, Err(Error::OutOfRange { index: 7 }))]
#[case(-1, Err(Error::OutOfRange { index: -1 }))]
fn test_element_at(#[case] index: isize, #[case] expected: Result<i32>) {
    assert_eq!(from_vec(vec![10, 20, 30]).element_at(index), expected);
    assert_eq!(from_iter(vec![10, 20, 30]).element_at(index), expected);
    assert_eq!(
        from_vec(vec![10, 20, 30]).element_at_or_default(index),
        expected.unwrap_or_default()
    );
}

#[test]
fn test_counts_and_quantifiers() {
    let data = from_vec(one_to(15));
    assert_eq!(data.clone().count(), Ok(15));
    assert_eq!(data.clone().count_by(|x| x % 5 == 0), Ok(3));
    assert_eq!(data.clone().long_count(), Ok(15));
    assert_eq!(from_iter(0..1000).long_count_by(|x| x % 2 == 0), Ok(500));
    assert!(data.clone().any());
    assert!(!empty::<i32>().any());
    assert!(data.clone().any_by(|x| *x == 15));
    assert!(data.clone().all(|x| *x > 0));
    assert!(empty::<i32>().all(|_| false));
    assert!(data.clone().contains(&7));
    assert!(!data.contains(&70));
    assert!(from_iter(vec!["a", "b"]).contains(&"b"));
}

#[test]
fn test_aggregate_overloads() {
    let data = from_vec(vec![1, 2, 3, 4]);
    assert_eq!(data.clone().aggregate(|a, b| a * b), Ok(24));
    assert_eq!(empty::<i32>().aggregate(|a, b| a + b), Err(Error::EmptySequence));
    assert_eq!(data.clone().aggregate_seeded(String::new(), |s, x| s + &x.to_string()), "1234");
    let mean = data.aggregate_with((0, 0), |(s, n), x| (s + x, n + 1), |(s, n)| f64::from(s) / f64::from(n));
    assert_eq!(mean, 2.5);
}

#[test]
fn test_sequence_equal() {
    assert!(from_vec(vec![1, 2, 3]).sequence_equal(from_iter(vec![1, 2, 3])));
    assert!(!from_vec(vec![1, 2, 3]).sequence_equal(from_vec(vec![1, 2])));
    assert!(!from_vec(vec![1, 2]).sequence_equal(from_iter(vec![1, 2, 3])));
    assert!(empty::<u8>().sequence_equal(empty()));
    let ci = lazyseq::lazyseq_core::comparer::KeyEquality(|s: &&str| s.to_lowercase());
    assert!(from_vec(vec!["A", "b"]).sequence_equal_with(from_vec(vec!["a", "B"]), ci));
}

#[test]
fn test_min_max_with_comparer() {
    let oldest = from_vec(people())
        .max_with(|a: &Person, b: &Person| a.age.cmp(&b.age))
        .unwrap();
    // Ties keep the earliest element.
    assert_eq!(oldest.name, "Grace");
    let youngest = from_vec(people())
        .min_with(|a: &Person, b: &Person| a.age.cmp(&b.age))
        .unwrap();
    assert_eq!(youngest.name, "Linus");
}

#[test]
fn test_numeric_families() {
    assert_eq!(from_vec(one_to(4)).sum(), Ok(10));
    assert_eq!(from_vec(vec![i32::MAX, 1]).sum(), Err(Error::Overflow("sum")));
    assert_eq!(from_vec(vec![u64::MAX / 2, u64::MAX / 2]).sum(), Ok(u64::MAX - 1));
    assert_eq!(from_vec(vec![Some(2i64), None, Some(5)]).sum(), Ok(7));
    assert_eq!(empty::<Option<u32>>().sum(), Ok(0));

    assert_eq!(from_vec(vec![3, -8, 5]).min(), Ok(-8));
    assert_eq!(from_vec(vec![3u32, 8, 5]).max(), Ok(8));
    assert_eq!(empty::<i64>().max(), Err(Error::EmptySequence));
    assert_eq!(from_vec(vec![None, Some(4), Some(-1)]).min(), Ok(Some(-1)));
    assert_eq!(empty::<Option<i32>>().max(), Ok(None));

    assert_eq!(from_vec(vec![1, 2]).average(), Ok(1.5));
    assert_eq!(from_vec(vec![1.0f32, 2.0, 4.0]).average().map(|v| v > 2.33 && v < 2.34), Ok(true));
    assert_eq!(from_vec(vec![None::<f64>, None]).average(), Ok(None));
    assert_eq!(empty::<u64>().average(), Err(Error::EmptySequence));
}

#[test]
fn test_integer_sum_checks_every_width() {
    assert_eq!(from_vec(vec![i64::MAX, 1]).sum(), Err(Error::Overflow("sum")));
    assert_eq!(from_vec(vec![u32::MAX, 1]).sum(), Err(Error::Overflow("sum")));
    assert_eq!(from_vec(vec![u64::MAX, 1]).sum(), Err(Error::Overflow("sum")));
    assert_eq!(from_vec(vec![Some(i32::MAX), None, Some(1)]).sum(), Err(Error::Overflow("sum")));
    assert_eq!(from_vec(vec![i64::MIN, -1]).sum(), Err(Error::Overflow("sum")));
    assert_eq!(from_vec(vec![-4i64, 9, -5]).sum(), Ok(0));
    assert_eq!(from_vec(vec![u32::MAX - 1, 1]).sum(), Ok(u32::MAX));
}

#[test]
fn test_numeric_selectors() {
    let ages = || from_vec(people());
    assert_eq!(ages().sum_of(|p| p.age), Ok(254));
    assert_eq!(ages().min_of(|p| p.age), Ok(28));
    assert_eq!(ages().max_of(|p| i64::from(p.age)), Ok(45));
    let avg = ages().average_of(|p| f64::from(p.age)).unwrap();
    assert!((avg - 254.0 / 7.0).abs() < 1e-12);
}

#[test]
fn test_float_nan_policy() {
    let with_nan = vec![1.5, f64::NAN, -3.0];
    assert!(from_vec(with_nan.clone()).min().unwrap().is_nan());
    assert_eq!(from_vec(with_nan).max(), Ok(1.5));
    assert_eq!(from_vec(vec![f32::NAN, 2.0f32]).max(), Ok(2.0));
    assert!(from_vec(vec![2.0f32, f32::NAN]).min().unwrap().is_nan());
    assert_eq!(from_vec(vec![Some(f64::NAN), None, Some(0.5)]).max(), Ok(Some(0.5)));
}

#[test]
fn test_conversions() {
    let people_by_name = from_vec(people()).to_dictionary(|p| p.name).unwrap();
    assert_eq!(people_by_name["Ken"].city, "New York");

    let dup = from_vec(people()).to_dictionary(|p| p.age);
    assert_eq!(dup, Err(Error::DuplicateKey { index: 3 }));

    let cities = from_vec(people()).to_dictionary_map(|p| p.name, |p| p.city).unwrap();
    assert_eq!(cities.len(), 7);

    let array = range(1, 3).unwrap().to_array();
    assert_eq!(&*array, &[1, 2, 3]);

    let shared = from_iter(0..3).to_list();
    shared.push(3);
    assert_eq!(shared.snapshot(), vec![0, 1, 2, 3]);

    let set = from_vec(vec![1, 1, 2]).to_hash_set();
    assert_eq!(set.len(), 2);

    let custom = from_vec(vec!["a", "A", "b"])
        .to_set_with(lazyseq::lazyseq_core::comparer::KeyEquality(|s: &&str| s.to_lowercase()));
    assert_eq!(custom.into_vec(), vec!["a", "b"]);
}

#[test]
fn test_count_uses_fast_path_without_traversal() {
    assert_eq!(range(0, i32::MAX).unwrap().count(), Ok(i32::MAX as usize));
    let q = list(vec![1, 2, 3]).skip(1).concat(repeat(0, 1_000_000).unwrap());
    assert_eq!(q.fast_count(), Some(1_000_002));
}
