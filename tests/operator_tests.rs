//! One-pass operators: partitioning, concat/zip, flattening, generation

mod test_data_gen;

use lazyseq::prelude::*;
use rstest::rstest;
use test_data_gen::{lcg_ints, one_to, people};

#[rstest]
#[case(-1, vec![])]
#[case(0, vec![])]
#[case(3, vec![1, 2, 3])]
#[case(10, vec![1, 2, 3, 4, 5])]
fn test_take(#[case] n: isize, #[case] expected: Vec<i32>) {
    assert_eq!(from_vec(one_to(5)).take(n).to_vec(), expected);
}

#[rstest]
#[case(-4, vec![1, 2, 3, 4, 5])]
#[case(0, vec![1, 2, 3, 4, 5])]
#[case(2, vec![3, 4, 5])]
#[case(9, vec![])]
fn test_skip(#[case] n: isize, #[case] expected: Vec<i32>) {
    assert_eq!(from_vec(one_to(5)).skip(n).to_vec(), expected);
}

#[test]
fn test_take_stops_without_draining_upstream() {
    // An endless generic source: take must stop after its count.
    let endless = from_iter(0..);
    assert_eq!(endless.take(4).to_vec(), vec![0, 1, 2, 3]);
    assert_eq!(from_iter(0u64..).skip(5).first().unwrap(), 5);
}

#[test]
fn test_take_while_and_skip_while() {
    let data = vec![1, 3, 5, 6, 7, 9];
    assert_eq!(from_vec(data.clone()).take_while(|x| x % 2 == 1).to_vec(), vec![1, 3, 5]);
    assert_eq!(from_vec(data.clone()).skip_while(|x| x % 2 == 1).to_vec(), vec![6, 7, 9]);
    assert_eq!(
        from_vec(data.clone()).take_while_indexed(|_, i| i < 2).to_vec(),
        vec![1, 3]
    );
    assert_eq!(
        from_vec(data).skip_while_indexed(|x, i| *x < 6 && i < 10).to_vec(),
        vec![6, 7, 9]
    );
}

#[test]
fn test_concat_and_zip() {
    let joined = from_vec(vec![1, 2]).concat(range(10, 2).unwrap()).to_vec();
    assert_eq!(joined, vec![1, 2, 10, 11]);

    let pairs = from_vec(vec!["a", "b", "c"])
        .zip(range(1, 10).unwrap(), |s, n| format!("{s}{n}"))
        .to_vec();
    assert_eq!(pairs, vec!["a1", "b2", "c3"]);
}

#[test]
fn test_concat_count_is_known_up_front() {
    let q = from_vec(vec![1, 2, 3]).concat(list(vec![4, 5]));
    assert_eq!(q.fast_count(), Some(5));
    assert_eq!(q.count().unwrap(), 5);
}

#[test]
fn test_flat_map_variants() {
    let words = from_vec(vec!["ab", "", "cde"]);
    let letters = words.clone().flat_map(|w| w.chars().collect::<Vec<_>>()).to_vec();
    assert_eq!(letters, vec!['a', 'b', 'c', 'd', 'e']);

    let tagged = words
        .clone()
        .flat_map_with(|w| w.chars().collect::<Vec<_>>(), |w, c| format!("{w}:{c}"))
        .to_vec();
    assert_eq!(tagged, vec!["ab:a", "ab:b", "cde:c", "cde:d", "cde:e"]);

    let repeated = words.flat_map_indexed(|w, i| vec![w.len(); i]).to_vec();
    assert_eq!(repeated, vec![0, 3, 3]);

    let positions = from_vec(vec![2, 1])
        .flat_map_indexed_with(|n, i| vec![i; *n as usize], |n, i| (*n, i))
        .to_vec();
    assert_eq!(positions, vec![(2, 0), (2, 0), (1, 1)]);
}

#[test]
fn test_reverse_round_trips() {
    let data = lcg_ints(11, 100, 1000);
    let back = from_vec(data.clone()).reverse().to_vec();
    let mut expected = data.clone();
    expected.reverse();
    assert_eq!(back, expected);
    assert_eq!(from_vec(data.clone()).reverse().reverse().to_vec(), data);
    assert!(from_iter(Vec::<i32>::new()).reverse().to_vec().is_empty());
}

#[test]
fn test_default_if_empty() {
    assert_eq!(empty::<i32>().default_if_empty().to_vec(), vec![0]);
    assert_eq!(empty::<&str>().default_if_empty_or("none").to_vec(), vec!["none"]);
    assert_eq!(from_vec(vec![4, 5]).default_if_empty().to_vec(), vec![4, 5]);
}

#[test]
fn test_generators() {
    assert_eq!(range(3, 4).unwrap().to_vec(), vec![3, 4, 5, 6]);
    assert_eq!(repeat('z', 3).unwrap().to_vec(), vec!['z', 'z', 'z']);
    assert!(range(0, 0).unwrap().to_vec().is_empty());
    assert!(matches!(range(1, -1), Err(Error::InvalidArgument { .. })));
    assert!(matches!(repeat(1, -5), Err(Error::InvalidArgument { .. })));
    assert!(matches!(range(i32::MAX - 1, 3), Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_long_pipeline_over_people() {
    let summary = from_vec(people())
        .filter(|p| p.age < 40)
        .order_by(|p| p.name)
        .skip(1)
        .take(3)
        .map(|p| p.name)
        .to_vec();
    // Under 40 by name: Ada, Edsger, Ken, Linus, Margaret
    assert_eq!(summary, vec!["Edsger", "Ken", "Linus"]);
}
