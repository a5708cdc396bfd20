//! Configuration loading and the containers sized from it

mod test_data_gen;

use lazyseq::lazyseq_mem::{LargeArrayBuilder, LookupBuilder, Set};
use lazyseq::prelude::*;
use rstest::rstest;
use test_data_gen::lcg_ints;

fn small_config() -> QueryConfig {
    QueryConfig {
        buffer_starting_capacity: 2,
        buffer_resize_limit: 4,
        hash_initial_buckets: 3,
        ..QueryConfig::default()
    }
}

#[test]
fn test_config_from_json() {
    let cfg = QueryConfig::from_json(
        r#"{ "buffer_starting_capacity": 8, "buffer_resize_limit": 64 }"#,
    )
    .expect("valid config");
    assert_eq!(cfg.buffer_starting_capacity, 8);
    assert_eq!(cfg.buffer_resize_limit, 64);
    assert_eq!(cfg.hash_initial_buckets, 7);

    let round_trip: QueryConfig =
        serde_json::from_str(&serde_json::to_string(&cfg).unwrap()).unwrap();
    assert_eq!(round_trip, cfg);
}

#[rstest]
#[case(r#"{ "buffer_starting_capacity": 0 }"#)]
#[case(r#"{ "hash_initial_buckets": 0 }"#)]
#[case(r#"{ "group_initial_capacity": 0 }"#)]
#[case(r#"{ "buffer_starting_capacity": 16, "buffer_resize_limit": 8 }"#)]
#[case(r#"{ "buffer_starting_capacity": "four" }"#)]
#[case("not json")]
fn test_config_rejects(#[case] json: &str) {
    assert!(matches!(QueryConfig::from_json(json), Err(Error::Config(_))));
}

#[test]
fn test_global_config_installs_once() {
    // Whether or not something already read the global, a second install
    // must fail and the global must stay valid.
    let _ = QueryConfig::install_global(small_config());
    assert!(matches!(
        QueryConfig::install_global(small_config()),
        Err(Error::Config(_))
    ));
    QueryConfig::global().validate().expect("global config is valid");
}

#[test]
fn test_large_builder_spills_into_chunks() {
    let mut builder = LargeArrayBuilder::with_config(&small_config());
    let data = lcg_ints(1, 100, 1_000);
    builder.add_range(data.iter().copied());
    assert_eq!(builder.len(), 100);
    assert!(builder.chunk_count() > 0);
    assert_eq!(builder.into_vec(), data);
}

#[test]
fn test_set_grows_past_initial_buckets() {
    let mut set = Set::with_config(DefaultEquality, &small_config());
    for i in 0..50 {
        assert!(set.add(i));
    }
    assert!(!set.add(7));
    assert_eq!(set.len(), 50);
    assert!(set.bucket_count() > 3);
    assert!(set.remove(&7));
    assert!(!set.contains(&7));
}

#[test]
fn test_lookup_builder_with_small_config() {
    let mut builder = LookupBuilder::with_config(DefaultEquality, &small_config());
    for (i, word) in ["x", "y", "z", "w", "x", "v", "y"].into_iter().enumerate() {
        builder.add(word, i);
    }
    assert_eq!(builder.len(), 5);
    let lookup = builder.freeze();
    assert_eq!(lookup.get(&"x").as_slice(), &[0, 4]);
    let keys: Vec<&str> = lookup.groups().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["x", "y", "z", "w", "v"]);
}

#[test]
fn test_to_vec_over_unsized_source_matches_input() {
    let data = lcg_ints(8, 5_000, 100);
    let generic = from_iter(data.clone()).filter(|_| true).to_vec();
    assert_eq!(generic, data);
}
