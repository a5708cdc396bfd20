use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazyseq::prelude::*;

fn make_rows(rows: usize) -> Vec<(u32, String, i64)> {
    (0..rows)
        .map(|i| {
            let id = (i as u32).wrapping_mul(2_654_435_761) % 10_000;
            (id, format!("group-{}", i % 16), (i % 97) as i64)
        })
        .collect()
}

fn bench_filter_map(c: &mut Criterion) {
    let data = from_vec((0..100_000i64).collect::<Vec<_>>());
    c.bench_function("filter_map_fused", |b| {
        b.iter(|| {
            let total = data
                .clone()
                .filter(|x| x % 3 == 0)
                .map(|x| x * 2)
                .filter(|x| x % 5 != 0)
                .sum()
                .unwrap();
            black_box(total)
        })
    });
    let plain: Vec<i64> = (0..100_000).collect();
    c.bench_function("filter_map_iterator", |b| {
        b.iter(|| {
            let total: i64 = plain
                .iter()
                .filter(|x| *x % 3 == 0)
                .map(|x| x * 2)
                .filter(|x| x % 5 != 0)
                .sum();
            black_box(total)
        })
    });
}

fn bench_order_by(c: &mut Criterion) {
    let rows = from_vec(make_rows(10_000));
    c.bench_function("order_by_then_by", |b| {
        b.iter(|| {
            let sorted = rows
                .clone()
                .order_by(|r| r.1.clone())
                .then_by_descending(|r| r.2)
                .to_vec();
            black_box(sorted.len())
        })
    });
}

fn bench_group_by(c: &mut Criterion) {
    let rows = from_vec(make_rows(10_000));
    c.bench_function("group_by_sum", |b| {
        b.iter(|| {
            let totals = rows
                .clone()
                .group_by_result(|r| r.1.clone(), |_, group| group.map(|r| r.2).sum().unwrap())
                .to_vec();
            black_box(totals.len())
        })
    });
}

fn bench_join(c: &mut Criterion) {
    let outer = from_vec(make_rows(5_000));
    let inner = from_vec((0..10_000u32).map(|id| (id, id % 7)).collect::<Vec<_>>());
    c.bench_function("join_by_id", |b| {
        b.iter(|| {
            let matched = outer
                .clone()
                .join(inner.clone(), |o| o.0, |i| i.0, |o, i| (o.2, i.1))
                .count()
                .unwrap();
            black_box(matched)
        })
    });
}

fn bench_distinct(c: &mut Criterion) {
    let ids = from_vec(make_rows(20_000).into_iter().map(|r| r.0).collect::<Vec<_>>());
    c.bench_function("distinct_ids", |b| {
        b.iter(|| black_box(ids.clone().distinct().count().unwrap()))
    });
}

criterion_group!(
    queries,
    bench_filter_map,
    bench_order_by,
    bench_group_by,
    bench_join,
    bench_distinct
);
criterion_main!(queries);
