// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Size;
use understory_pager::{Pager, PagerConfig};

const CONTAINER: Size = Size::new(320.0, 480.0);

fn filled(len: u32) -> Pager<u32> {
    let mut pager = Pager::with_config(CONTAINER, PagerConfig::default().with_move_on_add(false));
    pager.extend(0..len);
    pager
}

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("pager/insert_front");

    // Every front insertion shifts all later slots, so this is O(n) per call.
    for len in [16_u32, 128, 1_024] {
        group.throughput(Throughput::Elements(u64::from(len)));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_batched(
                || Pager::<u32>::with_config(CONTAINER, PagerConfig::default()),
                |mut pager| {
                    for v in 0..len {
                        let _ = pager.insert(0, v);
                    }
                    black_box(pager);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_remove_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("pager/remove_front");

    for len in [16_u32, 128, 1_024] {
        group.throughput(Throughput::Elements(u64::from(len)));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_batched(
                || filled(len),
                |mut pager| {
                    while pager.remove(0).is_ok() {}
                    black_box(pager);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_did_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("pager/did_scroll");
    let mut pager = filled(256);
    let offsets: Vec<f64> = (0..4_096).map(|i| f64::from(i) * 20.0).collect();
    group.throughput(Throughput::Elements(offsets.len() as u64));

    group.bench_function("sweep", |b| {
        b.iter(|| {
            for &x in &offsets {
                black_box(pager.did_scroll(black_box(x)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_insert_front, bench_remove_front, bench_did_scroll);
criterion_main!(benches);
