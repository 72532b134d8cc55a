// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_gesture::{GestureFlags, GestureKind, GestureRegistry};
use understory_pager::{Pager, PagerConfig};

fn bench_registry_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("gestures/registry_apply");

    for views in [64_u32, 512] {
        group.bench_with_input(BenchmarkId::from_parameter(views), &views, |b, &views| {
            b.iter(|| {
                let mut reg = GestureRegistry::<u32>::new();
                for v in 0..views {
                    reg.apply(v, GestureFlags::all());
                }
                black_box(reg);
            });
        });
    }

    group.finish();
}

fn bench_toggle_double_tap(c: &mut Criterion) {
    let mut group = c.benchmark_group("gestures/toggle_double_tap");

    // Disabling double tap rebuilds every view's single tap recognizer.
    for views in [64_u32, 512] {
        let mut pager = Pager::with_config(
            Size::new(100.0, 100.0),
            PagerConfig::default().with_move_on_add(false),
        );
        pager.extend(0..views);
        pager.set_tap_enabled(true);

        group.bench_function(BenchmarkId::from_parameter(views), |b| {
            b.iter(|| {
                pager.set_gesture(GestureKind::DoubleTap, true);
                pager.set_gesture(GestureKind::DoubleTap, false);
                black_box(pager.recognizers(0).len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_registry_apply, bench_toggle_double_tap);
criterion_main!(benches);
