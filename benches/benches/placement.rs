// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_placement::{
    AnchoredInput, AnchoredOptions, FallbackBehavior, FallbackInput, FallbackOptions,
    place_anchored, place_fallback,
};

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1280.0, 800.0);

fn bench_anchored(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/anchored");

    // Sweep the trigger down the viewport so both accepted and rejected
    // placements are measured.
    for index in [0usize, 16, 64, 255] {
        let inputs: Vec<AnchoredInput> = (0..64)
            .map(|step| {
                let y = f64::from(step) * 12.0;
                AnchoredInput {
                    reference: Rect::new(40.0, y, 240.0, y + 32.0),
                    viewport: VIEWPORT,
                    item: Rect::new(0.0, index as f64 * 28.0, 200.0, index as f64 * 28.0 + 28.0),
                    item_count: 256,
                    content_height: 256.0 * 28.0,
                    client_top: 1.0,
                    offset: 0.0,
                }
            })
            .collect();
        let options = AnchoredOptions::default();

        group.bench_with_input(BenchmarkId::new("sweep", index), &inputs, |b, inputs| {
            b.iter(|| {
                for input in inputs {
                    black_box(place_anchored(black_box(input), &options));
                }
            });
        });
    }

    group.finish();
}

fn bench_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/fallback");

    for behavior in [FallbackBehavior::Flip, FallbackBehavior::Shift] {
        let inputs: Vec<FallbackInput> = (0..64)
            .map(|step| {
                let y = f64::from(step) * 12.0;
                FallbackInput {
                    reference: Rect::new(40.0, y, 240.0, y + 32.0),
                    viewport: VIEWPORT,
                    content_height: 420.0,
                    width: 200.0,
                }
            })
            .collect();
        let options = FallbackOptions {
            behavior,
            ..FallbackOptions::default()
        };

        group.bench_with_input(
            BenchmarkId::new("sweep", format!("{behavior:?}")),
            &inputs,
            |b, inputs| {
                b.iter(|| {
                    for input in inputs {
                        black_box(place_fallback(black_box(input), &options));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_anchored, bench_fallback);
criterion_main!(benches);
