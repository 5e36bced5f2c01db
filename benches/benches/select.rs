// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Rect;
use understory_select::{Key, Modality, Modifiers, SelectController, SelectEvent, SelectHost};

struct Host {
    labels: Vec<String>,
}

impl Host {
    fn new(len: usize) -> Self {
        Self {
            labels: (0..len).map(|i| format!("Option {i:05}")).collect(),
        }
    }
}

impl SelectHost for Host {
    fn option_count(&self) -> usize {
        self.labels.len()
    }

    fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    fn item_rect(&self, index: usize) -> Option<Rect> {
        let y = index as f64 * 28.0;
        Some(Rect::new(0.0, y, 200.0, y + 28.0))
    }

    fn content_height(&self) -> f64 {
        self.labels.len() as f64 * 28.0
    }

    fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 800.0)
    }

    fn reference(&self) -> Option<Rect> {
        Some(Rect::new(40.0, 380.0, 240.0, 412.0))
    }

    fn modality(&self) -> Modality {
        Modality::Precise
    }
}

fn key(key: Key) -> SelectEvent {
    SelectEvent::FloatingKeyDown {
        key,
        modifiers: Modifiers::empty(),
    }
}

fn bench_keyboard_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/keyboard_session");

    // Open, walk the whole list, then commit: one turn per key.
    for len in [16usize, 128, 1_024] {
        let host = Host::new(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("turns", len), &host, |b, host| {
            b.iter_batched(
                SelectController::new,
                |mut select| {
                    let mut now = 0;
                    select.handle(host, now, SelectEvent::TriggerPointerDown);
                    for _ in 0..len {
                        now += 16;
                        black_box(select.handle(host, now, key(Key::ArrowDown)));
                    }
                    black_box(select.handle(host, now + 16, key(Key::Enter)));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_typeahead(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/typeahead");

    for len in [128usize, 1_024, 8_192] {
        let host = Host::new(len);
        let query: Vec<char> = format!("option {:05}", len - 1).chars().collect();

        group.bench_with_input(BenchmarkId::new("last_option", len), &host, |b, host| {
            b.iter_batched(
                SelectController::new,
                |mut select| {
                    for (t, &ch) in query.iter().enumerate() {
                        let event = SelectEvent::TriggerKeyDown {
                            key: Key::Character(ch),
                            modifiers: Modifiers::empty(),
                        };
                        black_box(select.handle(host, t as u64, event));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_resize_storm(c: &mut Criterion) {
    let host = Host::new(256);
    c.bench_function("select/resize_batch", |b| {
        let mut select = SelectController::new();
        select.handle(&host, 0, SelectEvent::TriggerPointerDown);
        let mut now = 0;
        b.iter(|| {
            now += 1;
            black_box(select.handle_batch(&host, now, [SelectEvent::Resize; 8]));
        });
    });
}

criterion_group!(
    benches,
    bench_keyboard_session,
    bench_typeahead,
    bench_resize_storm
);
criterion_main!(benches);
