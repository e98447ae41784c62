// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Insets, Rect, Size};
use understory_reveal::{Reveal, RevealHost, RevealOptions, in_viewport};
use understory_timing::Settle;

const VIEWPORT: Size = Size::new(1_280.0, 720.0);

/// A long column of 120px rows, 40px apart.
struct Feed {
    scroll: f64,
    marked: Vec<bool>,
}

impl Feed {
    fn new(len: usize) -> Self {
        Self {
            scroll: 0.0,
            marked: vec![false; len],
        }
    }
}

impl RevealHost for Feed {
    type Element = u32;

    fn query(&self, _selector: &str) -> Vec<u32> {
        (0..self.marked.len() as u32)
            .filter(|&i| !self.marked[i as usize])
            .collect()
    }

    fn bounding_box(&self, el: &u32) -> Option<Rect> {
        let top = f64::from(*el) * 160.0 - self.scroll;
        Some(Rect::new(40.0, top, 1_240.0, top + 120.0))
    }

    fn viewport(&self) -> Size {
        VIEWPORT
    }

    fn has_marker(&self, el: &u32, _marker: &str) -> bool {
        self.marked[*el as usize]
    }

    fn add_marker(&mut self, el: &u32, _marker: &str) -> bool {
        self.marked[*el as usize] = true;
        true
    }
}

fn bench_in_viewport(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal/in_viewport");

    let rects: Vec<Rect> = (0..1_024)
        .map(|i| {
            let top = f64::from(i) * 7.0 - 2_000.0;
            Rect::new(0.0, top, 300.0, top + 90.0)
        })
        .collect();
    group.throughput(Throughput::Elements(rects.len() as u64));

    for threshold in [0.0, 0.5, 1.0] {
        group.bench_with_input(
            BenchmarkId::from_parameter(threshold),
            &rects,
            |b, rects| {
                b.iter(|| {
                    rects
                        .iter()
                        .filter(|r| in_viewport(**r, VIEWPORT, Insets::uniform(16.0), threshold))
                        .count()
                });
            },
        );
    }

    group.finish();
}

fn bench_settled_scroll_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal/session");

    // Scroll a full feed from top to bottom, one settled pass per screen.
    for len in [64_usize, 512, 4_096] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("scroll_through", len), &len, |b, &len| {
            b.iter_batched(
                || Reveal::new(Feed::new(len), ".row", RevealOptions::default()).unwrap(),
                |mut reveal| {
                    let mut now = 0;
                    while let Some(deadline) = {
                        reveal.host_mut().scroll += VIEWPORT.height;
                        reveal.on_scroll(now);
                        reveal.next_deadline()
                    } {
                        now = deadline;
                        black_box(reveal.poll(now));
                    }
                    black_box(reveal.marked_count());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_settle_burst(c: &mut Criterion) {
    c.bench_function("timing/settle_burst_1k", |b| {
        b.iter(|| {
            let mut settle = Settle::default();
            for now in 0..1_000_u64 {
                settle.signal(black_box(now * 16));
            }
            black_box(settle.poll(u64::MAX))
        });
    });
}

criterion_group!(
    benches,
    bench_in_viewport,
    bench_settled_scroll_session,
    bench_settle_burst
);
criterion_main!(benches);
