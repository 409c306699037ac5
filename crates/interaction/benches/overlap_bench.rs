//! Criterion benchmarks for the per-frame overlap evaluation pass.
//!
//! Benchmarks:
//!   - spheres_overlap, the pure pair test
//!   - full frame at 8 / 64 / 256 candidates, half within overlap range
//!
//! Run with: cargo bench -p interaction --features bench

use bevy::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use interaction::overlap::spheres_overlap;
use interaction::test_harness::TestStage;

fn bench_pair_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap_pair_test");
    group.sample_size(1000);

    group.bench_function("spheres_overlap", |b| {
        b.iter(|| {
            black_box(spheres_overlap(
                black_box(Vec3::new(1.0, 2.0, 3.0)),
                black_box(1.5),
                black_box(Vec3::new(3.0, 1.0, -2.0)),
                black_box(2.0),
            ))
        });
    });

    group.finish();
}

fn stage_with_candidates(count: usize) -> TestStage {
    let mut stage = TestStage::new();
    stage.spawn_probe(Vec3::ZERO, 1.0);
    // Half the ring sits inside overlap range, half outside, so the frame
    // exercises both membership outcomes.
    for i in 0..count {
        let angle = i as f32 / count as f32 * std::f32::consts::TAU;
        let distance = if i % 2 == 0 { 1.2 } else { 10.0 };
        let pos = Vec3::new(angle.cos(), 0.0, angle.sin()) * distance;
        stage.spawn_instrument(pos, 0.5);
    }
    stage.settle();
    stage
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap_frame");

    for count in [8_usize, 64, 256] {
        let mut stage = stage_with_candidates(count);
        group.bench_function(format!("candidates_{count}"), |b| {
            b.iter(|| {
                stage.tick(1);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pair_test, bench_frame);
criterion_main!(benches);
