//! Benchmarks for stretching the raster onto display bounds.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sparkle_field::{Sampling, SparkleEngine};

use crate::BOUNDS;

pub fn bench_upsample(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/upsample");

    for &(width, height) in BOUNDS {
        let label = format!("{width}x{height}");
        let mut engine = SparkleEngine::new(3);
        engine.set_bounds(width, height);
        let _ = engine.modify(0.5);
        let mut out = Vec::new();

        for (name, sampling) in [("nearest", Sampling::Nearest), ("smooth", Sampling::Smooth)] {
            group.bench_with_input(BenchmarkId::new(name, &label), &label, |b, _| {
                b.iter(|| {
                    engine.raster().upsample_into(
                        width as usize,
                        height as usize,
                        black_box(sampling),
                        &mut out,
                    );
                    black_box(out.len())
                })
            });
        }
    }

    group.finish();
}
