//! Benchmarks for whole-frame modulation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput};
use sparkle_field::{Argb, SparkleEngine, Waveform};

use crate::BOUNDS;

pub fn bench_modify(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/modify");

    for &(width, height) in BOUNDS {
        let label = format!("{width}x{height}");

        for waveform in Waveform::ALL {
            let mut engine = SparkleEngine::new(1);
            engine.set_base_color(Argb::from_rgb(0x3366CC));
            engine.set_waveform(waveform);
            engine.set_bounds(width, height);
            group.throughput(Throughput::Elements(engine.field().len() as u64));

            let mut drive = 0.0f32;
            group.bench_with_input(BenchmarkId::new(waveform.name(), &label), &label, |b, _| {
                b.iter(|| {
                    drive += 0.01;
                    let _ = black_box(engine.modify(black_box(drive)));
                })
            });
        }

        // Heavy churn: every step crosses an integer
        let mut engine = SparkleEngine::new(2);
        engine.set_bounds(width, height);
        engine.set_highlights_amount(0.1);
        engine.set_highlights_variability(1.0);
        engine.set_highlights_replacement_speed_factor(10.0);
        let mut drive = 0.0f32;
        group.bench_with_input(BenchmarkId::new("churn", &label), &label, |b, _| {
            b.iter(|| {
                drive += 0.1;
                let _ = black_box(engine.modify(black_box(drive)));
            })
        });
    }

    group.finish();
}
