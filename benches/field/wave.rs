//! Benchmarks for wave evaluation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use sparkle_field::{WaveFunction, Waveform};

pub fn bench_wave(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/wave");
    let values: Vec<f32> = (0..1024).map(|i| i as f32 / 512.0 - 1.0).collect();

    for waveform in Waveform::ALL {
        // value(angle(v)), the per-pixel pair
        group.bench_with_input(
            BenchmarkId::new("round_trip", waveform.name()),
            &waveform,
            |b, wave| {
                b.iter(|| {
                    let mut acc = 0.0f32;
                    for &v in &values {
                        acc += wave.value(wave.angle(black_box(v)) + 0.3);
                    }
                    black_box(acc)
                })
            },
        );

        // Same through a trait object, as the engine calls it
        let boxed: Box<dyn WaveFunction> = Box::new(waveform);
        group.bench_with_input(
            BenchmarkId::new("dyn_round_trip", waveform.name()),
            &waveform,
            |b, _| {
                b.iter(|| {
                    let mut acc = 0.0f32;
                    for &v in &values {
                        acc += boxed.value(boxed.angle(black_box(v)) + 0.3);
                    }
                    black_box(acc)
                })
            },
        );
    }

    group.finish();
}
