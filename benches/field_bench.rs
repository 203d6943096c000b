//! Benchmarks for the sparkle field.
//!
//! Run with: cargo bench
//!
//! `modify` runs once per display frame, so a field has to be recomputed well
//! inside a frame budget:
//!   - 60 Hz  = 16.7ms
//!   - 120 Hz = 8.3ms
//!
//! Benchmark groups:
//!   - field/modify     Full frame recomputation at several raster sizes
//!   - field/wave       Wave function evaluation and inverse
//!   - field/upsample   Stretching the raster onto display bounds

use criterion::{criterion_group, criterion_main};

mod field;

/// Display bounds (before dot scaling) of typical host views.
pub const BOUNDS: &[(u32, u32)] = &[(320, 240), (1080, 720), (1920, 1080)];

criterion_group!(
    benches,
    field::bench_modify,
    field::bench_wave,
    field::bench_upsample,
);
criterion_main!(benches);
