//! Benchmarks for the engine and its building blocks.

mod modify;
mod upsample;
mod wave;

pub use modify::bench_modify;
pub use upsample::bench_upsample;
pub use wave::bench_wave;
