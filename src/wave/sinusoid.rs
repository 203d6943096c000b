use super::WaveFunction;

/// Plain sine wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sinusoid;

impl WaveFunction for Sinusoid {
    #[inline]
    fn value(&self, angle: f32) -> f32 {
        angle.sin()
    }

    #[inline]
    fn angle(&self, value: f32) -> f32 {
        value.asin()
    }
}
