use std::f32::consts::{FRAC_2_PI, FRAC_PI_2};

use super::WaveFunction;

/// Triangle wave built from `asin(sin(x))`, scaled to [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triangle;

impl WaveFunction for Triangle {
    #[inline]
    fn value(&self, angle: f32) -> f32 {
        FRAC_2_PI * angle.sin().asin()
    }

    #[inline]
    fn angle(&self, value: f32) -> f32 {
        (value * FRAC_PI_2).sin().asin()
    }
}
