//! Lightness bands and the mapping between lightness and wave space.

/*
Lightness Band
==============

A pixel never leaves its band: the interval between the darkest and lightest
shade the configuration allows.

    min = max(ε, L - variance_down)
    max = min(1 - ε, L + variance_up)
    delta = max - min

L is the lightness of the base color. ε keeps the band off pure black and
pure white, where hue and saturation are lost.


Wave Space
----------

Waves live in [-1, 1]. Lightness lives in [min, min + delta]. The two are an
affine map apart:

    normalize(x, lo, d) = (x - (d/2 + lo)) / d * 2      lightness → wave
    shift(x, lo, d)     = x * d/2 + (d/2 + lo)          wave → lightness

    lightness   wave
    lo          -1.0
    lo + d/2     0.0
    lo + d      +1.0

Floating point makes normalize overshoot by an ulp at the ends of the band
(e.g. -1.0000001), so callers clamp before feeding an inverse trig function.
*/

use crate::color::Argb;

/// Distance kept from pure black and pure white.
pub const LIGHTNESS_EPSILON: f32 = 0.001;

/// Map lightness `x` from `[lo, lo + d]` onto `[-1, 1]`.
#[inline]
pub fn normalize(x: f32, lo: f32, d: f32) -> f32 {
    (x - (d / 2.0 + lo)) / d * 2.0
}

/// Map a wave value from `[-1, 1]` onto `[lo, lo + d]`. Inverse of [`normalize`].
#[inline]
pub fn shift(x: f32, lo: f32, d: f32) -> f32 {
    x * d / 2.0 + (d / 2.0 + lo)
}

/// The band of lightness a field sweeps through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightnessRange {
    /// Lightness of the base color
    pub original: f32,
    pub min: f32,
    pub max: f32,
    /// `max - min`
    pub delta: f32,
}

impl LightnessRange {
    pub fn new(color: Argb, variance_up: f32, variance_down: f32) -> Self {
        let original = color.lightness();
        // The band stays at least ε wide: near white it opens downward,
        // everywhere else upward. Tiny variances vanish in f32 otherwise.
        let min = LIGHTNESS_EPSILON
            .max(original - variance_down)
            .min(1.0 - 2.0 * LIGHTNESS_EPSILON);
        let max = (1.0 - LIGHTNESS_EPSILON)
            .min(original + variance_up)
            .max(min + LIGHTNESS_EPSILON);
        Self {
            original,
            min,
            max,
            delta: max - min,
        }
    }

    /// Width of the band for highlighted pixels.
    ///
    /// The top of the band is pushed toward white by `factor` of the remaining
    /// headroom; factor 1 reaches `1.0`.
    #[inline]
    pub fn highlight_delta(&self, factor: f32) -> f32 {
        self.max + (1.0 - self.max) * factor - self.min
    }
}
