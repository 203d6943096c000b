//! Per-pixel state of a sparkle field.

use rand::Rng;

use crate::color::{Argb, Hsl};
use crate::lightness::LightnessRange;

/// Discrete lightness levels per unit of lightness when sampling base values.
pub const LIGHTNESS_PRECISION: f32 = 10_000.0;

/// The working raster and the per-pixel parameters behind it.
///
/// Three parallel arrays of `width * height` entries:
/// - base lightness, the resting state of each pixel (never changes after a build)
/// - direction modifier, a signed speed multiplier
/// - output, the last computed ARGB color
pub struct PixelField {
    width: usize,
    height: usize,
    base_lightness: Vec<f32>,
    direction_modifier: Vec<f32>,
    output: Vec<u32>,
}

impl PixelField {
    /// A field with no pixels.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            base_lightness: Vec::new(),
            direction_modifier: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Build a `width` x `height` field with fresh random state.
    ///
    /// Draw order is fixed (all lightness values, then all direction
    /// modifiers) so a seeded generator reproduces the same field.
    pub fn build<R: Rng + ?Sized>(
        rng: &mut R,
        width: usize,
        height: usize,
        range: &LightnessRange,
        base_color: Argb,
        wave_speed_variance: f32,
    ) -> Self {
        let count = width * height;
        if count == 0 {
            return Self::empty();
        }

        let levels = ((range.delta * LIGHTNESS_PRECISION).round() as u32).max(1);
        let base_lightness = (0..count)
            .map(|_| rng.random_range(0..levels) as f32 / LIGHTNESS_PRECISION + range.min)
            .collect();

        let mut field = Self {
            width,
            height,
            base_lightness,
            direction_modifier: Vec::with_capacity(count),
            output: vec![0; count],
        };
        field.redraw_direction_modifiers(rng, wave_speed_variance);
        field.reset_output(base_color);
        field
    }

    /// Draw a new direction modifier for every pixel.
    ///
    /// `sign + (u - 0.5) * 2 * variance` with `sign` in {-1, +1} and `u`
    /// uniform in [0, 1).
    pub fn redraw_direction_modifiers<R: Rng + ?Sized>(&mut self, rng: &mut R, variance: f32) {
        let count = self.base_lightness.len();
        self.direction_modifier.clear();
        self.direction_modifier.extend((0..count).map(|_| {
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            sign + (rng.random::<f32>() - 0.5) * 2.0 * variance
        }));
    }

    /// Paint every pixel at its base lightness.
    pub fn reset_output(&mut self, base_color: Argb) {
        let hsl = Hsl::from_argb(base_color);
        let alpha = base_color.alpha();
        for (out, &lightness) in self.output.iter_mut().zip(&self.base_lightness) {
            *out = hsl.with_lightness(lightness).to_argb(alpha).0;
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.base_lightness.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base_lightness.is_empty()
    }

    #[inline]
    pub fn base_lightness(&self) -> &[f32] {
        &self.base_lightness
    }

    #[inline]
    pub fn direction_modifiers(&self) -> &[f32] {
        &self.direction_modifier
    }

    /// Last computed colors, row-major.
    #[inline]
    pub fn output(&self) -> &[u32] {
        &self.output
    }

    /// Swap in a fully computed frame; the old frame ends up in `frame`.
    pub(crate) fn swap_output(&mut self, frame: &mut Vec<u32>) {
        debug_assert_eq!(frame.len(), self.output.len());
        std::mem::swap(&mut self.output, frame);
    }
}

impl Default for PixelField {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn grey_range() -> LightnessRange {
        LightnessRange::new(Argb::from_rgb(0x808080), 0.15, 0.15)
    }

    #[test]
    fn zero_area_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = PixelField::build(&mut rng, 0, 10, &grey_range(), Argb::GRAY, 1.0);
        assert!(field.is_empty());
        assert!(field.output().is_empty());
        assert!(field.direction_modifiers().is_empty());
    }

    #[test]
    fn arrays_are_parallel() {
        let mut rng = StdRng::seed_from_u64(2);
        let field = PixelField::build(&mut rng, 7, 5, &grey_range(), Argb::GRAY, 1.0);
        assert_eq!(field.len(), 35);
        assert_eq!(field.direction_modifiers().len(), 35);
        assert_eq!(field.output().len(), 35);
    }

    #[test]
    fn base_lightness_stays_in_band() {
        let range = grey_range();
        let mut rng = StdRng::seed_from_u64(3);
        let field = PixelField::build(&mut rng, 64, 64, &range, Argb::GRAY, 1.0);
        for &l in field.base_lightness() {
            assert!(l >= range.min - 1e-6 && l <= range.max + 1e-6, "{l} outside band");
        }
    }

    #[test]
    fn base_lightness_is_quantized() {
        let range = grey_range();
        let mut rng = StdRng::seed_from_u64(4);
        let field = PixelField::build(&mut rng, 16, 16, &range, Argb::GRAY, 1.0);
        for &l in field.base_lightness() {
            let steps = (l - range.min) * LIGHTNESS_PRECISION;
            assert!((steps - steps.round()).abs() < 0.05, "{l} is not on the grid");
        }
    }

    #[test]
    fn direction_modifiers_respect_variance() {
        let mut rng = StdRng::seed_from_u64(5);
        let field = PixelField::build(&mut rng, 32, 32, &grey_range(), Argb::GRAY, 0.5);
        for &dm in field.direction_modifiers() {
            assert!(dm.abs() >= 0.5 - 1e-6 && dm.abs() <= 1.5 + 1e-6, "dm = {dm}");
        }
        assert!(field.direction_modifiers().iter().any(|&dm| dm > 0.0));
        assert!(field.direction_modifiers().iter().any(|&dm| dm < 0.0));
    }

    #[test]
    fn zero_variance_gives_unit_speeds() {
        let mut rng = StdRng::seed_from_u64(6);
        let field = PixelField::build(&mut rng, 8, 8, &grey_range(), Argb::GRAY, 0.0);
        assert!(field.direction_modifiers().iter().all(|dm| dm.abs() == 1.0));
    }

    #[test]
    fn output_keeps_alpha() {
        let color = Argb(0x40_80_80_80);
        let range = LightnessRange::new(color, 0.1, 0.1);
        let mut rng = StdRng::seed_from_u64(7);
        let field = PixelField::build(&mut rng, 4, 4, &range, color, 1.0);
        assert!(field.output().iter().all(|&c| Argb(c).alpha() == 0x40));
    }

    #[test]
    fn same_seed_same_field() {
        let range = grey_range();
        let a = PixelField::build(&mut StdRng::seed_from_u64(9), 10, 10, &range, Argb::GRAY, 1.0);
        let b = PixelField::build(&mut StdRng::seed_from_u64(9), 10, 10, &range, Argb::GRAY, 1.0);
        assert_eq!(a.base_lightness(), b.base_lightness());
        assert_eq!(a.direction_modifiers(), b.direction_modifiers());
        assert_eq!(a.output(), b.output());
    }
}
