//! Packed ARGB colors and HSL conversion.

/*
HSL and Lightness
=================

The sparkle effect only ever moves one channel: lightness. Hue and saturation
of the base color stay fixed, so every pixel in the field is a lighter or
darker shade of the same color.

Vocabulary
----------

  ARGB        A color packed into a u32 as 0xAARRGGBB. Alpha in the high byte.

  hue         Position on the color wheel in degrees, [0, 360).

  saturation  Colorfulness, [0, 1]. 0 is grey.

  lightness   [0, 1]. 0 is black, 1 is white, 0.5 is the "pure" color.
              lightness = (max(r, g, b) + min(r, g, b)) / 2


Round Trips
-----------

Converting to HSL and back is lossy by at most one step per channel because
the RGB side is quantized to 8 bits. Lightness close to 0 or 1 collapses hue
and saturation information entirely (every hue at L = 1 is white), which is
why the lightness range never touches the ends exactly.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A packed 0xAARRGGBB color.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb(pub u32);

impl Argb {
    /// Opaque mid grey, the default base color.
    pub const GRAY: Argb = Argb(0xFF88_8888);
    pub const BLACK: Argb = Argb(0xFF00_0000);
    pub const WHITE: Argb = Argb(0xFFFF_FFFF);

    #[inline]
    pub const fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Opaque color from a 0xRRGGBB value.
    #[inline]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Lightness channel of this color.
    #[inline]
    pub fn lightness(self) -> f32 {
        Hsl::from_argb(self).lightness
    }

    /// This color with its lightness replaced, hue, saturation and alpha kept.
    #[inline]
    pub fn with_lightness(self, lightness: f32) -> Self {
        Hsl::from_argb(self).with_lightness(lightness).to_argb(self.alpha())
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Argb> for u32 {
    fn from(value: Argb) -> Self {
        value.0
    }
}

/// A color in hue/saturation/lightness form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Degrees, [0, 360]
    pub hue: f32,
    /// [0, 1]
    pub saturation: f32,
    /// [0, 1]
    pub lightness: f32,
}

impl Hsl {
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Decompose an ARGB color. Alpha is ignored.
    pub fn from_argb(color: Argb) -> Self {
        let r = color.red() as f32 / 255.0;
        let g = color.green() as f32 / 255.0;
        let b = color.blue() as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let lightness = (max + min) / 2.0;

        let (hue, saturation) = if max == min {
            (0.0, 0.0)
        } else {
            let segment = if max == r {
                ((g - b) / delta) % 6.0
            } else if max == g {
                (b - r) / delta + 2.0
            } else {
                (r - g) / delta + 4.0
            };
            (segment, delta / (1.0 - (2.0 * lightness - 1.0).abs()))
        };

        let mut hue = (hue * 60.0) % 360.0;
        if hue < 0.0 {
            hue += 360.0;
        }

        Self {
            hue: hue.clamp(0.0, 360.0),
            saturation: saturation.clamp(0.0, 1.0),
            lightness: lightness.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn with_lightness(self, lightness: f32) -> Self {
        Self { lightness, ..self }
    }

    /// Compose an ARGB color with the given alpha.
    pub fn to_argb(self, alpha: u8) -> Argb {
        let Hsl {
            hue,
            saturation,
            lightness,
        } = self;

        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let m = lightness - 0.5 * chroma;
        let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());

        let (r, g, b) = match (hue / 60.0) as i32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Argb::from_argb(alpha, to_channel(r + m), to_channel(g + m), to_channel(b + m))
    }
}

#[inline]
fn to_channel(value: f32) -> u8 {
    (255.0 * value).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grey_has_no_hue_or_saturation() {
        let hsl = Hsl::from_argb(Argb::from_rgb(0x808080));
        assert_eq!(hsl.hue, 0.0);
        assert_eq!(hsl.saturation, 0.0);
        assert!((hsl.lightness - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn primaries_decompose() {
        let red = Hsl::from_argb(Argb::from_rgb(0xFF0000));
        assert!((red.hue - 0.0).abs() < 1e-4);
        assert!((red.saturation - 1.0).abs() < 1e-4);
        assert!((red.lightness - 0.5).abs() < 1e-4);

        let green = Hsl::from_argb(Argb::from_rgb(0x00FF00));
        assert!((green.hue - 120.0).abs() < 1e-3);

        let blue = Hsl::from_argb(Argb::from_rgb(0x0000FF));
        assert!((blue.hue - 240.0).abs() < 1e-3);
    }

    #[test]
    fn round_trip_stays_within_one_step() {
        for &rgb in &[0x808080, 0x3366CC, 0xFF8800, 0x12AB34, 0xF0F0F0, 0x0A0A0A] {
            let color = Argb::from_rgb(rgb);
            let back = Hsl::from_argb(color).to_argb(255);
            for (a, b) in [
                (color.red(), back.red()),
                (color.green(), back.green()),
                (color.blue(), back.blue()),
            ] {
                assert!(
                    (a as i32 - b as i32).abs() <= 1,
                    "round trip of {rgb:06X} drifted: {a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn with_lightness_keeps_alpha_and_hue() {
        let color = Argb(0x80_33_66_CC);
        let lighter = color.with_lightness(0.8);
        assert_eq!(lighter.alpha(), 0x80);
        assert!((lighter.lightness() - 0.8).abs() < 0.01);

        let hue_before = Hsl::from_argb(color).hue;
        let hue_after = Hsl::from_argb(lighter).hue;
        assert!((hue_before - hue_after).abs() < 2.0);
    }

    #[test]
    fn extreme_lightness_is_black_and_white() {
        let color = Argb::from_rgb(0x3366CC);
        assert_eq!(color.with_lightness(0.0), Argb::BLACK);
        assert_eq!(color.with_lightness(1.0), Argb::WHITE);
    }
}
