//! Engine configuration: the tunable parameters of the sparkle effect.

use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Argb;
use crate::wave::Waveform;

pub const LIGHTNESS_VARIANCE_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const DOT_SCALE_RANGE: RangeInclusive<u32> = 2..=10_000;
pub const WAVE_SPEED_VARIANCE_RANGE: RangeInclusive<f32> = 0.0..=10.0;
pub const HIGHLIGHTS_LIGHTNESS_FACTOR_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const HIGHLIGHTS_AMOUNT_RANGE: RangeInclusive<f32> = 0.0..=0.1;
pub const HIGHLIGHTS_VARIABILITY_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const HIGHLIGHTS_REPLACEMENT_SPEED_RANGE: RangeInclusive<f32> = 0.1..=10.0;
pub const HIGHLIGHTS_SENSITIVITY_RANGE: RangeInclusive<f32> = 0.1..=10.0;

/// Clamp into an inclusive range. NaN falls back to the lower bound.
#[inline]
pub(crate) fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

/// Every tunable parameter of a [`SparkleEngine`](crate::SparkleEngine).
///
/// Values outside their documented range are clamped when the config is
/// applied, never rejected. The only hard invariant is that the two lightness
/// variances are not both zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkleConfig {
    /// Base color; every pixel is a shade of it.
    pub base_color: Argb,
    /// How much lighter than the base color a pixel may get (absolute lightness).
    pub lightness_variance_up: f32,
    /// How much darker than the base color a pixel may get (absolute lightness).
    pub lightness_variance_down: f32,
    /// Display pixels per field pixel along each axis.
    pub dot_scale: u32,
    /// Spread of per-pixel wave speeds around 1. With 1.0 speeds range from
    /// -2 to +2 (negative speeds run the wave backwards).
    pub wave_speed_variance: f32,
    /// Fraction of the headroom above the band's top that highlights may use.
    pub highlights_lightness_factor: f32,
    /// Fraction of pixels that are highlighted.
    pub highlights_amount: f32,
    /// Fraction of highlights replaced at each churn.
    pub highlights_variability: f32,
    /// Churns happen each time `drive * factor` crosses an integer.
    pub highlights_replacement_speed_factor: f32,
    /// Wave speed of highlighted pixels relative to regular ones.
    pub highlights_sensitivity: f32,
    /// Nearest-neighbor upsampling when true, smoothed otherwise.
    pub retro_mode: bool,
    pub waveform: Waveform,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            base_color: Argb::GRAY,
            lightness_variance_up: 0.15,
            lightness_variance_down: 0.15,
            dot_scale: 2,
            wave_speed_variance: 1.0,
            highlights_lightness_factor: 0.9,
            highlights_amount: 0.005,
            highlights_variability: 0.2,
            highlights_replacement_speed_factor: 0.5,
            highlights_sensitivity: 1.5,
            retro_mode: true,
            waveform: Waveform::Triangle,
        }
    }
}

impl SparkleConfig {
    /// Copy with every field clamped into its documented range.
    pub fn clamped(self) -> Self {
        Self {
            base_color: self.base_color,
            lightness_variance_up: clamp_to(self.lightness_variance_up, &LIGHTNESS_VARIANCE_RANGE),
            lightness_variance_down: clamp_to(
                self.lightness_variance_down,
                &LIGHTNESS_VARIANCE_RANGE,
            ),
            dot_scale: self
                .dot_scale
                .clamp(*DOT_SCALE_RANGE.start(), *DOT_SCALE_RANGE.end()),
            wave_speed_variance: clamp_to(self.wave_speed_variance, &WAVE_SPEED_VARIANCE_RANGE),
            highlights_lightness_factor: clamp_to(
                self.highlights_lightness_factor,
                &HIGHLIGHTS_LIGHTNESS_FACTOR_RANGE,
            ),
            highlights_amount: clamp_to(self.highlights_amount, &HIGHLIGHTS_AMOUNT_RANGE),
            highlights_variability: clamp_to(
                self.highlights_variability,
                &HIGHLIGHTS_VARIABILITY_RANGE,
            ),
            highlights_replacement_speed_factor: clamp_to(
                self.highlights_replacement_speed_factor,
                &HIGHLIGHTS_REPLACEMENT_SPEED_RANGE,
            ),
            highlights_sensitivity: clamp_to(
                self.highlights_sensitivity,
                &HIGHLIGHTS_SENSITIVITY_RANGE,
            ),
            retro_mode: self.retro_mode,
            waveform: self.waveform,
        }
    }

    /// Check the invariants that clamping cannot fix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_variances(self.lightness_variance_up, self.lightness_variance_down)
    }
}

#[inline]
pub(crate) fn check_variances(up: f32, down: f32) -> Result<(), ConfigError> {
    if up == 0.0 && down == 0.0 {
        return Err(ConfigError::InvalidConfiguration { up, down });
    }
    Ok(())
}

/// Errors raised by configuration setters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Both lightness variances are zero, leaving an empty lightness band
    InvalidConfiguration { up: f32, down: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidConfiguration { up, down } => {
                write!(
                    f,
                    "Lightness delta of 0.0 is not allowed (variance up {}, down {}). Choose other values for lightness_variance_up and lightness_variance_down.",
                    up, down
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
