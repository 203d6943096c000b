//! The per-frame lightness computation.

/*
Modulating a Pixel
==================

Each frame turns one drive value into a new color for every pixel. A pixel
owns three things: its base lightness (where it rests), its direction
modifier dm (sign = which way its wave runs, |dm| = how fast), and whether
it is highlighted.

    band       [min, min + delta]      regular pixels
               [min, min + delta_h]    highlights, delta_h reaches toward white

    source     base                                  regular pixels
               (base * |dm|) mod delta_h + min       highlights

    v          clamp(normalize(source) * sign(dm), -1, 1)
    phase      wave.angle(v)
    raw        wave.value(|dm| * drive * sensitivity + phase) * sign(dm)
    lightness  shift(raw)

At drive = 0 a regular pixel lands exactly on its base lightness:
value(angle(v)) = v, and the two sign(dm) factors cancel. Highlights start
from a scrambled source instead, so they flicker apart from their neighbors
even before anything moves.

Multiplying by sign(dm) before the inverse and again after the forward wave
mirrors the wave for negative speeds, so half the pixels run their wave
backwards through the same starting point.


Failure
-------

asin is only defined on [-1, 1]. normalize overshoots by an ulp at the band
ends, hence the clamp, but NaN and infinities (a non-finite drive value, a
custom wave function misbehaving) still get through. Any non-finite
intermediate aborts the whole frame; the caller keeps the previous one.
*/

use crate::color::Hsl;
use crate::field::PixelField;
use crate::highlight::HighlightSet;
use crate::lightness::{normalize, shift, LightnessRange};
use crate::wave::WaveFunction;

/// Step of the pixel computation that produced a non-finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The inverse wave (`angle`)
    Phase,
    /// The forward wave (`value`)
    Wave,
    /// Mapping back into the lightness band
    Lightness,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Phase => write!(f, "phase"),
            Stage::Wave => write!(f, "wave value"),
            Stage::Lightness => write!(f, "lightness"),
        }
    }
}

/// A frame was abandoned because the pixel math went non-finite
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModulationError {
    NonFinite { pixel: usize, stage: Stage, drive: f32 },
}

impl std::fmt::Display for ModulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModulationError::NonFinite {
                pixel,
                stage,
                drive,
            } => {
                write!(
                    f,
                    "Non-finite {} at pixel {} (drive value {}), frame skipped",
                    stage, pixel, drive
                )
            }
        }
    }
}

impl std::error::Error for ModulationError {}

/// Lightness of one pixel for an already sensitivity-scaled drive value.
///
/// `source` is the pixel's starting lightness inside `[min, min + delta]`.
#[inline]
pub fn pixel_lightness<W: WaveFunction + ?Sized>(
    wave: &W,
    source: f32,
    direction_modifier: f32,
    drive: f32,
    min: f32,
    delta: f32,
) -> Result<f32, Stage> {
    let direction = direction_modifier.signum();
    let speed = direction_modifier.abs();

    let normalized = (normalize(source, min, delta) * direction).clamp(-1.0, 1.0);
    let phase = wave.angle(normalized);
    if !phase.is_finite() {
        return Err(Stage::Phase);
    }

    let raw = wave.value(speed * drive + phase) * direction;
    if !raw.is_finite() {
        return Err(Stage::Wave);
    }

    let lightness = shift(raw, min, delta);
    if !lightness.is_finite() {
        return Err(Stage::Lightness);
    }
    Ok(lightness)
}

/// Everything a frame needs besides the per-pixel arrays.
pub(crate) struct FrameParams<'a> {
    pub wave: &'a dyn WaveFunction,
    pub range: LightnessRange,
    pub base: Hsl,
    pub alpha: u8,
    pub highlights_lightness_factor: f32,
    pub highlights_sensitivity: f32,
}

/// Compute every pixel's color for `drive` into `out`.
///
/// `out` is only meaningful on success; on error it holds a partial frame.
pub(crate) fn render_frame(
    field: &PixelField,
    highlights: &HighlightSet,
    params: &FrameParams<'_>,
    drive: f32,
    out: &mut [u32],
) -> Result<(), ModulationError> {
    debug_assert_eq!(out.len(), field.len());

    let min = params.range.min;
    let regular_delta = params.range.delta;
    let highlight_delta = params
        .range
        .highlight_delta(params.highlights_lightness_factor);
    let highlight_drive = drive * params.highlights_sensitivity;

    let pixels = field
        .base_lightness()
        .iter()
        .zip(field.direction_modifiers())
        .zip(out.iter_mut())
        .enumerate();

    for (pixel, ((&base, &dm), out)) in pixels {
        let lightness = if highlights.contains(pixel) {
            let source = (base * dm.abs()) % highlight_delta + min;
            pixel_lightness(params.wave, source, dm, highlight_drive, min, highlight_delta)
        } else {
            pixel_lightness(params.wave, base, dm, drive, min, regular_delta)
        }
        .map_err(|stage| ModulationError::NonFinite {
            pixel,
            stage,
            drive,
        })?;

        *out = params.base.with_lightness(lightness).to_argb(params.alpha).0;
    }

    Ok(())
}
