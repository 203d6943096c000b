use std::f32::consts::TAU;

use crate::color::Argb;

use super::WaveFunction;

/// Plot parameters for drawing a small picture of a wave function.
///
/// Points come out in plot space: `x` in [0, 1] across the plot width and `y`
/// in lightness units, so a preview built with [`WavePreview::for_range`]
/// shows the band the pixels will actually sweep through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavePreview {
    /// Number of full periods drawn across the width.
    pub periods: f32,
    /// Peak-to-peak height is `amplitude`.
    pub amplitude: f32,
    /// Vertical center of the wave.
    pub offset_y: f32,
    /// Phase shift in radians.
    pub offset_angle: f32,
}

impl Default for WavePreview {
    fn default() -> Self {
        Self {
            periods: 2.5,
            amplitude: 1.0,
            offset_y: 0.5,
            offset_angle: 0.0,
        }
    }
}

impl WavePreview {
    /// Preview matching an engine's lightness band.
    ///
    /// The wave is centered between `L - down` and `L + up` where `L` is the
    /// lightness of `color`, and one period is drawn per unit of drive
    /// sensitivity.
    pub fn for_range(color: Argb, variance_up: f32, variance_down: f32, sensitivity: f32) -> Self {
        let amplitude = variance_up + variance_down;
        Self {
            periods: sensitivity,
            amplitude,
            offset_y: color.lightness() - variance_down + amplitude / 2.0,
            offset_angle: 0.0,
        }
    }

    /// The y coordinate at horizontal position `x` in [0, 1].
    #[inline]
    pub fn y_at<W: WaveFunction + ?Sized>(&self, wave: &W, x: f32) -> f32 {
        wave.value(x * TAU * self.periods + self.offset_angle) * self.amplitude / 2.0 + self.offset_y
    }

    /// Sample `samples` evenly spaced points, both ends included.
    pub fn points<W: WaveFunction + ?Sized>(&self, wave: &W, samples: usize) -> Vec<(f64, f64)> {
        if samples == 0 {
            return Vec::new();
        }
        let last = (samples - 1).max(1) as f32;
        (0..samples)
            .map(|i| {
                let x = i as f32 / last;
                (x as f64, self.y_at(wave, x) as f64)
            })
            .collect()
    }
}
