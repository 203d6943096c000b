//! Periodic wave functions driving per-pixel lightness.

/*
Wave Functions
==============

Every pixel's lightness follows a periodic wave as the drive value moves.
The engine needs two things from a wave:

  value(angle)   The wave itself. Period 2π, output in [-1, 1].

  angle(value)   A principal-branch inverse: given a normalized position
                 v in [-1, 1], return an angle a with value(a) ≈ v.

The inverse is not a true global inverse (a periodic function has none).
It is only used to align phase: a pixel whose base lightness sits at
normalized position v should start its wave exactly there when the drive
value is 0, and continue smoothly from that point as the drive moves.

    value(|speed| * drive + angle(v))

At drive = 0 this is value(angle(v)) = v, the pixel's resting lightness.


Built-in Shapes
---------------

SINUSOID
    value(a) = sin(a)
    angle(v) = asin(v)
    Smooth, lingers at the extremes. Pixels seem to "breathe".

TRIANGLE
    value(a) = (2/π) asin(sin(a))
    angle(v) = asin(sin(v π/2))
    Constant rate of change. Reads as a steadier shimmer.

    For v in [-1, 1], v π/2 lies in [-π/2, π/2] where asin(sin(x)) = x,
    so angle(v) = v π/2 and value(angle(v)) = (2/π)(v π/2) = v.


Adding a Shape
--------------

Implement `WaveFunction`. The engine never looks at which shape is installed,
it only relies on the contract above.
*/

mod preview;
mod sinusoid;
mod triangle;

pub use preview::WavePreview;
pub use sinusoid::Sinusoid;
pub use triangle::Triangle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A periodic function with period 2π and range [-1, 1], plus its
/// principal-branch inverse.
pub trait WaveFunction: Send + Sync {
    /// Evaluate the wave at `angle` (radians).
    fn value(&self, angle: f32) -> f32;

    /// Angle whose wave value is `value`, for `value` in [-1, 1].
    ///
    /// Inputs outside [-1, 1] may produce NaN.
    fn angle(&self, value: f32) -> f32;
}

impl<W: WaveFunction + ?Sized> WaveFunction for Box<W> {
    #[inline]
    fn value(&self, angle: f32) -> f32 {
        (**self).value(angle)
    }

    #[inline]
    fn angle(&self, value: f32) -> f32 {
        (**self).angle(value)
    }
}

/// Built-in wave shapes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Waveform {
    Sinusoid,
    #[default]
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 2] = [Waveform::Sinusoid, Waveform::Triangle];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sinusoid => "sinusoid",
            Waveform::Triangle => "triangle",
        }
    }

    /// The other built-in shape.
    pub fn toggled(self) -> Self {
        match self {
            Waveform::Sinusoid => Waveform::Triangle,
            Waveform::Triangle => Waveform::Sinusoid,
        }
    }
}

impl WaveFunction for Waveform {
    #[inline]
    fn value(&self, angle: f32) -> f32 {
        match self {
            Waveform::Sinusoid => Sinusoid.value(angle),
            Waveform::Triangle => Triangle.value(angle),
        }
    }

    #[inline]
    fn angle(&self, value: f32) -> f32 {
        match self {
            Waveform::Sinusoid => Sinusoid.angle(value),
            Waveform::Triangle => Triangle.angle(value),
        }
    }
}
