//! Procedural "sparkle" animation for a colored pixel field.
//!
//! Every pixel is a shade of one base color whose HSL lightness oscillates
//! along a periodic wave as an external drive value (device motion, touch)
//! changes. See [`SparkleEngine`] for the entry point.

pub mod color;
pub mod config; // Tunable parameters and their ranges
pub mod drive; // Sensor/touch input to drive values
pub mod engine;
pub mod field;
pub mod highlight;
pub mod lightness; // Band math and wave-space mapping
pub mod raster;
pub mod wave;

pub use color::{Argb, Hsl};
pub use config::{ConfigError, SparkleConfig};
pub use drive::{DriveMode, DriveSignal};
pub use engine::{FrameStatus, ModulationError, SparkleEngine, Stage};
pub use lightness::LightnessRange;
pub use raster::{Raster, Sampling};
pub use wave::{WaveFunction, WavePreview, Waveform};
