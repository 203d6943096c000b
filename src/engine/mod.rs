//! The sparkle engine: configuration, field lifecycle and per-frame modulation.
//!
//! A [`SparkleEngine`] owns everything needed to animate one field: its
//! configuration, the per-pixel arrays, the highlight set, the installed wave
//! function and a seeded random source. Hosts forward bounds, a base color and
//! a stream of drive values, and read back the working raster.
//!
//! ```
//! use sparkle_field::{Argb, SparkleEngine};
//!
//! let mut engine = SparkleEngine::new(42);
//! engine.set_bounds(64, 48);
//! engine.set_base_color(Argb::from_rgb(0x3366CC));
//!
//! for step in 0..10 {
//!     engine.modify(step as f32 * 0.1).unwrap();
//! }
//! assert_eq!(engine.raster().width(), 32);
//! assert!(engine.take_redraw());
//! ```
//!
//! The engine is not internally synchronized. Every mutating call takes
//! `&mut self`; hosts whose drive signal arrives on another thread funnel the
//! values to the one thread that owns the engine.

pub mod modulator;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::color::{Argb, Hsl};
use crate::config::{
    check_variances, clamp_to, ConfigError, SparkleConfig, DOT_SCALE_RANGE,
    HIGHLIGHTS_AMOUNT_RANGE, HIGHLIGHTS_LIGHTNESS_FACTOR_RANGE,
    HIGHLIGHTS_REPLACEMENT_SPEED_RANGE, HIGHLIGHTS_SENSITIVITY_RANGE,
    HIGHLIGHTS_VARIABILITY_RANGE, LIGHTNESS_VARIANCE_RANGE, WAVE_SPEED_VARIANCE_RANGE,
};
use crate::field::PixelField;
use crate::highlight::{churn_count, ChurnSchedule, HighlightSet};
use crate::lightness::LightnessRange;
use crate::raster::{Raster, Sampling};
use crate::wave::{WaveFunction, Waveform};

use modulator::{render_frame, FrameParams};
pub use modulator::{pixel_lightness, ModulationError, Stage};

/// Outcome of a successful [`SparkleEngine::modify`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// A new frame was written to the raster.
    Rendered,
    /// The field has no pixels (zero-area bounds); nothing happened.
    Idle,
}

/// Procedural sparkle animation over a rectangular pixel field.
pub struct SparkleEngine {
    config: SparkleConfig,
    wave: Box<dyn WaveFunction>,
    rng: StdRng,
    bounds: (u32, u32),
    range: LightnessRange,
    field: PixelField,
    highlights: HighlightSet,
    schedule: ChurnSchedule,
    raster: Raster,
    /// Frame under construction, swapped with the field output on success
    scratch: Vec<u32>,
    last_drive: f32,
    redraw: bool,
}

impl SparkleEngine {
    /// Engine with the default configuration and zero bounds.
    pub fn new(seed: u64) -> Self {
        let config = SparkleConfig::default();
        Self {
            range: LightnessRange::new(
                config.base_color,
                config.lightness_variance_up,
                config.lightness_variance_down,
            ),
            wave: Box::new(config.waveform),
            config,
            rng: StdRng::seed_from_u64(seed),
            bounds: (0, 0),
            field: PixelField::empty(),
            highlights: HighlightSet::new(),
            schedule: ChurnSchedule::default(),
            raster: Raster::default(),
            scratch: Vec::new(),
            last_drive: 0.0,
            redraw: false,
        }
    }

    /// Engine with a custom configuration.
    ///
    /// Fields are clamped into range; both variances at zero is an error.
    pub fn with_config(config: SparkleConfig, seed: u64) -> Result<Self, ConfigError> {
        let config = config.clamped();
        config.validate()?;

        let mut engine = Self::new(seed);
        engine.wave = Box::new(config.waveform);
        engine.config = config;
        engine.update_range();
        Ok(engine)
    }

    // ---------------------------------------------------------------------
    // Host inputs
    // ---------------------------------------------------------------------

    /// Set the display bounds in pixels. Rebuilds the field when they change.
    pub fn set_bounds(&mut self, width: u32, height: u32) {
        if self.bounds == (width, height) {
            return;
        }
        self.bounds = (width, height);
        self.rebuild();
    }

    #[inline]
    pub fn bounds(&self) -> (u32, u32) {
        self.bounds
    }

    /// Set the base color. Rebuilds everything and resets the drive state.
    pub fn set_base_color(&mut self, color: Argb) {
        self.config.base_color = color;
        self.update_range();
        self.last_drive = 0.0;
        self.schedule.reset();
        self.rebuild();
    }

    #[inline]
    pub fn base_color(&self) -> Argb {
        self.config.base_color
    }

    /// Re-randomize the field and highlights without touching the configuration.
    pub fn reset(&mut self) {
        self.rebuild();
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    /// Current configuration (clamped values).
    #[inline]
    pub fn config(&self) -> &SparkleConfig {
        &self.config
    }

    /// How much lighter than the base color pixels may get, clamped to [0, 1].
    ///
    /// Fails without changing anything when this would make both variances zero.
    pub fn set_lightness_variance_up(&mut self, value: f32) -> Result<(), ConfigError> {
        let value = clamp_to(value, &LIGHTNESS_VARIANCE_RANGE);
        check_variances(value, self.config.lightness_variance_down)?;
        self.config.lightness_variance_up = value;
        self.update_range();
        self.rebuild();
        Ok(())
    }

    #[inline]
    pub fn lightness_variance_up(&self) -> f32 {
        self.config.lightness_variance_up
    }

    /// How much darker than the base color pixels may get, clamped to [0, 1].
    ///
    /// Fails without changing anything when this would make both variances zero.
    pub fn set_lightness_variance_down(&mut self, value: f32) -> Result<(), ConfigError> {
        let value = clamp_to(value, &LIGHTNESS_VARIANCE_RANGE);
        check_variances(self.config.lightness_variance_up, value)?;
        self.config.lightness_variance_down = value;
        self.update_range();
        self.rebuild();
        Ok(())
    }

    #[inline]
    pub fn lightness_variance_down(&self) -> f32 {
        self.config.lightness_variance_down
    }

    /// Display pixels per field pixel, clamped to [2, 10000]. Rebuilds the field.
    pub fn set_dot_scale(&mut self, value: u32) {
        let value = value.clamp(*DOT_SCALE_RANGE.start(), *DOT_SCALE_RANGE.end());
        if value == self.config.dot_scale {
            return;
        }
        self.config.dot_scale = value;
        self.rebuild();
    }

    #[inline]
    pub fn dot_scale(&self) -> u32 {
        self.config.dot_scale
    }

    /// Spread of per-pixel wave speeds, clamped to [0, 10]. Redraws the
    /// direction modifiers.
    pub fn set_wave_speed_variance(&mut self, value: f32) {
        self.config.wave_speed_variance = clamp_to(value, &WAVE_SPEED_VARIANCE_RANGE);
        self.field
            .redraw_direction_modifiers(&mut self.rng, self.config.wave_speed_variance);
        self.invalidate();
    }

    #[inline]
    pub fn wave_speed_variance(&self) -> f32 {
        self.config.wave_speed_variance
    }

    /// Clamped to [0, 1].
    pub fn set_highlights_lightness_factor(&mut self, value: f32) {
        self.config.highlights_lightness_factor =
            clamp_to(value, &HIGHLIGHTS_LIGHTNESS_FACTOR_RANGE);
        self.invalidate();
    }

    #[inline]
    pub fn highlights_lightness_factor(&self) -> f32 {
        self.config.highlights_lightness_factor
    }

    /// Fraction of highlighted pixels, clamped to [0, 0.1]. Rebuilds the highlights.
    pub fn set_highlights_amount(&mut self, value: f32) {
        self.config.highlights_amount = clamp_to(value, &HIGHLIGHTS_AMOUNT_RANGE);
        self.rebuild_highlights();
        self.invalidate();
    }

    #[inline]
    pub fn highlights_amount(&self) -> f32 {
        self.config.highlights_amount
    }

    /// Clamped to [0, 1]. Takes effect at the next churn.
    pub fn set_highlights_variability(&mut self, value: f32) {
        self.config.highlights_variability = clamp_to(value, &HIGHLIGHTS_VARIABILITY_RANGE);
    }

    #[inline]
    pub fn highlights_variability(&self) -> f32 {
        self.config.highlights_variability
    }

    /// Clamped to [0.1, 10].
    pub fn set_highlights_replacement_speed_factor(&mut self, value: f32) {
        self.config.highlights_replacement_speed_factor =
            clamp_to(value, &HIGHLIGHTS_REPLACEMENT_SPEED_RANGE);
        self.invalidate();
    }

    #[inline]
    pub fn highlights_replacement_speed_factor(&self) -> f32 {
        self.config.highlights_replacement_speed_factor
    }

    /// Clamped to [0.1, 10].
    pub fn set_highlights_sensitivity(&mut self, value: f32) {
        self.config.highlights_sensitivity = clamp_to(value, &HIGHLIGHTS_SENSITIVITY_RANGE);
        self.invalidate();
    }

    #[inline]
    pub fn highlights_sensitivity(&self) -> f32 {
        self.config.highlights_sensitivity
    }

    /// Nearest-neighbor (true) or smoothed (false) upsampling. Cosmetic only.
    pub fn set_retro_mode(&mut self, retro_mode: bool) {
        if self.config.retro_mode != retro_mode {
            self.config.retro_mode = retro_mode;
            self.redraw = true;
        }
    }

    #[inline]
    pub fn retro_mode(&self) -> bool {
        self.config.retro_mode
    }

    /// How hosts should stretch the raster onto the display bounds.
    #[inline]
    pub fn sampling(&self) -> Sampling {
        Sampling::from_retro_mode(self.config.retro_mode)
    }

    /// Install a built-in wave shape.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.config.waveform = waveform;
        self.wave = Box::new(waveform);
        self.invalidate();
    }

    #[inline]
    pub fn waveform(&self) -> Waveform {
        self.config.waveform
    }

    /// Install a custom wave function.
    ///
    /// [`SparkleEngine::waveform`] keeps reporting the last built-in shape.
    pub fn set_wave_function<W: WaveFunction + 'static>(&mut self, wave: W) {
        self.wave = Box::new(wave);
        self.invalidate();
    }

    #[inline]
    pub fn wave_function(&self) -> &dyn WaveFunction {
        &*self.wave
    }

    // ---------------------------------------------------------------------
    // Outputs
    // ---------------------------------------------------------------------

    /// The band pixels sweep through.
    #[inline]
    pub fn lightness_range(&self) -> LightnessRange {
        self.range
    }

    #[inline]
    pub fn min_lightness(&self) -> f32 {
        self.range.min
    }

    #[inline]
    pub fn max_lightness(&self) -> f32 {
        self.range.max
    }

    /// The working raster, `bounds / dot_scale` pixels.
    #[inline]
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Whether the raster changed since the last [`SparkleEngine::take_redraw`].
    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Read and clear the redraw flag.
    #[inline]
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    #[inline]
    pub fn field(&self) -> &PixelField {
        &self.field
    }

    #[inline]
    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    /// The drive value of the most recent [`SparkleEngine::modify`] call.
    #[inline]
    pub fn last_drive(&self) -> f32 {
        self.last_drive
    }

    // ---------------------------------------------------------------------
    // Modulation
    // ---------------------------------------------------------------------

    /// Recompute every pixel for drive value `drive` and publish the frame.
    ///
    /// On a [`ModulationError`] the previous frame stays in the raster and the
    /// error is logged; animation continues with the next call. The drive value
    /// is recorded either way.
    pub fn modify(&mut self, drive: f32) -> Result<FrameStatus, ModulationError> {
        if self.field.is_empty() {
            self.last_drive = drive;
            return Ok(FrameStatus::Idle);
        }

        self.churn_highlights_if_due(drive);

        let base = Hsl::from_argb(self.config.base_color);
        let params = FrameParams {
            wave: &*self.wave,
            range: self.range,
            base,
            alpha: self.config.base_color.alpha(),
            highlights_lightness_factor: self.config.highlights_lightness_factor,
            highlights_sensitivity: self.config.highlights_sensitivity,
        };
        let result = render_frame(
            &self.field,
            &self.highlights,
            &params,
            drive,
            &mut self.scratch,
        );
        self.last_drive = drive;

        match result {
            Ok(()) => {
                self.field.swap_output(&mut self.scratch);
                self.raster.copy_from(self.field.output());
                self.redraw = true;
                Ok(FrameStatus::Rendered)
            }
            Err(err) => {
                warn!(%err, "sparkle frame skipped");
                Err(err)
            }
        }
    }

    fn churn_highlights_if_due(&mut self, drive: f32) {
        let factor = self.config.highlights_replacement_speed_factor;
        if self.config.highlights_amount <= 0.0 || !self.schedule.is_due(drive, factor) {
            return;
        }
        let count = churn_count(self.highlights.len(), self.config.highlights_variability);
        let replaced = self.highlights.churn(&mut self.rng, count);
        self.schedule.advance(drive, factor);
        trace!(replaced, drive, "highlights churned");
    }

    // ---------------------------------------------------------------------
    // Rebuilds
    // ---------------------------------------------------------------------

    fn update_range(&mut self) {
        self.range = LightnessRange::new(
            self.config.base_color,
            self.config.lightness_variance_up,
            self.config.lightness_variance_down,
        );
    }

    /// Working raster size for the current bounds and dot scale.
    fn field_size(&self) -> (usize, usize) {
        let scale = self.config.dot_scale;
        (
            (self.bounds.0 / scale) as usize,
            (self.bounds.1 / scale) as usize,
        )
    }

    /// Rebuild the field, raster, scratch buffer and highlights, then render
    /// them at the last drive value.
    fn rebuild(&mut self) {
        let (width, height) = self.field_size();
        self.field = PixelField::build(
            &mut self.rng,
            width,
            height,
            &self.range,
            self.config.base_color,
            self.config.wave_speed_variance,
        );

        let (width, height) = if self.field.is_empty() {
            (0, 0)
        } else {
            (width, height)
        };
        self.raster = Raster::new(width, height);
        self.raster.copy_from(self.field.output());
        self.scratch = vec![0; self.field.len()];
        self.redraw = !self.field.is_empty();

        debug!(
            width,
            height,
            pixels = self.field.len(),
            min_lightness = self.range.min,
            max_lightness = self.range.max,
            "sparkle field rebuilt"
        );
        self.rebuild_highlights();
        self.invalidate();
    }

    /// Re-render at the last drive value so a change shows up without new input.
    fn invalidate(&mut self) {
        if self.field.is_empty() {
            return;
        }
        // modify already logged the failure; the previous frame stays up
        if self.modify(self.last_drive).is_err() {
            debug!(drive = self.last_drive, "re-render after change skipped");
        }
    }

    fn rebuild_highlights(&mut self) {
        self.highlights
            .rebuild(&mut self.rng, self.field.len(), self.config.highlights_amount);
        debug!(highlights = self.highlights.len(), "highlights rebuilt");
    }
}

impl std::fmt::Debug for SparkleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparkleEngine")
            .field("config", &self.config)
            .field("bounds", &self.bounds)
            .field("range", &self.range)
            .field("pixels", &self.field.len())
            .field("highlights", &self.highlights.len())
            .field("last_drive", &self.last_drive)
            .finish()
    }
}
