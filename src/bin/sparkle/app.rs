//! Sparkle - demo application builder and runner

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use rtrb::RingBuffer;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use sparkle_field::{DriveMode, DriveSignal, SparkleConfig, SparkleEngine};

use super::sensor::SensorThread;
use super::ui::UiApp;

/// Capacity of the sensor-to-UI ring buffer, in readings
const SENSOR_QUEUE: usize = 256;

/// Main application builder
pub struct Sparkle {
    config: SparkleConfig,
    mode: DriveMode,
    sensitivity: f32,
    seed: u64,
}

impl Sparkle {
    pub fn new() -> Self {
        Self {
            config: SparkleConfig::default(),
            mode: DriveMode::Motion,
            sensitivity: sparkle_field::drive::DEFAULT_SENSITIVITY,
            seed: 0,
        }
    }

    pub fn config(mut self, config: SparkleConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial drive mode; cycle with `m` at runtime
    pub fn mode(mut self, mode: DriveMode) -> Self {
        self.mode = mode;
        self
    }

    /// Multiplier from sensor or touch reading to drive value
    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Seed for the engine's random source
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run the application (takes over the terminal until quit)
    pub fn run(self) -> EyreResult<()> {
        let engine = SparkleEngine::with_config(self.config, self.seed)
            .wrap_err("invalid sparkle configuration")?;
        let signal = DriveSignal::new(self.mode).with_sensitivity(self.sensitivity);

        let (producer, consumer) = RingBuffer::new(SENSOR_QUEUE);
        let sensor = SensorThread::spawn(producer).wrap_err("failed to start sensor thread")?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(engine, signal, consumer).run(&mut terminal);
        ratatui::restore();

        sensor.stop();
        result
    }
}

impl Default for Sparkle {
    fn default() -> Self {
        Self::new()
    }
}

/// Install a file logger when SPARKLE_LOG is set.
///
/// The terminal belongs to the UI, so logs never go to stdout or stderr.
/// Filtering follows RUST_LOG, defaulting to debug output from the engine.
pub fn init_logging() -> EyreResult<()> {
    let Some(path) = std::env::var_os("SPARKLE_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.to_string_lossy()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sparkle_field=debug,sparkle=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| color_eyre::eyre::eyre!(err))
        .wrap_err("failed to install log subscriber")?;
    Ok(())
}
