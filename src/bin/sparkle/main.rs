//! sparkle - Terminal demo of the sparkle field
//!
//! Run with: cargo run --bin sparkle
//! Set SPARKLE_LOG=<path> to write engine logs to a file.

mod app;
mod sensor;
mod ui;

use app::Sparkle;
use sparkle_field::{Argb, DriveMode, SparkleConfig, Waveform};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    app::init_logging()?;

    let config = SparkleConfig {
        base_color: Argb::from_rgb(0x3366CC),
        lightness_variance_up: 0.2,
        lightness_variance_down: 0.15,
        highlights_amount: 0.01,
        waveform: Waveform::Triangle,
        ..SparkleConfig::default()
    };

    Sparkle::new()
        .config(config)
        .mode(DriveMode::Motion)
        .sensitivity(6.0)
        .seed(0x5EED)
        .run()
}
