use sparkle_field::lightness::{normalize, shift};
use sparkle_field::{
    Argb, ConfigError, FrameStatus, Hsl, SparkleConfig, SparkleEngine, WaveFunction, Waveform,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn grey_engine(seed: u64) -> SparkleEngine {
    let mut engine = SparkleEngine::new(seed);
    engine.set_base_color(Argb::from_rgb(0x808080));
    engine
}

fn channels_close(a: u32, b: u32) -> bool {
    let (a, b) = (Argb(a), Argb(b));
    a.alpha() == b.alpha()
        && a.red().abs_diff(b.red()) <= 1
        && a.green().abs_diff(b.green()) <= 1
        && a.blue().abs_diff(b.blue()) <= 1
}

#[test]
fn grey_four_by_four() {
    init_tracing();
    let mut engine = grey_engine(1);
    engine.set_bounds(4, 4);

    assert_eq!(engine.raster().width(), 2);
    assert_eq!(engine.raster().height(), 2);
    assert_eq!(engine.raster().pixels().len(), 4);

    let l = 128.0 / 255.0;
    assert!((engine.min_lightness() - (l - 0.15)).abs() < 1e-5);
    assert!((engine.max_lightness() - (l + 0.15)).abs() < 1e-5);

    assert_eq!(engine.modify(0.0), Ok(FrameStatus::Rendered));
    for &pixel in engine.raster().pixels() {
        let lightness = Hsl::from_argb(Argb(pixel)).lightness;
        assert!(lightness.is_finite());
        // Channel rounding moves lightness by at most half a step
        assert!(lightness >= engine.min_lightness() - 0.005);
        assert!(lightness <= engine.max_lightness() + 0.005);
    }
}

#[test]
fn zero_drive_reproduces_initial_output() {
    for waveform in Waveform::ALL {
        let mut engine = grey_engine(2);
        engine.set_waveform(waveform);
        engine.set_highlights_amount(0.0);
        engine.set_bounds(120, 80);
        let base = Hsl::from_argb(engine.base_color());
        let initial: Vec<u32> = engine
            .field()
            .base_lightness()
            .iter()
            .map(|&l| base.with_lightness(l).to_argb(0xFF).0)
            .collect();

        engine.modify(0.0).unwrap();
        for (i, (&a, &b)) in initial.iter().zip(engine.raster().pixels()).enumerate() {
            assert!(
                channels_close(a, b),
                "{}: pixel {i} moved from {a:08X} to {b:08X}",
                waveform.name()
            );
        }
    }
}

#[test]
fn frames_stay_inside_the_band() {
    let mut engine = grey_engine(3);
    engine.set_highlights_lightness_factor(0.0);
    engine.set_bounds(60, 40);

    for step in 0..50 {
        engine.modify(step as f32 * 0.37 - 4.0).unwrap();
        for &pixel in engine.raster().pixels() {
            let lightness = Hsl::from_argb(Argb(pixel)).lightness;
            assert!(lightness >= engine.min_lightness() - 0.005);
            assert!(lightness <= engine.max_lightness() + 0.005);
        }
    }
}

#[test]
fn same_seed_same_frames() {
    let drives = [0.0, 0.4, 1.1, 2.6, -0.3, 5.9, 6.2];
    let run = |seed| {
        let mut engine = grey_engine(seed);
        engine.set_highlights_amount(0.05);
        engine.set_highlights_replacement_speed_factor(2.0);
        engine.set_bounds(50, 30);
        drives
            .iter()
            .map(|&drive| {
                engine.modify(drive).unwrap();
                (engine.raster().pixels().to_vec(), engine.highlights().members().to_vec())
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(99), run(99));
    assert_ne!(run(99), run(100));
}

#[test]
fn highlight_count_survives_churn() {
    let mut engine = grey_engine(4);
    engine.set_highlights_amount(0.08);
    engine.set_highlights_variability(1.0);
    engine.set_highlights_replacement_speed_factor(10.0);
    engine.set_bounds(100, 50);
    let expected = engine.highlights().len();
    assert_eq!(expected, 100); // round(50 * 25 * 0.08)

    for step in 0..200 {
        engine.modify(step as f32 * 0.05).unwrap();
        assert_eq!(engine.highlights().len(), expected);
        assert_eq!(
            engine.highlights().mask().iter().filter(|&&m| m).count(),
            expected
        );
    }
}

#[test]
fn invalid_variance_is_rejected_without_side_effects() {
    let mut engine = grey_engine(5);
    engine.set_bounds(20, 20);
    engine.set_lightness_variance_up(0.0).unwrap();
    let (min, max) = (engine.min_lightness(), engine.max_lightness());
    let field = engine.field().base_lightness().to_vec();

    let err = engine.set_lightness_variance_down(0.0);
    assert!(matches!(err, Err(ConfigError::InvalidConfiguration { .. })));
    assert_eq!(engine.min_lightness(), min);
    assert_eq!(engine.max_lightness(), max);
    assert_eq!(engine.lightness_variance_down(), 0.15);
    assert_eq!(engine.field().base_lightness(), &field[..]);
}

#[test]
fn variances_are_clamped() {
    let mut engine = grey_engine(6);
    engine.set_lightness_variance_up(4.0).unwrap();
    engine.set_lightness_variance_down(-2.0).unwrap();
    assert_eq!(engine.lightness_variance_up(), 1.0);
    assert_eq!(engine.lightness_variance_down(), 0.0);
    assert!(engine.min_lightness() < engine.max_lightness());
}

#[test]
fn zero_area_bounds_are_a_noop() {
    let mut engine = grey_engine(7);
    engine.set_bounds(1, 500); // 1 / dot_scale = 0 columns
    assert!(engine.raster().is_empty());
    assert_eq!(engine.modify(3.0), Ok(FrameStatus::Idle));
    assert_eq!(engine.modify(f32::NAN), Ok(FrameStatus::Idle));
    assert!(!engine.needs_redraw());
}

#[test]
fn non_finite_drive_keeps_previous_frame() {
    let mut engine = grey_engine(8);
    engine.set_bounds(20, 20);
    engine.modify(0.7).unwrap();
    let frame = engine.raster().pixels().to_vec();

    assert!(engine.modify(f32::INFINITY).is_err());
    assert_eq!(engine.raster().pixels(), &frame[..]);

    // Animation picks up again with the next valid value
    assert_eq!(engine.modify(0.8), Ok(FrameStatus::Rendered));
}

#[test]
fn cascade_rebuilds_field() {
    let mut engine = grey_engine(9);
    engine.set_bounds(40, 40);
    let before = engine.field().base_lightness().to_vec();

    engine.set_lightness_variance_up(0.3).unwrap();
    assert_ne!(engine.field().base_lightness(), &before[..]);
    for &l in engine.field().base_lightness() {
        assert!(l >= engine.min_lightness() - 1e-6 && l <= engine.max_lightness() + 1e-6);
    }
}

#[test]
fn same_bounds_do_not_rebuild() {
    let mut engine = grey_engine(10);
    engine.set_bounds(40, 40);
    let before = engine.field().base_lightness().to_vec();
    engine.set_bounds(40, 40);
    assert_eq!(engine.field().base_lightness(), &before[..]);
}

#[test]
fn alpha_is_preserved() {
    let mut engine = SparkleEngine::new(11);
    engine.set_base_color(Argb(0x8033_66CC));
    engine.set_bounds(16, 16);
    engine.modify(1.3).unwrap();
    assert!(engine
        .raster()
        .pixels()
        .iter()
        .all(|&c| Argb(c).alpha() == 0x80));
}

#[test]
fn config_presets_apply() {
    let config = SparkleConfig {
        base_color: Argb::from_rgb(0x3366CC),
        dot_scale: 4,
        highlights_amount: 0.1,
        retro_mode: false,
        ..SparkleConfig::default()
    };
    let mut engine = SparkleEngine::with_config(config, 12).unwrap();
    engine.set_bounds(40, 40);
    assert_eq!(engine.raster().width(), 10);
    assert_eq!(engine.highlights().len(), 10);
    assert_eq!(engine.sampling(), sparkle_field::Sampling::Smooth);
    assert_eq!(engine.base_color(), Argb::from_rgb(0x3366CC));
}

#[test]
fn highlighted_pixels_follow_wider_band() {
    init_tracing();
    let mut engine = grey_engine(13);
    engine.set_highlights_amount(0.1);
    engine.set_highlights_lightness_factor(0.6);
    engine.set_highlights_sensitivity(2.5);
    engine.set_bounds(100, 50);
    assert_eq!(engine.highlights().len(), 125);

    let base = Hsl::from_argb(engine.base_color());
    let (min, max) = (engine.min_lightness(), engine.max_lightness());
    let highlight_delta = max + (1.0 - max) * 0.6 - min;
    let mut above_band = 0;

    // drive * replacement factor stays below 1, so no churn moves the members
    for drive in [0.3f32, 0.7, 1.1, 1.9] {
        engine.modify(drive).unwrap();
        let wave = engine.wave_function();
        for &i in engine.highlights().members() {
            let dm = engine.field().direction_modifiers()[i];
            let direction = dm.signum();
            let speed = dm.abs();
            let source = (engine.field().base_lightness()[i] * speed) % highlight_delta + min;
            let normalized =
                (normalize(source, min, highlight_delta) * direction).clamp(-1.0, 1.0);
            let raw = wave.value(speed * drive * 2.5 + wave.angle(normalized)) * direction;
            let expected = base
                .with_lightness(shift(raw, min, highlight_delta))
                .to_argb(0xFF)
                .0;

            let actual = engine.raster().pixels()[i];
            assert!(
                channels_close(expected, actual),
                "drive {drive}: highlight {i} is {actual:08X}, expected {expected:08X}"
            );
            if Hsl::from_argb(Argb(actual)).lightness > max + 0.005 {
                above_band += 1;
            }
        }
    }
    assert!(above_band > 0, "no highlight left the regular band");
}

#[test]
fn tiny_variance_still_renders() {
    let mut engine = grey_engine(14);
    engine.set_bounds(40, 40);
    engine.set_lightness_variance_up(0.0).unwrap();
    engine.set_lightness_variance_down(1e-8).unwrap();
    assert!(engine.max_lightness() > engine.min_lightness());

    assert_eq!(engine.modify(0.5), Ok(FrameStatus::Rendered));
    assert_eq!(engine.modify(2.5), Ok(FrameStatus::Rendered));
}
