//! Wave preview widget - the lightness curve pixels follow

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use sparkle_field::{SparkleEngine, WavePreview};

use super::field::argb_to_color;

/// Points sampled across the preview
const PREVIEW_SAMPLES: usize = 256;

/// Render the wave preview over the engine's lightness band
pub fn render_waveform(frame: &mut Frame, area: Rect, engine: &SparkleEngine, sensitivity: f32) {
    let block = Block::default()
        .title(format!(" Wave: {} ", engine.waveform().name()))
        .borders(Borders::ALL);

    let preview = WavePreview::for_range(
        engine.base_color(),
        engine.lightness_variance_up(),
        engine.lightness_variance_down(),
        sensitivity,
    );
    let data = preview.points(engine.wave_function(), PREVIEW_SAMPLES);

    let (min, max) = (engine.min_lightness() as f64, engine.max_lightness() as f64);
    let band_min = [(0.0, min), (1.0, min)];
    let band_max = [(0.0, max), (1.0, max)];

    let band_style = Style::default().fg(Color::DarkGray);
    let datasets = vec![
        Dataset::default()
            .graph_type(GraphType::Line)
            .style(band_style)
            .data(&band_min),
        Dataset::default()
            .graph_type(GraphType::Line)
            .style(band_style)
            .data(&band_max),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(argb_to_color(engine.base_color())))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
