//! Status bar widget - drive mode, wave, color, band and frame counters

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use sparkle_field::{DriveSignal, SparkleEngine};

/// Frame counters kept by the UI
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameStats {
    pub rendered: u64,
    pub skipped: u64,
}

/// Render the status bar
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    engine: &SparkleEngine,
    signal: &DriveSignal,
    stats: &FrameStats,
) {
    let block = Block::default().title(" sparkle ").borders(Borders::ALL);

    let (width, height) = (engine.raster().width(), engine.raster().height());
    let drag = if signal.is_dragging() { " (dragging)" } else { "" };

    let line = Line::from(vec![
        Span::styled(
            format!(" {}{}  ", signal.mode().name(), drag),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{}  ", engine.waveform().name()),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("#{:08X}  ", engine.base_color().0),
            Style::default().fg(super::field::argb_to_color(engine.base_color())),
        ),
        Span::styled(
            format!(
                "L {:.3}..{:.3}  ",
                engine.min_lightness(),
                engine.max_lightness()
            ),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "{}x{} @{}  {} hl  ",
                width,
                height,
                engine.dot_scale(),
                engine.highlights().len()
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "{}  ",
                if engine.retro_mode() { "retro" } else { "smooth" }
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "drive {:+.2} x{:.0}  frames {} skipped {}",
                engine.last_drive(),
                signal.sensitivity(),
                stats.rendered,
                stats.skipped
            ),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
