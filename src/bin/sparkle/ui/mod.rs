//! TUI module for sparkle
//!
//! Draws the sparkle field with half-block cells, a status bar, and a preview
//! of the wave the pixels follow. This thread is the only one touching the
//! engine: sensor readings arrive over a ring buffer and are folded in here.

mod field;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use sparkle_field::{Argb, DriveSignal, SparkleEngine};

use field::{argb_to_color, FieldView};
use status::{render_status, FrameStats};
use waveform::render_waveform;

/// Base colors cycled with `c`
const PALETTE: [Argb; 5] = [
    Argb::from_rgb(0x3366CC),
    Argb::from_rgb(0xCC3366),
    Argb::from_rgb(0x33AA66),
    Argb::from_rgb(0xE0B020),
    Argb::GRAY,
];

/// Host pixels moved per arrow key press during a touch drag
const DRAG_STEP: f32 = 25.0;

/// Highlights amount change per `h`/`H` press
const HIGHLIGHTS_STEP: f32 = 0.005;

/// UI application state
pub struct UiApp {
    engine: SparkleEngine,
    signal: DriveSignal,
    /// Ring buffer receiver for rotation readings
    sensor_rx: Consumer<[f32; 3]>,
    palette_index: usize,
    /// Simulated finger position in host pixels
    cursor: (f32, f32),
    /// Upsampled field, two host pixels per terminal cell vertically
    display: Vec<u32>,
    display_size: (usize, usize),
    stats: FrameStats,
    should_quit: bool,
}

impl UiApp {
    pub fn new(engine: SparkleEngine, signal: DriveSignal, sensor_rx: Consumer<[f32; 3]>) -> Self {
        let palette_index = PALETTE
            .iter()
            .position(|&c| c == engine.base_color())
            .unwrap_or(0);
        Self {
            engine,
            signal,
            sensor_rx,
            palette_index,
            cursor: (0.0, 0.0),
            display: Vec::new(),
            display_size: (0, 0),
            stats: FrameStats::default(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_sensor();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Drain the sensor queue, keeping only the latest reading
    fn poll_sensor(&mut self) {
        let mut latest = None;
        while let Ok(reading) = self.sensor_rx.pop() {
            latest = Some(reading);
        }
        if let Some(reading) = latest {
            self.signal.on_rotation(reading);
        }
        if let Some(drive) = self.signal.poll() {
            self.apply(drive);
        }
    }

    fn apply(&mut self, drive: f32) {
        match self.engine.modify(drive) {
            Ok(_) => self.stats.rendered += 1,
            // The engine already logged it; the previous frame stays up
            Err(_) => self.stats.skipped += 1,
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('m') => {
                let mode = self.signal.mode().next();
                self.signal.set_mode(mode);
            }
            KeyCode::Char('w') => {
                let waveform = self.engine.waveform().toggled();
                self.engine.set_waveform(waveform);
            }
            KeyCode::Char('t') => {
                let retro = !self.engine.retro_mode();
                self.engine.set_retro_mode(retro);
            }
            KeyCode::Char('r') => self.engine.reset(),
            KeyCode::Char('c') => {
                self.palette_index = (self.palette_index + 1) % PALETTE.len();
                self.engine.set_base_color(PALETTE[self.palette_index]);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let scale = self.engine.dot_scale() + 1;
                self.engine.set_dot_scale(scale);
            }
            KeyCode::Char('-') => {
                let scale = self.engine.dot_scale().saturating_sub(1);
                self.engine.set_dot_scale(scale);
            }
            KeyCode::Char('h') => {
                let amount = self.engine.highlights_amount() - HIGHLIGHTS_STEP;
                self.engine.set_highlights_amount(amount);
            }
            KeyCode::Char('H') => {
                let amount = self.engine.highlights_amount() + HIGHLIGHTS_STEP;
                self.engine.set_highlights_amount(amount);
            }
            KeyCode::Char('[') => self.change_sensitivity(-1.0),
            KeyCode::Char(']') => self.change_sensitivity(1.0),
            KeyCode::Left => self.drag(-DRAG_STEP, 0.0),
            KeyCode::Right => self.drag(DRAG_STEP, 0.0),
            KeyCode::Up => self.drag(0.0, -DRAG_STEP),
            KeyCode::Down => self.drag(0.0, DRAG_STEP),
            KeyCode::Char(' ') => {
                let (x, y) = self.cursor;
                self.signal.touch_up(x, y);
            }
            _ => {}
        }
    }

    fn change_sensitivity(&mut self, step: f32) {
        let sensitivity = (self.signal.sensitivity() + step).max(1.0);
        let drive = self.signal.set_sensitivity(sensitivity);
        self.apply(drive);
    }

    /// Move the simulated finger, starting a drag from the field center if needed
    fn drag(&mut self, dx: f32, dy: f32) {
        if !self.signal.mode().is_touch() {
            return;
        }
        if !self.signal.is_dragging() {
            let (width, height) = self.engine.bounds();
            self.cursor = (width as f32 / 2.0, height as f32 / 2.0);
            self.signal.touch_down(self.cursor.0, self.cursor.1);
        }
        self.cursor.0 += dx;
        self.cursor.1 += dy;
        if let Some(drive) = self.signal.touch_move(self.cursor.0, self.cursor.1) {
            self.apply(drive);
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(6),    // Field
                Constraint::Length(9), // Wave preview
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        render_status(frame, chunks[0], &self.engine, &self.signal, &self.stats);

        let field_block = Block::default()
            .title(" Field ")
            .title_style(Style::default().fg(argb_to_color(self.engine.base_color())))
            .borders(Borders::ALL);
        let field_inner = field_block.inner(chunks[1]);
        frame.render_widget(field_block, chunks[1]);
        self.render_field(frame, field_inner);

        render_waveform(frame, chunks[2], &self.engine, self.signal.sensitivity());

        let help = Paragraph::new(
            " [Q] Quit  [M] Mode  [W] Wave  [T] Retro  [R] Reset  [C] Color  [+/-] Dots  [h/H] Highlights  [[/]] Sensitivity  [Arrows] Drag  [Space] Lift",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }

    fn render_field(&mut self, frame: &mut Frame, area: Rect) {
        // One terminal cell shows two host pixels stacked vertically
        let size = (area.width as usize, area.height as usize * 2);
        self.engine.set_bounds(size.0 as u32, size.1 as u32);

        if self.engine.take_redraw() || self.display_size != size {
            self.engine.raster().upsample_into(
                size.0,
                size.1,
                self.engine.sampling(),
                &mut self.display,
            );
            self.display_size = size;
        }

        frame.render_widget(FieldView::new(&self.display, size.0), area);
    }
}
