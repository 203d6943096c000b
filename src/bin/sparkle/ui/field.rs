//! Field widget - the upsampled raster as half-block cells

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use sparkle_field::Argb;

/// Draws two display pixels per cell: top as foreground, bottom as background.
pub struct FieldView<'a> {
    pixels: &'a [u32],
    width: usize,
}

impl<'a> FieldView<'a> {
    pub fn new(pixels: &'a [u32], width: usize) -> Self {
        Self { pixels, width }
    }
}

impl Widget for FieldView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.width == 0 {
            return;
        }
        let rows = self.pixels.len() / self.width;
        let cols = area.width.min(self.width as u16);

        for cy in 0..area.height {
            let top = cy as usize * 2;
            if top + 1 >= rows {
                break;
            }
            for cx in 0..cols {
                let x = cx as usize;
                let upper = Argb(self.pixels[top * self.width + x]);
                let lower = Argb(self.pixels[(top + 1) * self.width + x]);
                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_symbol("▀")
                        .set_fg(argb_to_color(upper))
                        .set_bg(argb_to_color(lower));
                }
            }
        }
    }
}

/// Terminal color for an ARGB pixel composited over black.
pub fn argb_to_color(color: Argb) -> Color {
    let alpha = color.alpha() as u16;
    let over_black = |c: u8| ((c as u16 * alpha + 127) / 255) as u8;
    Color::Rgb(
        over_black(color.red()),
        over_black(color.green()),
        over_black(color.blue()),
    )
}
