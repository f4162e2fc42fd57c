pub mod color;
pub mod hud;

use glam::Vec2;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};

use crate::{app::state::AppState, paint::raster::PixelCanvas};
use color::{ColorCapability, quantize};

/// Logical units per terminal cell; each cell is one device pixel by two.
pub const CELL_WIDTH: f32 = 8.0;
pub const CELL_HEIGHT: f32 = 16.0;
const DEVICE_SCALE: f32 = 1.0 / CELL_WIDTH;
const UPPER_HALF: &str = "▀";

#[must_use]
pub fn viewport_for(cols: u16, rows: u16) -> (Vec2, f32) {
    (
        Vec2::new(f32::from(cols) * CELL_WIDTH, f32::from(rows) * CELL_HEIGHT),
        DEVICE_SCALE,
    )
}

pub struct SkyWidget<'a> {
    canvas: &'a PixelCanvas,
    capability: ColorCapability,
}

impl<'a> SkyWidget<'a> {
    #[must_use]
    pub fn new(canvas: &'a PixelCanvas, capability: ColorCapability) -> Self {
        Self { canvas, capability }
    }
}

impl Widget for SkyWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let black = (0, 0, 0);
        for row in 0..area.height {
            for col in 0..area.width {
                let x = usize::from(col);
                let y = usize::from(row) * 2;
                let upper = self.canvas.rgb(x, y).unwrap_or(black);
                let lower = self.canvas.rgb(x, y + 1).unwrap_or(black);
                buf[(area.x + col, area.y + row)]
                    .set_symbol(UPPER_HALF)
                    .set_fg(quantize(upper, self.capability))
                    .set_bg(quantize(lower, self.capability));
            }
        }
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    match state.engine() {
        Some(engine) => {
            frame.render_widget(SkyWidget::new(engine.surface(), state.color), area);
        }
        None => {
            let waiting = Paragraph::new("waiting for the terminal to report its size")
                .style(Style::default().fg(Color::DarkGray).bg(Color::Black));
            frame.render_widget(waiting, area);
        }
    }
    if state.settings.hud {
        hud::render(frame, area, state);
    }
}
