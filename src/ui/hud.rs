use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::state::AppState, scene::MotionSetting, ui::color::ColorCapability};

const KEY_HINT: &str = "q quit  space pause  r regrow  m motion  h hud";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudStatus {
    pub fps: f32,
    pub target_fps: u8,
    pub motion: MotionSetting,
    pub viewport: (f32, f32),
    pub mobile: bool,
    pub paused: bool,
    pub color: ColorCapability,
}

impl HudStatus {
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        let (viewport, mobile, paused) = state.engine().map_or(((0.0, 0.0), false, false), |engine| {
            let layout = engine.scene().layout();
            ((layout.width, layout.height), layout.is_mobile, engine.is_paused())
        });
        Self {
            fps: state.fps_estimate,
            target_fps: state.settings.fps,
            motion: state.settings.motion,
            viewport,
            mobile,
            paused,
            color: state.color,
        }
    }
}

#[must_use]
pub fn hud_line(status: &HudStatus) -> String {
    let mut line = format!(
        "{:>4.1}/{} fps | motion {} | {:.0}x{:.0} {} | color {}",
        status.fps,
        status.target_fps,
        status.motion.label(),
        status.viewport.0,
        status.viewport.1,
        if status.mobile { "mobile" } else { "desktop" },
        status.color.label(),
    );
    if status.paused {
        line.push_str(" | paused");
    }
    line
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height == 0 {
        return;
    }
    let row = Rect { height: 1, ..area };
    let status = hud_line(&HudStatus::from_state(state));
    let hint_fits = status.len() + KEY_HINT.len() + 4 <= usize::from(row.width);
    let mut spans = vec![Span::raw(format!(" {status} "))];
    if hint_fits {
        let pad = usize::from(row.width) - status.len() - KEY_HINT.len() - 3;
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(KEY_HINT, Style::default().fg(Color::Gray)));
    }
    let hud = Paragraph::new(Line::from(spans)).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(hud, row);
}
