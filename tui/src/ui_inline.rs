//! Inline TUI mode - fixed-height viewport below the shell prompt.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Clear,
};

use gatecheck_engine::App;

use crate::{draw_body, draw_status_bar, glyphs, palette};

/// Rows reserved for the inline viewport: the check list, the submit
/// control, a banner line and the status bar.
pub const INLINE_VIEWPORT_HEIGHT: u16 = 12;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    draw_body(frame, app, chunks[0], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[1], &palette, &glyphs);
}
