//! TUI rendering for gatecheck using ratatui.

mod input;
mod theme;
mod ui_inline;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};
pub use ui_inline::{INLINE_VIEWPORT_HEIGHT, draw as draw_inline};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use gatecheck_engine::{App, FormState, Phase};
use gatecheck_types::{Answer, FocusTarget, GateStatus, display_line};

pub const LOADING_TEXT: &str = "Loading...";
pub const THANK_YOU_TEXT: &str = "Thank you for submitting the form!";
const SUBMIT_LABEL: &str = "[ Submit ]";

const ASCII_BORDER: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let bg_block = Block::default().style(Style::default().bg(palette.bg));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let block = Block::default().borders(Borders::ALL);
    let block = if options.ascii_only {
        block.border_set(ASCII_BORDER)
    } else {
        block.border_type(BorderType::Rounded)
    };
    let block = block
        .border_style(Style::default().fg(palette.border))
        .padding(Padding::horizontal(1))
        .title(Line::from(Span::styled(
            " Verification checks ",
            styles::title(&palette),
        )));
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    draw_body(frame, app, inner, &palette, &glyphs);
    draw_status_bar(frame, app, chunks[1], &palette, &glyphs);
}

pub(crate) fn draw_body(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let lines = match app.phase() {
        Phase::Loading => vec![Line::from(vec![
            Span::styled(
                spinner_frame(app.tick_count(), app.ui_options()),
                Style::default().fg(palette.accent),
            ),
            Span::raw(" "),
            Span::styled(LOADING_TEXT, Style::default().fg(palette.text_muted)),
        ])],
        Phase::LoadFailed { message } => vec![
            Line::from(Span::styled(
                format!("Error: {}", display_line(message)),
                styles::error(palette),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to try again.",
                styles::key_hint(palette),
            )),
        ],
        Phase::Form(form) => {
            draw_form(frame, form, app, area, palette, glyphs);
            return;
        }
        Phase::Submitted(_) => vec![Line::from(Span::styled(
            THANK_YOU_TEXT,
            Style::default()
                .fg(palette.yes)
                .add_modifier(Modifier::BOLD),
        ))],
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_form(
    frame: &mut Frame,
    form: &FormState,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let (mut lines, mut focus_line) = form_lines(form, app, area.width, palette, glyphs);
    let max_scroll = (lines.len() as u16).saturating_sub(area.height);

    // Overflowing content gives up its last column to the scrollbar.
    let content = if max_scroll > 0 {
        let content = Rect {
            width: area.width.saturating_sub(1),
            ..area
        };
        (lines, focus_line) = form_lines(form, app, content.width, palette, glyphs);
        content
    } else {
        area
    };

    let scroll_offset = scroll_offset_for(focus_line, area.height).min(max_scroll);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset, 0));
    frame.render_widget(paragraph, content);

    if max_scroll > 0 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some(glyphs.arrow_up))
            .end_symbol(Some(glyphs.arrow_down))
            .track_symbol(Some(glyphs.track))
            .thumb_symbol(glyphs.thumb)
            .style(Style::default().fg(palette.text_muted));
        let mut scrollbar_state = ScrollbarState::new(usize::from(max_scroll))
            .position(usize::from(scroll_offset));
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

/// Smallest offset from the top that keeps `line` inside `height` rows.
fn scroll_offset_for(line: usize, height: u16) -> u16 {
    (line + 1).saturating_sub(usize::from(height)) as u16
}

/// Form rows plus the index of the row that must stay visible.
fn form_lines(
    form: &FormState,
    app: &App,
    width: u16,
    palette: &Palette,
    glyphs: &Glyphs,
) -> (Vec<Line<'static>>, usize) {
    let session = form.session();
    let focus = session.focus();
    let mut lines = Vec::with_capacity(session.sequence().len() + 4);
    let mut focus_line = 0;

    for (index, (check, status)) in session
        .sequence()
        .iter()
        .zip(session.statuses())
        .enumerate()
    {
        let focused = focus == Some(FocusTarget::Check(index));
        if focused {
            focus_line = lines.len();
        }
        let answer = session.answer_at(index);
        lines.push(check_line(
            &check.description,
            status,
            answer,
            focused,
            width,
            palette,
            glyphs,
        ));
    }

    if session.sequence().is_empty() {
        lines.push(Line::from(Span::styled(
            "No checks to answer.",
            Style::default().fg(palette.text_muted),
        )));
    }

    lines.push(Line::from(""));

    let submit_focused = focus == Some(FocusTarget::Submit);
    let submit_style = if session.can_submit() {
        styles::submit_enabled(palette)
    } else {
        styles::submit_disabled(palette)
    };
    let mut submit = vec![
        pointer_span(submit_focused, palette, glyphs),
        Span::raw(" "),
        Span::styled(SUBMIT_LABEL, submit_style),
    ];
    if form.is_submitting() {
        submit.push(Span::raw("  "));
        submit.push(Span::styled(
            format!(
                "{} Submitting...",
                spinner_frame(app.tick_count(), app.ui_options())
            ),
            Style::default().fg(palette.accent),
        ));
    }
    lines.push(Line::from(submit));

    if let Some(message) = form.submit_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Error: {}", display_line(message)),
            styles::error(palette),
        )));
    }

    // The banner belongs to the submit control, keep it on screen too.
    if submit_focused {
        focus_line = lines.len() - 1;
    }

    (lines, focus_line)
}

fn pointer_span(focused: bool, palette: &Palette, glyphs: &Glyphs) -> Span<'static> {
    if focused {
        Span::styled(glyphs.pointer, Style::default().fg(palette.accent))
    } else {
        Span::raw(" ".repeat(glyphs.pointer.width()))
    }
}

fn check_line(
    description: &str,
    status: GateStatus,
    answer: Option<Answer>,
    focused: bool,
    width: u16,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Line<'static> {
    let (marker, text_style) = match status {
        GateStatus::Completed => (glyphs.completed, Style::default().fg(palette.text)),
        GateStatus::Active => (
            glyphs.active,
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        GateStatus::Disabled => (glyphs.locked, Style::default().fg(palette.text_disabled)),
    };

    let radio = |choice: Answer| {
        let selected = answer == Some(choice);
        let glyph = if selected {
            glyphs.radio_on
        } else {
            glyphs.radio_off
        };
        let style = match (selected, choice) {
            _ if status == GateStatus::Disabled => Style::default().fg(palette.text_disabled),
            (true, Answer::Yes) => Style::default().fg(palette.yes),
            (true, Answer::No) => Style::default().fg(palette.no),
            (false, _) => Style::default().fg(palette.text_muted),
        };
        (glyph, style)
    };
    let (yes_glyph, yes_style) = radio(Answer::Yes);
    let (no_glyph, no_style) = radio(Answer::No);

    let prefix_width = glyphs.pointer.width() + 1 + marker.width() + 1;
    let suffix_width = 2 + yes_glyph.width() + " Yes  ".len() + no_glyph.width() + " No".len();
    let budget = usize::from(width).saturating_sub(prefix_width + suffix_width);
    let description = fit_to_width(&display_line(description), budget, glyphs.ellipsis);

    let line = Line::from(vec![
        pointer_span(focused, palette, glyphs),
        Span::raw(" "),
        Span::styled(marker, text_style),
        Span::raw(" "),
        Span::styled(description, text_style),
        Span::raw("  "),
        Span::styled(yes_glyph, yes_style),
        Span::styled(" Yes  ", yes_style),
        Span::styled(no_glyph, no_style),
        Span::styled(" No", no_style),
    ]);

    if focused {
        line.style(styles::focused_row(palette))
    } else {
        line
    }
}

/// Truncate with `ellipsis` or pad with spaces to exactly `width` columns.
fn fit_to_width(raw: &str, width: usize, ellipsis: &str) -> String {
    let current = raw.width();
    if current <= width {
        return format!("{raw}{}", " ".repeat(width - current));
    }
    if width == 0 {
        return String::new();
    }

    let keep = width.saturating_sub(ellipsis.width());
    let mut out = String::new();
    let mut used = 0;
    for c in raw.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > keep {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(ellipsis);
    used += ellipsis.width();
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

pub(crate) fn draw_status_bar(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let sep = format!(" {} ", glyphs.separator);
    let mut left = vec![Span::raw(" ")];
    if let Some(message) = app.status_message() {
        left.push(Span::styled(
            display_line(message).into_owned(),
            Style::default().fg(palette.no),
        ));
    } else {
        let hints: &[(&str, &str)] = match app.phase() {
            Phase::Loading => &[("q", "quit")],
            Phase::LoadFailed { .. } => &[("r", "retry"), ("q", "quit")],
            Phase::Form(_) => &[
                ("j/k", "move"),
                ("y/n", "answer"),
                ("Enter", "submit"),
                ("q", "quit"),
            ],
            Phase::Submitted(_) => &[("Enter", "quit")],
        };
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                left.push(Span::styled(sep.clone(), styles::key_hint(palette)));
            }
            left.push(Span::styled(*key, styles::key_highlight(palette)));
            left.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
        }
    }

    let right = match app.form() {
        Some(form) => format!(
            "{}/{} answered{sep}{}",
            form.session().answered_count(),
            form.session().sequence().len(),
            app.source_label()
        ),
        None => app.source_label(),
    };

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(right.width() as u16 + 1)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(left)),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            right,
            Style::default().fg(palette.text_muted),
        )))
        .alignment(Alignment::Right),
        halves[1],
    );
}
