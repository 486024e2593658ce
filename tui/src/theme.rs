//! Color theme and glyphs for the gatecheck TUI.
//!
//! A muted slate palette by default, with a high-contrast override that sticks
//! to the 16 basic terminal colors.

use ratatui::style::{Color, Modifier, Style};

use gatecheck_types::UiOptions;

mod colors {
    use super::Color;

    pub const BG: Color = Color::Rgb(24, 26, 33);
    pub const BG_FOCUS: Color = Color::Rgb(44, 49, 62);
    pub const BORDER: Color = Color::Rgb(76, 84, 104);

    pub const TEXT: Color = Color::Rgb(216, 222, 233);
    pub const TEXT_MUTED: Color = Color::Rgb(128, 136, 153);
    pub const TEXT_DISABLED: Color = Color::Rgb(86, 92, 108);

    pub const ACCENT: Color = Color::Rgb(136, 192, 208);
    pub const YES: Color = Color::Rgb(163, 190, 140);
    pub const NO: Color = Color::Rgb(235, 203, 139);
    pub const ERROR: Color = Color::Rgb(232, 110, 110);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub bg_focus: Color,
    pub border: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_disabled: Color,
    pub accent: Color,
    pub yes: Color,
    pub no: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg: colors::BG,
            bg_focus: colors::BG_FOCUS,
            border: colors::BORDER,
            text: colors::TEXT,
            text_muted: colors::TEXT_MUTED,
            text_disabled: colors::TEXT_DISABLED,
            accent: colors::ACCENT,
            yes: colors::YES,
            no: colors::NO,
            error: colors::ERROR,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            bg_focus: Color::DarkGray,
            border: Color::White,
            text: Color::White,
            text_muted: Color::Gray,
            text_disabled: Color::DarkGray,
            accent: Color::Cyan,
            yes: Color::Green,
            no: Color::Yellow,
            error: Color::Red,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    /// Marks the focused row.
    pub pointer: &'static str,
    pub radio_on: &'static str,
    pub radio_off: &'static str,
    pub completed: &'static str,
    pub active: &'static str,
    pub locked: &'static str,
    pub separator: &'static str,
    /// Appended to truncated text.
    pub ellipsis: &'static str,
    pub arrow_up: &'static str,
    pub arrow_down: &'static str,
    pub track: &'static str,
    pub thumb: &'static str,
    pub spinner_frames: &'static [&'static str],
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAMES_ASCII: &[&str] = &["|", "/", "-", "\\"];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            pointer: ">",
            radio_on: "(*)",
            radio_off: "( )",
            completed: "+",
            active: "*",
            locked: "-",
            separator: "|",
            ellipsis: "~",
            arrow_up: "^",
            arrow_down: "v",
            track: "|",
            thumb: "#",
            spinner_frames: SPINNER_FRAMES_ASCII,
        }
    } else {
        Glyphs {
            pointer: "▸",
            radio_on: "◉",
            radio_off: "○",
            completed: "✓",
            active: "●",
            locked: "·",
            separator: "│",
            ellipsis: "…",
            arrow_up: "▲",
            arrow_down: "▼",
            track: "│",
            thumb: "█",
            spinner_frames: SPINNER_FRAMES,
        }
    }
}

#[must_use]
pub fn spinner_frame(tick: usize, options: UiOptions) -> &'static str {
    let frames = glyphs(options).spinner_frames;
    frames[tick % frames.len()]
}

pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused_row(palette: &Palette) -> Style {
        Style::default().bg(palette.bg_focus)
    }

    #[must_use]
    pub fn submit_enabled(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg)
            .bg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn submit_disabled(palette: &Palette) -> Style {
        Style::default().fg(palette.text_disabled)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn error(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.error)
            .add_modifier(Modifier::BOLD)
    }
}
