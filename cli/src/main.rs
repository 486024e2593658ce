//! gatecheck CLI - binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The CLI bridges [`gatecheck_engine`] (application state) and
//! [`gatecheck_tui`] (rendering), with RAII terminal management that restores
//! the terminal on every exit path.
//!
//! ```text
//! main() -> GatecheckConfig::load() -> App::new(source) -> TerminalSession::new(mode)
//!                                                              |
//!                                                              v
//!                                                         run_app(draw fn)
//! ```
//!
//! # Event Loop
//!
//! Both full-screen and inline modes use a fixed 8ms render cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`gatecheck_tui::InputPump`])
//! 3. Apply finished network work (`app.tick()`)
//! 4. Render frame

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{TerminalOptions, Viewport, prelude::*};
use std::{
    fs::{self, OpenOptions},
    io::{Stdout, Write, stdout},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use gatecheck_engine::{App, GatecheckConfig};
use gatecheck_tui::{INLINE_VIEWPORT_HEIGHT, InputPump, draw, draw_inline, handle_events};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than write over the TUI.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // ~/.gatecheck/logs/gatecheck.log
    if let Some(config_path) = GatecheckConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("gatecheck.log"));
    }

    candidates.push(PathBuf::from(".gatecheck").join("logs").join("gatecheck.log"));

    candidates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiMode {
    Full,
    Inline,
}

impl UiMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inline" => Some(UiMode::Inline),
            "full" | "fullscreen" => Some(UiMode::Full),
            other => {
                tracing::warn!("Unknown tui mode: {other}");
                None
            }
        }
    }

    fn from_config(config: &GatecheckConfig) -> Self {
        config
            .tui_mode()
            .as_deref()
            .and_then(Self::parse)
            .unwrap_or(UiMode::Full)
    }
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Raw mode is always on; the alternate screen is used in full mode only and
/// mouse capture only when enabled in config. Everything is undone on drop,
/// including after a panic or an early return.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    use_alternate_screen: bool,
    mouse_capture: bool,
}

impl TerminalSession {
    fn new(mode: UiMode, mouse_capture: bool) -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        let use_alternate_screen = matches!(mode, UiMode::Full);
        if use_alternate_screen && let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        if mouse_capture && let Err(err) = execute!(out, EnableMouseCapture) {
            restore(&mut out, use_alternate_screen, false);
            return Err(err.into());
        }

        let backend = CrosstermBackend::new(out);
        let terminal = match mode {
            UiMode::Full => Terminal::new(backend),
            UiMode::Inline => Terminal::with_options(
                backend,
                TerminalOptions {
                    viewport: Viewport::Inline(INLINE_VIEWPORT_HEIGHT),
                },
            ),
        };
        let terminal = match terminal {
            Ok(t) => t,
            Err(err) => {
                restore(&mut stdout(), use_alternate_screen, mouse_capture);
                return Err(err.into());
            }
        };

        Ok(Self {
            terminal,
            use_alternate_screen,
            mouse_capture,
        })
    }
}

fn restore<W: Write>(out: &mut W, alternate_screen: bool, mouse_capture: bool) {
    let _ = disable_raw_mode();
    if mouse_capture {
        let _ = execute!(out, DisableMouseCapture);
    }
    if alternate_screen {
        let _ = execute!(out, LeaveAlternateScreen);
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if !self.use_alternate_screen {
            let _ = self.terminal.clear();
        }
        restore(
            self.terminal.backend_mut(),
            self.use_alternate_screen,
            self.mouse_capture,
        );
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match GatecheckConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Using default configuration: {e}");
            GatecheckConfig::default()
        }
    };
    let ui_mode = UiMode::from_config(&config);
    let source = config
        .check_source()
        .context("invalid check repository configuration")?;

    let mut app = App::new(source, config.ui_options());

    let result = {
        let mut session = TerminalSession::new(ui_mode, config.mouse_capture())?;
        match ui_mode {
            UiMode::Full => run_app(&mut session.terminal, &mut app, draw).await,
            UiMode::Inline => run_app(&mut session.terminal, &mut app, draw_inline).await,
        }
    };

    if let Err(err) = &result {
        tracing::error!("Exiting after error: {err:#}");
    }
    result
}

const FRAME_DURATION: Duration = Duration::from_millis(8);

async fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    render: fn(&mut Frame, &App),
) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: Result<()> = loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        match handle_events(app, &mut input) {
            Ok(true) => break Ok(()),
            Ok(false) => {}
            Err(e) => break Err(e),
        }

        app.tick();

        if let Err(e) = terminal.draw(|frame| render(frame, app)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
