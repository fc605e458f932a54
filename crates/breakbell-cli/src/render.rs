//! Terminal presentation: the clock line, the break overlay and the theme.

use std::io::{self, Write};

use breakbell_core::storage::UiConfig;
use breakbell_core::{format_clock, Event, Session, Theme, TimerState};

/// ANSI colours for a theme, as `(start, reset)`.
fn palette(theme: Theme) -> (&'static str, &'static str) {
    match theme {
        Theme::Light => ("\x1b[38;5;236;48;5;230m", "\x1b[0m"),
        Theme::Dark => ("\x1b[38;5;255;48;5;237m", "\x1b[0m"),
    }
}

/// One status line: the clock, plus either the overlay or the run state.
pub fn status_line(session: &Session, ui: &UiConfig) -> String {
    let clock = format_clock(session.elapsed_secs);
    if session.on_break {
        if ui.break_overlay {
            return format!(
                "{clock}  Break Time! Relax for {} seconds",
                session.break_secs_remaining
            );
        }
        return format!("{clock}  [break]");
    }

    let state = if session.running { "running" } else { "paused" };
    let mut line = format!("{clock}  {state}");
    if ui.show_next_break && session.running {
        if let Some(until) = session.secs_until_break().filter(|&secs| secs > 0) {
            line.push_str(&format!("  (break in {}:{:02})", until / 60, until % 60));
        }
    }
    line
}

/// Turns events into terminal output, either as a live status line or as
/// one JSON object per line.
pub struct Renderer<W: Write> {
    out: W,
    json: bool,
    ui: UiConfig,
    theme: Theme,
    /// Mirror of the runtime's session, rebuilt from events.
    session: Session,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, json: bool, ui: UiConfig, theme: Theme) -> Self {
        Self {
            out,
            json,
            ui,
            theme,
            session: Session::new(),
        }
    }

    pub fn emit(&mut self, event: &Event) -> io::Result<()> {
        self.track(event);
        if self.json {
            let line = serde_json::to_string(event).map_err(io::Error::other)?;
            writeln!(self.out, "{line}")?;
            return self.out.flush();
        }

        match event {
            Event::Tick { .. }
            | Event::StateSnapshot { .. }
            | Event::TimerReset { .. }
            | Event::TimerStarted { .. }
            | Event::TimerPaused { .. } => self.redraw()?,
            Event::BreakEnded { next_break_at, .. } => {
                self.notice(&format!(
                    "Break over, next one at {}",
                    format_clock(*next_break_at)
                ))?;
            }
            Event::ThemeChanged { theme, .. } => {
                self.notice(&format!("Theme: {theme}"))?;
            }
            Event::PreBreakCue { .. } | Event::BreakStarted { .. } => {}
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn track(&mut self, event: &Event) {
        let session = &mut self.session;
        match event {
            Event::TimerStarted {
                elapsed_secs,
                next_break_at,
                ..
            } => {
                session.running = true;
                session.elapsed_secs = *elapsed_secs;
                session.next_break_at = *next_break_at;
            }
            Event::TimerPaused { elapsed_secs, .. } => {
                session.running = false;
                session.elapsed_secs = *elapsed_secs;
            }
            Event::TimerReset { .. } => *session = Session::new(),
            Event::Tick {
                elapsed_secs,
                on_break,
                break_secs_remaining,
                ..
            } => {
                session.elapsed_secs = *elapsed_secs;
                session.on_break = *on_break;
                session.break_secs_remaining = *break_secs_remaining;
            }
            Event::BreakStarted { break_secs, .. } => {
                session.on_break = true;
                session.break_secs_remaining = *break_secs;
            }
            Event::BreakEnded { next_break_at, .. } => {
                session.on_break = false;
                session.next_break_at = *next_break_at;
            }
            Event::StateSnapshot {
                state,
                elapsed_secs,
                on_break,
                break_secs_remaining,
                next_break_at,
                ..
            } => {
                *session = Session {
                    elapsed_secs: *elapsed_secs,
                    running: matches!(state, TimerState::Running | TimerState::Break),
                    on_break: *on_break,
                    break_secs_remaining: *break_secs_remaining,
                    next_break_at: *next_break_at,
                };
            }
            Event::ThemeChanged { theme, .. } => self.theme = *theme,
            Event::PreBreakCue { .. } => {}
        }
    }

    fn redraw(&mut self) -> io::Result<()> {
        let line = status_line(&self.session, &self.ui);
        let (start, reset) = palette(self.theme);
        write!(self.out, "\r\x1b[2K{start}{line}{reset}")
    }

    fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "\r\x1b[2K{text}")
    }
}
