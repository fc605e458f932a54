use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::theme::Theme;
use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// The terminal front end renders them; `--json` prints them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        elapsed_secs: u64,
        next_break_at: u64,
        /// True when this start drew a new break threshold.
        fresh: bool,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// Emitted once per tick, after all transitions of that tick.
    Tick {
        elapsed_secs: u64,
        on_break: bool,
        break_secs_remaining: u8,
        at: DateTime<Utc>,
    },
    /// The break is a few seconds away; audio cues start here.
    PreBreakCue {
        elapsed_secs: u64,
        break_at: u64,
        at: DateTime<Utc>,
    },
    BreakStarted {
        elapsed_secs: u64,
        break_secs: u8,
        at: DateTime<Utc>,
    },
    BreakEnded {
        elapsed_secs: u64,
        interval_secs: u64,
        next_break_at: u64,
        at: DateTime<Utc>,
    },
    ThemeChanged {
        theme: Theme,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        elapsed_secs: u64,
        clock: String,
        on_break: bool,
        break_secs_remaining: u8,
        next_break_at: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short tag matching the serialized `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "TimerStarted",
            Event::TimerPaused { .. } => "TimerPaused",
            Event::TimerReset { .. } => "TimerReset",
            Event::Tick { .. } => "Tick",
            Event::PreBreakCue { .. } => "PreBreakCue",
            Event::BreakStarted { .. } => "BreakStarted",
            Event::BreakEnded { .. } => "BreakEnded",
            Event::ThemeChanged { .. } => "ThemeChanged",
            Event::StateSnapshot { .. } => "StateSnapshot",
        }
    }
}
