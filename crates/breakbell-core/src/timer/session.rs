use serde::{Deserialize, Serialize};

/// Length of every forced break, in ticks.
pub const BREAK_SECS: u8 = 10;

/// How many ticks before a break the pre-break cue fires.
pub const PRE_BREAK_CUE_LEAD_SECS: u64 = 4;

/// Coarse timer state derived from a [`Session`], for display and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Nothing has happened since the last reset.
    Idle,
    Running,
    Paused,
    /// A forced break is counting down.
    Break,
}

/// The whole mutable state of one timer run.
///
/// Kept as a single value so a tick reads and writes one consistent
/// snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Seconds counted since the last reset. Keeps advancing during breaks.
    pub elapsed_secs: u64,
    pub running: bool,
    pub on_break: bool,
    /// Only meaningful while `on_break`.
    pub break_secs_remaining: u8,
    /// Elapsed value at which the next break fires; 0 means unset.
    pub next_break_at: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            elapsed_secs: 0,
            running: false,
            on_break: false,
            break_secs_remaining: BREAK_SECS,
            next_break_at: 0,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// True before the first tick of a run.
    pub fn is_fresh(&self) -> bool {
        self.elapsed_secs == 0
    }

    pub fn has_threshold(&self) -> bool {
        self.next_break_at > 0
    }

    /// Elapsed value at which the pre-break cue fires, if a break is scheduled.
    pub fn cue_at(&self) -> Option<u64> {
        if !self.has_threshold() {
            return None;
        }
        self.next_break_at.checked_sub(PRE_BREAK_CUE_LEAD_SECS)
    }

    /// Seconds of work left before the next break, if one is scheduled.
    pub fn secs_until_break(&self) -> Option<u64> {
        if self.on_break || !self.has_threshold() {
            return None;
        }
        Some(self.next_break_at.saturating_sub(self.elapsed_secs))
    }

    pub fn state(&self) -> TimerState {
        if self.on_break {
            TimerState::Break
        } else if self.running {
            TimerState::Running
        } else if self.is_fresh() {
            TimerState::Idle
        } else {
            TimerState::Paused
        }
    }
}
