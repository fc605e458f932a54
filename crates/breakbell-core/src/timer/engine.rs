//! Timer engine implementation.
//!
//! The engine is a pure state machine over one [`Session`] value. It owns
//! no timers: the caller invokes `tick()` once per second while running and
//! reacts to the returned events.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |  ^
//!           v  |
//!          Break          (any) -> Idle on reset
//! ```
//!
//! ## Tick ordering
//!
//! One tick increments elapsed first, then checks the pre-break cue and the
//! break start against the new value, then runs the break countdown. The
//! countdown looks at the break flag as it was *before* the tick, so a break
//! entered on tick N gets its first decrement on tick N+1 and lasts exactly
//! `BREAK_SECS` ticks.

use chrono::Utc;
use tracing::{debug, info};

use super::format::format_clock;
use super::session::{Session, TimerState, BREAK_SECS};
use crate::events::Event;
use crate::scheduler::{IntervalSource, RandomIntervals};

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine<S = RandomIntervals> {
    session: Session,
    intervals: S,
}

impl Default for TimerEngine<RandomIntervals> {
    fn default() -> Self {
        Self::new(RandomIntervals)
    }
}

impl<S: IntervalSource> TimerEngine<S> {
    pub fn new(intervals: S) -> Self {
        Self {
            session: Session::new(),
            intervals,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> TimerState {
        self.session.state()
    }

    pub fn is_running(&self) -> bool {
        self.session.running
    }

    pub fn clock(&self) -> String {
        format_clock(self.session.elapsed_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let s = &self.session;
        Event::StateSnapshot {
            state: s.state(),
            elapsed_secs: s.elapsed_secs,
            clock: self.clock(),
            on_break: s.on_break,
            break_secs_remaining: s.break_secs_remaining,
            next_break_at: s.next_break_at,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume. A fresh run (elapsed 0) draws the first break
    /// threshold; a resumed one keeps the threshold it had.
    ///
    /// Returns `None` when already running or while on break.
    pub fn start(&mut self) -> Option<Event> {
        if self.session.running || self.session.on_break {
            return None;
        }
        let fresh = self.session.is_fresh();
        if fresh {
            self.session.next_break_at = self.intervals.draw_interval();
        }
        self.session.running = true;
        debug!(
            elapsed = self.session.elapsed_secs,
            next_break_at = self.session.next_break_at,
            fresh,
            "timer started"
        );
        Some(Event::TimerStarted {
            elapsed_secs: self.session.elapsed_secs,
            next_break_at: self.session.next_break_at,
            fresh,
            at: Utc::now(),
        })
    }

    /// Returns `None` when already paused or while on break.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.session.running || self.session.on_break {
            return None;
        }
        self.session.running = false;
        debug!(elapsed = self.session.elapsed_secs, "timer paused");
        Some(Event::TimerPaused {
            elapsed_secs: self.session.elapsed_secs,
            at: Utc::now(),
        })
    }

    /// Flip between running and paused. Disabled while on break.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.session.running {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Event {
        self.session = Session::new();
        debug!("timer reset");
        Event::TimerReset { at: Utc::now() }
    }

    /// Advance the session by one second.
    ///
    /// Returns the transitions of this tick in order, always ending with a
    /// [`Event::Tick`]. Does nothing when not running.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.session.running {
            return Vec::new();
        }

        let mut events = Vec::new();
        let was_on_break = self.session.on_break;
        let s = &mut self.session;

        s.elapsed_secs += 1;

        if !was_on_break && s.has_threshold() {
            if s.cue_at() == Some(s.elapsed_secs) {
                events.push(Event::PreBreakCue {
                    elapsed_secs: s.elapsed_secs,
                    break_at: s.next_break_at,
                    at: Utc::now(),
                });
            }
            if s.elapsed_secs >= s.next_break_at {
                s.on_break = true;
                s.break_secs_remaining = BREAK_SECS;
                info!(elapsed = s.elapsed_secs, "break started");
                events.push(Event::BreakStarted {
                    elapsed_secs: s.elapsed_secs,
                    break_secs: BREAK_SECS,
                    at: Utc::now(),
                });
            }
        }

        if was_on_break {
            if s.break_secs_remaining <= 1 {
                let interval = self.intervals.draw_interval();
                s.on_break = false;
                s.break_secs_remaining = BREAK_SECS;
                s.next_break_at = s.elapsed_secs + interval;
                info!(
                    elapsed = s.elapsed_secs,
                    next_break_at = s.next_break_at,
                    "break ended"
                );
                events.push(Event::BreakEnded {
                    elapsed_secs: s.elapsed_secs,
                    interval_secs: interval,
                    next_break_at: s.next_break_at,
                    at: Utc::now(),
                });
            } else {
                s.break_secs_remaining -= 1;
            }
        }

        let s = &self.session;
        events.push(Event::Tick {
            elapsed_secs: s.elapsed_secs,
            on_break: s.on_break,
            break_secs_remaining: s.break_secs_remaining,
            at: Utc::now(),
        });
        events
    }
}
