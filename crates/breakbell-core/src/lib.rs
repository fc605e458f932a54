//! # breakbell core library
//!
//! Business logic for the breakbell micro-break timer: a work clock that
//! forces a ten second break every three to five minutes and plays audio
//! cues as the break approaches.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a pure state machine over one [`Session`] value; the
//!   caller invokes `tick()` once per second
//! - **Controller**: the engine plus the audio cues its transitions trigger
//! - **Break Scheduler**: the single source of randomized break spacing
//! - **Audio**: cue coordination over injected [`AudioChannel`]s, including
//!   the ambient fade-in
//! - **Runtime**: the tokio loop owning the one tick timer
//! - **Storage**: SQLite key-value store for the theme and TOML configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core timer state machine
//! - [`Controller`]: engine + [`AudioCoordinator`]
//! - [`runtime::run`]: event loop driving a controller
//! - [`ThemePreference`]: persisted light/dark toggle
//! - [`Config`]: application configuration management

pub mod audio;
pub mod error;
pub mod events;
pub mod runtime;
pub mod scheduler;
pub mod storage;
pub mod theme;
pub mod timer;

pub use audio::{AudioChannel, AudioCoordinator, MemoryChannel};
pub use error::{AudioError, ConfigError, CoreError, DatabaseError};
pub use events::Event;
pub use runtime::Command;
pub use scheduler::{
    draw_interval, FixedIntervals, IntervalSource, RandomIntervals, SeededIntervals,
};
pub use storage::{Config, Database};
pub use theme::{MemoryThemeStore, Theme, ThemePreference, ThemeStore};
pub use timer::{format_clock, Controller, Session, TimerEngine, TimerState};
