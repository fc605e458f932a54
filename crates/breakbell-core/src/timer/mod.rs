mod controller;
mod engine;
mod format;
mod session;

pub use controller::Controller;
pub use engine::TimerEngine;
pub use format::format_clock;
pub use session::{Session, TimerState, BREAK_SECS, PRE_BREAK_CUE_LEAD_SECS};
