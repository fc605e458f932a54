//! Audio cue coordination.
//!
//! The timer never talks to an output device directly. It asks the
//! [`AudioCoordinator`] for cues, and the coordinator drives two injected
//! [`AudioChannel`]s: a one-shot alert and a looping ambient track.
//! Playback failures are logged and dropped here so they can never stall a
//! tick.

mod coordinator;
mod fade;
mod memory;

pub use coordinator::{AudioCoordinator, DEFAULT_ALERT_VOLUME, DEFAULT_FADE_IN_SECS};
pub use fade::{FadeRamp, FADE_STEP};
pub use memory::{ChannelCall, ChannelLog, MemoryChannel};

use crate::error::AudioError;

/// One playable stream.
///
/// Implementations must be cheap to call repeatedly and must not block.
pub trait AudioChannel: Send + 'static {
    /// Start playing from the current position (the beginning after `stop`).
    /// Calling it while already playing may restart or overlap.
    fn play(&mut self) -> Result<(), AudioError>;

    /// Set playback volume, 0.0 ..= 1.0.
    fn set_volume(&mut self, volume: f32);

    fn volume(&self) -> f32;

    /// Pause and rewind to the start. Must be idempotent.
    fn stop(&mut self);
}
