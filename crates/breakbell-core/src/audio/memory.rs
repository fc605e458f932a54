use std::sync::{Arc, Mutex};

use super::AudioChannel;
use crate::error::AudioError;

/// What a [`MemoryChannel`] was asked to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelCall {
    Play,
    Volume(f32),
    Stop,
}

/// Shared view of a [`MemoryChannel`]'s call history.
#[derive(Debug, Clone, Default)]
pub struct ChannelLog {
    calls: Arc<Mutex<Vec<ChannelCall>>>,
}

impl ChannelLog {
    fn push(&self, call: ChannelCall) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }

    pub fn calls(&self) -> Vec<ChannelCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn count(&self, call: ChannelCall) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    pub fn plays(&self) -> usize {
        self.count(ChannelCall::Play)
    }

    pub fn stops(&self) -> usize {
        self.count(ChannelCall::Stop)
    }

    /// Last volume that was set, if any.
    pub fn last_volume(&self) -> Option<f32> {
        self.calls().iter().rev().find_map(|c| match c {
            ChannelCall::Volume(v) => Some(*v),
            _ => None,
        })
    }
}

/// A silent channel that only records calls.
///
/// Backs the CLI's `--no-audio` mode and the tests. It can be told to
/// fail every `play` to simulate a missing asset or output device.
#[derive(Debug, Clone)]
pub struct MemoryChannel {
    name: String,
    volume: f32,
    fail_play: bool,
    log: ChannelLog,
}

impl MemoryChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            volume: 1.0,
            fail_play: false,
            log: ChannelLog::default(),
        }
    }

    /// A channel whose `play` always fails.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail_play: true,
            ..Self::new(name)
        }
    }

    pub fn log(&self) -> ChannelLog {
        self.log.clone()
    }
}

impl AudioChannel for MemoryChannel {
    fn play(&mut self) -> Result<(), AudioError> {
        self.log.push(ChannelCall::Play);
        if self.fail_play {
            return Err(AudioError::NoOutput(format!("{} is unavailable", self.name)));
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.log.push(ChannelCall::Volume(self.volume));
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn stop(&mut self) {
        self.log.push(ChannelCall::Stop);
    }
}
