use crate::audio::{AudioCoordinator, DEFAULT_FADE_IN_SECS};
use crate::events::Event;
use crate::scheduler::{IntervalSource, RandomIntervals};

use super::engine::TimerEngine;
use super::session::{Session, TimerState};

/// Timer engine plus the audio side effects its transitions trigger.
///
/// This is the single owner of a session: the runtime holds one and routes
/// every command and tick through it.
#[derive(Debug)]
pub struct Controller<S = RandomIntervals> {
    engine: TimerEngine<S>,
    audio: AudioCoordinator,
    fade_in_secs: u32,
}

impl<S: IntervalSource> Controller<S> {
    pub fn new(engine: TimerEngine<S>, audio: AudioCoordinator) -> Self {
        Self {
            engine,
            audio,
            fade_in_secs: DEFAULT_FADE_IN_SECS,
        }
    }

    pub fn with_fade_in_secs(mut self, secs: u32) -> Self {
        self.fade_in_secs = secs;
        self
    }

    pub fn session(&self) -> &Session {
        self.engine.session()
    }

    pub fn state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn audio(&self) -> &AudioCoordinator {
        &self.audio
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    pub fn start(&mut self) -> Option<Event> {
        self.engine.start()
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.engine.pause()
    }

    pub fn toggle(&mut self) -> Option<Event> {
        self.engine.toggle()
    }

    /// Back to the initial session, with the ambient loop stopped.
    pub fn reset(&mut self) -> Event {
        let event = self.engine.reset();
        self.audio.stop_ambient();
        event
    }

    /// Advance one second and play whatever cues the tick asks for.
    pub fn tick(&mut self) -> Vec<Event> {
        let events = self.engine.tick();
        for event in &events {
            match event {
                Event::PreBreakCue { .. } => {
                    self.audio.play_alert();
                    self.audio.start_ambient_fade_in(self.fade_in_secs);
                }
                Event::BreakEnded { .. } => self.audio.stop_ambient(),
                _ => {}
            }
        }
        events
    }

    /// Stop all audio and any fade. The session itself is left as is.
    pub fn shutdown(&mut self) {
        self.audio.stop_all();
    }
}
