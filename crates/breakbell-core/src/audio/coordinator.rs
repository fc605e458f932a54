use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, warn};

use super::fade::{FadeRamp, FADE_STEP};
use super::AudioChannel;

/// Volume of the pre-break alert.
pub const DEFAULT_ALERT_VOLUME: f32 = 0.1;
/// Length of the ambient fade-in, matching the pre-break cue lead.
pub const DEFAULT_FADE_IN_SECS: u32 = 4;

type SharedChannel = Arc<Mutex<Box<dyn AudioChannel>>>;

fn lock(channel: &SharedChannel) -> MutexGuard<'_, Box<dyn AudioChannel>> {
    channel
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Owns the alert and ambient channels plus the single in-flight fade.
pub struct AudioCoordinator {
    alert: Box<dyn AudioChannel>,
    ambient: SharedChannel,
    alert_volume: f32,
    fade: Option<JoinHandle<()>>,
}

impl AudioCoordinator {
    pub fn new(alert: Box<dyn AudioChannel>, ambient: Box<dyn AudioChannel>) -> Self {
        Self {
            alert,
            ambient: Arc::new(Mutex::new(ambient)),
            alert_volume: DEFAULT_ALERT_VOLUME,
            fade: None,
        }
    }

    pub fn with_alert_volume(mut self, volume: f32) -> Self {
        self.alert_volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn alert_volume(&self) -> f32 {
        self.alert_volume
    }

    pub fn ambient_volume(&self) -> f32 {
        lock(&self.ambient).volume()
    }

    /// True while a fade task is still adjusting the ambient volume.
    pub fn fade_active(&self) -> bool {
        self.fade.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Play the one-shot alert at the alert volume.
    pub fn play_alert(&mut self) {
        self.alert.set_volume(self.alert_volume);
        if let Err(e) = self.alert.play() {
            warn!(error = %e, "alert cue failed to play");
        }
    }

    /// Start the ambient loop silent and ramp it to full volume over
    /// `duration_secs`.
    ///
    /// Inside a tokio runtime the ramp runs as its own task in
    /// [`FADE_STEP`] increments. Without a runtime the volume jumps straight
    /// to 1.0.
    pub fn start_ambient_fade_in(&mut self, duration_secs: u32) {
        self.cancel_fade();
        {
            let mut ambient = lock(&self.ambient);
            ambient.set_volume(0.0);
            if let Err(e) = ambient.play() {
                warn!(error = %e, "ambient cue failed to play");
                return;
            }
        }

        let mut ramp = FadeRamp::from_secs(duration_secs);
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("no runtime for fade, jumping to full volume");
            lock(&self.ambient).set_volume(1.0);
            return;
        };

        let ambient = Arc::clone(&self.ambient);
        self.fade = Some(handle.spawn(async move {
            let mut ticker = interval_at(Instant::now() + FADE_STEP, FADE_STEP);
            while let Some(volume) = ramp.next() {
                ticker.tick().await;
                lock(&ambient).set_volume(volume);
            }
            debug!("ambient fade-in saturated");
        }));
    }

    /// Cancel any fade, then pause and rewind the ambient loop. Idempotent.
    pub fn stop_ambient(&mut self) {
        self.cancel_fade();
        lock(&self.ambient).stop();
    }

    /// Stop everything; used on reset and shutdown.
    pub fn stop_all(&mut self) {
        self.stop_ambient();
        self.alert.stop();
    }

    fn cancel_fade(&mut self) {
        if let Some(handle) = self.fade.take() {
            handle.abort();
        }
    }
}

impl Drop for AudioCoordinator {
    fn drop(&mut self) {
        self.cancel_fade();
    }
}

impl std::fmt::Debug for AudioCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioCoordinator")
            .field("alert_volume", &self.alert_volume)
            .field("fade_active", &self.fade_active())
            .finish()
    }
}
