//! Audio channels for the terminal front end.
//!
//! With the `playback` feature the alert and ambient channels play the
//! configured files through rodio. Without it, or when no output device is
//! available, cues go to silent [`MemoryChannel`]s and the timer carries on.

use breakbell_core::storage::AudioConfig;
use breakbell_core::{AudioCoordinator, MemoryChannel};

/// Keeps the output device open for as long as the coordinator lives.
#[derive(Default)]
pub struct OutputGuard {
    #[cfg(feature = "playback")]
    _stream: Option<rodio::OutputStream>,
}

pub fn open(config: &AudioConfig, no_audio: bool) -> (AudioCoordinator, OutputGuard) {
    if no_audio || !config.enabled {
        tracing::debug!("audio disabled");
        return (silent(config), OutputGuard::default());
    }
    open_device(config)
}

fn silent(config: &AudioConfig) -> AudioCoordinator {
    AudioCoordinator::new(
        Box::new(MemoryChannel::new("alert")),
        Box::new(MemoryChannel::new("ambient")),
    )
    .with_alert_volume(config.alert_volume)
}

#[cfg(not(feature = "playback"))]
fn open_device(config: &AudioConfig) -> (AudioCoordinator, OutputGuard) {
    tracing::info!("built without the playback feature, audio cues are silent");
    (silent(config), OutputGuard::default())
}

#[cfg(feature = "playback")]
fn open_device(config: &AudioConfig) -> (AudioCoordinator, OutputGuard) {
    match rodio::OutputStream::try_default() {
        Ok((stream, handle)) => {
            let alert = file::FileChannel::new(handle.clone(), &config.alert_path, false);
            let ambient = file::FileChannel::new(handle, &config.ambient_path, true);
            let coordinator = AudioCoordinator::new(Box::new(alert), Box::new(ambient))
                .with_alert_volume(config.alert_volume);
            (
                coordinator,
                OutputGuard {
                    _stream: Some(stream),
                },
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "no audio output device, continuing silently");
            (silent(config), OutputGuard::default())
        }
    }
}

#[cfg(feature = "playback")]
mod file {
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::sync::Arc;

    use breakbell_core::{AudioChannel, AudioError};
    use rodio::{Decoder, OutputStreamHandle, Sink};

    /// A sound file played through rodio, optionally looped.
    ///
    /// The file is read once up front; a missing file only fails `play`.
    pub struct FileChannel {
        handle: OutputStreamHandle,
        path: PathBuf,
        looped: bool,
        data: Option<Arc<[u8]>>,
        sink: Option<Sink>,
        volume: f32,
    }

    impl FileChannel {
        pub fn new(handle: OutputStreamHandle, path: impl Into<PathBuf>, looped: bool) -> Self {
            let path = path.into();
            let data = match std::fs::read(&path) {
                Ok(bytes) => Some(Arc::from(bytes)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "audio asset unavailable");
                    None
                }
            };
            Self {
                handle,
                path,
                looped,
                data,
                sink: None,
                volume: 1.0,
            }
        }

        fn decode_error(&self, e: rodio::decoder::DecoderError) -> AudioError {
            AudioError::Decode {
                path: self.path.clone(),
                message: e.to_string(),
            }
        }
    }

    impl AudioChannel for FileChannel {
        fn play(&mut self) -> Result<(), AudioError> {
            let data = self.data.clone().ok_or_else(|| AudioError::AssetUnavailable {
                path: self.path.clone(),
                message: "file could not be read".into(),
            })?;

            self.stop();
            let sink =
                Sink::try_new(&self.handle).map_err(|e| AudioError::NoOutput(e.to_string()))?;
            sink.set_volume(self.volume);
            let cursor = Cursor::new(data);
            if self.looped {
                let source = Decoder::new_looped(cursor).map_err(|e| self.decode_error(e))?;
                sink.append(source);
            } else {
                let source = Decoder::new(cursor).map_err(|e| self.decode_error(e))?;
                sink.append(source);
            }
            self.sink = Some(sink);
            Ok(())
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
            if let Some(sink) = &self.sink {
                sink.set_volume(self.volume);
            }
        }

        fn volume(&self) -> f32 {
            self.volume
        }

        fn stop(&mut self) {
            if let Some(sink) = self.sink.take() {
                sink.stop();
            }
        }
    }
}
