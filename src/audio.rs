//! Audio system
//!
//! The simulation only needs "play clip N at volume V" plus an end-of-playback
//! signal. Backends implement [`SoundSink`]; completion is reported by calling
//! [`crate::sim::SimState::sound_finished`].

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Audio failures
///
/// Load-time errors disable screaming for the session; playback errors only
/// drop the current scream.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio context unavailable: {0}")]
    Context(String),
    #[error("failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("playback failed: {0}")]
    Playback(String),
    #[error("no sound clips loaded")]
    NoClips,
    #[error("clip {clip} out of range ({count} loaded)")]
    UnknownClip { clip: usize, count: usize },
}

/// Something that can play one of a fixed set of clips
pub trait SoundSink {
    /// Number of playable clips (0 disables screaming)
    fn clip_count(&self) -> usize;

    /// Start playing `clip` at `volume` (0.0 - 1.0)
    ///
    /// Returning `Ok` promises that the backend will eventually report
    /// end-of-playback.
    fn play(&mut self, clip: usize, volume: f32) -> Result<(), AudioError>;
}

/// Headless sink that only logs what it would play
#[derive(Debug, Clone)]
pub struct LogSink {
    names: Vec<String>,
    /// Clips started so far, in order
    pub history: Vec<usize>,
}

impl LogSink {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            history: Vec::new(),
        }
    }
}

impl SoundSink for LogSink {
    fn clip_count(&self) -> usize {
        self.names.len()
    }

    fn play(&mut self, clip: usize, volume: f32) -> Result<(), AudioError> {
        let name = self.names.get(clip).ok_or(AudioError::UnknownClip {
            clip,
            count: self.names.len(),
        })?;
        log::info!("MEEEH! {} at volume {:.2}", name, volume);
        self.history.push(clip);
        Ok(())
    }
}
