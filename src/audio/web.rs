//! Web Audio backend
//!
//! Fetches and decodes the clip set once, then plays buffers through a gain
//! node. The `onended` event of each source is the end-of-playback signal.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioBuffer, AudioContext, AudioContextState, Response};

use super::{AudioError, SoundSink};

/// Decoded clips plus the context that plays them
pub struct WebAudio {
    ctx: AudioContext,
    buffers: Vec<AudioBuffer>,
    on_end: Rc<dyn Fn()>,
}

fn js_reason(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl WebAudio {
    /// Create an audio context and load every clip in `paths`
    ///
    /// `on_end` runs once per finished clip.
    pub async fn load(paths: &[&str], on_end: Rc<dyn Fn()>) -> Result<Self, AudioError> {
        let ctx = AudioContext::new().map_err(|e| AudioError::Context(js_reason(&e)))?;
        let window =
            web_sys::window().ok_or_else(|| AudioError::Context("no window".to_string()))?;

        let mut buffers = Vec::with_capacity(paths.len());
        for path in paths {
            let fetch_err = |reason: String| AudioError::Fetch {
                path: path.to_string(),
                reason,
            };
            let decode_err = |reason: String| AudioError::Decode {
                path: path.to_string(),
                reason,
            };

            let response: Response = JsFuture::from(window.fetch_with_str(path))
                .await
                .map_err(|e| fetch_err(js_reason(&e)))?
                .dyn_into()
                .map_err(|e| fetch_err(js_reason(&e)))?;
            if !response.ok() {
                return Err(fetch_err(format!("HTTP {}", response.status())));
            }

            let bytes = response.array_buffer().map_err(|e| fetch_err(js_reason(&e)))?;
            let bytes: js_sys::ArrayBuffer = JsFuture::from(bytes)
                .await
                .map_err(|e| fetch_err(js_reason(&e)))?
                .dyn_into()
                .map_err(|e| fetch_err(js_reason(&e)))?;

            let decoded = ctx
                .decode_audio_data(&bytes)
                .map_err(|e| decode_err(js_reason(&e)))?;
            let buffer: AudioBuffer = JsFuture::from(decoded)
                .await
                .map_err(|e| decode_err(js_reason(&e)))?
                .dyn_into()
                .map_err(|e| decode_err(js_reason(&e)))?;
            buffers.push(buffer);
        }

        if buffers.is_empty() {
            return Err(AudioError::NoClips);
        }

        Ok(Self {
            ctx,
            buffers,
            on_end,
        })
    }
}

impl SoundSink for WebAudio {
    fn clip_count(&self) -> usize {
        self.buffers.len()
    }

    fn play(&mut self, clip: usize, volume: f32) -> Result<(), AudioError> {
        let buffer = self.buffers.get(clip).ok_or(AudioError::UnknownClip {
            clip,
            count: self.buffers.len(),
        })?;
        let playback = |e: JsValue| AudioError::Playback(js_reason(&e));

        // Browsers keep the context suspended until a user gesture
        if self.ctx.state() == AudioContextState::Suspended {
            match self.ctx.resume() {
                Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("Audio context resume rejected: {}", js_reason(&e));
                    }
                }),
                Err(e) => log::warn!("Audio context resume failed: {}", js_reason(&e)),
            }
        }

        let source = self.ctx.create_buffer_source().map_err(playback)?;
        source.set_buffer(Some(buffer));

        let gain = self.ctx.create_gain().map_err(playback)?;
        gain.gain().set_value(volume);

        source.connect_with_audio_node(&gain).map_err(playback)?;
        gain.connect_with_audio_node(&self.ctx.destination())
            .map_err(playback)?;

        if let Err(e) = source.start() {
            // Nothing will fire onended; release the graph now
            let _ = source.disconnect();
            let _ = gain.disconnect();
            return Err(playback(e));
        }

        let on_end = self.on_end.clone();
        let closure = Closure::once(move || on_end());
        source.set_onended(Some(closure.as_ref().unchecked_ref()));
        closure.forget();

        Ok(())
    }
}
