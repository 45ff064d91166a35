//! User preferences
//!
//! Persisted in LocalStorage on the web; defaults everywhere else.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_VOLUME;

/// Persisted preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scream volume (0.0 - 1.0)
    pub volume: f32,
    /// Load and play scream clips at all
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Set volume, clamped to [0, 1]
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = crate::clamp_volume(volume);
    }

    /// Parse stored JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Option<Self> {
        let mut settings: Self = serde_json::from_str(json).ok()?;
        // Stored values may predate clamping
        settings.set_volume(settings.volume);
        Some(settings)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "screaming_goats_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::debug!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            volume: 0.3,
            sound_enabled: false,
        };
        let json = serde_json::to_string(&settings).expect("serializable");
        assert_eq!(Settings::from_json(&json), Some(settings));
    }

    #[test]
    fn test_missing_fields_default() {
        let settings = Settings::from_json("{}").expect("valid json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_stored_volume_is_clamped() {
        let settings = Settings::from_json(r#"{ "volume": 4.0 }"#).expect("valid json");
        assert_eq!(settings.volume, 1.0);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn test_nan_volume_matches_sim_state() {
        let mut settings = Settings::default();
        let mut state = crate::SimState::new(1);
        settings.set_volume(0.2);
        state.set_volume(0.2);
        settings.set_volume(f32::NAN);
        state.set_volume(f32::NAN);
        assert_eq!(settings.volume, state.volume());
        assert_eq!(settings.volume, DEFAULT_VOLUME);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(Settings::from_json("not json"), None);
    }
}
