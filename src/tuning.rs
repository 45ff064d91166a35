//! Data-driven simulation constants
//!
//! Defaults reproduce the classic goat behavior. A JSON document may override
//! any subset of fields; missing fields keep their defaults. The document is
//! read from LocalStorage on the web and from the file named by
//! `GOAT_TUNING` natively.

use serde::{Deserialize, Serialize};

/// Simulation tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scare reaction ===
    /// Pointer distance below which a goat panics
    pub flee_radius: f32,
    /// Frames a goat stays scared
    pub scare_frames: u32,
    /// Flee velocity = speed * this
    pub flee_multiplier: f32,
    /// Chance per pointer-move event of requesting a scream
    pub scream_chance: f64,

    // === Idle wandering ===
    /// Per-frame velocity damping while calm
    pub damping: f32,
    /// Chance per frame of a random nudge while calm
    pub jitter_chance: f64,
    /// Full width of the nudge range (applied as -amp/2..amp/2)
    pub jitter_amplitude: f32,

    // === Spawning ===
    /// Full width of the initial velocity range per axis
    pub spawn_velocity_range: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Hue band in degrees
    pub hue_min: f32,
    pub hue_max: f32,
    /// Goats placed when the simulation is created
    pub initial_goats: u32,
    /// Keep initial goats this far from the edges
    pub spawn_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            flee_radius: 100.0,
            scare_frames: 30,
            flee_multiplier: 2.0,
            scream_chance: 0.3,

            damping: 0.98,
            jitter_chance: 0.02,
            jitter_amplitude: 0.5,

            spawn_velocity_range: 4.0,
            size_min: 20.0,
            size_max: 40.0,
            speed_min: 2.0,
            speed_max: 5.0,
            hue_min: 30.0,
            hue_max: 60.0,
            initial_goats: 5,
            spawn_margin: 50.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, defaulting missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Use a stored document if there is one and it parses
    pub fn from_stored(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded custom tuning");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring invalid tuning: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "screaming_goats_tuning";

    /// Environment variable naming a tuning file (native only)
    #[allow(dead_code)]
    const ENV_VAR: &'static str = "GOAT_TUNING";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok())
            .flatten();
        Self::from_stored(json.as_deref())
    }

    /// Load tuning from the file named by `GOAT_TUNING`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_stored(Some(&json)),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Tuning with all randomness in idle wandering and screaming switched off
    pub fn calm() -> Self {
        Self {
            jitter_chance: 0.0,
            scream_chance: 0.0,
            ..Self::default()
        }
    }
}
