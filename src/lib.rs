//! Screaming Goats - goats wander a canvas, flee the pointer, and scream
//!
//! Core modules:
//! - `sim`: Deterministic simulation (goats, frame update, scare reaction)
//! - `audio`: Sound trigger seam and Web Audio clip playback
//! - `renderer`: Goat geometry and WebGPU drawing
//! - `settings`: Persisted user preferences
//! - `tuning`: Data-driven simulation constants

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::{AudioError, SoundSink};
pub use settings::Settings;
pub use sim::SimState;
pub use tuning::Tuning;

/// Configuration constants
pub mod consts {
    /// Default play area, in canvas pixels
    pub const AREA_WIDTH: f32 = 800.0;
    pub const AREA_HEIGHT: f32 = 600.0;

    /// Default playback volume
    pub const DEFAULT_VOLUME: f32 = 0.7;

    /// Goat scream clips, relative to the page
    pub const SOUND_FILES: [&str; 3] = [
        "assets/goat-sounds/goat1.mp3",
        "assets/goat-sounds/goat2.mp3",
        "assets/goat-sounds/goat3.mp3",
    ];
}

/// Clamp a volume to [0, 1]; NaN (e.g. an unparsable slider value) maps to the default
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        consts::DEFAULT_VOLUME
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Convert an HSL color (hue in degrees, saturation/lightness in 0..1) to linear RGBA
pub fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m, 1.0]
}

/// Convert a 0xRRGGBB hex color to RGBA
#[inline]
pub const fn hex_to_rgba(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}
