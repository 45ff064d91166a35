//! Simulation state and core goat types
//!
//! Everything the frame update, scare reaction and renderer read lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::SoundSink;
use crate::consts::*;
use crate::tuning::Tuning;

/// A single goat
#[derive(Debug, Clone, PartialEq)]
pub struct Goat {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Body size in pixels, fixed for life
    pub size: f32,
    /// Base speed, scales the flee velocity
    pub speed: f32,
    pub scared: bool,
    /// Frames left in the scared state (0 when calm)
    pub scared_timer: u32,
    /// Hue in degrees, drawn as hsl(hue, 70%, 50%)
    pub hue: f32,
}

impl Goat {
    /// Roll a fresh calm goat at `pos`
    pub fn spawn(pos: Vec2, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let range = tuning.spawn_velocity_range;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * range,
            (rng.random::<f32>() - 0.5) * range,
        );
        let size = tuning.size_min + rng.random::<f32>() * (tuning.size_max - tuning.size_min);
        let speed = tuning.speed_min + rng.random::<f32>() * (tuning.speed_max - tuning.speed_min);
        let hue = tuning.hue_min + rng.random::<f32>() * (tuning.hue_max - tuning.hue_min);

        Self {
            pos,
            vel,
            size,
            speed,
            scared: false,
            scared_timer: 0,
            hue,
        }
    }

    /// Panic and run straight away from `from`
    ///
    /// With `scare_frames == 0` the goat still gets the flee kick but never
    /// enters the scared state.
    pub fn scare(&mut self, from: Vec2, tuning: &Tuning) {
        self.scared = tuning.scare_frames > 0;
        self.scared_timer = tuning.scare_frames;

        let delta = self.pos - from;
        let angle = delta.y.atan2(delta.x);
        self.vel = Vec2::new(angle.cos(), angle.sin()) * self.speed * tuning.flee_multiplier;
    }

    /// Count down the scared timer, calming down when it runs out
    pub fn tick_fear(&mut self) {
        if self.scared {
            self.scared_timer = self.scared_timer.saturating_sub(1);
            if self.scared_timer == 0 {
                self.scared = false;
            }
        }
    }

    /// Heading used for drawing (radians, 0 = +x)
    #[inline]
    pub fn heading(&self) -> f32 {
        self.vel.y.atan2(self.vel.x)
    }
}

/// Result of a single pointer-move reaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScareOutcome {
    /// Goats that were inside the flee radius
    pub scared: usize,
    /// Whether a scream actually started playing
    pub screamed: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    /// Play area extent (x in [0, width], y in [0, height])
    pub width: f32,
    pub height: f32,
    /// Last known pointer position
    pub pointer: Vec2,
    /// Whether frames advance and pointer moves scare goats
    pub running: bool,
    /// Goats in creation order
    pub goats: Vec<Goat>,
    volume: f32,
    sound_busy: bool,
    goats_created: u64,
    sounds_triggered: u64,
    pub(super) rng: Pcg32,
}

impl SimState {
    /// Create an empty, stopped simulation with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            width: AREA_WIDTH,
            height: AREA_HEIGHT,
            pointer: Vec2::ZERO,
            running: false,
            goats: Vec::new(),
            volume: DEFAULT_VOLUME,
            sound_busy: false,
            goats_created: 0,
            sounds_triggered: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Resize the play area; goats outside are pulled back on the next frame
    pub fn set_area(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Add a goat at the given position
    pub fn add_goat(&mut self, x: f32, y: f32) {
        let goat = Goat::spawn(Vec2::new(x, y), &self.tuning, &mut self.rng);
        log::debug!("Goat #{} placed at ({:.0}, {:.0})", self.goats_created + 1, x, y);
        self.goats.push(goat);
        self.goats_created += 1;
    }

    /// Scatter the initial herd across the area, away from the edges
    pub fn spawn_initial_goats(&mut self) {
        let margin = self.tuning.spawn_margin;
        for _ in 0..self.tuning.initial_goats {
            let x = margin + self.rng.random::<f32>() * (self.width - 2.0 * margin);
            let y = margin + self.rng.random::<f32>() * (self.height - 2.0 * margin);
            self.add_goat(x, y);
        }
    }

    /// Click handler: always places a goat, running or not
    pub fn on_click(&mut self, x: f32, y: f32) {
        self.add_goat(x, y);
    }

    /// Pointer-move handler
    ///
    /// The pointer position is always recorded; goats only react while running.
    pub fn on_pointer_move(
        &mut self,
        x: f32,
        y: f32,
        sink: Option<&mut dyn SoundSink>,
    ) -> ScareOutcome {
        self.pointer = Vec2::new(x, y);
        if !self.running {
            return ScareOutcome::default();
        }
        super::scare::react_to_pointer(self, sink)
    }

    pub fn start(&mut self) {
        if !self.running {
            log::info!("Simulation started ({} goats)", self.goats.len());
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("Simulation stopped");
        }
        self.running = false;
    }

    /// Set playback volume, clamped to [0, 1]
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = crate::clamp_volume(volume);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// True while a scream is in flight
    pub fn sound_busy(&self) -> bool {
        self.sound_busy
    }

    /// Total goats ever created
    pub fn goats_created(&self) -> u64 {
        self.goats_created
    }

    /// Total screams successfully started
    pub fn sounds_triggered(&self) -> u64 {
        self.sounds_triggered
    }

    /// Try to start a scream
    ///
    /// Dropped silently while another scream is playing or when there is no
    /// usable sink. The busy flag stays set until [`SimState::sound_finished`]
    /// is called; if the platform never reports completion, no further screams
    /// are admitted.
    pub fn request_sound(&mut self, sink: Option<&mut dyn SoundSink>) -> bool {
        let Some(sink) = sink else { return false };
        let clips = sink.clip_count();
        if clips == 0 || self.sound_busy {
            return false;
        }

        self.sound_busy = true;
        let clip = self.rng.random_range(0..clips);

        match sink.play(clip, self.volume) {
            Ok(()) => {
                self.sounds_triggered += 1;
                log::debug!("Scream #{} (clip {})", self.sounds_triggered, clip);
                true
            }
            Err(e) => {
                log::error!("Error playing goat sound: {}", e);
                self.sound_busy = false;
                false
            }
        }
    }

    /// End-of-playback signal from the audio backend
    pub fn sound_finished(&mut self) {
        self.sound_busy = false;
    }

    /// Random draw from the simulation RNG
    pub(crate) fn roll(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
