//! Pointer proximity reaction
//!
//! Runs once per pointer-move event, outside the frame clock.

use super::state::{ScareOutcome, SimState};
use crate::audio::SoundSink;

/// Scare every goat near the pointer and maybe scream
///
/// The scream roll happens once per event, before any goat is examined, and
/// does not depend on how many goats were actually scared.
pub fn react_to_pointer(state: &mut SimState, sink: Option<&mut dyn SoundSink>) -> ScareOutcome {
    let mut outcome = ScareOutcome::default();

    if state.roll() < state.tuning.scream_chance {
        outcome.screamed = state.request_sound(sink);
    }

    let pointer = state.pointer;
    let radius = state.tuning.flee_radius;
    for goat in &mut state.goats {
        if goat.pos.distance(pointer) < radius {
            goat.scare(pointer, &state.tuning);
            outcome.scared += 1;
        }
    }

    outcome
}
