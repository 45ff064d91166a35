//! Deterministic simulation module
//!
//! All goat behavior lives here. This module must be pure and deterministic:
//! - One frame per tick, unit timestep
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - No rendering or platform dependencies

pub mod scare;
pub mod state;
pub mod tick;

pub use scare::react_to_pointer;
pub use state::{Goat, ScareOutcome, SimState};
pub use tick::advance_frame;
