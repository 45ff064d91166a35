//! Per-frame simulation step
//!
//! One call advances every goat by exactly one frame (unit timestep).

use glam::Vec2;
use rand::Rng;

use super::state::{Goat, SimState};
use crate::tuning::Tuning;

/// Advance the simulation by one frame. No-op while stopped.
pub fn advance_frame(state: &mut SimState) {
    if !state.running {
        return;
    }

    let extent = Vec2::new(state.width, state.height);

    // Goats never interact, so a single pass in collection order is enough
    for goat in state.goats.iter_mut() {
        step_goat(goat, extent, &state.tuning, &mut state.rng);
    }
}

/// Update a single goat: fear timer, movement, walls, then idle wandering
fn step_goat(goat: &mut Goat, extent: Vec2, tuning: &Tuning, rng: &mut impl Rng) {
    goat.tick_fear();

    goat.pos += goat.vel;
    bounce_off_walls(goat, extent);

    if !goat.scared {
        goat.vel *= tuning.damping;

        if rng.random_bool(tuning.jitter_chance.clamp(0.0, 1.0)) {
            let amp = tuning.jitter_amplitude;
            goat.vel.x += (rng.random::<f32>() - 0.5) * amp;
            goat.vel.y += (rng.random::<f32>() - 0.5) * amp;
        }
    }
}

/// Reflect the velocity component of any axis that left the area and clamp back inside
fn bounce_off_walls(goat: &mut Goat, extent: Vec2) {
    if goat.pos.x < 0.0 || goat.pos.x > extent.x {
        goat.vel.x = -goat.vel.x;
        goat.pos.x = goat.pos.x.clamp(0.0, extent.x);
    }
    if goat.pos.y < 0.0 || goat.pos.y > extent.y {
        goat.vel.y = -goat.vel.y;
        goat.pos.y = goat.pos.y.clamp(0.0, extent.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn calm_running(seed: u64) -> SimState {
        let mut state = SimState::with_tuning(seed, Tuning::calm());
        state.start();
        state
    }

    #[test]
    fn test_stopped_is_noop() {
        let mut state = SimState::new(1);
        state.spawn_initial_goats();
        let before = state.goats.clone();
        for _ in 0..10 {
            advance_frame(&mut state);
        }
        assert_eq!(state.goats, before);
    }

    #[test]
    fn test_calm_goat_damps_geometrically() {
        let mut state = calm_running(9);
        state.add_goat(100.0, 100.0);
        state.goats[0].vel = Vec2::new(1.5, -1.0);
        let size = state.goats[0].size;
        let speed = state.goats[0].speed;
        let initial = state.goats[0].vel.length();

        for _ in 0..30 {
            advance_frame(&mut state);
        }

        let goat = &state.goats[0];
        assert!(!goat.scared);
        assert_eq!(goat.scared_timer, 0);
        assert_eq!(goat.size, size);
        assert_eq!(goat.speed, speed);
        let expected = initial * 0.98f32.powi(30);
        assert!((goat.vel.length() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_calm_speed_never_increases_without_jitter() {
        let mut state = calm_running(4);
        state.spawn_initial_goats();
        let mut last: Vec<f32> = state.goats.iter().map(|g| g.vel.length()).collect();
        for _ in 0..200 {
            advance_frame(&mut state);
            for (goat, prev) in state.goats.iter().zip(last.iter_mut()) {
                let now = goat.vel.length();
                assert!(now <= *prev + 1e-6);
                *prev = now;
            }
        }
    }

    #[test]
    fn test_scared_timer_counts_down_then_clears() {
        let mut state = calm_running(2);
        state.add_goat(400.0, 300.0);
        state.on_pointer_move(405.0, 300.0, None);
        assert_eq!(state.goats[0].scared_timer, 30);

        for expected in (1..30).rev() {
            advance_frame(&mut state);
            assert!(state.goats[0].scared);
            assert_eq!(state.goats[0].scared_timer, expected);
        }

        advance_frame(&mut state);
        assert!(!state.goats[0].scared);
        assert_eq!(state.goats[0].scared_timer, 0);
    }

    #[test]
    fn test_scared_goat_keeps_flee_velocity() {
        let mut state = calm_running(2);
        state.width = 10_000.0;
        state.height = 10_000.0;
        state.add_goat(5000.0, 5000.0);
        state.on_pointer_move(5010.0, 5000.0, None);
        let flee = state.goats[0].vel;

        for _ in 0..29 {
            advance_frame(&mut state);
            assert_eq!(state.goats[0].vel, flee);
        }

        // Last scared frame moves at full flee velocity, then damping kicks in
        let pos = state.goats[0].pos;
        advance_frame(&mut state);
        assert_eq!(state.goats[0].pos, pos + flee);
        assert!((state.goats[0].vel - flee * 0.98).length() < 1e-5);
    }

    #[test]
    fn test_wall_bounce_reflects_and_clamps() {
        let mut state = calm_running(3);
        state.add_goat(799.0, 1.0);
        state.goats[0].vel = Vec2::new(3.0, -2.0);

        advance_frame(&mut state);

        let goat = &state.goats[0];
        assert_eq!(goat.pos, Vec2::new(800.0, 0.0));
        assert!((goat.vel.x + 3.0 * 0.98).abs() < 1e-5);
        assert!((goat.vel.y - 2.0 * 0.98).abs() < 1e-5);
    }

    #[test]
    fn test_single_axis_bounce() {
        let mut state = calm_running(3);
        state.add_goat(1.0, 300.0);
        state.goats[0].vel = Vec2::new(-2.0, 1.0);

        advance_frame(&mut state);

        let goat = &state.goats[0];
        assert_eq!(goat.pos.x, 0.0);
        assert_eq!(goat.pos.y, 301.0);
        assert!(goat.vel.x > 0.0);
        assert!(goat.vel.y > 0.0);
    }

    #[test]
    fn test_placed_outside_is_pulled_in() {
        let mut state = calm_running(3);
        state.on_click(-50.0, 900.0);
        advance_frame(&mut state);
        let goat = &state.goats[0];
        assert!(goat.pos.x >= 0.0 && goat.pos.x <= state.width);
        assert!(goat.pos.y >= 0.0 && goat.pos.y <= state.height);
    }

    #[test]
    fn test_jitter_perturbs_idle_goats() {
        let tuning = Tuning {
            jitter_chance: 1.0,
            ..Tuning::calm()
        };
        let mut state = SimState::with_tuning(77, tuning);
        state.start();
        state.add_goat(400.0, 300.0);
        state.goats[0].vel = Vec2::ZERO;

        advance_frame(&mut state);

        let vel = state.goats[0].vel;
        assert!(vel != Vec2::ZERO);
        assert!(vel.x.abs() <= 0.25 && vel.y.abs() <= 0.25);
    }

    #[test]
    fn test_determinism() {
        // Same seed, same inputs, same herd
        let run = || {
            let mut state = SimState::new(99999);
            state.spawn_initial_goats();
            state.start();
            for frame in 0..300 {
                if frame % 7 == 0 {
                    let x = (frame * 13 % 800) as f32;
                    state.on_pointer_move(x, 300.0, None);
                }
                advance_frame(&mut state);
            }
            state
        };
        let a = run();
        let b = run();
        assert_eq!(a.goats, b.goats);
        assert_eq!(a.goats_created(), b.goats_created());
    }

    proptest! {
        #[test]
        fn prop_goats_stay_in_bounds(
            seed in any::<u64>(),
            width in 50.0f32..1600.0,
            height in 50.0f32..1200.0,
            frames in 1usize..400,
            pointers in prop::collection::vec((-100.0f32..1700.0, -100.0f32..1300.0), 0..20),
        ) {
            let mut state = SimState::new(seed);
            state.set_area(width, height);
            state.spawn_initial_goats();
            for &(x, y) in &pointers {
                state.on_click(x, y);
            }
            state.start();

            for frame in 0..frames {
                if let Some(&(x, y)) = pointers.get(frame % 20) {
                    state.on_pointer_move(x, y, None);
                }
                advance_frame(&mut state);
                for goat in &state.goats {
                    prop_assert!(goat.pos.x >= 0.0 && goat.pos.x <= width);
                    prop_assert!(goat.pos.y >= 0.0 && goat.pos.y <= height);
                    prop_assert_eq!(goat.scared, goat.scared_timer > 0);
                }
            }
        }
    }
}
