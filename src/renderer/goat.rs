//! Goat geometry
//!
//! Each goat is built in its own frame (head toward -y, size `s`), then
//! rotated to face its velocity and moved to its position.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::hsl_to_rgba;
use crate::sim::{Goat, SimState};

const ROUND_SEGMENTS: u32 = 24;
const CURVE_SEGMENTS: u32 = 8;

/// Build the triangle list for every goat, in creation order
pub fn goat_scene(state: &SimState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(state.goats.len() * 512);
    for goat in &state.goats {
        goat_vertices(goat, &mut out);
    }
    out
}

/// Append one goat's triangles in canvas space
pub fn goat_vertices(goat: &Goat, out: &mut Vec<Vertex>) {
    let first = out.len();
    let s = goat.size;

    let coat = hsl_to_rgba(goat.hue, 0.7, 0.5);
    let body = if goat.scared { colors::SCARED_BODY } else { coat };

    // Legs first so the body covers them
    shapes::rect(out, -s / 2.0, s / 2.0, s / 4.0, s / 2.0, coat);
    shapes::rect(out, s / 4.0, s / 2.0, s / 4.0, s / 2.0, coat);
    shapes::rect(out, -s / 2.0, -s, s / 4.0, s / 2.0, coat);
    shapes::rect(out, s / 4.0, -s, s / 4.0, s / 2.0, coat);

    shapes::ellipse(out, Vec2::ZERO, Vec2::new(s / 1.5, s), body, ROUND_SEGMENTS);

    // Head
    shapes::circle(out, Vec2::new(0.0, -s), s / 2.0, body, ROUND_SEGMENTS);

    // Eyes, pupils squint inward when scared
    let eye_y = -s - s / 10.0;
    let pupil_offset = if goat.scared { s / 20.0 } else { 0.0 };
    for side in [-1.0, 1.0] {
        let eye = Vec2::new(side * s / 4.0, eye_y);
        shapes::circle(out, eye, s / 8.0, colors::EYE, ROUND_SEGMENTS / 2);
        let pupil = eye - Vec2::new(side * pupil_offset, 0.0);
        shapes::circle(out, pupil, s / 16.0, colors::PUPIL, ROUND_SEGMENTS / 2);
    }

    // Horns
    for side in [-1.0, 1.0] {
        shapes::quadratic_stroke(
            out,
            Vec2::new(side * s / 4.0, -s - s / 4.0),
            Vec2::new(side * s / 2.0, -s - s / 2.0),
            Vec2::new(side * s / 3.0, -s - s),
            s / 8.0,
            colors::HORN,
            CURVE_SEGMENTS,
        );
    }

    // Beard
    let chin = -s / 1.8;
    shapes::triangle(
        out,
        Vec2::new(0.0, chin),
        Vec2::new(-s / 8.0, chin + s / 4.0),
        Vec2::new(s / 8.0, chin + s / 4.0),
        body,
    );

    // Tail
    shapes::ellipse_sector(
        out,
        Vec2::new(0.0, s),
        Vec2::splat(s / 4.0),
        0.0,
        PI,
        body,
        ROUND_SEGMENTS / 2,
    );

    let rotation = Vec2::from_angle(goat.heading() + FRAC_PI_2);
    for v in &mut out[first..] {
        let p = goat.pos + rotation.rotate(Vec2::from(v.position));
        v.position = p.to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn one_goat(pos: Vec2, vel: Vec2) -> Goat {
        Goat {
            pos,
            vel,
            size: 20.0,
            speed: 3.0,
            scared: false,
            scared_timer: 0,
            hue: 45.0,
        }
    }

    #[test]
    fn test_empty_scene() {
        let state = SimState::new(1);
        assert!(goat_scene(&state).is_empty());
    }

    #[test]
    fn test_scene_scales_with_herd() {
        let mut state = SimState::new(1);
        state.add_goat(100.0, 100.0);
        let single = goat_scene(&state).len();
        assert!(single > 0);
        assert_eq!(single % 3, 0);

        state.add_goat(300.0, 200.0);
        state.add_goat(500.0, 400.0);
        assert_eq!(goat_scene(&state).len(), single * 3);
    }

    #[test]
    fn test_rendering_does_not_touch_state() {
        let mut state = SimState::new(8);
        state.spawn_initial_goats();
        let before = state.goats.clone();
        let _ = goat_scene(&state);
        assert_eq!(state.goats, before);
    }

    #[test]
    fn test_goat_stays_near_its_position() {
        let goat = one_goat(Vec2::new(200.0, 150.0), Vec2::new(0.3, -1.2));
        let mut out = Vec::new();
        goat_vertices(&goat, &mut out);
        // Horn tips are the farthest point, about 2s from the center
        for v in &out {
            assert!(Vec2::from(v.position).distance(goat.pos) <= goat.size * 2.2);
        }
    }

    #[test]
    fn test_head_faces_velocity() {
        let goat = one_goat(Vec2::new(400.0, 300.0), Vec2::new(2.0, 0.0));
        let mut out = Vec::new();
        goat_vertices(&goat, &mut out);

        // The rightmost geometry (horns) lies ahead of the goat along +x
        let max_x = out.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let min_x = out.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        assert!(max_x - goat.pos.x > goat.pos.x - min_x);
    }

    #[test]
    fn test_scared_goat_turns_red() {
        let mut goat = one_goat(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0));
        let mut calm = Vec::new();
        goat_vertices(&goat, &mut calm);
        assert!(!calm.iter().any(|v| v.color == colors::SCARED_BODY));

        goat.scare(Vec2::new(90.0, 100.0), &Tuning::default());
        let mut scared = Vec::new();
        goat_vertices(&goat, &mut scared);
        assert!(scared.iter().any(|v| v.color == colors::SCARED_BODY));
        assert_eq!(calm.len(), scared.len());
    }
}
