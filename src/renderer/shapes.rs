//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in whatever space the caller
//! works in (goat-local pixels for the goat builder).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

#[inline]
fn push_tri(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Axis-aligned rectangle from its top-left corner
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    let tl = Vec2::new(x, y);
    let tr = Vec2::new(x + w, y);
    let bl = Vec2::new(x, y + h);
    let br = Vec2::new(x + w, y + h);

    push_tri(out, tl, tr, bl, color);
    push_tri(out, bl, tr, br, color);
}

/// Filled ellipse sector between two angles (full turn for a whole ellipse)
pub fn ellipse_sector(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radii: Vec2,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) {
    let span = end - start;
    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        // Triangle from center to edge
        let p1 = center + Vec2::new(radii.x * theta1.cos(), radii.y * theta1.sin());
        let p2 = center + Vec2::new(radii.x * theta2.cos(), radii.y * theta2.sin());
        push_tri(out, center, p1, p2, color);
    }
}

/// Filled ellipse
pub fn ellipse(out: &mut Vec<Vertex>, center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) {
    ellipse_sector(out, center, radii, 0.0, 2.0 * PI, color, segments);
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    ellipse(out, center, Vec2::splat(radius), color, segments);
}

/// Filled triangle
pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    push_tri(out, a, b, c, color);
}

/// Point on a quadratic Bezier curve
#[inline]
pub fn quadratic_point(p0: Vec2, ctrl: Vec2, p1: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + ctrl * (2.0 * u * t) + p1 * (t * t)
}

/// Stroke a quadratic Bezier curve with the given line width
pub fn quadratic_stroke(
    out: &mut Vec<Vertex>,
    p0: Vec2,
    ctrl: Vec2,
    p1: Vec2,
    width: f32,
    color: [f32; 4],
    segments: u32,
) {
    let half = width / 2.0;
    let points: Vec<Vec2> = (0..=segments)
        .map(|i| quadratic_point(p0, ctrl, p1, i as f32 / segments as f32))
        .collect();

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);

        // Perpendicular for width
        let dir = (b - a).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;

        push_tri(out, a + perp, a - perp, b + perp, color);
        push_tri(out, b + perp, a - perp, b - perp, color);
    }
}
