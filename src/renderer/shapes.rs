//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in canvas pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Filled axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    quad(
        Vec2::new(r.left(), r.top()),
        Vec2::new(r.right(), r.top()),
        Vec2::new(r.right(), r.bottom()),
        Vec2::new(r.left(), r.bottom()),
        color,
    )
}

/// Rectangle border of the given thickness (drawn inside the rect)
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.width() / 2.0).min(r.height() / 2.0);
    let mut vertices = Vec::with_capacity(24);
    // Top, bottom, left, right strips
    vertices.extend(rect(&Rect::new(r.left(), r.top(), r.width(), t), color));
    vertices.extend(rect(&Rect::new(r.left(), r.bottom() - t, r.width(), t), color));
    vertices.extend(rect(&Rect::new(r.left(), r.top() + t, t, r.height() - 2.0 * t), color));
    vertices.extend(rect(
        &Rect::new(r.right() - t, r.top() + t, t, r.height() - 2.0 * t),
        color,
    ));
    vertices
}

/// Square of side `size` centered on `center`, rotated by `angle` radians
pub fn rotated_square(center: Vec2, size: f32, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = size / 2.0;
    let rot = Vec2::from_angle(angle);
    let corners = [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
    .map(|c| center + rot.rotate(c));
    quad(corners[0], corners[1], corners[2], corners[3], color)
}

/// Single filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        vertices.extend(quad(inner1, outer1, outer2, inner2, color));
    }

    vertices
}

/// Two triangles covering a convex quad given in winding order
fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}
