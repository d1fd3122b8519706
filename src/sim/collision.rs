//! Collision detection between the player box and world objects
//!
//! Boxes use plain AABB overlap. Spikes get an approximate triangle test so
//! that brushing past the slope of a spike isn't fatal.

use glam::Vec2;

use super::geometry::{Rect, Spike};
use crate::consts::{LANDING_TOLERANCE, SPIKE_FORGIVENESS};

/// Strict axis-aligned overlap
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Does the player touch a spike?
///
/// The spike box is first shrunk by `SPIKE_FORGIVENESS`. For an upward
/// triangle the widest cross-section inside the shared vertical band is its
/// lowest row, so checking the player's x-span against that one row decides
/// the hit.
pub fn spike_hit(player: &Rect, spike_bounds: &Rect) -> bool {
    let spike = Spike::new(spike_bounds.inset(SPIKE_FORGIVENESS));
    let bounds = spike.bounds;
    if !player.overlaps(&bounds) {
        return false;
    }

    let row = player.bottom().min(bounds.bottom());
    match spike.span_at(row) {
        Some((left, right)) => player.left() < right && player.right() > left,
        None => false,
    }
}

/// Circle vs box overlap (coins, power-ups)
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = Vec2::new(
        center.x.clamp(rect.left(), rect.right()),
        center.y.clamp(rect.top(), rect.bottom()),
    );
    center.distance_squared(closest) < radius * radius
}

/// Landing test against the top face of `surface`
///
/// Returns the surface top when the player was at or above it before this
/// step, is at or below it now, is not moving up, and overlaps it
/// horizontally.
pub fn landing_on(prev_bottom: f32, player: &Rect, vel_y: f32, surface: &Rect) -> Option<f32> {
    if vel_y < 0.0 || !player.overlaps_x(surface) {
        return None;
    }
    let top = surface.top();
    if prev_bottom <= top + LANDING_TOLERANCE && player.bottom() >= top {
        Some(top)
    } else {
        None
    }
}
