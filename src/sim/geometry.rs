//! Screen-space geometry for world objects
//!
//! Everything in the world is an axis-aligned box in canvas pixels
//! (origin top-left, +y down). Spikes are upward-pointing triangles that
//! fill their box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Box of the given size standing on a surface at `surface_y`
    pub fn on_surface(x: f32, surface_y: f32, w: f32, h: f32) -> Self {
        Self::new(x, surface_y - h, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shrink by `amount` on every side (never below zero size)
    pub fn inset(&self, amount: f32) -> Self {
        let amount = amount
            .min(self.size.x / 2.0)
            .min(self.size.y / 2.0)
            .max(0.0);
        Self {
            pos: self.pos + Vec2::splat(amount),
            size: self.size - Vec2::splat(amount * 2.0),
        }
    }

    /// Move horizontally (world scroll)
    #[inline]
    pub fn translate_x(&mut self, dx: f32) {
        self.pos.x += dx;
    }

    /// Strict overlap test; shared edges don't count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Horizontal spans overlap (strict)
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Entirely left of the screen
    pub fn is_off_screen_left(&self) -> bool {
        self.right() < 0.0
    }
}

/// Upward-pointing spike occupying a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spike {
    pub bounds: Rect,
}

impl Spike {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Apex, bottom-left, bottom-right
    pub fn vertices(&self) -> [Vec2; 3] {
        let b = &self.bounds;
        [
            Vec2::new(b.left() + b.width() / 2.0, b.top()),
            Vec2::new(b.left(), b.bottom()),
            Vec2::new(b.right(), b.bottom()),
        ]
    }

    /// Horizontal extent of the triangle at height `y`, if the row crosses it
    pub fn span_at(&self, y: f32) -> Option<(f32, f32)> {
        let b = &self.bounds;
        if y < b.top() || y > b.bottom() || b.height() <= 0.0 {
            return None;
        }
        let depth = (y - b.top()) / b.height();
        let half = b.width() / 2.0 * depth;
        let cx = b.left() + b.width() / 2.0;
        Some((cx - half, cx + half))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_on_surface() {
        let r = Rect::on_surface(100.0, 480.0, 30.0, 30.0);
        assert_eq!(r.bottom(), 480.0);
        assert_eq!(r.top(), 450.0);
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let crossing = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&crossing));
        assert!(crossing.overlaps(&a));
    }

    #[test]
    fn test_inset_clamps() {
        let r = Rect::new(0.0, 0.0, 10.0, 4.0);
        let shrunk = r.inset(5.0);
        assert_eq!(shrunk.height(), 0.0);
        assert!(shrunk.width() >= 0.0);
    }

    #[test]
    fn test_spike_span() {
        let spike = Spike::new(Rect::new(0.0, 0.0, 30.0, 30.0));
        assert_eq!(spike.span_at(0.0), Some((15.0, 15.0)));
        assert_eq!(spike.span_at(30.0), Some((0.0, 30.0)));
        let (l, r) = spike.span_at(15.0).unwrap();
        assert!((l - 7.5).abs() < 1e-5 && (r - 22.5).abs() < 1e-5);
        assert_eq!(spike.span_at(-1.0), None);
    }
}
