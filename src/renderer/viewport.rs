//! Logical canvas ↔ surface mapping
//!
//! The game is laid out on an 800x600 canvas. The surface can be any size;
//! the canvas is scaled to fit and letterboxed on the long axis.

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface size in pixels
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Canvas-to-surface scale
    pub fn scale(&self) -> f32 {
        (self.width / CANVAS_WIDTH).min(self.height / CANVAS_HEIGHT)
    }

    /// Surface-pixel offset of the canvas' top-left corner
    pub fn offset(&self) -> Vec2 {
        let scale = self.scale();
        Vec2::new(
            (self.width - CANVAS_WIDTH * scale) / 2.0,
            (self.height - CANVAS_HEIGHT * scale) / 2.0,
        )
    }

    /// Canvas pixels to normalized device coordinates (+y up)
    pub fn canvas_to_ndc(&self, p: Vec2) -> Vec2 {
        let surface = self.offset() + p * self.scale();
        Vec2::new(
            surface.x / self.width * 2.0 - 1.0,
            1.0 - surface.y / self.height * 2.0,
        )
    }

    /// Surface pixels (pointer events) back to canvas pixels
    pub fn surface_to_canvas(&self, p: Vec2) -> Vec2 {
        (p - self.offset()) / self.scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.canvas_to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.canvas_to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_letterbox_wide_surface() {
        let vp = Viewport::new(1600.0, 600.0);
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.offset(), Vec2::new(400.0, 0.0));
        // Canvas left edge sits a quarter of the way in
        assert_eq!(vp.canvas_to_ndc(Vec2::ZERO).x, -0.5);
    }

    #[test]
    fn test_pointer_round_trip() {
        let vp = Viewport::new(1024.0, 1024.0);
        let canvas = Vec2::new(400.0, 375.0);
        let surface = vp.offset() + canvas * vp.scale();
        let back = vp.surface_to_canvas(surface);
        assert!((back - canvas).length() < 1e-3);
    }
}
