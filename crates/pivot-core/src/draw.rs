//! Abstract debug-draw interface
//!
//! The engine core knows nothing about windowing or textures. During the
//! Render phase it only emits line segments through this trait; the host's
//! rendering collaborator implements it however it likes.

use crate::types::Color;
use glam::Vec2;

/// Receiver for debug draw calls (collider outlines and similar overlays).
pub trait DebugDraw {
    /// Draw a line segment in world space.
    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);
}

/// A `DebugDraw` implementation that records segments instead of drawing.
///
/// Mainly useful in tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingDraw {
    /// Every segment received, in call order
    pub segments: Vec<(Vec2, Vec2, Color)>,
}

impl DebugDraw for RecordingDraw {
    fn line(&mut self, from: Vec2, to: Vec2, _thickness: f32, color: Color) {
        self.segments.push((from, to, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_draw_captures_segments() {
        let mut draw = RecordingDraw::default();
        draw.line(Vec2::ZERO, Vec2::X, 1.0, Color::RED);
        draw.line(Vec2::X, Vec2::Y, 1.0, Color::SKY);
        assert_eq!(draw.segments.len(), 2);
        assert_eq!(draw.segments[0].1, Vec2::X);
    }
}
