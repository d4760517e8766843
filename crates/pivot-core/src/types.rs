//! Core value types used throughout the Pivot engine

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D transform with world and local channels.
///
/// The world fields (`position`, `scale`, `rotation`) are authoritative for
/// root entities. When an entity is parented, the hierarchy pass derives them
/// each frame from the parent's world fields composed with this transform's
/// local fields, so they must not be written directly while parented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2 {
    /// World-space position
    pub position: Vec2,
    /// World-space scale
    pub scale: Vec2,
    /// World-space rotation in radians
    pub rotation: f32,
    /// Position relative to the parent (used only while parented)
    pub local_position: Vec2,
    /// Scale relative to the parent (used only while parented)
    pub local_scale: Vec2,
    /// Rotation relative to the parent in radians (used only while parented)
    pub local_rotation: f32,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            local_position: Vec2::ZERO,
            local_scale: Vec2::ONE,
            local_rotation: 0.0,
        }
    }
}

impl Transform2 {
    /// Create a transform at the given world position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform at the given world coordinates
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self::from_position(Vec2::new(x, y))
    }

    /// Set the world rotation, builder style
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Set the local channel, builder style
    pub fn with_local(mut self, position: Vec2, scale: Vec2, rotation: f32) -> Self {
        self.local_position = position;
        self.local_scale = scale;
        self.local_rotation = rotation;
        self
    }

    /// Translate the world position by the given offset
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Get the direction the transform is facing (rotation applied to +X)
    pub fn heading(&self) -> Vec2 {
        Vec2::new(self.rotation.cos(), self.rotation.sin())
    }
}

/// RGBA color with floating point components (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const SKY: Color = Color::rgb(0.4, 0.75, 1.0);

    /// Create a color from RGB values (alpha = 1.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA values
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a hex value (0xRRGGBB)
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Convert to an array [r, g, b, a]
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
