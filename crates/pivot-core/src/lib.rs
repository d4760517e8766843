//! Pivot Core - shared types for the Pivot engine
//!
//! This crate provides the foundational pieces used by every other crate:
//! - Mathematical primitives (re-exported from glam)
//! - The `Transform2` component for 2D positioning
//! - The frame/fixed-step time source
//! - The abstract debug-draw collaborator interface

pub mod draw;
pub mod time;
pub mod types;

pub use draw::DebugDraw;
pub use glam::Vec2;
pub use time::{GameTime, TimeConfig};
pub use types::{Color, Transform2};
