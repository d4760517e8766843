//! Pivot Physics - 2D collision detection and rigid body dynamics
//!
//! Convex polygon colliders, a Separating Axis Theorem narrow phase,
//! restitution-free impulse resolution, and semi-implicit Euler integration,
//! all expressed as systems over the Pivot ECS registry.
//!
//! Call [`register`] once to register the components and systems, then let
//! the host loop drive the Update and FixedUpdate phases.

mod collider;
mod layers;
mod rigidbody;
mod sat;
mod systems;

pub use collider::{Collider, CollisionEvent, CollisionListener};
pub use layers::LayerTable;
pub use rigidbody::{BodyType, RigidBody};
pub use sat::{polygon_overlap, Contact};
pub use systems::{debug_draw_colliders, register};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World-level physics tuning, stored as a registry resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity acceleration; +Y is down in screen space
    pub gravity: Vec2,
    /// Fixed timestep used by integration (seconds)
    pub fixed_timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.81),
            fixed_timestep: 1.0 / 60.0,
        }
    }
}
