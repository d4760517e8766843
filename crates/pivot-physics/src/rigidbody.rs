//! Rigid body component and integration primitives

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How a body participates in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Never moves; infinite mass for resolution purposes
    Static,
    /// Fully simulated: forces, gravity, integration, resolution
    Dynamic,
    /// Moved by the embedding, not by the simulation; infinite mass
    Kinematic,
}

/// Point-mass rigid body.
///
/// Static and Kinematic bodies carry zero inverse mass: collision
/// resolution never displaces them and forces/impulses are ignored. Only
/// Dynamic bodies integrate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RigidBody {
    /// Mass in arbitrary units; non-positive is treated as infinite
    pub mass: f32,
    /// Cached inverse mass; 0 means immovable
    pub inv_mass: f32,
    /// Exponential velocity damping coefficient (0 = none)
    pub damping: f32,
    /// Simulation role
    pub body_type: BodyType,
    /// Whether the gravity system affects this body (Dynamic only)
    pub gravity: bool,
    /// Linear velocity
    pub velocity: Vec2,
    /// Accumulated acceleration, fed by `apply_force`
    pub acceleration: Vec2,
}

impl RigidBody {
    /// Create a body of the given type. Gravity defaults on for Dynamic
    /// bodies and off otherwise.
    pub fn new(body_type: BodyType, mass: f32) -> Self {
        let inv_mass = if body_type == BodyType::Dynamic && mass > 0.0 {
            1.0 / mass
        } else {
            0.0
        };
        Self {
            mass: if mass > 0.0 { mass } else { f32::INFINITY },
            inv_mass,
            damping: 0.0,
            body_type,
            gravity: body_type == BodyType::Dynamic,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
        }
    }

    /// A fully simulated body.
    pub fn dynamic(mass: f32) -> Self {
        Self::new(BodyType::Dynamic, mass)
    }

    /// An immovable body.
    pub fn fixed() -> Self {
        Self::new(BodyType::Static, f32::INFINITY)
    }

    /// A body moved by the embedding rather than the simulation.
    pub fn kinematic() -> Self {
        Self::new(BodyType::Kinematic, f32::INFINITY)
    }

    /// Set the damping coefficient, builder style.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Enable or disable gravity, builder style.
    pub fn with_gravity(mut self, gravity: bool) -> Self {
        self.gravity = gravity;
        self
    }

    /// Whether resolution and integration may move this body.
    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic && self.inv_mass > 0.0
    }

    /// Accumulate a continuous force: `acceleration += force / mass`.
    /// Ignored for immovable bodies.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.inv_mass > 0.0 {
            self.acceleration += force * self.inv_mass;
        }
    }

    /// Apply an instantaneous velocity change: `velocity += impulse / mass`.
    /// Ignored for immovable bodies.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.inv_mass > 0.0 {
            self.velocity += impulse * self.inv_mass;
        }
    }

    /// Exponentially damp the velocity over one timestep.
    pub fn apply_damping(&mut self, dt: f32) {
        if self.damping > 0.0 {
            self.velocity *= (-self.damping * dt).exp();
        }
    }
}
