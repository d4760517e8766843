//! Convex polygon collider component

use glam::Vec2;
use pivot_ecs::{Entity, Registry};

/// A convex polygon attached to an entity.
///
/// `model` holds the immutable local-space vertices, centered at the
/// entity's origin; `world` is recomputed every Update from the entity's
/// transform and is what the narrow phase tests. Vertices must describe a
/// convex polygon in consistent winding order; this is not validated.
#[derive(Debug, Clone)]
pub struct Collider {
    /// Local-space vertices, fixed at construction
    pub model: Vec<Vec2>,
    /// World-space vertices, rebuilt each frame by the sync system
    pub world: Vec<Vec2>,
    /// Local offset from the entity's position
    pub offset: Vec2,
    /// Local rotation in radians, added to the entity's rotation
    pub rotation: f32,
    /// Solid colliders block movement and take part in resolution;
    /// non-solid ones only report overlaps (triggers)
    pub solid: bool,
    /// Debug flag: true while the collider touches anything this frame
    pub overlap: bool,
    /// Collision layer index into the world's [`crate::LayerTable`]
    pub layer: usize,
}

impl Collider {
    /// Create a solid collider from explicit local-space vertices.
    pub fn polygon(vertices: Vec<Vec2>) -> Self {
        let world = vertices.clone();
        Self {
            model: vertices,
            world,
            offset: Vec2::ZERO,
            rotation: 0.0,
            solid: true,
            overlap: false,
            layer: 0,
        }
    }

    /// Create a solid regular polygon with `sides` vertices on a circle of
    /// the given radius.
    pub fn regular(sides: usize, radius: f32) -> Self {
        let step = std::f32::consts::TAU / sides as f32;
        let vertices = (0..sides)
            .map(|i| {
                let angle = step * i as f32;
                Vec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::polygon(vertices)
    }

    /// Turn the collider into a trigger: overlaps are still detected and
    /// reported, but it never blocks movement.
    pub fn trigger(mut self) -> Self {
        self.solid = false;
        self
    }

    /// Set the local offset, builder style.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Set the local rotation, builder style.
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Assign a collision layer, builder style.
    pub fn with_layer(mut self, layer: usize) -> Self {
        self.layer = layer;
        self
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.model.len()
    }
}

/// Payload delivered to a [`CollisionListener`] on confirmed overlap.
///
/// Each side of a pair receives its own event: the normal points away from
/// the receiving entity, so the two deliveries carry negated normals.
#[derive(Debug, Clone, Copy)]
pub struct CollisionEvent {
    /// The entity the listener is attached to
    pub entity: Entity,
    /// The entity it collided with
    pub other: Entity,
    /// Unit contact normal, pointing from `entity` toward `other`
    pub normal: Vec2,
    /// Penetration depth along the normal
    pub depth: f32,
}

/// Component holding a per-entity collision callback.
#[derive(Debug, Clone, Copy)]
pub struct CollisionListener {
    pub on_collision: fn(&mut Registry, CollisionEvent),
}

impl CollisionListener {
    pub fn new(on_collision: fn(&mut Registry, CollisionEvent)) -> Self {
        Self { on_collision }
    }
}
