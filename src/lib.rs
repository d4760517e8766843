//! Pivot - a 2D entity-component-system runtime
//!
//! This facade crate re-exports the engine's building blocks:
//! - [`pivot_core`]: math primitives, transforms, color, and the time source
//! - [`pivot_ecs`]: the registry (entities, components, signatures, phases, hierarchy)
//! - [`pivot_physics`]: convex colliders, SAT narrow phase, rigid bodies, layers
//!
//! A minimal embedding looks like this:
//!
//! ```
//! use pivot::ecs::{Phase, Registry};
//! use pivot::physics;
//!
//! let mut world = Registry::new();
//! physics::register(&mut world).unwrap();
//!
//! world.run_phase(Phase::Start);
//! // per frame, driven by the host loop:
//! world.run_phase(Phase::Update);
//! world.run_phase(Phase::LateUpdate);
//! world.run_phase(Phase::FixedUpdate);
//! world.run_phase(Phase::Render);
//! world.run_phase(Phase::Gui);
//! ```

pub use pivot_core as core;
pub use pivot_ecs as ecs;
pub use pivot_physics as physics;

pub use pivot_core::{Color, DebugDraw, GameTime, TimeConfig, Transform2, Vec2};
pub use pivot_ecs::{EcsError, Entity, Phase, Registry, Signature};
pub use pivot_physics::{Collider, PhysicsConfig, RigidBody};
