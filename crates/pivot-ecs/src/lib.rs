//! Pivot ECS - Entity Component System registry
//!
//! A registry-centric ECS: entities are recycled integer handles, components
//! are registered at runtime under unique names and stored in type-erased
//! columns, and systems are plain functions scheduled into fixed phases and
//! filtered by signature bitmasks.
//!
//! Everything is single-threaded and synchronous; the registry is the sole
//! owner of entity metadata and component storage. Component references
//! obtained through `get`/`get_mut` are short-lived borrows, never cached
//! handles.

mod component;
mod entity;
mod error;
pub mod hierarchy;
mod registry;
mod resource;
mod schedule;
mod signature;

pub use entity::Entity;
pub use error::EcsError;
pub use hierarchy::{Children, Parent};
pub use registry::{Registry, MAX_COMPONENT_TYPES};
pub use schedule::{Phase, Script};
pub use signature::{ComponentId, Signature};
