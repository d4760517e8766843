//! The central ECS registry
//!
//! Owns all entity metadata, component columns, systems, and resources.
//! Entities are recycled integer slots; components are registered at runtime
//! under unique names and addressed either by type (fast `TypeId` lookup) or
//! by name (binary search over a kept-sorted index, used when building
//! signatures).

use std::any::TypeId;
use std::collections::HashMap;

use crate::component::{Column, ComponentInfo, DenseColumn};
use crate::entity::{Entity, EntityMeta};
use crate::error::EcsError;
use crate::hierarchy::Parent;
use crate::resource::Resources;
use crate::schedule::{Phase, SystemEntry};
use crate::signature::{ComponentId, Signature};

/// Hard limit on registered component types, fixed by the signature width.
pub const MAX_COMPONENT_TYPES: usize = 64;

/// The ECS registry: entities, components, systems, and resources in one
/// single-threaded container.
pub struct Registry {
    pub(crate) metas: Vec<EntityMeta>,
    free: Vec<u32>,
    alive_count: usize,
    capacity: Option<usize>,

    columns: Vec<Box<dyn Column>>,
    infos: Vec<ComponentInfo>,
    /// Name index, kept sorted for binary search.
    by_name: Vec<(String, ComponentId)>,
    by_type: HashMap<TypeId, ComponentId>,

    pub(crate) systems: [Vec<SystemEntry>; Phase::COUNT],
    resources: Resources,
}

impl Registry {
    /// Create a registry with no entity cap.
    pub fn new() -> Self {
        Self {
            metas: Vec::new(),
            free: Vec::new(),
            alive_count: 0,
            capacity: None,
            columns: Vec::new(),
            infos: Vec::new(),
            by_name: Vec::new(),
            by_type: HashMap::new(),
            systems: std::array::from_fn(|_| Vec::new()),
            resources: Resources::new(),
        }
    }

    /// Create a registry with a hard entity cap; `spawn` fails once reached.
    pub fn with_capacity(max_entities: usize) -> Self {
        let mut registry = Self::new();
        registry.capacity = Some(max_entities);
        registry.metas.reserve(max_entities);
        registry
    }

    // ---- Entity management ----

    /// Spawn a new entity, reusing a freed slot if one is available.
    pub fn spawn(&mut self) -> Result<Entity, EcsError> {
        if let Some(index) = self.free.pop() {
            self.metas[index as usize].alive = true;
            self.alive_count += 1;
            return Ok(Entity(index));
        }
        if let Some(cap) = self.capacity {
            if self.metas.len() >= cap {
                tracing::warn!(capacity = cap, "entity capacity exhausted");
                return Err(EcsError::CapacityExhausted(cap));
            }
        }
        let index = self.metas.len() as u32;
        self.metas.push(EntityMeta {
            alive: true,
            ..EntityMeta::default()
        });
        self.alive_count += 1;
        Ok(Entity(index))
    }

    /// Spawn a new entity carrying a lookup tag.
    pub fn spawn_tagged(&mut self, tag: impl Into<String>) -> Result<Entity, EcsError> {
        let entity = self.spawn()?;
        self.metas[entity.index()].tag = Some(tag.into());
        Ok(entity)
    }

    /// Destroy an entity: drop all its components, reset its metadata, and
    /// return the id to the free list. Returns `false` for dead or unknown
    /// handles, so double-despawn is a safe no-op.
    ///
    /// This is the raw form; it does not touch hierarchy bookkeeping on
    /// related entities. Use [`crate::hierarchy::destroy`] for parented
    /// entities.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        let Some(meta) = self.metas.get(entity.index()) else {
            return false;
        };
        if !meta.alive {
            return false;
        }
        let signature = meta.signature;
        for info in &self.infos {
            if signature.contains(info.id) {
                self.columns[info.id.index()].clear(entity.index());
            }
        }
        self.metas[entity.index()].reset();
        self.free.push(entity.0);
        self.alive_count -= 1;
        true
    }

    /// Whether the entity is currently alive (not destroyed or recycled).
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.metas.get(entity.index()).is_some_and(|m| m.alive)
    }

    /// Number of currently alive entities.
    pub fn entity_count(&self) -> usize {
        self.alive_count
    }

    /// Snapshot of all alive entities in ascending id order.
    pub fn entities(&self) -> Vec<Entity> {
        self.metas
            .iter()
            .enumerate()
            .filter(|(_, m)| m.alive)
            .map(|(i, _)| Entity(i as u32))
            .collect()
    }

    /// Run `f` on every alive entity, in ascending id order. The snapshot is
    /// taken up front, so `f` may spawn or despawn freely; entities spawned
    /// during the walk are not visited, despawned ones are skipped.
    pub fn for_each_entity(&mut self, mut f: impl FnMut(&mut Registry, Entity)) {
        for entity in self.entities() {
            if self.is_alive(entity) {
                f(self, entity);
            }
        }
    }

    // ---- Entity state ----

    /// Set an explicit active override on the entity.
    ///
    /// Inactive entities are skipped by Start/Update/LateUpdate/FixedUpdate
    /// systems. This touches only the one entity; children without their own
    /// override inherit the new state dynamically.
    pub fn set_active(&mut self, entity: Entity, active: bool) {
        if let Some(meta) = self.metas.get_mut(entity.index()) {
            if meta.alive {
                meta.active = Some(active);
            }
        }
    }

    /// Effective active state: the entity's own override if set, otherwise
    /// the nearest ancestor's, defaulting to true at the root.
    pub fn is_active(&self, entity: Entity) -> bool {
        let Some(meta) = self.metas.get(entity.index()) else {
            return false;
        };
        if !meta.alive {
            return false;
        }
        if let Some(active) = meta.active {
            return active;
        }
        match self.get::<Parent>(entity) {
            Some(parent) => self.is_active(parent.entity),
            None => true,
        }
    }

    /// Set an explicit visible override on the entity.
    ///
    /// Invisible entities are skipped by Render/Gui systems.
    pub fn set_visible(&mut self, entity: Entity, visible: bool) {
        if let Some(meta) = self.metas.get_mut(entity.index()) {
            if meta.alive {
                meta.visible = Some(visible);
            }
        }
    }

    /// Effective visible state, resolved like [`Registry::is_active`].
    pub fn is_visible(&self, entity: Entity) -> bool {
        let Some(meta) = self.metas.get(entity.index()) else {
            return false;
        };
        if !meta.alive {
            return false;
        }
        if let Some(visible) = meta.visible {
            return visible;
        }
        match self.get::<Parent>(entity) {
            Some(parent) => self.is_visible(parent.entity),
            None => true,
        }
    }

    /// Assign the entity to a render layer. Render-phase visitation groups
    /// entities by layer index ascending, so layers double as a coarse
    /// z-ordering mechanism.
    pub fn set_layer(&mut self, entity: Entity, layer: u8) {
        if let Some(meta) = self.metas.get_mut(entity.index()) {
            if meta.alive {
                meta.layer = layer;
            }
        }
    }

    /// The entity's render layer index (0 when unset or dead).
    pub fn layer(&self, entity: Entity) -> u8 {
        self.metas
            .get(entity.index())
            .filter(|m| m.alive)
            .map_or(0, |m| m.layer)
    }

    /// Set or clear the entity's lookup tag.
    pub fn set_tag(&mut self, entity: Entity, tag: Option<String>) {
        if let Some(meta) = self.metas.get_mut(entity.index()) {
            if meta.alive {
                meta.tag = tag;
            }
        }
    }

    /// The entity's tag, if any.
    pub fn tag(&self, entity: Entity) -> Option<&str> {
        self.metas
            .get(entity.index())
            .filter(|m| m.alive)
            .and_then(|m| m.tag.as_deref())
    }

    /// Whether the entity carries exactly this tag.
    pub fn has_tag(&self, entity: Entity, tag: &str) -> bool {
        self.tag(entity) == Some(tag)
    }

    /// Find the first alive entity (in id order) carrying the tag.
    /// This is an O(n) scan, intended for setup code rather than hot loops.
    pub fn find_by_tag(&self, tag: &str) -> Option<Entity> {
        self.metas
            .iter()
            .enumerate()
            .find(|(_, m)| m.alive && m.tag.as_deref() == Some(tag))
            .map(|(i, _)| Entity(i as u32))
    }

    // ---- Component management ----

    /// Register a component type under a unique name.
    ///
    /// Idempotent per type: re-registering a type returns its existing id.
    /// Fails once 64 types exist or when the name is already bound to a
    /// different type. Components must be registered before any system that
    /// queries them builds its signature.
    pub fn register<T: 'static>(&mut self, name: &str) -> Result<ComponentId, EcsError> {
        if let Some(id) = self.by_type.get(&TypeId::of::<T>()) {
            return Ok(*id);
        }
        if self.lookup_name(name).is_some() {
            return Err(EcsError::NameTaken(name.to_string()));
        }
        if self.infos.len() >= MAX_COMPONENT_TYPES {
            return Err(EcsError::ComponentLimit);
        }
        let id = ComponentId(self.infos.len() as u8);
        self.columns.push(Box::new(DenseColumn::<T>::new(self.metas.len())));
        self.infos.push(ComponentInfo {
            name: name.to_string(),
            id,
            type_id: TypeId::of::<T>(),
        });
        let pos = self
            .by_name
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .unwrap_err();
        self.by_name.insert(pos, (name.to_string(), id));
        self.by_type.insert(TypeId::of::<T>(), id);
        tracing::debug!(component = name, id = id.0, "registered component");
        Ok(id)
    }

    /// Insert a component on an entity, setting its signature bit.
    /// An already-present component of the same type is dropped first.
    pub fn insert<T: 'static>(&mut self, entity: Entity, value: T) -> Result<(), EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::DeadEntity(entity));
        }
        let id = self
            .by_type
            .get(&TypeId::of::<T>())
            .copied()
            .ok_or_else(|| EcsError::UnknownComponent(std::any::type_name::<T>().to_string()))?;
        self.column_mut::<T>(id).insert(entity.index(), value);
        self.metas[entity.index()].signature.insert(id);
        Ok(())
    }

    /// Borrow a component on an entity. `None` when the entity is dead, the
    /// type is unregistered, or the entity simply lacks the component.
    pub fn get<T: 'static>(&self, entity: Entity) -> Option<&T> {
        let meta = self.metas.get(entity.index()).filter(|m| m.alive)?;
        let id = *self.by_type.get(&TypeId::of::<T>())?;
        if !meta.signature.contains(id) {
            return None;
        }
        self.column::<T>(id).get(entity.index())
    }

    /// Mutably borrow a component on an entity.
    pub fn get_mut<T: 'static>(&mut self, entity: Entity) -> Option<&mut T> {
        let meta = self.metas.get(entity.index()).filter(|m| m.alive)?;
        let id = *self.by_type.get(&TypeId::of::<T>())?;
        if !meta.signature.contains(id) {
            return None;
        }
        self.column_mut::<T>(id).get_mut(entity.index())
    }

    /// Remove a component from an entity, dropping its value and clearing
    /// the signature bit. Returns whether it was present.
    pub fn remove<T: 'static>(&mut self, entity: Entity) -> bool {
        let Some(id) = self.by_type.get(&TypeId::of::<T>()).copied() else {
            return false;
        };
        self.remove_id(entity, id)
    }

    /// Type-erased removal by component id.
    pub fn remove_id(&mut self, entity: Entity, id: ComponentId) -> bool {
        let Some(meta) = self.metas.get_mut(entity.index()) else {
            return false;
        };
        if !meta.alive || !meta.signature.contains(id) {
            return false;
        }
        meta.signature.remove(id);
        self.columns[id.index()].clear(entity.index())
    }

    /// Whether the entity carries a component of this type.
    pub fn has<T: 'static>(&self, entity: Entity) -> bool {
        let Some(meta) = self.metas.get(entity.index()).filter(|m| m.alive) else {
            return false;
        };
        self.by_type
            .get(&TypeId::of::<T>())
            .is_some_and(|id| meta.signature.contains(*id))
    }

    /// Whether the entity's signature covers every bit of `mask`.
    pub fn has_components(&self, entity: Entity, mask: Signature) -> bool {
        self.metas
            .get(entity.index())
            .filter(|m| m.alive)
            .is_some_and(|m| m.signature.contains_all(mask))
    }

    /// Resolve a component id by name (binary search over the name index).
    pub fn component_id(&self, name: &str) -> Option<ComponentId> {
        self.lookup_name(name)
    }

    /// Resolve a component id by type.
    pub fn component_id_of<T: 'static>(&self) -> Option<ComponentId> {
        self.by_type.get(&TypeId::of::<T>()).copied()
    }

    /// Number of registered component types.
    pub fn component_count(&self) -> usize {
        self.infos.len()
    }

    /// Build a signature from component names, OR-ing one bit per name.
    /// Fails on any unresolvable name, which usually means a system is being
    /// registered before its components.
    pub fn signature(&self, names: &[&str]) -> Result<Signature, EcsError> {
        let mut mask = Signature::EMPTY;
        for name in names {
            let id = self
                .lookup_name(name)
                .ok_or_else(|| EcsError::UnknownComponent(name.to_string()))?;
            mask.insert(id);
        }
        Ok(mask)
    }

    // ---- Resources ----

    /// Insert a singleton resource, replacing any previous value.
    pub fn insert_resource<T: 'static>(&mut self, value: T) {
        self.resources.insert(value);
    }

    /// Borrow a singleton resource.
    pub fn resource<T: 'static>(&self) -> Option<&T> {
        self.resources.get::<T>()
    }

    /// Mutably borrow a singleton resource.
    pub fn resource_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resources.get_mut::<T>()
    }

    /// Remove a singleton resource, returning it if present.
    pub fn remove_resource<T: 'static>(&mut self) -> Option<T> {
        self.resources.remove::<T>()
    }

    /// Whether a resource of this type exists.
    pub fn has_resource<T: 'static>(&self) -> bool {
        self.resources.contains::<T>()
    }

    // ---- Internals ----

    fn lookup_name(&self, name: &str) -> Option<ComponentId> {
        self.by_name
            .binary_search_by(|(n, _)| n.as_str().cmp(name))
            .ok()
            .map(|pos| self.by_name[pos].1)
    }

    fn column<T: 'static>(&self, id: ComponentId) -> &DenseColumn<T> {
        self.columns[id.index()]
            .as_any()
            .downcast_ref::<DenseColumn<T>>()
            .expect("column type mismatch")
    }

    fn column_mut<T: 'static>(&mut self, id: ComponentId) -> &mut DenseColumn<T> {
        self.columns[id.index()]
            .as_any_mut()
            .downcast_mut::<DenseColumn<T>>()
            .expect("column type mismatch")
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
