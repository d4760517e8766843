//! Parent/child hierarchy
//!
//! `Parent` and `Children` are a bidirectional relation kept mutually
//! consistent by the operations here: `Parent(child) == p` exactly when
//! `Children(p)` contains the child. Cycles are rejected by walking the
//! ancestor chain before every attach. An entity has at most one parent.

use crate::entity::Entity;
use crate::error::EcsError;
use crate::registry::Registry;

/// Component linking an entity to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent {
    pub entity: Entity,
}

/// Component holding an entity's direct children.
///
/// Removed automatically when the last child is detached.
#[derive(Debug, Clone, Default)]
pub struct Children {
    pub list: Vec<Entity>,
}

/// Register the hierarchy components. Idempotent; called implicitly by
/// [`attach`], but embeddings that build signatures over `Parent` or
/// `Children` before any attach happens should call it up front.
pub fn register(reg: &mut Registry) -> Result<(), EcsError> {
    reg.register::<Parent>("Parent")?;
    reg.register::<Children>("Children")?;
    Ok(())
}

/// Attach `child` under `parent`.
///
/// No-op when `parent == child` or when the child is already attached to
/// this parent. Rejected with `HierarchyCycle` when the child is an ancestor
/// of the parent. A child attached elsewhere is detached from its old parent
/// first.
pub fn attach(reg: &mut Registry, parent: Entity, child: Entity) -> Result<(), EcsError> {
    if parent == child {
        return Ok(());
    }
    if !reg.is_alive(parent) {
        return Err(EcsError::DeadEntity(parent));
    }
    if !reg.is_alive(child) {
        return Err(EcsError::DeadEntity(child));
    }
    register(reg)?;

    // walk the parent chain: if `child` is already an ancestor, attaching
    // would close a loop
    let mut cursor = parent;
    while let Some(link) = reg.get::<Parent>(cursor) {
        if link.entity == child {
            tracing::warn!(%parent, %child, "rejected hierarchy attach: cycle");
            return Err(EcsError::HierarchyCycle { parent, child });
        }
        cursor = link.entity;
    }

    if let Some(children) = reg.get::<Children>(parent) {
        if children.list.contains(&child) {
            return Ok(());
        }
    }

    if let Some(old_parent) = parent_of(reg, child) {
        detach(reg, old_parent, child);
    }

    if let Some(children) = reg.get_mut::<Children>(parent) {
        children.list.push(child);
    } else {
        reg.insert(parent, Children { list: vec![child] })?;
    }
    reg.insert(child, Parent { entity: parent })?;
    Ok(())
}

/// Detach `child` from `parent`: swap-remove it from the child list, clear
/// its `Parent`, and drop an emptied `Children` component.
pub fn detach(reg: &mut Registry, parent: Entity, child: Entity) {
    let mut emptied = false;
    if let Some(children) = reg.get_mut::<Children>(parent) {
        if let Some(pos) = children.list.iter().position(|&c| c == child) {
            children.list.swap_remove(pos);
        }
        emptied = children.list.is_empty();
    }
    if emptied {
        reg.remove::<Children>(parent);
    }
    reg.remove::<Parent>(child);
}

/// The entity's parent, if attached.
pub fn parent_of(reg: &Registry, entity: Entity) -> Option<Entity> {
    reg.get::<Parent>(entity).map(|p| p.entity)
}

/// Snapshot of the entity's direct children.
pub fn children_of(reg: &Registry, entity: Entity) -> Vec<Entity> {
    reg.get::<Children>(entity)
        .map(|c| c.list.clone())
        .unwrap_or_default()
}

/// Destroy an entity, detaching it from its parent and promoting its
/// children to rootless entities.
pub fn destroy(reg: &mut Registry, entity: Entity) -> bool {
    if !reg.is_alive(entity) {
        return false;
    }
    if let Some(parent) = parent_of(reg, entity) {
        detach(reg, parent, entity);
    }
    for child in children_of(reg, entity) {
        reg.remove::<Parent>(child);
    }
    reg.despawn(entity)
}

/// Destroy an entity and its entire subtree, children before parents.
pub fn destroy_recursive(reg: &mut Registry, entity: Entity) -> bool {
    if !reg.is_alive(entity) {
        return false;
    }
    if let Some(parent) = parent_of(reg, entity) {
        detach(reg, parent, entity);
    }
    destroy_subtree(reg, entity);
    true
}

fn destroy_subtree(reg: &mut Registry, entity: Entity) {
    for child in children_of(reg, entity) {
        destroy_subtree(reg, child);
    }
    reg.despawn(entity);
}

/// Run `f` on each direct child.
pub fn for_each_child(
    reg: &mut Registry,
    entity: Entity,
    mut f: impl FnMut(&mut Registry, Entity),
) {
    for child in children_of(reg, entity) {
        f(reg, child);
    }
}

/// Run `f` on every descendant, depth-first, each child before its subtree.
pub fn for_each_child_recursive(
    reg: &mut Registry,
    entity: Entity,
    mut f: impl FnMut(&mut Registry, Entity),
) {
    walk(reg, entity, &mut f);
}

fn walk(reg: &mut Registry, entity: Entity, f: &mut impl FnMut(&mut Registry, Entity)) {
    for child in children_of(reg, entity) {
        f(reg, child);
        walk(reg, child, f);
    }
}

/// Set an explicit active override on the entity and its whole subtree.
pub fn set_active_recursive(reg: &mut Registry, entity: Entity, active: bool) {
    reg.set_active(entity, active);
    for child in children_of(reg, entity) {
        set_active_recursive(reg, child, active);
    }
}

/// Set an explicit visible override on the entity and its whole subtree.
pub fn set_visible_recursive(reg: &mut Registry, entity: Entity, visible: bool) {
    reg.set_visible(entity, visible);
    for child in children_of(reg, entity) {
        set_visible_recursive(reg, child, visible);
    }
}
