use crate::entity::Entity;
use crate::registry::MAX_COMPONENT_TYPES;

/// Errors surfaced by the registry and hierarchy operations.
///
/// Most of these flag logic bugs in the embedding (unregistered components,
/// stale entity handles, hierarchy cycles) rather than transient conditions;
/// they are typed so callers can recover instead of crashing, but hitting
/// one usually means the calling code needs fixing. `CapacityExhausted` is
/// the exception: it can legitimately occur at runtime under load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    #[error("entity {0} is not alive")]
    DeadEntity(Entity),

    #[error("component type limit reached ({MAX_COMPONENT_TYPES})")]
    ComponentLimit,

    #[error("component `{0}` is not registered")]
    UnknownComponent(String),

    #[error("component name `{0}` is already registered to a different type")]
    NameTaken(String),

    #[error("entity capacity exhausted ({0})")]
    CapacityExhausted(usize),

    #[error("attaching {child} under {parent} would create a cycle")]
    HierarchyCycle { parent: Entity, child: Entity },
}
