use std::fmt;

use crate::signature::Signature;

/// A recycled integer entity handle.
///
/// An entity is an index into the registry's per-component columns and
/// metadata table; it carries no data of its own. Destroyed ids return to a
/// free list and are reissued by later spawns, so holders of an `Entity`
/// must consult `Registry::is_alive` before acting on a stale handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(pub(crate) u32);

impl Entity {
    /// Build an entity from a raw slot index (mainly for tests and tooling).
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// The slot index of this entity.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-slot entity bookkeeping.
///
/// `active` and `visible` are tri-state: `None` means "no explicit override,
/// defer to the nearest ancestor" (root default is true). The registry's
/// `is_active`/`is_visible` implement that walk.
#[derive(Debug, Default)]
pub(crate) struct EntityMeta {
    pub signature: Signature,
    pub active: Option<bool>,
    pub visible: Option<bool>,
    pub tag: Option<String>,
    pub layer: u8,
    pub alive: bool,
}

impl EntityMeta {
    /// Reset the slot to its freshly-spawned state.
    pub fn reset(&mut self) {
        self.signature = Signature::EMPTY;
        self.active = None;
        self.visible = None;
        self.tag = None;
        self.layer = 0;
        self.alive = false;
    }
}
