//! Phase scheduler
//!
//! Systems are plain functions paired with a signature built at registration
//! time, grouped into a fixed set of phases. The host loop decides when each
//! phase runs (including how many FixedUpdate steps per frame); the
//! scheduler only dispatches.

use crate::entity::Entity;
use crate::registry::Registry;
use crate::signature::Signature;

/// A system callback, invoked once per matching entity.
pub type Script = fn(&mut Registry, Entity);

/// The fixed scheduling points of a frame.
///
/// Update-class phases (Start, Update, LateUpdate, FixedUpdate) visit only
/// active entities; render-class phases (Render, Gui) only visible ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Initialization systems, run once by the host before the first frame
    Start,
    /// Frame-rate dependent gameplay logic
    Update,
    /// Post-update processing
    LateUpdate,
    /// Fixed-timestep logic; the host drives one run per drained step
    FixedUpdate,
    /// Drawing operations
    Render,
    /// UI overlay drawing
    Gui,
}

impl Phase {
    /// Number of phases.
    pub const COUNT: usize = 6;

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Whether this phase gates on visibility rather than activity.
    pub fn is_render(&self) -> bool {
        matches!(self, Phase::Render | Phase::Gui)
    }
}

/// One registered system: callback plus required-signature filter.
#[derive(Clone, Copy)]
pub(crate) struct SystemEntry {
    pub run: Script,
    pub mask: Signature,
}

impl Registry {
    /// Register a system in a phase. Within a phase, systems run in
    /// registration order. The signature is captured now and never
    /// re-resolved, so register components before their systems.
    pub fn add_system(&mut self, run: Script, phase: Phase, mask: Signature) {
        tracing::debug!(?phase, mask = mask.bits(), "registered system");
        self.systems[phase.index()].push(SystemEntry { run, mask });
    }

    /// Run every system of a phase over the matching entities.
    ///
    /// The entity order is snapshotted per system, and liveness is
    /// re-checked before each callback, so scripts may spawn and despawn
    /// freely; entities spawned mid-iteration are picked up by the next
    /// system's snapshot.
    pub fn run_phase(&mut self, phase: Phase) {
        let mut index = 0;
        while index < self.systems[phase.index()].len() {
            let entry = self.systems[phase.index()][index];
            index += 1;
            for entity in self.entity_order(phase.is_render()) {
                if !self.is_alive(entity) || !self.has_components(entity, entry.mask) {
                    continue;
                }
                let admitted = if phase.is_render() {
                    self.is_visible(entity)
                } else {
                    self.is_active(entity)
                };
                if admitted {
                    (entry.run)(self, entity);
                }
            }
        }
    }

    /// Visitation order: ascending id, or grouped by layer index (ascending,
    /// matching layer registration order) then id for render-class phases.
    fn entity_order(&self, by_layer: bool) -> Vec<Entity> {
        let ids = self.entities();
        if !by_layer {
            return ids;
        }
        let max_layer = ids
            .iter()
            .map(|e| self.metas[e.index()].layer)
            .max()
            .unwrap_or(0);
        let mut order = Vec::with_capacity(ids.len());
        for layer in 0..=max_layer {
            order.extend(ids.iter().copied().filter(|e| self.metas[e.index()].layer == layer));
        }
        order
    }
}
