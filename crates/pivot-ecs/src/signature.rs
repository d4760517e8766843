//! Component identifiers and signature bitmasks
//!
//! Component ids are assigned sequentially at registration and stay stable
//! for the registry's lifetime. A signature sets one bit per component id,
//! so at most 64 component types can exist; systems store a signature built
//! at registration time and test entities against it each phase.

use std::fmt;

/// Identifier of a registered component type (a bit position, 0..64).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub(crate) u8);

impl ComponentId {
    /// The column index this id refers to.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The signature bit for this id.
    pub fn bit(&self) -> u64 {
        1u64 << self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bitmask over registered component types.
///
/// Bit `i` set means the entity has (or the query requires) component `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signature(u64);

impl Signature {
    /// The signature matching every entity.
    pub const EMPTY: Signature = Signature(0);

    /// Build a signature from a raw bitmask.
    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// The raw bitmask.
    pub fn bits(&self) -> u64 {
        self.0
    }

    /// Return this signature with the given component's bit set.
    pub fn with(mut self, id: ComponentId) -> Self {
        self.insert(id);
        self
    }

    /// Set the given component's bit.
    pub fn insert(&mut self, id: ComponentId) {
        self.0 |= id.bit();
    }

    /// Clear the given component's bit.
    pub fn remove(&mut self, id: ComponentId) {
        self.0 &= !id.bit();
    }

    /// Whether the given component's bit is set.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.0 & id.bit() != 0
    }

    /// Whether every bit of `other` is also set here.
    pub fn contains_all(&self, other: Signature) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no bits are set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
