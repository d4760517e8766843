//! Named collision layers
//!
//! A small table of named layers with a symmetric pairwise collision
//! matrix, stored as one u64 mask per layer. Stored as a registry resource;
//! when no table exists (or a collider's layer index is out of range),
//! everything collides with everything.

/// Hard limit on layers, fixed by the mask width.
pub const MAX_LAYERS: usize = 64;

#[derive(Debug, Clone)]
struct Layer {
    name: String,
    mask: u64,
}

/// Named collision layers with a symmetric enable/disable matrix.
#[derive(Debug, Clone, Default)]
pub struct LayerTable {
    layers: Vec<Layer>,
}

impl LayerTable {
    /// An empty table: no layers, everything collides.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional bootstrap: a "default" layer plus a fully isolated
    /// "gui" layer.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.add_layer("default");
        let gui = table.add_layer("gui");
        table.cleanup(gui);
        table
    }

    /// Append a layer that collides with every existing layer (and itself).
    /// Returns its index. Panics past 64 layers (a structural limit, like
    /// the component-type cap).
    pub fn add_layer(&mut self, name: impl Into<String>) -> usize {
        assert!(self.layers.len() < MAX_LAYERS, "layer limit reached (64)");
        let index = self.layers.len();
        let bit = 1u64 << index;
        for layer in &mut self.layers {
            layer.mask |= bit;
        }
        let mut mask = bit;
        for i in 0..index {
            mask |= 1u64 << i;
        }
        self.layers.push(Layer {
            name: name.into(),
            mask,
        });
        index
    }

    /// Look up a layer index by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }

    /// The layer's name, if the index is valid.
    pub fn name(&self, layer: usize) -> Option<&str> {
        self.layers.get(layer).map(|l| l.name.as_str())
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no layers are configured.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Allow the two layers to collide (symmetric).
    pub fn enable(&mut self, a: usize, b: usize) {
        if a < self.layers.len() && b < self.layers.len() {
            self.layers[a].mask |= 1u64 << b;
            self.layers[b].mask |= 1u64 << a;
        }
    }

    /// Forbid the two layers from colliding (symmetric).
    pub fn disable(&mut self, a: usize, b: usize) {
        if a < self.layers.len() && b < self.layers.len() {
            self.layers[a].mask &= !(1u64 << b);
            self.layers[b].mask &= !(1u64 << a);
        }
    }

    /// Fully isolate a layer: clear its mask and its bit everywhere else.
    pub fn cleanup(&mut self, layer: usize) {
        if layer >= self.layers.len() {
            return;
        }
        let bit = 1u64 << layer;
        for other in &mut self.layers {
            other.mask &= !bit;
        }
        self.layers[layer].mask = 0;
    }

    /// Whether the two layers may collide. Out-of-range indices (including
    /// the empty-table case) default to true.
    pub fn can_collide(&self, a: usize, b: usize) -> bool {
        if a >= self.layers.len() || b >= self.layers.len() {
            return true;
        }
        self.layers[a].mask & (1u64 << b) != 0
    }
}
