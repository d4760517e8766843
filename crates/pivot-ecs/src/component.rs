//! Type-erased columnar component storage
//!
//! Each registered component type owns one column: a dense array indexed by
//! entity id. Columns are boxed behind the `Column` trait and downcast back
//! to their concrete type only at the registry's API boundary. Cleanup is
//! ordinary `Drop`: clearing or overwriting a cell drops the old value.

use std::any::{Any, TypeId};

use crate::signature::ComponentId;

/// Type-erased view of a component column, enough for the registry to clear
/// slots on entity destruction without knowing the component type.
pub(crate) trait Column: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Drop the value at `index`, if any. Returns whether one was present.
    fn clear(&mut self, index: usize) -> bool;
}

/// Dense storage for a single component type, indexed by entity id.
pub(crate) struct DenseColumn<T> {
    cells: Vec<Option<T>>,
}

impl<T: 'static> DenseColumn<T> {
    pub fn new(capacity: usize) -> Self {
        let mut cells = Vec::with_capacity(capacity);
        cells.resize_with(capacity, || None);
        Self { cells }
    }

    /// Insert or overwrite the component for an entity slot. A previous
    /// value in the slot is dropped.
    pub fn insert(&mut self, index: usize, value: T) {
        if index >= self.cells.len() {
            self.cells.resize_with(index + 1, || None);
        }
        self.cells[index] = Some(value);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.cells.get(index).and_then(|c| c.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.cells.get_mut(index).and_then(|c| c.as_mut())
    }

    /// Remove and return the component for an entity slot.
    pub fn take(&mut self, index: usize) -> Option<T> {
        self.cells.get_mut(index).and_then(|c| c.take())
    }
}

impl<T: 'static> Column for DenseColumn<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clear(&mut self, index: usize) -> bool {
        self.take(index).is_some()
    }
}

/// Registration record for one component type.
pub(crate) struct ComponentInfo {
    pub name: String,
    pub id: ComponentId,
    pub type_id: TypeId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Tracked(Arc<AtomicUsize>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn insert_get_take() {
        let mut col = DenseColumn::new(4);
        col.insert(2, 42i32);
        assert_eq!(col.get(2), Some(&42));
        assert_eq!(col.get(0), None);
        assert_eq!(col.take(2), Some(42));
        assert_eq!(col.get(2), None);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut col = DenseColumn::new(1);
        col.insert(10, "far");
        assert_eq!(col.get(10), Some(&"far"));
    }

    #[test]
    fn overwrite_drops_old_value() {
        let drops = Arc::new(AtomicUsize::new(0));
        let mut col = DenseColumn::new(1);
        col.insert(0, Tracked(drops.clone()));
        col.insert(0, Tracked(drops.clone()));
        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert!(col.clear(0));
        assert_eq!(drops.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clear_empty_slot_reports_absence() {
        let mut col = DenseColumn::<u8>::new(4);
        assert!(!col.clear(0));
        assert!(!col.clear(100));
    }
}
