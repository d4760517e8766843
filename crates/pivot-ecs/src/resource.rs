//! Singleton resources
//!
//! A type-keyed map of world-global values: the layer table, physics
//! configuration, and whatever the embedding wants to share between systems
//! without attaching it to an entity.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Type-map storage for singleton resources.
#[derive(Default)]
pub(crate) struct Resources {
    map: HashMap<TypeId, Box<dyn Any>>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource, replacing any previous value of the same type.
    pub fn insert<T: 'static>(&mut self, value: T) {
        self.map.insert(TypeId::of::<T>(), Box::new(value));
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.map.get(&TypeId::of::<T>()).and_then(|b| b.downcast_ref())
    }

    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|b| b.downcast_mut())
    }

    /// Remove a resource, returning it if it existed.
    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.map
            .remove(&TypeId::of::<T>())
            .and_then(|b| b.downcast().ok())
            .map(|b| *b)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.map.contains_key(&TypeId::of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_mutate() {
        let mut res = Resources::new();
        res.insert(7u32);
        assert_eq!(res.get::<u32>(), Some(&7));
        *res.get_mut::<u32>().unwrap() = 9;
        assert_eq!(res.get::<u32>(), Some(&9));
    }

    #[test]
    fn replace_keeps_latest() {
        let mut res = Resources::new();
        res.insert("first".to_string());
        res.insert("second".to_string());
        assert_eq!(res.get::<String>().map(String::as_str), Some("second"));
    }

    #[test]
    fn remove_returns_value() {
        let mut res = Resources::new();
        res.insert(vec![1, 2, 3]);
        assert_eq!(res.remove::<Vec<i32>>(), Some(vec![1, 2, 3]));
        assert!(!res.contains::<Vec<i32>>());
    }
}
