//! Generic identity-keyed entity store.
//!
//! `EntityStore<T>` is the CRUD engine shared by both catalogs. Identities
//! are assigned by the store, strictly increasing, and never reused after
//! a delete. Iteration order equals insertion order because ids only grow.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A persisted record with a store-assigned identity.
pub trait Entity: Clone {
    /// Entity kind name used in error messages (e.g. "movie")
    const KIND: &'static str;

    /// Returns the record identity.
    fn id(&self) -> u64;

    /// Sets the record identity. Called exactly once, on insert.
    fn set_id(&mut self, id: u64);
}

/// Identity-keyed collection for one entity type.
///
/// Backed by a `BTreeMap` so `list` yields records in id order, which is
/// insertion order under monotonic id assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore<T: Entity> {
    records: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T: Entity> EntityStore<T> {
    /// Creates an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Inserts a record, assigning the next identity.
    ///
    /// Any id already set on `entity` is overwritten; callers never pick
    /// identities. Returns the stored value.
    pub fn insert(&mut self, mut entity: T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        entity.set_id(id);
        self.records.insert(id, entity.clone());
        entity
    }

    /// Returns the record with the given identity.
    pub fn get(&self, id: u64) -> Result<&T, CatalogError> {
        self.records
            .get(&id)
            .ok_or_else(|| CatalogError::not_found(T::KIND, id))
    }

    /// Returns all records in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.records.values().cloned().collect()
    }

    /// Replaces every field of the record with the given identity.
    ///
    /// Full-replace semantics: the stored value becomes `entity` with the
    /// original identity re-applied. The identity itself never changes.
    pub fn update(&mut self, id: u64, mut entity: T) -> Result<T, CatalogError> {
        if !self.records.contains_key(&id) {
            return Err(CatalogError::not_found(T::KIND, id));
        }
        entity.set_id(id);
        self.records.insert(id, entity.clone());
        Ok(entity)
    }

    /// Removes the record with the given identity. Hard delete.
    pub fn remove(&mut self, id: u64) -> Result<T, CatalogError> {
        self.records
            .remove(&id)
            .ok_or_else(|| CatalogError::not_found(T::KIND, id))
    }

    /// Returns true if a record with the given identity exists.
    pub fn contains(&self, id: u64) -> bool {
        self.records.contains_key(&id)
    }

    /// Returns the number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntest::timeout;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: u64,
        name: String,
    }

    impl Entity for Widget {
        const KIND: &'static str = "widget";

        fn id(&self) -> u64 {
            self.id
        }

        fn set_id(&mut self, id: u64) {
            self.id = id;
        }
    }

    fn widget(name: &str) -> Widget {
        Widget {
            id: 0,
            name: name.to_string(),
        }
    }

    #[timeout(1000)]
    #[test]
    fn test_insert_assigns_increasing_ids() {
        let mut store = EntityStore::new();
        let a = store.insert(widget("a"));
        let b = store.insert(widget("b"));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[timeout(1000)]
    #[test]
    fn test_insert_overwrites_caller_supplied_id() {
        let mut store = EntityStore::new();
        let mut w = widget("a");
        w.id = 99;
        let stored = store.insert(w);
        assert_eq!(stored.id, 1);
        assert!(store.get(99).is_err());
    }

    #[timeout(1000)]
    #[test]
    fn test_get_returns_inserted_value() {
        let mut store = EntityStore::new();
        let stored = store.insert(widget("a"));
        assert_eq!(store.get(stored.id).unwrap(), &stored);
    }

    #[timeout(1000)]
    #[test]
    fn test_get_missing_is_not_found() {
        let store: EntityStore<Widget> = EntityStore::new();
        assert_eq!(
            store.get(1),
            Err(CatalogError::NotFound {
                entity: "widget",
                id: 1
            })
        );
    }

    #[timeout(1000)]
    #[test]
    fn test_list_is_insertion_order() {
        let mut store = EntityStore::new();
        store.insert(widget("a"));
        store.insert(widget("b"));
        store.insert(widget("c"));
        let names: Vec<_> = store.list().into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[timeout(1000)]
    #[test]
    fn test_update_replaces_fields_and_keeps_id() {
        let mut store = EntityStore::new();
        let stored = store.insert(widget("a"));
        let mut replacement = widget("b");
        replacement.id = 42; // ignored
        let updated = store.update(stored.id, replacement).unwrap();
        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.name, "b");
        assert_eq!(store.get(stored.id).unwrap().name, "b");
    }

    #[timeout(1000)]
    #[test]
    fn test_update_missing_is_not_found() {
        let mut store = EntityStore::new();
        assert!(store.update(7, widget("a")).is_err());
    }

    #[timeout(1000)]
    #[test]
    fn test_remove_then_get_is_not_found() {
        let mut store = EntityStore::new();
        let stored = store.insert(widget("a"));
        store.remove(stored.id).unwrap();
        assert!(store.get(stored.id).is_err());
        assert!(store.remove(stored.id).is_err());
    }

    #[timeout(1000)]
    #[test]
    fn test_ids_never_reused_after_delete() {
        let mut store = EntityStore::new();
        let a = store.insert(widget("a"));
        store.remove(a.id).unwrap();
        let b = store.insert(widget("b"));
        assert_eq!(b.id, 2);
    }
}
