//! Relationship Resolver - answers lookups in either direction of a reference.
//!
//! Records only store their forward references (a narrative lists its person
//! ids; a person does not list its narratives). The resolver recovers the
//! reverse direction by scanning the owning collection on every call:
//!
//! 1. **Forward**: resolve an id list on the record, dropping dangling ids
//! 2. **Reverse**: scan the owning collection for records whose id list (or
//!    id-keyed map) contains the target id
//! 3. **Parent/child**: forward via `parent*Id`, reverse by scanning for it
//!
//! Nothing is cached, so every answer reflects the store as it is right now.

mod entities;
mod relations;

use std::collections::{BTreeMap, HashSet};

use entity_store::{references, EntityStore, Record, RecordId};
use tracing::trace;

/// Read-only relationship lookups over an [`EntityStore`].
#[derive(Debug, Clone, Copy)]
pub struct RelationshipResolver<'a> {
    store: &'a EntityStore,
}

impl<'a> RelationshipResolver<'a> {
    pub fn new(store: &'a EntityStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a EntityStore {
        self.store
    }

    /// Look up a single record; `None` when it does not exist.
    pub fn get<T: Record>(&self, id: &str) -> Option<&'a T> {
        self.store.get::<T>(id)
    }

    /// Every record of type `T` matching `predicate`, in collection order.
    pub fn scan<T: Record>(&self, predicate: impl Fn(&T) -> bool) -> Vec<&'a T> {
        self.store
            .all::<T>()
            .iter()
            .filter(|record| predicate(*record))
            .collect()
    }

    /// Records of type `T` whose id-list field `via` contains `id`.
    ///
    /// This is the reverse direction of a forward reference held on `T`.
    pub fn related_to<T: Record>(
        &self,
        id: &str,
        via: impl Fn(&T) -> &[RecordId],
    ) -> Vec<&'a T> {
        self.scan(|record: &T| references(via(record), id))
    }

    /// Records of type `T` whose id-keyed map `via` has `id` as a key.
    pub fn keyed_by<T: Record, V>(
        &self,
        id: &str,
        via: impl Fn(&T) -> &BTreeMap<RecordId, V>,
    ) -> Vec<&'a T> {
        self.scan(|record: &T| via(record).contains_key(id))
    }

    /// Records of type `T` whose parent pointer equals `id`.
    pub fn children_of<T: Record>(
        &self,
        id: &str,
        parent: impl Fn(&T) -> Option<&RecordId>,
    ) -> Vec<&'a T> {
        self.scan(|record: &T| parent(record).is_some_and(|p| p.as_str() == id))
    }

    /// Resolve a forward id list, in list order, skipping duplicates and
    /// ids with no matching record.
    pub fn resolve_ids<T: Record>(&self, ids: &[RecordId]) -> Vec<&'a T> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| self.resolve_one::<T>(id))
            .collect()
    }

    /// Resolve the keys of an id-keyed map, in key order, skipping dangling keys.
    pub fn resolve_keys<T: Record, V>(&self, map: &BTreeMap<RecordId, V>) -> Vec<&'a T> {
        map.keys()
            .filter_map(|id| self.resolve_one::<T>(id))
            .collect()
    }

    /// Resolve an optional forward pointer.
    pub fn resolve_opt<T: Record>(&self, id: Option<&RecordId>) -> Option<&'a T> {
        id.and_then(|id| self.resolve_one::<T>(id))
    }

    fn resolve_one<T: Record>(&self, id: &RecordId) -> Option<&'a T> {
        let found = self.store.get::<T>(id.as_str());
        if found.is_none() {
            let kind = T::KIND;
            trace!(%kind, %id, "skipping dangling reference");
        }
        found
    }
}
