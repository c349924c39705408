//! Bidirectional id/name index.
//!
//! Two insertion-ordered maps are kept in lockstep: `name_for` (id → name)
//! and `id_for` (name → id). Every `set` first drops whatever association
//! either side previously had, so both maps always describe the same set of
//! one-to-one pairs.

use crate::key::ItemKey;
use indexmap::IndexMap;
use tracing::warn;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// One-to-one mapping between item ids and item names.
pub struct BiIndex {
    name_for: IndexMap<ItemKey, ItemKey>,
    id_for: IndexMap<ItemKey, ItemKey>,
}

impl BiIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `id` with `name`, overwriting existing associations.
    ///
    /// Returns the ids that no longer appear in the index because `name`
    /// previously belonged to them. The pair always moves to the end of the
    /// iteration order.
    pub fn set(&mut self, id: ItemKey, name: ItemKey) -> Vec<ItemKey> {
        let mut displaced = Vec::new();

        if let Some(old_name) = self.name_for.shift_remove(&id) {
            self.id_for.shift_remove(&old_name);
            if old_name != name {
                warn!(%id, %old_name, %name, "index entry renamed");
            }
        }

        if let Some(old_id) = self.id_for.shift_remove(&name) {
            self.name_for.shift_remove(&old_id);
            warn!(%name, %old_id, %id, "name reassigned to a different id");
            displaced.push(old_id);
        }

        self.name_for.insert(id.clone(), name.clone());
        self.id_for.insert(name, id);
        displaced
    }

    pub fn clear(&mut self) {
        self.name_for.clear();
        self.id_for.clear();
    }

    pub fn len(&self) -> usize {
        self.name_for.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_for.is_empty()
    }

    pub fn id_for(&self, name: &ItemKey) -> Option<&ItemKey> {
        self.id_for.get(name)
    }

    pub fn name_for(&self, id: &ItemKey) -> Option<&ItemKey> {
        self.name_for.get(id)
    }

    pub fn contains_name(&self, name: &ItemKey) -> bool {
        self.id_for.contains_key(name)
    }

    pub fn contains_id(&self, id: &ItemKey) -> bool {
        self.name_for.contains_key(id)
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &ItemKey> {
        self.id_for.keys()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = &ItemKey> {
        self.name_for.keys()
    }

    /// Stored (name, id) pair for `name`.
    pub fn lookup_name(&self, name: &ItemKey) -> Option<(&ItemKey, &ItemKey)> {
        self.id_for.get_key_value(name)
    }

    /// Stored (id, name) pair for `id`.
    pub fn lookup_id(&self, id: &ItemKey) -> Option<(&ItemKey, &ItemKey)> {
        self.name_for.get_key_value(id)
    }

    /// The (name, id) pair at `position` in insertion order.
    pub fn entry_at(&self, position: usize) -> Option<(&ItemKey, &ItemKey)> {
        self.id_for.get_index(position)
    }
}
