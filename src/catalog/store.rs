//! Index and catalog kept together.

use crate::catalog::BiIndex;
use crate::key::ItemKey;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
/// Bidirectional index plus the raw item value recorded for every id.
///
/// The catalog's key set always equals the index's id set: ids displaced by
/// an overwrite are removed from both.
pub struct CatalogStore {
    index: BiIndex,
    catalog: HashMap<ItemKey, Value>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ItemKey, name: ItemKey, value: Value) {
        for stale in self.index.set(id.clone(), name) {
            self.catalog.remove(&stale);
        }
        self.catalog.insert(id, value);
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.catalog.clear();
    }

    pub fn index(&self) -> &BiIndex {
        &self.index
    }

    pub fn value(&self, id: &ItemKey) -> Option<&Value> {
        self.catalog.get(id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn displaced_ids_leave_the_catalog() {
        let mut store = CatalogStore::new();
        store.insert(ItemKey::Int(1), ItemKey::from("a"), json!({"v": 1}));
        store.insert(ItemKey::Int(2), ItemKey::from("a"), json!({"v": 2}));

        assert_eq!(store.len(), 1);
        assert_eq!(store.value(&ItemKey::Int(1)), None);
        assert_eq!(store.value(&ItemKey::Int(2)), Some(&json!({"v": 2})));
    }

    #[test]
    fn reinserting_an_id_replaces_its_value() {
        let mut store = CatalogStore::new();
        store.insert(ItemKey::Int(1), ItemKey::from("a"), json!("old"));
        store.insert(ItemKey::Int(1), ItemKey::from("b"), json!("new"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.value(&ItemKey::Int(1)), Some(&json!("new")));
        assert!(store.index().contains_name(&ItemKey::from("b")));
    }
}
