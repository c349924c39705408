//! Ingestion strategies: turning a raw items payload into (id, name, value)
//! triples.

use crate::catalog::CatalogStore;
use crate::error::{Error, Result, json_kind};
use crate::key::ItemKey;
use serde_json::Value;

pub const DEFAULT_ID_PROPERTY: &str = "id";
pub const DEFAULT_NAME_PROPERTY: &str = "name";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestStrategy {
    /// Items arrive as `{key: item, ...}`; the key stands in for any id or
    /// name property that is not configured.
    KeyedMapping,
    /// Items arrive as `[item, ...]`; id and name are item properties.
    PositionalList,
}

/// Property overrides applied while ingesting.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeySources<'a> {
    pub id_from: Option<&'a str>,
    pub name_from: Option<&'a str>,
}

impl IngestStrategy {
    /// Feed every item of `payload` into `store`, in payload order.
    ///
    /// Stops at the first item lacking a required property; items already
    /// inserted stay in `store`.
    pub fn ingest(
        &self,
        items_key: &str,
        payload: &Value,
        sources: KeySources<'_>,
        store: &mut CatalogStore,
    ) -> Result<usize> {
        match self {
            IngestStrategy::KeyedMapping => {
                let items = payload
                    .as_object()
                    .ok_or_else(|| unexpected(items_key, "object", payload))?;
                for (key, item) in items {
                    let context = format!("item '{key}'");
                    let id = match sources.id_from {
                        Some(prop) => property_key(item, prop, &context)?,
                        None => ItemKey::from(key),
                    };
                    let name = match sources.name_from {
                        Some(prop) => property_key(item, prop, &context)?,
                        None => ItemKey::from(key),
                    };
                    store.insert(id, name, item.clone());
                }
                Ok(items.len())
            }
            IngestStrategy::PositionalList => {
                let items = payload
                    .as_array()
                    .ok_or_else(|| unexpected(items_key, "array", payload))?;
                let id_prop = sources.id_from.unwrap_or(DEFAULT_ID_PROPERTY);
                let name_prop = sources.name_from.unwrap_or(DEFAULT_NAME_PROPERTY);
                for (position, item) in items.iter().enumerate() {
                    let context = format!("item at position {position}");
                    let id = property_key(item, id_prop, &context)?;
                    let name = property_key(item, name_prop, &context)?;
                    store.insert(id, name, item.clone());
                }
                Ok(items.len())
            }
        }
    }
}

fn property_key(item: &Value, property: &str, context: &str) -> Result<ItemKey> {
    let raw = item
        .get(property)
        .ok_or_else(|| Error::key_lookup(property, context))?;
    ItemKey::from_json(raw).ok_or_else(|| Error::InvalidKey {
        property: property.to_string(),
        context: context.to_string(),
        found: raw.clone(),
    })
}

fn unexpected(items_key: &str, expected: &'static str, found: &Value) -> Error {
    Error::UnexpectedPayload {
        items_key: items_key.to_string(),
        expected,
        found: json_kind(found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ingest(
        strategy: IngestStrategy,
        payload: Value,
        sources: KeySources<'_>,
    ) -> Result<CatalogStore> {
        let mut store = CatalogStore::new();
        strategy.ingest("items", &payload, sources, &mut store)?;
        Ok(store)
    }

    #[test]
    fn keyed_mapping_defaults_to_the_key() {
        let store = ingest(
            IngestStrategy::KeyedMapping,
            json!({"x": {"label": "X"}, "y": {"label": "Y"}}),
            KeySources::default(),
        )
        .unwrap();
        let names: Vec<_> = store.index().names().cloned().collect();
        assert_eq!(names, vec![ItemKey::from("x"), ItemKey::from("y")]);
        assert_eq!(store.value(&ItemKey::from("y")), Some(&json!({"label": "Y"})));
    }

    #[test]
    fn keyed_mapping_reads_configured_name() {
        let store = ingest(
            IngestStrategy::KeyedMapping,
            json!({"x": {"label": "X"}}),
            KeySources {
                id_from: None,
                name_from: Some("label"),
            },
        )
        .unwrap();
        assert_eq!(
            store.index().id_for(&ItemKey::from("X")),
            Some(&ItemKey::from("x"))
        );
    }

    #[test]
    fn keyed_mapping_reads_configured_id() {
        let store = ingest(
            IngestStrategy::KeyedMapping,
            json!({"x": {"uid": 42}}),
            KeySources {
                id_from: Some("uid"),
                name_from: None,
            },
        )
        .unwrap();
        assert_eq!(
            store.index().name_for(&ItemKey::Int(42)),
            Some(&ItemKey::from("x"))
        );
    }

    #[test]
    fn positional_list_uses_default_properties() {
        let store = ingest(
            IngestStrategy::PositionalList,
            json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]),
            KeySources::default(),
        )
        .unwrap();
        let ids: Vec<_> = store.index().ids().cloned().collect();
        assert_eq!(ids, vec![ItemKey::Int(1), ItemKey::Int(2)]);
    }

    #[test]
    fn positional_list_missing_name_is_a_key_lookup_error() {
        let mut store = CatalogStore::new();
        let err = IngestStrategy::PositionalList
            .ingest(
                "items",
                &json!([{"id": 1, "name": "a"}, {"id": 2}]),
                KeySources::default(),
                &mut store,
            )
            .unwrap_err();
        match err {
            Error::KeyLookup { key, context } => {
                assert_eq!(key, "name");
                assert_eq!(context, "item at position 1");
            }
            other => panic!("unexpected error {other:?}"),
        }
        // No rollback at this layer.
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unusable_key_value_is_rejected() {
        let err = ingest(
            IngestStrategy::PositionalList,
            json!([{"id": {"nested": true}, "name": "a"}]),
            KeySources::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidKey { ref property, .. } if property == "id"));
    }

    #[test]
    fn wrong_payload_kind_is_reported() {
        let err = ingest(IngestStrategy::KeyedMapping, json!([]), KeySources::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected object payload under 'items', got array"
        );
    }
}
