//! Response-schema inspection.
//!
//! The indexer needs to know, once, where the items live in a response and
//! whether they arrive as a keyed object or a positional array. That decision
//! is read off the endpoint's declared response schema and stored as a
//! `ResponseLayout`.

use crate::error::{Error, Result};
use crate::ingest::IngestStrategy;
use crate::request::Request;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Response code whose schema is inspected when none is configured.
pub const RESPONSE_STATUS_CODE: &str = "200";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemsType {
    Object,
    Array,
}

impl ItemsType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemsType::Object => "object",
            ItemsType::Array => "array",
        }
    }

    pub fn strategy(&self) -> IngestStrategy {
        match self {
            ItemsType::Object => IngestStrategy::KeyedMapping,
            ItemsType::Array => IngestStrategy::PositionalList,
        }
    }
}

impl TryFrom<&str> for ItemsType {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "object" => Ok(ItemsType::Object),
            "array" => Ok(ItemsType::Array),
            other => Err(Error::configuration(format!("unknown items type: {other}"))),
        }
    }
}

impl fmt::Display for ItemsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where the items sit in a response and how they are shaped.
pub struct ResponseLayout {
    pub items_key: String,
    pub items_type: ItemsType,
    /// Item-level property names declared by the schema, in document order.
    pub items_properties: Vec<String>,
    pub strategy: IngestStrategy,
}

impl ResponseLayout {
    /// Inspect the schema declared for `response_code` on `request`.
    pub fn inspect<R: Request + ?Sized>(request: &R, response_code: &str) -> Result<Self> {
        let declared = request
            .operation()
            .get("responses")
            .and_then(|responses| responses.get(response_code))
            .and_then(|response| response.get("schema"))
            .ok_or_else(|| {
                Error::configuration(format!(
                    "{} declares no schema for response {response_code}",
                    request.path()
                ))
            })?;
        let schema = request.deref(declared)?;
        let layout = Self::from_schema(&schema, |fragment| request.deref(fragment))?;
        debug!(
            path = request.path(),
            items_key = %layout.items_key,
            items_type = %layout.items_type,
            properties = layout.items_properties.len(),
            "resolved response layout"
        );
        Ok(layout)
    }

    /// Derive the layout from an already dereferenced response schema.
    ///
    /// `deref` is applied to the items schema and its nested item schemas,
    /// which API documents commonly declare by reference.
    pub fn from_schema<D>(schema: &Value, deref: D) -> Result<Self>
    where
        D: Fn(&Value) -> Result<Value>,
    {
        let root_type = schema_type(schema);
        if root_type != Some("object") {
            return Err(Error::configuration(format!(
                "response is not an object type: {}",
                root_type.unwrap_or("undeclared")
            )));
        }

        let (items_key, declared_items) = schema
            .get("properties")
            .and_then(Value::as_object)
            .and_then(|props| props.iter().next())
            .ok_or_else(|| Error::configuration("response schema declares no properties"))?;
        let items_schema = deref(declared_items)?;

        let items_type = ItemsType::try_from(schema_type(&items_schema).unwrap_or("undeclared"))?;

        let properties = match items_type {
            ItemsType::Object => match items_schema.get("properties") {
                Some(props) if has_entries(props) => Some(props.clone()),
                _ => match items_schema.get("additionalProperties") {
                    Some(extra) if extra.is_object() => deref(extra)?.get("properties").cloned(),
                    _ => None,
                },
            },
            ItemsType::Array => match items_schema.get("items") {
                Some(items) => deref(items)?.get("properties").cloned(),
                None => None,
            },
        };

        let items_properties = properties
            .as_ref()
            .and_then(Value::as_object)
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default();

        Ok(Self {
            items_key: items_key.clone(),
            items_type,
            items_properties,
            strategy: items_type.strategy(),
        })
    }

    pub fn declares_property(&self, name: &str) -> bool {
        self.items_properties.iter().any(|p| p == name)
    }
}

fn schema_type(schema: &Value) -> Option<&str> {
    schema.get("type").and_then(Value::as_str)
}

fn has_entries(props: &Value) -> bool {
    props.as_object().is_some_and(|map| !map.is_empty())
}
