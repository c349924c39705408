//! Scalar keys for the id and name sides of the index.
//!
//! Ids and names are read out of JSON item values, so they arrive as
//! `serde_json::Value`. Only scalars with a stable equality are accepted:
//! strings, integers and booleans.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum ItemKey {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl ItemKey {
    /// Convert a JSON scalar into a key.
    ///
    /// Returns `None` for nulls, floats, objects, arrays and unsigned values
    /// above `i64::MAX`; ingesting an item whose id or name is one of these
    /// fails with `Error::InvalidKey`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(ItemKey::Text(s.clone())),
            Value::Bool(b) => Some(ItemKey::Bool(*b)),
            Value::Number(n) => n.as_i64().map(ItemKey::Int),
            _ => None,
        }
    }

    /// Keys a command-line argument may stand for: the text itself, then
    /// the integer or boolean it spells, if any.
    pub fn candidates(arg: &str) -> Vec<ItemKey> {
        let mut keys = vec![ItemKey::from(arg)];
        if let Some(scalar) = serde_json::from_str::<Value>(arg)
            .ok()
            .as_ref()
            .and_then(ItemKey::from_json)
            .filter(|key| !matches!(key, ItemKey::Text(_)))
        {
            keys.push(scalar);
        }
        keys
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Bool(b) => write!(f, "{b}"),
            ItemKey::Int(n) => write!(f, "{n}"),
            ItemKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        ItemKey::Text(value.to_string())
    }
}

impl From<String> for ItemKey {
    fn from(value: String) -> Self {
        ItemKey::Text(value)
    }
}

impl From<&String> for ItemKey {
    fn from(value: &String) -> Self {
        ItemKey::Text(value.clone())
    }
}

impl From<i64> for ItemKey {
    fn from(value: i64) -> Self {
        ItemKey::Int(value)
    }
}

impl From<i32> for ItemKey {
    fn from(value: i32) -> Self {
        ItemKey::Int(i64::from(value))
    }
}

impl From<bool> for ItemKey {
    fn from(value: bool) -> Self {
        ItemKey::Bool(value)
    }
}

impl From<&ItemKey> for ItemKey {
    fn from(value: &ItemKey) -> Self {
        value.clone()
    }
}
