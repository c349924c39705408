use crate::key::ItemKey;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The response schema cannot drive an index. Raised at construction.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request collaborator reported failure; `body` is kept for diagnosis.
    #[error("unable to get items from {path}")]
    Request { path: String, body: Value },

    #[error("missing key '{key}' in {context}")]
    KeyLookup { key: String, context: String },

    #[error("value of '{property}' in {context} cannot be used as a key: {found}")]
    InvalidKey {
        property: String,
        context: String,
        found: Value,
    },

    #[error("expected {expected} payload under '{items_key}', got {found}")]
    UnexpectedPayload {
        items_key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("item name {0} not found in catalog")]
    NameNotFound(ItemKey),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub(crate) fn key_lookup(key: impl Into<String>, context: impl Into<String>) -> Self {
        Error::KeyLookup {
            key: key.into(),
            context: context.into(),
        }
    }

    /// Raw response body carried by a failed request, if any.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            Error::Request { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Short JSON type name used in diagnostics.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
