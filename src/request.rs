//! Request descriptors consumed by the indexer.
//!
//! A request descriptor exposes the endpoint's operation object (so the
//! response schema can be inspected), a way to dereference `$ref` schemas,
//! and the call itself. Transport concerns stay behind `Request::call`.

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Named arguments forwarded to `Request::call`.
pub type CallArgs = Map<String, Value>;

/// Collaborator that describes and executes one listing endpoint.
pub trait Request {
    /// The operation object; carries `responses[code].schema`.
    fn operation(&self) -> &Value;

    /// Resolve a possibly `$ref`-valued schema to its target.
    fn deref(&self, schema: &Value) -> Result<Value>;

    /// Display-only path of the endpoint.
    fn path(&self) -> &str;

    /// Execute the call, returning the response body and whether the call
    /// succeeded. Non-2xx statuses and transport failures report `false`.
    fn call(&mut self, args: &CallArgs) -> (Value, bool);
}

/// Request descriptor backed by a whole API document.
///
/// The operation is looked up as `paths[path][method]` and local references
/// (`#/definitions/...`) are resolved against the same document. The call is
/// delegated to `exec`.
pub struct DocumentRequest<F> {
    document: Value,
    path: String,
    method: String,
    exec: F,
}

impl<F> DocumentRequest<F>
where
    F: FnMut(&CallArgs) -> (Value, bool),
{
    pub fn new(document: Value, path: &str, method: &str, exec: F) -> Result<Self> {
        let method = method.to_ascii_lowercase();
        let found = document
            .get("paths")
            .and_then(|paths| paths.get(path))
            .and_then(|item| item.get(&method))
            .is_some_and(Value::is_object);
        if !found {
            return Err(Error::configuration(format!(
                "document has no operation {} {path}",
                method.to_ascii_uppercase()
            )));
        }
        Ok(Self {
            document,
            path: path.to_string(),
            method,
            exec,
        })
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

impl<F> Request for DocumentRequest<F>
where
    F: FnMut(&CallArgs) -> (Value, bool),
{
    fn operation(&self) -> &Value {
        // Presence checked in `new`.
        &self.document["paths"][self.path.as_str()][self.method.as_str()]
    }

    fn deref(&self, schema: &Value) -> Result<Value> {
        resolve_local_ref(&self.document, schema)
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn call(&mut self, args: &CallArgs) -> (Value, bool) {
        (self.exec)(args)
    }
}

/// Follow local `$ref` pointers until a non-reference schema is reached.
///
/// Only document-local references (`#/...`) are supported; chained references
/// are followed and cycles are rejected.
pub fn resolve_local_ref(document: &Value, schema: &Value) -> Result<Value> {
    let mut current = schema;
    let mut seen = BTreeSet::new();
    while let Some(reference) = current.get("$ref").and_then(Value::as_str) {
        if !seen.insert(reference) {
            return Err(Error::configuration(format!(
                "cyclic schema reference {reference}"
            )));
        }
        let pointer = reference.strip_prefix('#').ok_or_else(|| {
            Error::configuration(format!("unsupported non-local reference {reference}"))
        })?;
        current = document.pointer(pointer).ok_or_else(|| {
            Error::configuration(format!("unresolvable schema reference {reference}"))
        })?;
    }
    Ok(current.clone())
}
