#![allow(dead_code)]

use halutz::{CallArgs, Request, resolve_local_ref};
use serde_json::{Value, json};
use std::collections::VecDeque;

// Request double that replays canned (body, ok) responses and records the
// arguments of every call.
pub struct ScriptedRequest {
    document: Value,
    operation: Value,
    path: String,
    responses: VecDeque<(Value, bool)>,
    pub calls: Vec<CallArgs>,
}

impl ScriptedRequest {
    pub fn new(document: Value, path: &str) -> Self {
        let operation = document["paths"][path]["get"].clone();
        Self {
            document,
            operation,
            path: path.to_string(),
            responses: VecDeque::new(),
            calls: Vec::new(),
        }
    }

    /// Operation whose 200 response is `schema`, with no surrounding document.
    pub fn with_schema(schema: Value) -> Self {
        let document = json!({
            "paths": {"/items": {"get": {"responses": {"200": {"schema": schema}}}}}
        });
        Self::new(document, "/items")
    }

    pub fn respond(mut self, body: Value, ok: bool) -> Self {
        self.responses.push_back((body, ok));
        self
    }
}

impl Request for ScriptedRequest {
    fn operation(&self) -> &Value {
        &self.operation
    }

    fn deref(&self, schema: &Value) -> halutz::Result<Value> {
        resolve_local_ref(&self.document, schema)
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn call(&mut self, args: &CallArgs) -> (Value, bool) {
        self.calls.push(args.clone());
        self.responses
            .pop_front()
            .unwrap_or_else(|| (json!({"message": "no scripted response"}), false))
    }
}

/// Swagger-style document with a list endpoint (`/hosts`) and a keyed
/// endpoint (`/zones`) declared through references.
pub fn api_document() -> Value {
    json!({
        "swagger": "2.0",
        "paths": {
            "/hosts": {
                "get": {
                    "responses": {
                        "200": {"schema": {"$ref": "#/definitions/HostList"}},
                        "404": {"schema": {"type": "array", "items": {}}}
                    }
                }
            },
            "/zones": {
                "get": {
                    "responses": {
                        "200": {"schema": {"$ref": "#/definitions/ZoneMap"}},
                        "202": {"schema": {
                            "type": "object",
                            "properties": {"pending": {"type": "object", "properties": {"eta": {}}}}
                        }}
                    }
                }
            }
        },
        "definitions": {
            "Host": {
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "name": {"type": "string"},
                    "fqdn": {"type": "string"}
                }
            },
            "HostList": {
                "type": "object",
                "properties": {
                    "hosts": {"type": "array", "items": {"$ref": "#/definitions/Host"}}
                }
            },
            "Zone": {
                "type": "object",
                "properties": {"label": {"type": "string"}, "uid": {"type": "integer"}}
            },
            "ZoneMap": {
                "type": "object",
                "properties": {
                    "zones": {
                        "type": "object",
                        "additionalProperties": {"$ref": "#/definitions/Zone"}
                    }
                }
            }
        }
    })
}

pub fn hosts_body() -> Value {
    json!({
        "hosts": [
            {"id": 1, "name": "a", "fqdn": "a.example.net"},
            {"id": 2, "name": "b", "fqdn": "b.example.net"},
            {"id": 3, "name": "c", "fqdn": "c.example.net"}
        ]
    })
}

pub fn zones_body() -> Value {
    json!({
        "zones": {
            "x": {"label": "X", "uid": 10},
            "y": {"label": "Y", "uid": 20}
        }
    })
}
