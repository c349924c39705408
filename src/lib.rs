//! Schema-driven item indexer.
//!
//! An [`Indexer`] wraps one listing endpoint. At construction it reads the
//! endpoint's declared response schema to learn which top-level property
//! holds the items and whether they arrive keyed (`{"key": item}`) or as a
//! list (`[item]`). Each [`Indexer::run`] calls the endpoint and rebuilds a
//! one-to-one id/name index plus a catalog of raw item values, which callers
//! then query by name or id.

pub mod catalog;
pub mod error;
pub mod indexer;
pub mod ingest;
pub mod key;
pub mod request;
pub mod schema;

pub use catalog::{BiIndex, CatalogStore};
pub use error::{Error, Result};
pub use indexer::{IndexItem, Indexer, IndexerOptions, ItemView, Iter};
pub use ingest::{DEFAULT_ID_PROPERTY, DEFAULT_NAME_PROPERTY, IngestStrategy, KeySources};
pub use key::ItemKey;
pub use request::{CallArgs, DocumentRequest, Request, resolve_local_ref};
pub use schema::{ItemsType, RESPONSE_STATUS_CODE, ResponseLayout};

/// Whether an HTTP status counts as a successful call (2xx only).
pub fn status_ok(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_2xx_statuses_succeed() {
        assert!(status_ok(200));
        assert!(status_ok(204));
        assert!(!status_ok(199));
        assert!(!status_ok(304));
        assert!(!status_ok(500));
    }
}
