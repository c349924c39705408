//! Item catalog wiring.
//!
//! `BiIndex` holds the one-to-one id/name pairs and `CatalogStore` pairs it
//! with the raw item values returned by the endpoint. The `Indexer` owns one
//! store and replaces it wholesale on every refresh.

pub mod index;
pub mod store;

pub use index::BiIndex;
pub use store::CatalogStore;
