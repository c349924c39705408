//! The indexer: refreshes the catalog from a listing endpoint and resolves
//! items by name or id.

use crate::catalog::CatalogStore;
use crate::error::{Error, Result};
use crate::ingest::KeySources;
use crate::key::ItemKey;
use crate::request::{CallArgs, Request};
use crate::schema::{RESPONSE_STATUS_CODE, ResponseLayout};
use serde_json::{Value, json};
use std::fmt;
use tracing::{debug, warn};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Construction options for an `Indexer`.
pub struct IndexerOptions {
    /// Item property holding the name. Defaults to the map key (keyed
    /// payloads) or `"name"` (list payloads).
    pub name_from: Option<String>,
    /// Item property holding the id. Defaults to the map key (keyed payloads)
    /// or `"id"` (list payloads).
    pub id_from: Option<String>,
    /// Response code whose schema is inspected; `"200"` when unset.
    pub response_code: Option<String>,
}

impl IndexerOptions {
    pub fn with_name_from(mut self, property: impl Into<String>) -> Self {
        self.name_from = Some(property.into());
        self
    }

    pub fn with_id_from(mut self, property: impl Into<String>) -> Self {
        self.id_from = Some(property.into());
        self
    }

    pub fn with_response_code(mut self, code: impl Into<String>) -> Self {
        self.response_code = Some(code.into());
        self
    }

    pub fn response_code(&self) -> &str {
        self.response_code.as_deref().unwrap_or(RESPONSE_STATUS_CODE)
    }

    fn key_sources(&self) -> KeySources<'_> {
        KeySources {
            id_from: self.id_from.as_deref(),
            name_from: self.name_from.as_deref(),
        }
    }
}

/// In-memory catalog of the items returned by one listing endpoint.
pub struct Indexer<R> {
    request: R,
    options: IndexerOptions,
    layout: ResponseLayout,
    store: CatalogStore,
}

impl<R: Request> Indexer<R> {
    /// Inspect the request's response schema and build an empty indexer.
    ///
    /// Fails with `Error::Configuration` when the schema is not an object
    /// wrapping a single object or array of items.
    pub fn new(request: R, options: IndexerOptions) -> Result<Self> {
        let layout = ResponseLayout::inspect(&request, options.response_code())?;
        Ok(Self {
            request,
            options,
            layout,
            store: CatalogStore::new(),
        })
    }

    /// Call the endpoint and rebuild the catalog from its response.
    ///
    /// The new catalog is assembled on the side and swapped in only once
    /// every item was ingested, so on any error the previous contents stay
    /// in place.
    pub fn run(&mut self, args: &CallArgs) -> Result<&mut Self> {
        let (body, ok) = self.request.call(args);
        if !ok {
            warn!(path = self.request.path(), "request reported failure");
            return Err(Error::Request {
                path: self.request.path().to_string(),
                body,
            });
        }

        let items_key = self.layout.items_key.as_str();
        let payload = body.get(items_key).ok_or_else(|| {
            Error::key_lookup(items_key, format!("response from {}", self.request.path()))
        })?;

        let mut staged = CatalogStore::new();
        let seen = self.layout.strategy.ingest(
            items_key,
            payload,
            self.options.key_sources(),
            &mut staged,
        )?;
        self.store = staged;

        debug!(
            path = self.request.path(),
            received = seen,
            indexed = self.store.len(),
            "catalog refreshed"
        );
        Ok(self)
    }

    pub fn path(&self) -> &str {
        self.request.path()
    }

    pub fn request(&self) -> &R {
        &self.request
    }
}

impl<R> Indexer<R> {
    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn layout(&self) -> &ResponseLayout {
        &self.layout
    }

    pub fn options(&self) -> &IndexerOptions {
        &self.options
    }

    /// Probe for `name`; never fails.
    pub fn find(&self, name: impl Into<ItemKey>) -> Option<IndexItem<'_, R>> {
        let (name, id) = self.store.index().lookup_name(&name.into())?;
        self.item(id, name)
    }

    /// Resolve `name`, failing with `Error::NameNotFound` when it is not
    /// indexed.
    pub fn get(&self, name: impl Into<ItemKey>) -> Result<IndexItem<'_, R>> {
        let name = name.into();
        match self.find(&name) {
            Some(item) => Ok(item),
            None => Err(Error::NameNotFound(name)),
        }
    }

    pub fn get_by_id(&self, id: impl Into<ItemKey>) -> Option<IndexItem<'_, R>> {
        let (id, name) = self.store.index().lookup_id(&id.into())?;
        self.item(id, name)
    }

    pub fn contains(&self, name: impl Into<ItemKey>) -> bool {
        self.store.index().contains_name(&name.into())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Fresh traversal over the items in index order.
    pub fn iter(&self) -> Iter<'_, R> {
        Iter {
            indexer: self,
            position: 0,
        }
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &ItemKey> {
        self.store.index().names()
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = &ItemKey> {
        self.store.index().ids()
    }

    pub fn find_as<'a, V: ItemView<'a, R>>(&'a self, name: impl Into<ItemKey>) -> Option<V> {
        self.find(name).map(V::from_item)
    }

    pub fn get_as<'a, V: ItemView<'a, R>>(&'a self, name: impl Into<ItemKey>) -> Result<V> {
        self.get(name).map(V::from_item)
    }

    pub fn iter_as<'a, V: ItemView<'a, R> + 'a>(&'a self) -> impl Iterator<Item = V> + 'a {
        self.iter().map(V::from_item)
    }

    fn item<'a>(&'a self, id: &'a ItemKey, name: &'a ItemKey) -> Option<IndexItem<'a, R>> {
        let value = self.store.value(id)?;
        Some(IndexItem {
            id,
            name,
            value,
            indexer: self,
        })
    }
}

impl<'a, R> IntoIterator for &'a Indexer<R> {
    type Item = IndexItem<'a, R>;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R: Request> fmt::Debug for Indexer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indexer")
            .field("path", &self.path())
            .field("count", &self.len())
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl<R: Request> fmt::Display for Indexer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = json!({
            "path": self.path(),
            "count": self.len(),
            "names": self.names().collect::<Vec<_>>(),
        });
        let rendered = serde_json::to_string_pretty(&summary).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// Borrowed view of one indexed item.
pub struct IndexItem<'a, R> {
    id: &'a ItemKey,
    name: &'a ItemKey,
    value: &'a Value,
    indexer: &'a Indexer<R>,
}

impl<'a, R> IndexItem<'a, R> {
    pub fn id(&self) -> &'a ItemKey {
        self.id
    }

    pub fn name(&self) -> &'a ItemKey {
        self.name
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// The indexer this item was read from.
    pub fn indexer(&self) -> &'a Indexer<R> {
        self.indexer
    }
}

// Manual impls: `R` itself need not be `Clone`/`Copy`.
impl<R> Clone for IndexItem<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for IndexItem<'_, R> {}

impl<R> fmt::Debug for IndexItem<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexItem")
            .field("id", self.id)
            .field("name", self.name)
            .field("value", self.value)
            .finish()
    }
}

impl<R> fmt::Display for IndexItem<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string_pretty(&json!({
            "id": self.id,
            "name": self.name,
            "value": self.value,
        }))
        .map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// Caller-defined projection of an `IndexItem`.
pub trait ItemView<'a, R> {
    fn from_item(item: IndexItem<'a, R>) -> Self;
}

impl<'a, R> ItemView<'a, R> for IndexItem<'a, R> {
    fn from_item(item: IndexItem<'a, R>) -> Self {
        item
    }
}

/// Iterator over an indexer's items, in index order.
pub struct Iter<'a, R> {
    indexer: &'a Indexer<R>,
    position: usize,
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = IndexItem<'a, R>;

    fn next(&mut self) -> Option<Self::Item> {
        let indexer = self.indexer;
        let index = indexer.store.index();
        while self.position < index.len() {
            let (name, id) = index.entry_at(self.position)?;
            self.position += 1;
            if let Some(item) = indexer.item(id, name) {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.indexer.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<R> ExactSizeIterator for Iter<'_, R> {}
