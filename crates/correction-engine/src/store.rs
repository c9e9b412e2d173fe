//! Process-wide store of loaded reference books.
//!
//! A book is installed once at startup and treated as immutable shared
//! data. Reload publishes a NEW book value and swaps the map entry;
//! in-flight computations keep the `Arc` snapshot they started with, so
//! they always see a consistent table.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use appraisal_types::{Catalog, ReferenceBook};
use lazy_static::lazy_static;
use tracing::debug;

#[derive(Default)]
pub struct CatalogStore {
    books: RwLock<HashMap<String, Arc<ReferenceBook>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a book under `name`. Returns the shared snapshot.
    pub fn install(&self, name: impl Into<String>, book: ReferenceBook) -> Arc<ReferenceBook> {
        let name = name.into();
        let book = Arc::new(book);
        debug!(book = %name, "installing reference book");
        self.books
            .write()
            .expect("catalog store lock poisoned")
            .insert(name, Arc::clone(&book));
        book
    }

    /// Publish every edition of a catalog record.
    pub fn install_catalog(&self, catalog: Catalog) {
        for (name, book) in catalog.reference_books {
            self.install(name, book);
        }
    }

    /// Snapshot of the current book under `name`. The snapshot stays valid
    /// across later swaps.
    pub fn get(&self, name: &str) -> Option<Arc<ReferenceBook>> {
        self.books
            .read()
            .expect("catalog store lock poisoned")
            .get(name)
            .map(Arc::clone)
    }

    /// Atomically replace the book under `name`, returning the displaced
    /// snapshot if one was loaded.
    pub fn swap(&self, name: impl Into<String>, book: ReferenceBook) -> Option<Arc<ReferenceBook>> {
        let name = name.into();
        debug!(book = %name, "swapping reference book");
        self.books
            .write()
            .expect("catalog store lock poisoned")
            .insert(name, Arc::new(book))
    }

    pub fn names(&self) -> Vec<String> {
        self.books
            .read()
            .expect("catalog store lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

lazy_static! {
    /// The default process-wide store.
    pub static ref CATALOG: CatalogStore = CatalogStore::new();
}

/// Deserialize a catalog from a pre-parsed JSON value.
///
/// This is the ingestion boundary: the data-loading subsystem parses and
/// fetches, the engine only shapes.
pub fn load_catalog(value: serde_json::Value) -> serde_json::Result<Catalog> {
    serde_json::from_value(value)
}
