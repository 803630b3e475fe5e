//! In-memory document store implementation
//!
//! This module provides an in-memory implementation of the `DocumentStore` trait,
//! suitable for testing, development, or single-node deployments where the
//! whole data set fits in memory and is persisted to a JSON file on shutdown.

mod persistence;

use std::any::Any;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, Filter, ID_FIELD, InsertOneResult, StoreError, ensure_id};
use crate::Result;

/// A simple in-memory document store.
///
/// Each collection is a vector of documents kept in insertion order.
/// Persistence is available via `save_to_file` and `load_from_file`,
/// which serialize every collection to a single JSON file.
#[derive(Debug, Default)]
pub struct InMemory {
    /// Collections keyed by name
    pub(crate) collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemory {
    /// Creates a new, empty `InMemory` store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the names of all collections that hold at least one document.
    pub async fn collection_names(&self) -> Vec<String> {
        let collections = self.collections.read().await;
        let mut names: Vec<String> = collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

#[async_trait]
impl DocumentStore for InMemory {
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)))
            .cloned())
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<InsertOneResult> {
        let id = ensure_id(collection, &mut document)?;

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs
            .iter()
            .any(|doc| doc.get(ID_FIELD).and_then(|v| v.as_str()) == Some(id.as_str()))
        {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id,
            }
            .into());
        }
        docs.push(document);

        tracing::debug!(collection, id = %id, "Inserted document");
        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id: id,
        })
    }

    fn kind(&self) -> &'static str {
        "inmemory"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
