//! In-memory graph store
//!
//! Keeps every collection in process memory behind a single `RwLock`.
//! Topology replacement happens under one write lock, so readers never see
//! a snapshot with filters from one sync and paths from another.

use async_trait::async_trait;
use shared::{component_debug, Component, Document};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::error::AggregatorResult;
use crate::traits::GraphStore;
use crate::types::{Collection, Query};

/// Real in-memory store implementation
#[derive(Debug, Default)]
pub struct RealGraphStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    topology_version: AtomicU64,
}

impl RealGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of topology snapshots swapped in since creation
    pub fn topology_version(&self) -> u64 {
        self.topology_version.load(Ordering::SeqCst)
    }

    /// Number of documents currently held in `collection`
    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl GraphStore for RealGraphStore {
    async fn find(&self, collection: Collection, query: &Query) -> AggregatorResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| query.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn find_one(&self, collection: Collection, query: &Query) -> AggregatorResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|document| query.matches(document)))
            .cloned())
    }

    async fn insert(&self, collection: Collection, document: Document) -> AggregatorResult<()> {
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(document);
        component_debug!(Component::Store, "Inserted document into {}", collection);
        Ok(())
    }

    async fn remove_all(&self, collection: Collection) -> AggregatorResult<()> {
        if let Some(documents) = self.collections.write().await.get_mut(&collection) {
            documents.clear();
        }
        Ok(())
    }

    async fn drop_all(&self) -> AggregatorResult<()> {
        self.collections.write().await.clear();
        component_debug!(Component::Store, "🧹 Dropped all in-memory collections");
        Ok(())
    }

    async fn replace_first(
        &self,
        collection: Collection,
        query: &Query,
        document: Document,
    ) -> AggregatorResult<bool> {
        let mut collections = self.collections.write().await;
        let slot = collections
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|existing| query.matches(existing)));
        match slot {
            Some(existing) => {
                *existing = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn replace_topology(&self, filters: Vec<Document>, paths: Vec<Document>) -> AggregatorResult<()> {
        let mut collections = self.collections.write().await;
        collections.insert(Collection::Paths, paths);
        collections.insert(Collection::Filters, filters);
        let version = self.topology_version.fetch_add(1, Ordering::SeqCst) + 1;
        component_debug!(Component::Store, "🔁 Swapped in topology version {}", version);
        Ok(())
    }
}
