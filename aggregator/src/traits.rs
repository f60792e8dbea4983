//! Trait definitions with mockall annotations for testing
//!
//! The graph store is the only I/O seam in this crate. Every component takes
//! it by trait so tests can substitute an in-memory store or a mock that
//! simulates an unavailable datastore.

use async_trait::async_trait;
use shared::Document;

use crate::error::AggregatorResult;
use crate::types::{Collection, Query};

/// Document-oriented persistence for the filter graph
///
/// No transactional guarantees are made across collections or across the
/// documents of one call unless an implementation documents otherwise.
#[mockall::automock]
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// All documents in `collection` matching `query`, in insertion order
    async fn find(&self, collection: Collection, query: &Query) -> AggregatorResult<Vec<Document>>;

    /// First document in `collection` matching `query`
    async fn find_one(&self, collection: Collection, query: &Query) -> AggregatorResult<Option<Document>> {
        Ok(self.find(collection, query).await?.into_iter().next())
    }

    /// Append a document to `collection`
    async fn insert(&self, collection: Collection, document: Document) -> AggregatorResult<()>;

    /// Remove every document from `collection`
    async fn remove_all(&self, collection: Collection) -> AggregatorResult<()>;

    /// Drop every collection
    async fn drop_all(&self) -> AggregatorResult<()>;

    /// Replace the first document matching `query`; returns whether one matched
    async fn replace_first(
        &self,
        collection: Collection,
        query: &Query,
        document: Document,
    ) -> AggregatorResult<bool>;

    /// Replace the whole topology with a new snapshot.
    ///
    /// The default removes `paths` before `filters`, then inserts filters
    /// before paths. Readers may observe the intermediate states.
    async fn replace_topology(&self, filters: Vec<Document>, paths: Vec<Document>) -> AggregatorResult<()> {
        self.remove_all(Collection::Paths).await?;
        self.remove_all(Collection::Filters).await?;
        for filter in filters {
            self.insert(Collection::Filters, filter).await?;
        }
        for path in paths {
            self.insert(Collection::Paths, path).await?;
        }
        Ok(())
    }
}
