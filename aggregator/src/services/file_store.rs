//! File-backed graph store
//!
//! Each collection lives in `<data_dir>/<db_name>/<collection>.jsonl`, one
//! document per line. Whole-collection rewrites go through a temporary file
//! and a rename, so a single collection is never observed half written.
//! Nothing coordinates the `filters` and `paths` files with each other, so a
//! reader racing a topology sync can see one collection replaced and the
//! other not yet.

use async_trait::async_trait;
use shared::{component_debug, Component, Document};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AggregatorError, AggregatorResult};
use crate::traits::GraphStore;
use crate::types::{Collection, Query};

/// Real file system store implementation
#[derive(Debug)]
pub struct FileGraphStore {
    /// Directory holding this database's collection files
    root: PathBuf,
    /// Serializes writers within this process
    write_lock: Mutex<()>,
}

impl FileGraphStore {
    /// Open (without creating) the database `db_name` under `data_dir`
    pub fn new(data_dir: impl AsRef<Path>, db_name: &str) -> Self {
        Self {
            root: data_dir.as_ref().join(db_name),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.jsonl", collection.name()))
    }

    async fn read_collection(&self, collection: Collection) -> AggregatorResult<Vec<Document>> {
        let path = self.collection_path(collection);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AggregatorError::store("read", collection, e)),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str::<Document>(line)
                    .map_err(|e| AggregatorError::store("decode", collection, e))
            })
            .collect()
    }

    async fn write_collection(&self, collection: Collection, documents: &[Document]) -> AggregatorResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AggregatorError::store("create", collection, e))?;

        let mut content = String::new();
        for document in documents {
            let line = serde_json::to_string(document)
                .map_err(|e| AggregatorError::store("encode", collection, e))?;
            content.push_str(&line);
            content.push('\n');
        }

        let path = self.collection_path(collection);
        let temp_path = path.with_extension("jsonl.tmp");
        fs::write(&temp_path, content)
            .await
            .map_err(|e| AggregatorError::store("write", collection, e))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| AggregatorError::store("rename", collection, e))?;
        Ok(())
    }
}

#[async_trait]
impl GraphStore for FileGraphStore {
    async fn find(&self, collection: Collection, query: &Query) -> AggregatorResult<Vec<Document>> {
        let documents = self.read_collection(collection).await?;
        Ok(documents
            .into_iter()
            .filter(|document| query.matches(document))
            .collect())
    }

    async fn insert(&self, collection: Collection, document: Document) -> AggregatorResult<()> {
        let _guard = self.write_lock.lock().await;

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AggregatorError::store("create", collection, e))?;

        let line = serde_json::to_string(&document)
            .map_err(|e| AggregatorError::store("encode", collection, e))?;

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.collection_path(collection))
            .await
            .map_err(|e| AggregatorError::store("open", collection, e))?;

        file.write_all(format!("{line}\n").as_bytes())
            .await
            .map_err(|e| AggregatorError::store("insert", collection, e))?;
        file.flush()
            .await
            .map_err(|e| AggregatorError::store("flush", collection, e))?;
        component_debug!(Component::Store, "Appended document to {}", collection);
        Ok(())
    }

    async fn remove_all(&self, collection: Collection) -> AggregatorResult<()> {
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(self.collection_path(collection)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AggregatorError::store("remove", collection, e)),
        }
    }

    async fn drop_all(&self) -> AggregatorResult<()> {
        let _guard = self.write_lock.lock().await;
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => {
                component_debug!(Component::Store, "🧹 Dropped database at {}", self.root.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AggregatorError::store_wide("drop", e)),
        }
    }

    async fn replace_first(
        &self,
        collection: Collection,
        query: &Query,
        document: Document,
    ) -> AggregatorResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut documents = self.read_collection(collection).await?;
        let Some(slot) = documents.iter_mut().find(|existing| query.matches(existing)) else {
            return Ok(false);
        };
        *slot = document;
        self.write_collection(collection, &documents).await?;
        Ok(true)
    }

    async fn replace_topology(&self, filters: Vec<Document>, paths: Vec<Document>) -> AggregatorResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_collection(Collection::Paths, &[]).await?;
        self.write_collection(Collection::Filters, &filters).await?;
        self.write_collection(Collection::Paths, &paths).await?;
        component_debug!(
            Component::Store,
            "💾 Wrote topology: {} filters, {} paths",
            filters.len(),
            paths.len()
        );
        Ok(())
    }
}
