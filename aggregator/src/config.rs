//! Runtime configuration for the aggregator and its store

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use shared::MIXER_CHANNEL_CAPACITY;
use std::path::PathBuf;

use crate::error::{AggregatorError, AggregatorResult};

/// Which graph store implementation to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum StoreBackend {
    /// Process-local store; topology swaps are atomic
    #[default]
    Memory,
    /// JSON-lines files under the data directory
    File,
}

/// What to do when a snapshot has several filters of a singleton type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum IngestionPolicy {
    /// Log a warning and apply the snapshot; lookups take the first match
    #[default]
    Lenient,
    /// Reject the snapshot before anything is written
    Strict,
}

/// Whether channel volume changes reach the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum VolumePersistence {
    /// Only the loaded copy changes; the stored mixer is left as it was
    #[default]
    InMemoryOnly,
    /// The modified mixer document replaces the stored one
    WriteBack,
}

/// Aggregator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    pub store: StoreBackend,
    /// Root directory for the file backend
    pub data_dir: PathBuf,
    /// Database name; the file backend keeps its collections in `data_dir/db_name`
    pub db_name: String,
    pub channel_capacity: usize,
    pub ingestion: IngestionPolicy,
    pub volume_persistence: VolumePersistence,
    /// Drop every collection when the context is opened
    pub drop_on_start: bool,
}

impl AggregatorConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "./graphdb";
    pub const DEFAULT_DB_NAME: &'static str = "livemediastreamer";

    pub fn with_store(mut self, store: StoreBackend) -> Self {
        self.store = store;
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = db_name.into();
        self
    }

    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }

    pub fn with_ingestion(mut self, ingestion: IngestionPolicy) -> Self {
        self.ingestion = ingestion;
        self
    }

    pub fn with_volume_persistence(mut self, volume_persistence: VolumePersistence) -> Self {
        self.volume_persistence = volume_persistence;
        self
    }

    pub fn with_drop_on_start(mut self, drop_on_start: bool) -> Self {
        self.drop_on_start = drop_on_start;
        self
    }

    pub fn validate(&self) -> AggregatorResult<()> {
        if self.db_name.trim().is_empty() {
            return Err(AggregatorError::config("db_name must not be empty"));
        }
        if self.db_name.contains(['/', '\\']) || self.db_name == "." || self.db_name == ".." {
            return Err(AggregatorError::config(format!(
                "db_name `{}` must be a plain name",
                self.db_name
            )));
        }
        if self.channel_capacity == 0 {
            return Err(AggregatorError::config("channel_capacity must be positive"));
        }
        Ok(())
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            db_name: Self::DEFAULT_DB_NAME.to_string(),
            channel_capacity: MIXER_CHANNEL_CAPACITY,
            ingestion: IngestionPolicy::default(),
            volume_persistence: VolumePersistence::default(),
            drop_on_start: true,
        }
    }
}
