//! Mixer graph state aggregator
//!
//! The mixing engine publishes its processing topology (filters and the
//! paths between them) into a document store. This crate keeps that store in
//! sync with engine snapshots and rebuilds, on demand, the per-mixer summary
//! the control dashboard renders.

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod mixer_state;
pub mod role_tagger;
pub mod services;
pub mod synchronizer;
pub mod traits;
pub mod types;
pub mod volume_updater;

// Re-export commonly used types
pub use config::{AggregatorConfig, IngestionPolicy, StoreBackend, VolumePersistence};
pub use context::MixerContext;
pub use error::{AggregatorError, AggregatorResult, EntityKind};
pub use mixer_state::MixerStateAggregator;
pub use role_tagger::RoleTagger;
pub use synchronizer::{GraphSynchronizer, SyncReport};
pub use traits::GraphStore;
pub use types::{Collection, Query, WriterSelector};
pub use volume_updater::{VolumeChange, VolumeUpdater};
