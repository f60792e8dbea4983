//! The long-lived handle used by every dashboard and control request
//!
//! One `MixerContext` pairs a graph store with the components that read and
//! write it. Callers create it once and pass it to request handlers.

use shared::{
    component_info, AvMixerState, Component, Document, Filter, FilterRole, Id, MixerKind,
    MixerSummary, Path, TopologySnapshot,
};
use std::sync::Arc;

use crate::config::{AggregatorConfig, StoreBackend};
use crate::error::AggregatorResult;
use crate::mixer_state::MixerStateAggregator;
use crate::role_tagger::RoleTagger;
use crate::services::{FileGraphStore, RealGraphStore};
use crate::synchronizer::{GraphSynchronizer, SyncReport};
use crate::traits::GraphStore;
use crate::types::WriterSelector;
use crate::volume_updater::{VolumeChange, VolumeUpdater};

pub struct MixerContext {
    config: AggregatorConfig,
    store: Arc<dyn GraphStore>,
    synchronizer: GraphSynchronizer<dyn GraphStore>,
    aggregator: MixerStateAggregator<dyn GraphStore>,
    role_tagger: RoleTagger<dyn GraphStore>,
    volume_updater: VolumeUpdater<dyn GraphStore>,
}

impl MixerContext {
    /// Open the configured store, dropping all collections when configured to
    pub async fn open(config: AggregatorConfig) -> AggregatorResult<Self> {
        config.validate()?;

        let store: Arc<dyn GraphStore> = match config.store {
            StoreBackend::Memory => Arc::new(RealGraphStore::new()),
            StoreBackend::File => Arc::new(FileGraphStore::new(&config.data_dir, &config.db_name)),
        };

        if config.drop_on_start {
            store.drop_all().await?;
        }

        component_info!(
            Component::Store,
            "📦 Opened {:?} graph store `{}` (dropped: {})",
            config.store,
            config.db_name,
            config.drop_on_start
        );
        Ok(Self::with_store(store, config))
    }

    /// Build a context over an existing store
    pub fn with_store(store: Arc<dyn GraphStore>, config: AggregatorConfig) -> Self {
        Self {
            synchronizer: GraphSynchronizer::new(store.clone()).with_policy(config.ingestion),
            aggregator: MixerStateAggregator::new(store.clone()).with_capacity(config.channel_capacity),
            role_tagger: RoleTagger::new(store.clone()),
            volume_updater: VolumeUpdater::new(store.clone()).with_persistence(config.volume_persistence),
            store,
            config,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }

    pub fn aggregator(&self) -> &MixerStateAggregator<dyn GraphStore> {
        &self.aggregator
    }

    pub async fn get_mixer_state(&self, kind: MixerKind) -> AggregatorResult<MixerSummary> {
        self.aggregator.get_mixer_state(kind).await
    }

    pub async fn get_av_mixer_state(&self) -> AggregatorResult<AvMixerState> {
        self.aggregator.get_av_mixer_state().await
    }

    pub async fn get_receiver_id(&self) -> AggregatorResult<Id> {
        self.aggregator.get_receiver_id().await
    }

    pub async fn get_transmitter_id(&self) -> AggregatorResult<Id> {
        self.aggregator.get_transmitter_id().await
    }

    pub async fn get_filter(&self, id: &Id) -> AggregatorResult<Option<Filter>> {
        self.aggregator.get_filter(id).await
    }

    pub async fn get_output_path_from_filter(
        &self,
        origin: &Id,
        writer: WriterSelector,
    ) -> AggregatorResult<Option<Path>> {
        self.aggregator.get_output_path_from_filter(origin, writer).await
    }

    pub async fn set_channel_volume(&self, channel_id: &Id, volume: f64) -> AggregatorResult<Option<VolumeChange>> {
        self.volume_updater.set_channel_volume(channel_id, volume).await
    }

    pub async fn apply_snapshot(&self, filters: Vec<Document>, paths: Vec<Document>) -> AggregatorResult<SyncReport> {
        self.synchronizer.apply_snapshot(filters, paths).await
    }

    pub async fn apply_snapshot_document(&self, snapshot: TopologySnapshot) -> AggregatorResult<SyncReport> {
        self.synchronizer.apply_snapshot_document(snapshot).await
    }

    pub async fn tag_role(&self, filter_id: &Id, filter_type: &str, role: &str) -> AggregatorResult<FilterRole> {
        self.role_tagger.tag_role(filter_id, filter_type, role).await
    }

    pub async fn roles_for(&self, filter_id: &Id) -> AggregatorResult<Vec<FilterRole>> {
        self.role_tagger.roles_for(filter_id).await
    }
}
