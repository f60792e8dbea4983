//! Test helpers for building contexts over in-memory stores

use aggregator::services::RealGraphStore;
use aggregator::{AggregatorConfig, MixerContext};
use shared::Document;
use std::sync::Arc;

use super::fixtures::TestFixtures;

pub struct TestHelpers;

impl TestHelpers {
    /// Context over a fresh in-memory store, keeping a handle on the store
    pub fn memory_context(config: AggregatorConfig) -> (Arc<RealGraphStore>, MixerContext) {
        let store = Arc::new(RealGraphStore::new());
        let context = MixerContext::with_store(store.clone(), config);
        (store, context)
    }

    /// Default context with the given snapshot applied
    pub async fn synced_context(filters: Vec<Document>, paths: Vec<Document>) -> MixerContext {
        Self::synced_context_with(AggregatorConfig::default(), filters, paths).await
    }

    pub async fn synced_context_with(
        config: AggregatorConfig,
        filters: Vec<Document>,
        paths: Vec<Document>,
    ) -> MixerContext {
        let (_, context) = Self::memory_context(config);
        context
            .apply_snapshot(filters, paths)
            .await
            .expect("snapshot should apply");
        context
    }

    /// Default context holding the base audio scenario
    pub async fn scenario_context() -> MixerContext {
        Self::synced_context(TestFixtures::scenario_filters(), TestFixtures::scenario_paths()).await
    }

    /// Default context holding the audio/video scenario
    pub async fn av_context() -> MixerContext {
        Self::synced_context(TestFixtures::av_filters(), TestFixtures::av_paths()).await
    }
}
