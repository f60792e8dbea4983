//! Mixer state aggregation over the persisted filter graph
//!
//! There is no stored "mixer state" document. A summary is rebuilt on every
//! request by a one-hop walk: mixer filter, the path originating at it, the
//! first stage on that path (the encoder), then a join against the
//! transmitter's sessions on the path's destination reader.
//!
//! Singleton filters are located by type and the first match wins. Documents
//! that cannot be interpreted are reported the same way as missing ones.

use serde_json::Value;
use shared::{
    component_debug, component_warn, AvMixerState, Component, Document, Filter, FilterType, Id,
    MixerKind, MixerSummary, Path, MIXER_CHANNEL_CAPACITY,
};
use std::sync::Arc;

use crate::core::{match_session, summarize};
use crate::error::{AggregatorError, AggregatorResult, EntityKind};
use crate::traits::GraphStore;
use crate::types::{Collection, Query, WriterSelector};

/// Read-only queries over the filter graph
pub struct MixerStateAggregator<S: ?Sized> {
    store: Arc<S>,
    capacity: usize,
}

impl<S: GraphStore + ?Sized> MixerStateAggregator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            capacity: MIXER_CHANNEL_CAPACITY,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build the dashboard summary for the audio or video mixer
    pub async fn get_mixer_state(&self, kind: MixerKind) -> AggregatorResult<MixerSummary> {
        let mixer_filter = self.find_singleton(kind.filter_type(), EntityKind::Mixer).await?;
        let transmitter_filter = self
            .find_singleton(FilterType::Transmitter, EntityKind::Transmitter)
            .await?;

        let Some(path) = self.find_origin_path(&mixer_filter.id).await? else {
            return Err(self.missing(EntityKind::Path, &mixer_filter.id));
        };
        let encoder = self.find_encoder(&path).await?;

        let (Some(mixer), Some(transmitter)) = (mixer_filter.mixer(), transmitter_filter.transmitter()) else {
            return Err(AggregatorError::not_found(EntityKind::Mixer));
        };

        let session = match_session(transmitter, path.destination_reader.as_ref());
        if session.is_none() {
            component_debug!(
                Component::Aggregator,
                "No transmitter session reads from {:?} (mixer {})",
                path.destination_reader,
                mixer_filter.id
            );
        }

        let summary = summarize(&mixer_filter, mixer, encoder, session, self.capacity);
        if summary.free_channels < 0 {
            component_warn!(
                Component::Aggregator,
                "⚠️ Mixer {} exports {} channels, capacity is {}",
                summary.mixer_id,
                summary.channels.len(),
                self.capacity
            );
        }
        Ok(summary)
    }

    /// Both mixer summaries for the combined dashboard; fails if either fails
    pub async fn get_av_mixer_state(&self) -> AggregatorResult<AvMixerState> {
        let video = self.get_mixer_state(MixerKind::Video).await?;
        let audio = self.get_mixer_state(MixerKind::Audio).await?;
        Ok(AvMixerState { video, audio })
    }

    pub async fn get_receiver_id(&self) -> AggregatorResult<Id> {
        self.find_singleton_id(FilterType::Receiver, EntityKind::Receiver).await
    }

    pub async fn get_transmitter_id(&self) -> AggregatorResult<Id> {
        self.find_singleton_id(FilterType::Transmitter, EntityKind::Transmitter)
            .await
    }

    /// Look a filter up by id; `None` when absent or not interpretable
    pub async fn get_filter(&self, id: &Id) -> AggregatorResult<Option<Filter>> {
        let document = self
            .store
            .find_one(Collection::Filters, &Query::eq("id", id.clone()))
            .await?;
        Ok(document.and_then(|document| Self::parse_filter(document, id)))
    }

    /// Output path of `origin` for the given writer
    pub async fn get_output_path_from_filter(
        &self,
        origin: &Id,
        writer: WriterSelector,
    ) -> AggregatorResult<Option<Path>> {
        if !writer.is_primary() {
            return Err(AggregatorError::NotImplemented {
                feature: format!("output path lookup for {writer}"),
            });
        }
        self.find_origin_path(origin).await
    }

    async fn find_singleton(&self, filter_type: FilterType, entity: EntityKind) -> AggregatorResult<Filter> {
        let document = self
            .store
            .find_one(Collection::Filters, &Query::eq("type", filter_type.as_str()))
            .await?;

        match document.map(Filter::try_from) {
            Some(Ok(filter)) => Ok(filter),
            Some(Err(e)) => {
                component_warn!(
                    Component::Aggregator,
                    "⚠️ {} document is not usable: {}",
                    filter_type.as_str(),
                    e
                );
                Err(AggregatorError::not_found(entity))
            }
            None => {
                component_warn!(Component::Aggregator, "⚠️ No {} filter in graph", filter_type.as_str());
                Err(AggregatorError::not_found(entity))
            }
        }
    }

    async fn find_singleton_id(&self, filter_type: FilterType, entity: EntityKind) -> AggregatorResult<Id> {
        let document = self
            .store
            .find_one(Collection::Filters, &Query::eq("type", filter_type.as_str()))
            .await?;

        document
            .and_then(|mut document| document.remove("id"))
            .and_then(|id| serde_json::from_value::<Id>(id).ok())
            .ok_or_else(|| {
                component_warn!(Component::Aggregator, "⚠️ No {} id in graph", filter_type.as_str());
                AggregatorError::not_found(entity)
            })
    }

    async fn find_origin_path(&self, origin: &Id) -> AggregatorResult<Option<Path>> {
        let document = self
            .store
            .find_one(Collection::Paths, &Query::eq("originFilter", origin.clone()))
            .await?;

        Ok(document.and_then(|document| match Path::try_from(document) {
            Ok(path) => Some(path),
            Err(e) => {
                component_warn!(Component::Aggregator, "⚠️ Path from {} is not usable: {}", origin, e);
                None
            }
        }))
    }

    async fn find_encoder(&self, path: &Path) -> AggregatorResult<Document> {
        let Some(encoder_id) = path.next_stage() else {
            return Err(self.missing(EntityKind::Encoder, &path.origin_filter));
        };

        self.store
            .find_one(Collection::Filters, &Query::eq("id", Value::from(encoder_id.clone())))
            .await?
            .ok_or_else(|| self.missing(EntityKind::Encoder, &path.origin_filter))
    }

    fn parse_filter(document: Document, id: &Id) -> Option<Filter> {
        match Filter::try_from(document) {
            Ok(filter) => Some(filter),
            Err(e) => {
                component_warn!(Component::Aggregator, "⚠️ Filter {} is not usable: {}", id, e);
                None
            }
        }
    }

    fn missing(&self, entity: EntityKind, mixer_id: &Id) -> AggregatorError {
        component_warn!(Component::Aggregator, "⚠️ No {} for mixer {}", entity, mixer_id);
        AggregatorError::not_found(entity)
    }
}
