//! Audio mixer channel volume updates
//!
//! By default the new volume is applied to the loaded copy of the mixer only
//! and never written back, so a following `get_mixer_state` still reports
//! the stored volume. `VolumePersistence::WriteBack` replaces the stored
//! mixer document instead; that mode changes observable behaviour and is
//! opt-in.

use serde::{Deserialize, Serialize};
use shared::{component_debug, component_info, component_warn, Component, Filter, FilterType, Id};
use std::sync::Arc;

use crate::config::VolumePersistence;
use crate::error::{AggregatorError, AggregatorResult, EntityKind};
use crate::traits::GraphStore;
use crate::types::{Collection, Query};

/// Result of a volume update on one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeChange {
    pub mixer_id: Id,
    pub channel_id: Id,
    pub previous_volume: f64,
    pub volume: f64,
    /// Whether the store now holds the new volume
    pub persisted: bool,
}

pub struct VolumeUpdater<S: ?Sized> {
    store: Arc<S>,
    persistence: VolumePersistence,
}

impl<S: GraphStore + ?Sized> VolumeUpdater<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            persistence: VolumePersistence::default(),
        }
    }

    pub fn with_persistence(mut self, persistence: VolumePersistence) -> Self {
        self.persistence = persistence;
        self
    }

    /// Set the volume of `channel_id` on the audio mixer.
    ///
    /// Returns `None` when the mixer has no such channel.
    pub async fn set_channel_volume(&self, channel_id: &Id, volume: f64) -> AggregatorResult<Option<VolumeChange>> {
        let mixer_type = FilterType::AudioMixer.as_str();
        let Some(document) = self
            .store
            .find_one(Collection::Filters, &Query::eq("type", mixer_type))
            .await?
        else {
            component_warn!(Component::VolumeUpdater, "⚠️ No audio mixer to update");
            return Err(AggregatorError::not_found(EntityKind::Mixer));
        };

        let mut mixer = Filter::try_from(document).map_err(|e| {
            component_warn!(Component::VolumeUpdater, "⚠️ Audio mixer is not usable: {}", e);
            AggregatorError::not_found(EntityKind::Mixer)
        })?;
        let mixer_id = mixer.id.clone();

        let Some(gain) = mixer
            .mixer_mut()
            .and_then(|node| node.gains.iter_mut().flatten().find(|gain| &gain.id == channel_id))
        else {
            component_debug!(
                Component::VolumeUpdater,
                "Channel {} not present on mixer {}",
                channel_id,
                mixer_id
            );
            return Ok(None);
        };
        let previous_volume = std::mem::replace(&mut gain.volume, volume);

        let persisted = match self.persistence {
            VolumePersistence::InMemoryOnly => {
                component_debug!(
                    Component::VolumeUpdater,
                    "Channel {} volume {} -> {} applied to loaded copy only",
                    channel_id,
                    previous_volume,
                    volume
                );
                false
            }
            VolumePersistence::WriteBack => {
                let query = Query::eq("id", mixer_id.clone()).and("type", mixer_type);
                let replaced = self
                    .store
                    .replace_first(Collection::Filters, &query, mixer.to_document())
                    .await?;
                component_info!(
                    Component::VolumeUpdater,
                    "🔊 Channel {} volume {} -> {} written back: {}",
                    channel_id,
                    previous_volume,
                    volume,
                    replaced
                );
                replaced
            }
        };

        Ok(Some(VolumeChange {
            mixer_id,
            channel_id: channel_id.clone(),
            previous_volume,
            volume,
            persisted,
        }))
    }
}
