use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::{Document, FilterType, GainRecord, Id, SessionRecord};

/// Which mixer a summary is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MixerKind {
    Audio,
    Video,
}

impl MixerKind {
    pub fn filter_type(&self) -> FilterType {
        match self {
            MixerKind::Audio => FilterType::AudioMixer,
            MixerKind::Video => FilterType::VideoMixer,
        }
    }
}

/// A mixer input channel as rendered on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Id,
    pub volume: f64,
}

impl From<&GainRecord> for Channel {
    fn from(gain: &GainRecord) -> Self {
        Self {
            id: gain.id.clone(),
            volume: gain.volume,
        }
    }
}

/// The outbound session carrying a mixer's encoded output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Id,
    pub uri: String,
}

impl From<&SessionRecord> for SessionSummary {
    fn from(session: &SessionRecord) -> Self {
        Self {
            id: session.id.clone(),
            uri: session.uri.clone(),
        }
    }
}

/// Dashboard view of one mixer, its encoder and its outbound session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixerSummary {
    pub channels: Vec<Channel>,
    /// Capacity minus active channels. Negative when the graph breaks the capacity invariant.
    pub free_channels: i64,
    #[serde(rename = "mixerID")]
    pub mixer_id: Id,
    pub master_gain: Option<Number>,
    pub master_delay: Option<Number>,
    pub encoder: Document,
    pub session: Option<SessionSummary>,
}

/// Both mixers, as shown together on the combined dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvMixerState {
    pub video: MixerSummary,
    pub audio: MixerSummary,
}
