//! Typed view over filter documents
//!
//! Filters are stored as schemaless documents. `Filter` interprets the
//! fields the aggregator relies on, keyed by the `type` attribute, and keeps
//! everything else in `extra` so documents survive a round trip.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::{Document, Id};
use crate::errors::{SharedError, SharedResult};

/// Filter types the aggregator interprets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    AudioMixer,
    VideoMixer,
    Receiver,
    Transmitter,
}

impl FilterType {
    /// Types expected to have exactly one instance per snapshot
    pub const SINGLETONS: [FilterType; 4] = [
        FilterType::AudioMixer,
        FilterType::VideoMixer,
        FilterType::Receiver,
        FilterType::Transmitter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::AudioMixer => "audioMixer",
            FilterType::VideoMixer => "videoMixer",
            FilterType::Receiver => "receiver",
            FilterType::Transmitter => "transmitter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::SINGLETONS.into_iter().find(|t| t.as_str() == name)
    }
}

/// Per-channel gain control on a mixer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainRecord {
    pub id: Id,
    pub volume: f64,
    #[serde(flatten)]
    pub extra: Document,
}

impl GainRecord {
    pub fn new(id: impl Into<Id>, volume: f64) -> Self {
        Self {
            id: id.into(),
            volume,
            extra: Document::new(),
        }
    }

    fn into_document(self) -> Document {
        let mut document = self.extra;
        document.insert("id".to_string(), self.id.into());
        document.insert("volume".to_string(), Value::from(self.volume));
        document
    }
}

/// Outbound transmission exposed by a transmitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Id,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub readers: Vec<Id>,
    #[serde(flatten)]
    pub extra: Document,
}

impl SessionRecord {
    pub fn new(id: impl Into<Id>, uri: impl Into<String>, readers: Vec<Id>) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            readers,
            extra: Document::new(),
        }
    }

    /// Whether this session carries the output of `reader`
    pub fn accepts(&self, reader: &Id) -> bool {
        self.readers.contains(reader)
    }

    fn into_document(self) -> Document {
        let mut document = self.extra;
        document.insert("id".to_string(), self.id.into());
        document.insert("uri".to_string(), Value::String(self.uri));
        document.insert(
            "readers".to_string(),
            Value::Array(self.readers.into_iter().map(Value::from).collect()),
        );
        document
    }
}

/// Attributes specific to audio and video mixers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MixerNode {
    pub gains: Option<Vec<GainRecord>>,
    /// Kept as exported, so an integer stays an integer
    pub master_gain: Option<Number>,
    pub master_delay: Option<Number>,
}

impl MixerNode {
    fn take_from(document: &mut Document) -> SharedResult<Self> {
        Ok(Self {
            gains: take_field(document, "gains", "mixer")?,
            master_gain: take_field(document, "masterGain", "mixer")?,
            master_delay: take_field(document, "masterDelay", "mixer")?,
        })
    }

    fn write_into(self, document: &mut Document) {
        if let Some(gains) = self.gains {
            let gains = gains
                .into_iter()
                .map(|gain| Value::Object(gain.into_document()))
                .collect();
            document.insert("gains".to_string(), Value::Array(gains));
        }
        if let Some(master_gain) = self.master_gain {
            document.insert("masterGain".to_string(), Value::Number(master_gain));
        }
        if let Some(master_delay) = self.master_delay {
            document.insert("masterDelay".to_string(), Value::Number(master_delay));
        }
    }

    /// Gain records, empty when the mixer exports none
    pub fn gains(&self) -> &[GainRecord] {
        self.gains.as_deref().unwrap_or_default()
    }
}

/// Attributes specific to the transmitter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransmitterNode {
    pub sessions: Option<Vec<SessionRecord>>,
}

impl TransmitterNode {
    fn take_from(document: &mut Document) -> SharedResult<Self> {
        Ok(Self {
            sessions: take_field(document, "sessions", "transmitter")?,
        })
    }

    fn write_into(self, document: &mut Document) {
        if let Some(sessions) = self.sessions {
            let sessions = sessions
                .into_iter()
                .map(|session| Value::Object(session.into_document()))
                .collect();
            document.insert("sessions".to_string(), Value::Array(sessions));
        }
    }

    pub fn sessions(&self) -> &[SessionRecord] {
        self.sessions.as_deref().unwrap_or_default()
    }
}

/// Type-specific part of a filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    AudioMixer(MixerNode),
    VideoMixer(MixerNode),
    Receiver,
    Transmitter(TransmitterNode),
    /// Encoders and every other type the aggregator does not interpret
    Other(String),
}

/// A processing node in the engine topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Document", into = "Document")]
pub struct Filter {
    pub id: Id,
    pub node: FilterNode,
    /// Attributes not interpreted by this crate
    pub extra: Document,
}

impl Filter {
    pub fn new(id: impl Into<Id>, node: FilterNode) -> Self {
        Self {
            id: id.into(),
            node,
            extra: Document::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        match &self.node {
            FilterNode::AudioMixer(_) => FilterType::AudioMixer.as_str(),
            FilterNode::VideoMixer(_) => FilterType::VideoMixer.as_str(),
            FilterNode::Receiver => FilterType::Receiver.as_str(),
            FilterNode::Transmitter(_) => FilterType::Transmitter.as_str(),
            FilterNode::Other(name) => name,
        }
    }

    pub fn filter_type(&self) -> Option<FilterType> {
        FilterType::from_name(self.type_name())
    }

    pub fn mixer(&self) -> Option<&MixerNode> {
        match &self.node {
            FilterNode::AudioMixer(mixer) | FilterNode::VideoMixer(mixer) => Some(mixer),
            _ => None,
        }
    }

    pub fn mixer_mut(&mut self) -> Option<&mut MixerNode> {
        match &mut self.node {
            FilterNode::AudioMixer(mixer) | FilterNode::VideoMixer(mixer) => Some(mixer),
            _ => None,
        }
    }

    pub fn transmitter(&self) -> Option<&TransmitterNode> {
        match &self.node {
            FilterNode::Transmitter(transmitter) => Some(transmitter),
            _ => None,
        }
    }

    pub fn to_document(&self) -> Document {
        Document::from(self.clone())
    }
}

impl TryFrom<Document> for Filter {
    type Error = SharedError;

    fn try_from(mut document: Document) -> SharedResult<Self> {
        let id: Id = take_field(&mut document, "id", "filter")?.ok_or(SharedError::MissingField {
            kind: "filter",
            field: "id",
        })?;
        let type_name: String = take_field(&mut document, "type", "filter")?.ok_or(
            SharedError::MissingField {
                kind: "filter",
                field: "type",
            },
        )?;

        let node = match FilterType::from_name(&type_name) {
            Some(FilterType::AudioMixer) => FilterNode::AudioMixer(MixerNode::take_from(&mut document)?),
            Some(FilterType::VideoMixer) => FilterNode::VideoMixer(MixerNode::take_from(&mut document)?),
            Some(FilterType::Receiver) => FilterNode::Receiver,
            Some(FilterType::Transmitter) => {
                FilterNode::Transmitter(TransmitterNode::take_from(&mut document)?)
            }
            None => FilterNode::Other(type_name),
        };

        Ok(Filter {
            id,
            node,
            extra: document,
        })
    }
}

impl From<Filter> for Document {
    fn from(filter: Filter) -> Self {
        let type_name = filter.type_name().to_string();
        let mut document = filter.extra;
        document.insert("id".to_string(), filter.id.into());
        document.insert("type".to_string(), Value::String(type_name));
        match filter.node {
            FilterNode::AudioMixer(mixer) | FilterNode::VideoMixer(mixer) => mixer.write_into(&mut document),
            FilterNode::Transmitter(transmitter) => transmitter.write_into(&mut document),
            FilterNode::Receiver | FilterNode::Other(_) => {}
        }
        document
    }
}

/// Remove `field` from `document` and decode it; absent and null both map to `None`.
fn take_field<T: DeserializeOwned>(
    document: &mut Document,
    field: &str,
    kind: &'static str,
) -> SharedResult<Option<T>> {
    match document.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| SharedError::invalid(kind, e)),
    }
}
