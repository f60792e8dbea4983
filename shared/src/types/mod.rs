//! Core types used throughout the mixer graph system

mod component;
mod filter;
mod id;
mod path;
mod role;
mod snapshot;
mod summary;

pub use component::Component;
pub use filter::{
    Filter, FilterNode, FilterType, GainRecord, MixerNode, SessionRecord, TransmitterNode,
};
pub use id::Id;
pub use path::Path;
pub use role::FilterRole;
pub use snapshot::TopologySnapshot;
pub use summary::{AvMixerState, Channel, MixerKind, MixerSummary, SessionSummary};

/// A schemaless document as persisted in the graph store
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Fixed number of input channels a mixer filter exposes
pub const MIXER_CHANNEL_CAPACITY: usize = 8;
