//! Test fixtures: engine topology snapshots
//!
//! The base snapshot is one audio mixer `m1` with channel `c1`, encoder `e1`,
//! transmitter `t1` whose session `s1` reads from `r1`, and the path
//! `m1 -> e1` ending at `r1`.

use serde_json::{json, Value};
use shared::Document;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const AUDIO_MIXER_ID: &'static str = "m1";
    pub const VIDEO_MIXER_ID: &'static str = "v1";
    pub const TRANSMITTER_ID: &'static str = "t1";
    pub const RECEIVER_ID: &'static str = "rx1";
    pub const AUDIO_ENCODER_ID: &'static str = "e1";
    pub const VIDEO_ENCODER_ID: &'static str = "e2";
    pub const AUDIO_READER: &'static str = "r1";
    pub const VIDEO_READER: &'static str = "r2";
    pub const SESSION_URI: &'static str = "rtp://x";

    /// Convert a JSON object literal into a document
    pub fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    pub fn audio_mixer() -> Document {
        Self::doc(json!({
            "id": Self::AUDIO_MIXER_ID,
            "type": "audioMixer",
            "gains": [{"id": "c1", "volume": 0.5}],
            "masterGain": 1.0,
            "masterDelay": 0
        }))
    }

    /// Audio mixer exporting `count` gains
    pub fn audio_mixer_with_channels(count: usize) -> Document {
        let gains: Vec<Value> = (0..count)
            .map(|i| json!({"id": format!("c{}", i + 1), "volume": 0.5}))
            .collect();
        Self::doc(json!({
            "id": Self::AUDIO_MIXER_ID,
            "type": "audioMixer",
            "gains": gains,
            "masterGain": 1.0,
            "masterDelay": 0
        }))
    }

    pub fn video_mixer() -> Document {
        Self::doc(json!({
            "id": Self::VIDEO_MIXER_ID,
            "type": "videoMixer",
            "gains": [{"id": 1, "volume": 1.0}, {"id": 2, "volume": 0.3}],
            "masterGain": 1.0,
            "masterDelay": 40
        }))
    }

    /// Transmitter with a single session `s1` accepting `readers`
    pub fn transmitter(readers: &[&str]) -> Document {
        Self::doc(json!({
            "id": Self::TRANSMITTER_ID,
            "type": "transmitter",
            "sessions": [{"id": "s1", "uri": Self::SESSION_URI, "readers": readers}]
        }))
    }

    /// Transmitter serving both the audio and the video reader
    pub fn av_transmitter() -> Document {
        Self::doc(json!({
            "id": Self::TRANSMITTER_ID,
            "type": "transmitter",
            "sessions": [
                {"id": "s1", "uri": Self::SESSION_URI, "readers": [Self::AUDIO_READER]},
                {"id": "s2", "uri": "rtp://y", "readers": [Self::VIDEO_READER]}
            ]
        }))
    }

    pub fn receiver() -> Document {
        Self::doc(json!({"id": Self::RECEIVER_ID, "type": "receiver"}))
    }

    pub fn audio_encoder() -> Document {
        Self::doc(json!({"id": Self::AUDIO_ENCODER_ID, "type": "audioEncoder", "codec": "opus"}))
    }

    pub fn video_encoder() -> Document {
        Self::doc(json!({"id": Self::VIDEO_ENCODER_ID, "type": "videoEncoder", "codec": "h264"}))
    }

    pub fn audio_path() -> Document {
        Self::doc(json!({
            "originFilter": Self::AUDIO_MIXER_ID,
            "filters": [Self::AUDIO_ENCODER_ID],
            "destinationReader": Self::AUDIO_READER
        }))
    }

    pub fn video_path() -> Document {
        Self::doc(json!({
            "originFilter": Self::VIDEO_MIXER_ID,
            "filters": [Self::VIDEO_ENCODER_ID, Self::TRANSMITTER_ID],
            "destinationReader": Self::VIDEO_READER
        }))
    }

    /// The base audio-only snapshot
    pub fn scenario_filters() -> Vec<Document> {
        vec![Self::audio_mixer(), Self::transmitter(&[Self::AUDIO_READER]), Self::audio_encoder()]
    }

    pub fn scenario_paths() -> Vec<Document> {
        vec![Self::audio_path()]
    }

    /// A snapshot with both mixers, a receiver and a two-session transmitter
    pub fn av_filters() -> Vec<Document> {
        vec![
            Self::receiver(),
            Self::audio_mixer(),
            Self::video_mixer(),
            Self::audio_encoder(),
            Self::video_encoder(),
            Self::av_transmitter(),
        ]
    }

    pub fn av_paths() -> Vec<Document> {
        vec![Self::audio_path(), Self::video_path()]
    }
}
