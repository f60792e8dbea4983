//! Integration tests for mixer state aggregation
//!
//! Every test syncs a topology snapshot through the context and then reads
//! it back the way the dashboard does.

mod common;

use aggregator::{AggregatorError, EntityKind, WriterSelector};
use common::{TestFixtures, TestHelpers};
use serde_json::{json, Number};
use shared::{Channel, Filter, Id, MixerKind, SessionSummary};

#[tokio::test]
async fn test_audio_mixer_summary_joins_encoder_and_session() {
    // Arrange
    let context = TestHelpers::scenario_context().await;

    // Act
    let summary = context.get_mixer_state(MixerKind::Audio).await.unwrap();

    // Assert
    assert_eq!(summary.mixer_id, Id::from("m1"));
    assert_eq!(summary.channels, vec![Channel { id: Id::from("c1"), volume: 0.5 }]);
    assert_eq!(summary.free_channels, 7);
    assert_eq!(summary.master_gain, Number::from_f64(1.0));
    assert_eq!(summary.master_delay, Some(Number::from(0)));
    assert_eq!(summary.encoder, TestFixtures::audio_encoder());
    assert_eq!(
        summary.session,
        Some(SessionSummary {
            id: Id::from("s1"),
            uri: TestFixtures::SESSION_URI.to_string(),
        })
    );
}

#[tokio::test]
async fn test_summary_serializes_with_dashboard_field_names() {
    let context = TestHelpers::scenario_context().await;
    let summary = context.get_mixer_state(MixerKind::Audio).await.unwrap();

    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["mixerID"], json!("m1"));
    assert_eq!(value["freeChannels"], json!(7));
    assert_eq!(value["masterGain"], json!(1.0));
    assert_eq!(value["masterDelay"], json!(0));
    assert!(value["masterDelay"].is_u64(), "integer delay must stay an integer");
    assert_eq!(value["session"]["uri"], json!("rtp://x"));
    assert_eq!(value["encoder"]["codec"], json!("opus"));
}

#[tokio::test]
async fn test_no_session_when_transmitter_does_not_read_destination() {
    let filters = vec![
        TestFixtures::audio_mixer(),
        TestFixtures::transmitter(&["r2"]),
        TestFixtures::audio_encoder(),
    ];
    let context = TestHelpers::synced_context(filters, TestFixtures::scenario_paths()).await;

    let summary = context.get_mixer_state(MixerKind::Audio).await.unwrap();

    assert_eq!(summary.session, None);
    assert_eq!(summary.mixer_id, Id::from("m1"));
}

#[tokio::test]
async fn test_no_session_when_path_has_no_destination_reader() {
    let path = TestFixtures::doc(json!({"originFilter": "m1", "filters": ["e1"]}));
    let context = TestHelpers::synced_context(TestFixtures::scenario_filters(), vec![path]).await;

    let summary = context.get_mixer_state(MixerKind::Audio).await.unwrap();

    assert_eq!(summary.session, None);
}

#[tokio::test]
async fn test_missing_path_is_not_found_path() {
    let context = TestHelpers::synced_context(TestFixtures::scenario_filters(), vec![]).await;

    let err = context.get_mixer_state(MixerKind::Audio).await.unwrap_err();

    assert!(err.is_not_found(EntityKind::Path), "got {err}");
}

#[tokio::test]
async fn test_missing_video_mixer_is_not_found_mixer() {
    let context = TestHelpers::scenario_context().await;

    let err = context.get_mixer_state(MixerKind::Video).await.unwrap_err();

    assert!(err.is_not_found(EntityKind::Mixer), "got {err}");
}

#[tokio::test]
async fn test_missing_transmitter_is_not_found_transmitter() {
    let filters = vec![TestFixtures::audio_mixer(), TestFixtures::audio_encoder()];
    let context = TestHelpers::synced_context(filters, TestFixtures::scenario_paths()).await;

    let err = context.get_mixer_state(MixerKind::Audio).await.unwrap_err();

    assert!(err.is_not_found(EntityKind::Transmitter), "got {err}");
}

#[tokio::test]
async fn test_missing_encoder_is_not_found_encoder() {
    let filters = vec![TestFixtures::audio_mixer(), TestFixtures::transmitter(&["r1"])];
    let context = TestHelpers::synced_context(filters, TestFixtures::scenario_paths()).await;

    let err = context.get_mixer_state(MixerKind::Audio).await.unwrap_err();
    assert!(err.is_not_found(EntityKind::Encoder), "got {err}");

    // A path with no stages after the origin has no encoder either
    let path = TestFixtures::doc(json!({"originFilter": "m1", "filters": [], "destinationReader": "r1"}));
    let context = TestHelpers::synced_context(TestFixtures::scenario_filters(), vec![path]).await;
    let err = context.get_mixer_state(MixerKind::Audio).await.unwrap_err();
    assert!(err.is_not_found(EntityKind::Encoder), "got {err}");
}

#[tokio::test]
async fn test_empty_store_reports_mixer_first() {
    let context = TestHelpers::synced_context(vec![], vec![]).await;

    let err = context.get_mixer_state(MixerKind::Audio).await.unwrap_err();

    assert!(matches!(
        err,
        AggregatorError::NotFound { entity: EntityKind::Mixer }
    ));
}

#[tokio::test]
async fn test_free_channels_goes_negative_past_capacity() {
    let filters = vec![
        TestFixtures::audio_mixer_with_channels(9),
        TestFixtures::transmitter(&["r1"]),
        TestFixtures::audio_encoder(),
    ];
    let context = TestHelpers::synced_context(filters, TestFixtures::scenario_paths()).await;

    let summary = context.get_mixer_state(MixerKind::Audio).await.unwrap();

    assert_eq!(summary.channels.len(), 9);
    assert_eq!(summary.free_channels, -1);
}

#[tokio::test]
async fn test_mixer_without_gains_has_full_capacity() {
    let mixer = TestFixtures::doc(json!({"id": "m1", "type": "audioMixer"}));
    let filters = vec![mixer, TestFixtures::transmitter(&["r1"]), TestFixtures::audio_encoder()];
    let context = TestHelpers::synced_context(filters, TestFixtures::scenario_paths()).await;

    let summary = context.get_mixer_state(MixerKind::Audio).await.unwrap();

    assert!(summary.channels.is_empty());
    assert_eq!(summary.free_channels, 8);
    assert_eq!(summary.master_gain, None);
    assert_eq!(summary.master_delay, None);
}

#[tokio::test]
async fn test_free_channels_follows_configured_capacity() {
    let config = aggregator::AggregatorConfig::default().with_channel_capacity(4);
    let context = TestHelpers::synced_context_with(
        config,
        TestFixtures::scenario_filters(),
        TestFixtures::scenario_paths(),
    )
    .await;

    let summary = context.get_mixer_state(MixerKind::Audio).await.unwrap();

    assert_eq!(summary.free_channels, 3);
}

#[tokio::test]
async fn test_av_state_reports_both_mixers() {
    let context = TestHelpers::av_context().await;

    let state = context.get_av_mixer_state().await.unwrap();

    assert_eq!(state.audio.mixer_id, Id::from("m1"));
    assert_eq!(state.video.mixer_id, Id::from("v1"));
    assert_eq!(state.video.encoder, TestFixtures::video_encoder());
    assert_eq!(state.video.free_channels, 6);
    assert_eq!(state.video.master_delay, Some(Number::from(40)));
    assert_eq!(state.video.session.map(|s| s.id), Some(Id::from("s2")));
    assert_eq!(state.audio.session.map(|s| s.id), Some(Id::from("s1")));
}

#[tokio::test]
async fn test_av_state_fails_when_one_mixer_is_missing() {
    let context = TestHelpers::scenario_context().await;

    let err = context.get_av_mixer_state().await.unwrap_err();

    assert!(err.is_not_found(EntityKind::Mixer));
}

#[tokio::test]
async fn test_get_filter_round_trips_stored_document() {
    let context = TestHelpers::av_context().await;

    for fixture in TestFixtures::av_filters() {
        let expected = Filter::try_from(fixture.clone()).unwrap();
        let found = context
            .get_filter(&expected.id)
            .await
            .unwrap()
            .expect("filter should be found");
        assert_eq!(found, expected);
        assert_eq!(found.to_document(), fixture);
    }
}

#[tokio::test]
async fn test_get_filter_missing_is_none() {
    let context = TestHelpers::scenario_context().await;

    assert!(context.get_filter(&Id::from("nope")).await.unwrap().is_none());
    assert!(context.get_filter(&Id::from(1)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_filter_with_numeric_ids() {
    let filters = vec![TestFixtures::doc(json!({"id": 7, "type": "receiver"}))];
    let context = TestHelpers::synced_context(filters, vec![]).await;

    let filter = context.get_filter(&Id::parse("7")).await.unwrap().unwrap();

    assert_eq!(filter.id, Id::Number(7));
    assert_eq!(filter.type_name(), "receiver");
    assert!(context.get_filter(&Id::from("7")).await.unwrap().is_none(), "text id 7 is a different id");
}

#[tokio::test]
async fn test_reapplying_the_same_snapshot_is_idempotent() {
    let context = TestHelpers::av_context().await;
    let before = context.get_av_mixer_state().await.unwrap();

    context
        .apply_snapshot(TestFixtures::av_filters(), TestFixtures::av_paths())
        .await
        .unwrap();
    let after = context.get_av_mixer_state().await.unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn test_new_snapshot_replaces_previous_topology() {
    let context = TestHelpers::av_context().await;

    context
        .apply_snapshot(TestFixtures::scenario_filters(), TestFixtures::scenario_paths())
        .await
        .unwrap();

    assert!(context.get_filter(&Id::from("v1")).await.unwrap().is_none());
    assert!(context.get_mixer_state(MixerKind::Video).await.is_err());
    assert!(context.get_mixer_state(MixerKind::Audio).await.is_ok());
}

#[tokio::test]
async fn test_receiver_and_transmitter_ids() {
    let context = TestHelpers::av_context().await;

    assert_eq!(context.get_receiver_id().await.unwrap(), Id::from("rx1"));
    assert_eq!(context.get_transmitter_id().await.unwrap(), Id::from("t1"));
}

#[tokio::test]
async fn test_missing_receiver_is_not_found_receiver() {
    let context = TestHelpers::scenario_context().await;

    let err = context.get_receiver_id().await.unwrap_err();

    assert!(err.is_not_found(EntityKind::Receiver));
}

#[tokio::test]
async fn test_output_path_for_primary_writer() {
    let context = TestHelpers::av_context().await;

    let path = context
        .get_output_path_from_filter(&Id::from("v1"), WriterSelector::PRIMARY)
        .await
        .unwrap()
        .expect("video mixer has an output path");

    assert_eq!(path.origin_filter, Id::from("v1"));
    assert_eq!(path.filters, vec![Id::from("e2"), Id::from("t1")]);
    assert_eq!(path.destination_reader, Some(Id::from("r2")));

    let none = context
        .get_output_path_from_filter(&Id::from("e1"), WriterSelector::PRIMARY)
        .await
        .unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn test_output_path_for_other_writers_is_not_implemented() {
    let context = TestHelpers::av_context().await;

    let err = context
        .get_output_path_from_filter(&Id::from("v1"), WriterSelector(1))
        .await
        .unwrap_err();

    assert!(matches!(err, AggregatorError::NotImplemented { .. }), "got {err}");
}
