//! Mixer summary assembly
//!
//! The aggregator resolves the mixer, its output path, the encoder and the
//! transmitter from the store; everything after that is computed here.

use shared::{Channel, Document, Filter, Id, MixerNode, MixerSummary, SessionSummary, TransmitterNode};

/// One channel per gain record, in gain order
pub fn build_channels(mixer: &MixerNode) -> Vec<Channel> {
    mixer.gains().iter().map(Channel::from).collect()
}

/// Free channel count. Not clamped: a mixer exporting more gains than its
/// capacity yields a negative number.
pub fn free_channels(capacity: usize, used: usize) -> i64 {
    capacity as i64 - used as i64
}

/// First session, in list order, whose readers include `reader`
pub fn match_session(transmitter: &TransmitterNode, reader: Option<&Id>) -> Option<SessionSummary> {
    let reader = reader?;
    transmitter
        .sessions()
        .iter()
        .find(|session| session.accepts(reader))
        .map(SessionSummary::from)
}

/// Assemble the dashboard summary for a resolved mixer
pub fn summarize(
    mixer_filter: &Filter,
    mixer: &MixerNode,
    encoder: Document,
    session: Option<SessionSummary>,
    capacity: usize,
) -> MixerSummary {
    let channels = build_channels(mixer);
    let free_channels = free_channels(capacity, channels.len());

    MixerSummary {
        channels,
        free_channels,
        mixer_id: mixer_filter.id.clone(),
        master_gain: mixer.master_gain.clone(),
        master_delay: mixer.master_delay.clone(),
        encoder,
        session,
    }
}
