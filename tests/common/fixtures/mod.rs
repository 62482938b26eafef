//! Test fixtures for the Ducktales music bot
//! This module contains sample tracks used in tests

use std::time::Duration;

use ducktales::commands::music::audio_sources::TrackMetadata;
use ducktales::commands::music::utils::player::AudioTrack;

/// Sample requester name
pub const SAMPLE_REQUESTER: &str = "Scrooge";

/// A track with a fixed two minute duration.
pub fn track(title: &str) -> AudioTrack {
    track_with_duration(title, Duration::from_secs(120))
}

pub fn track_with_duration(title: &str, duration: Duration) -> AudioTrack {
    AudioTrack::new(TrackMetadata {
        title: title.to_string(),
        url: Some(format!("https://www.youtube.com/watch?v={}", title.to_lowercase())),
        duration: Some(duration),
        requested_by: Some(SAMPLE_REQUESTER.to_string()),
    })
}

pub fn tracks(titles: &[&str]) -> Vec<AudioTrack> {
    titles.iter().map(|title| track(title)).collect()
}
