//! Text of every user-visible notification the music commands and the
//! track scheduler produce.

use std::time::Duration;

use super::{format_duration, format_track_duration};
use crate::commands::music::audio_sources::TrackMetadata;

pub fn now_playing(metadata: &TrackMetadata) -> String {
    format!(
        "Started next Track: {} [{}]",
        metadata.title,
        format_track_duration(metadata.duration)
    )
}

pub fn queued_track(metadata: &TrackMetadata) -> String {
    format!(
        "Queued new AudioTrack: {} [{}]",
        metadata.title,
        format_track_duration(metadata.duration)
    )
}

pub fn queued_playlist(name: &str, total: Duration, tracks: usize) -> String {
    format!(
        "Queued new Playlist: {} [{}] ({} tracks)",
        name,
        format_duration(total),
        tracks
    )
}

pub fn empty_playlist(name: &str) -> String {
    format!("Playlist {} has no tracks", name)
}

pub fn cleared_queue() -> String {
    "Cleared Queue".to_string()
}

pub fn looping(title: &str) -> String {
    format!("Looping Track: {}", title)
}

pub fn stopped_looping(title: &str) -> String {
    format!("Stopped looping Track: {}", title)
}

pub fn not_looping() -> String {
    "No Track is being looped".to_string()
}

pub fn nothing_playing() -> String {
    "Nothing is playing right now".to_string()
}

pub fn nothing_to_repeat() -> String {
    "No finished Track to repeat yet".to_string()
}

pub fn paused() -> String {
    "Paused Audioplayer".to_string()
}

pub fn resumed() -> String {
    "Resumed Audioplayer".to_string()
}

pub fn track_stuck(title: &str, threshold: Duration) -> String {
    format!(
        "Track got stuck: {} ThresholdMS: {} Starting next Track",
        title,
        threshold.as_millis()
    )
}

pub fn track_exception(title: &str, error: &str) -> String {
    format!("Playing Track: {} threw an exception: {}", title, error)
}

pub fn no_matches() -> String {
    "No Match found".to_string()
}

pub fn load_failed(reason: &str) -> String {
    format!("Load failed: {}", reason)
}

pub fn not_in_voice_channel() -> String {
    "I am not in a VoiceChannel on this Server".to_string()
}

pub fn user_not_in_voice_channel() -> String {
    "You need to be in a VoiceChannel first".to_string()
}

pub fn joined_voice_channel(channel: &str) -> String {
    format!("Joined VoiceChannel: {}", channel)
}

pub fn left_voice_channel(server: &str) -> String {
    format!("Disconnected from VoiceChannel of Discord-Server: {}", server)
}

pub fn failed_to_join(reason: &str) -> String {
    format!("Failed to join VoiceChannel: {}", reason)
}

/// Render the current track and the head of the queue, one line each.
pub fn queue_listing<'a>(
    current: Option<(&TrackMetadata, Duration)>,
    upcoming: impl IntoIterator<Item = &'a TrackMetadata>,
) -> String {
    let mut output = String::from("Currently running Queue:\n");

    if let Some((metadata, position)) = current {
        output.push_str(&format!(
            "{} [{} / {}]\n",
            metadata.title,
            format_duration(position),
            format_track_duration(metadata.duration)
        ));
    }

    let lines: Vec<String> = upcoming
        .into_iter()
        .map(|metadata| {
            format!(
                "{} [{}]",
                metadata.title,
                format_track_duration(metadata.duration)
            )
        })
        .collect();
    output.push_str(&lines.join("\n"));

    output
}
