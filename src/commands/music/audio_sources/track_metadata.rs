//! Defines the `TrackMetadata` struct, the part of a track the bot shows to
//! users and needs to start playback, and its conversion from `yt-dlp` JSON.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unified representation of metadata for a playable track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackMetadata {
    /// The title of the track.
    pub title: String,
    /// The URL playback is started from.
    pub url: Option<String>,
    /// The duration of the track, `None` for live streams.
    #[serde(with = "humantime_serde")]
    pub duration: Option<Duration>,
    /// The name of the user who requested the track.
    pub requested_by: Option<String>,
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self {
            title: "Unknown Track".to_string(),
            url: None,
            duration: None,
            requested_by: None,
        }
    }
}

impl TrackMetadata {
    /// Build metadata from one `yt-dlp` info object (a video, or a flat
    /// playlist entry).
    pub fn from_ytdlp_json(value: &serde_json::Value, requested_by: &str) -> Self {
        let title = value["title"]
            .as_str()
            .unwrap_or("Unknown Title")
            .to_string();

        // Flat playlist entries only carry `url`, full extractions `webpage_url`.
        let url = value["webpage_url"]
            .as_str()
            .or_else(|| value["url"].as_str())
            .map(|s| s.to_string());

        let duration = value["duration"]
            .as_f64()
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok());

        TrackMetadata {
            title,
            url,
            duration,
            requested_by: Some(requested_by.to_string()),
        }
    }
}
