//! Implements [`TrackResolver`] with the `yt-dlp` command-line tool, which
//! understands YouTube, SoundCloud and most other sites, and runs searches.

use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{AudioSource, LoadResult, LoadedPlaylist, TrackMetadata, TrackResolver};
use crate::commands::music::utils::player::AudioTrack;
use async_trait::async_trait;

/// `yt-dlp` messages meaning "there is nothing behind this identifier".
const NO_MATCH_MARKERS: [&str; 3] = ["Unsupported URL", "is not a valid URL", "Video unavailable"];

pub struct YtDlpResolver {
    program: String,
}

impl YtDlpResolver {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Classify the JSON `yt-dlp -J --flat-playlist` printed for `identifier`.
    pub fn parse_output(identifier: &str, stdout: &str, requested_by: &str) -> LoadResult {
        let info: Value = match serde_json::from_str(stdout) {
            Ok(info) => info,
            Err(e) => return LoadResult::LoadFailed(format!("Failed to parse track metadata: {}", e)),
        };

        if info["_type"].as_str() != Some("playlist") {
            let metadata = TrackMetadata::from_ytdlp_json(&info, requested_by);
            return LoadResult::TrackLoaded(AudioTrack::new(metadata));
        }

        let tracks: Vec<AudioTrack> = info["entries"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry.is_object())
                    .map(|entry| AudioTrack::new(TrackMetadata::from_ytdlp_json(entry, requested_by)))
                    .collect()
            })
            .unwrap_or_default();

        if tracks.is_empty() {
            return LoadResult::NoMatches;
        }

        let name = info["title"].as_str().unwrap_or(identifier).to_string();

        LoadResult::PlaylistLoaded(LoadedPlaylist {
            name,
            tracks,
            is_search_result: AudioSource::is_search(identifier),
        })
    }

    /// Turn the stderr of a failed `yt-dlp` run into a result.
    pub fn classify_failure(stderr: &str) -> LoadResult {
        if NO_MATCH_MARKERS.iter().any(|marker| stderr.contains(marker)) {
            return LoadResult::NoMatches;
        }

        let reason = stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(|line| line.trim_start_matches("ERROR:").trim().to_string())
            .unwrap_or_else(|| "yt-dlp exited without output".to_string());

        LoadResult::LoadFailed(reason)
    }
}

#[async_trait]
impl TrackResolver for YtDlpResolver {
    async fn load(&self, identifier: &str, requested_by: &str) -> LoadResult {
        info!("Resolving audio source: {}", identifier);

        let output = Command::new(&self.program)
            .args(["-J", "--flat-playlist", "--no-warnings", identifier])
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let result = Self::parse_output(identifier, &stdout, requested_by);
                debug!("Resolved {} to {:?}", identifier, result);
                result
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                warn!("yt-dlp failed for {}: {}", identifier, stderr.trim());
                Self::classify_failure(&stderr)
            }
            Err(e) => {
                warn!("Failed to run {}: {}", self.program, e);
                LoadResult::LoadFailed(format!("Failed to run {}: {}", self.program, e))
            }
        }
    }
}
