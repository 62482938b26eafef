//! Turning a URL or search query into playable tracks.
//!
//! Resolution runs outside the scheduler; its outcome is handed over as a
//! [`LoadResult`].

/// Submodule defining the `TrackMetadata` struct used across audio sources.
pub(crate) mod track_metadata;
/// Submodule implementing [`TrackResolver`] on top of `yt-dlp`.
pub(crate) mod youtube;

use async_trait::async_trait;
use url::Url;

use crate::commands::music::utils::player::AudioTrack;

pub use track_metadata::TrackMetadata;
pub use youtube::YtDlpResolver;

/// Prefix understood by `yt-dlp` for "first YouTube search hit".
pub const SEARCH_PREFIX: &str = "ytsearch1:";

/// A resolved playlist, in play order.
#[derive(Debug)]
pub struct LoadedPlaylist {
    pub name: String,
    pub tracks: Vec<AudioTrack>,
    /// Search results come back as a playlist; only the first one is wanted.
    pub is_search_result: bool,
}

/// Outcome of resolving one identifier.
#[derive(Debug)]
pub enum LoadResult {
    TrackLoaded(AudioTrack),
    PlaylistLoaded(LoadedPlaylist),
    NoMatches,
    LoadFailed(String),
}

/// Resolves URLs and search queries into tracks.
#[async_trait]
pub trait TrackResolver: Send + Sync {
    /// Resolve `identifier`, a URL or a `ytsearch1:`-prefixed query.
    async fn load(&self, identifier: &str, requested_by: &str) -> LoadResult;
}

/// A utility struct providing general helper functions related to audio sources.
pub struct AudioSource;

impl AudioSource {
    /// Performs a basic check if the input string can be parsed as a URL.
    pub fn is_url(input: &str) -> bool {
        Url::parse(input).is_ok()
    }

    /// Identifier to resolve for user input: URLs as they are, anything else
    /// as a search.
    pub fn identifier_for(input: &str) -> String {
        let input = input.trim();
        if Self::is_url(input) {
            input.to_string()
        } else {
            Self::search_identifier(input)
        }
    }

    pub fn search_identifier(query: &str) -> String {
        format!("{}{}", SEARCH_PREFIX, query.trim())
    }

    pub fn is_search(identifier: &str) -> bool {
        identifier.starts_with("ytsearch")
    }
}
