//! The audio-engine seam the track scheduler drives.
//!
//! A [`Player`] plays at most one [`AudioTrack`] at a time and reports what
//! happens to it as [`PlayerEvent`]s. The scheduler owns everything else.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::commands::music::audio_sources::TrackMetadata;

static NEXT_TRACK_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one playable copy of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId(u64);

impl TrackId {
    fn next() -> Self {
        Self(NEXT_TRACK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A playable item.
///
/// Deliberately not `Clone`: a track handed to the player is consumed, and
/// any path that needs to play the same song again (loop, repeat) has to go
/// through [`AudioTrack::make_clone`] to get an independent copy.
#[derive(Debug, PartialEq)]
pub struct AudioTrack {
    id: TrackId,
    pub metadata: TrackMetadata,
}

impl AudioTrack {
    pub fn new(metadata: TrackMetadata) -> Self {
        Self {
            id: TrackId::next(),
            metadata,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn duration(&self) -> Option<Duration> {
        self.metadata.duration
    }

    /// Fresh copy with the same metadata and a new identity.
    pub fn make_clone(&self) -> Self {
        Self::new(self.metadata.clone())
    }
}

/// The track the player is currently working on, as seen from outside.
#[derive(Debug)]
pub struct PlayingTrack {
    /// An independent copy of the playing track.
    pub track: AudioTrack,
    /// Elapsed playback time.
    pub position: Duration,
}

/// Result of [`Player::start_track`].
#[derive(Debug)]
pub enum StartOutcome {
    /// The track was handed to the player.
    Started,
    /// `no_interrupt` was requested while something else is playing; the
    /// track is handed back untouched.
    Busy(AudioTrack),
    /// No track was given; the player is idle now.
    Stopped,
}

/// Why a track stopped playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Played to the end.
    Finished,
    /// Could not be loaded at all.
    LoadFailed,
    /// Stopped on request.
    Stopped,
    /// Pre-empted by another track.
    Replaced,
    /// Evicted by the player while idle.
    Cleanup,
}

impl EndReason {
    /// Whether the scheduler should move on to the next track.
    pub fn may_start_next(self) -> bool {
        matches!(self, EndReason::Finished | EndReason::LoadFailed)
    }
}

/// Lifecycle notifications published by a [`Player`].
#[derive(Debug)]
pub enum PlayerEvent {
    TrackStart(AudioTrack),
    TrackEnd {
        track: AudioTrack,
        reason: EndReason,
    },
    /// The track failed while playing; no separate end event follows.
    TrackException {
        track: AudioTrack,
        error: String,
    },
    /// The track produced no audio for `threshold`.
    TrackStuck {
        track: AudioTrack,
        threshold: Duration,
    },
    PlayerPause,
    PlayerResume,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Player: Send + Sync {
    /// Start `track`. With `no_interrupt` the call is refused if something is
    /// already playing. Passing `None` stops the player.
    async fn start_track(&self, track: Option<AudioTrack>, no_interrupt: bool) -> StartOutcome;

    async fn stop_track(&self);

    async fn set_paused(&self, paused: bool);

    async fn is_paused(&self) -> bool;

    async fn playing_track(&self) -> Option<PlayingTrack>;
}
