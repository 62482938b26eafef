//! Mock implementations for external dependencies
//! This module contains mock objects used for testing

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use ducktales::commands::music::utils::output_sink::OutputSink;
use ducktales::commands::music::utils::player::{
    AudioTrack, EndReason, Player, PlayerEvent, PlayingTrack, StartOutcome, TrackId,
};

#[derive(Default)]
struct FakeState {
    current: Option<AudioTrack>,
    paused: bool,
    position: Duration,
    pending: Vec<PlayerEvent>,
    started: Vec<(TrackId, String)>,
    start_calls: Vec<(Option<String>, bool)>,
    stop_calls: usize,
}

/// A player that behaves like the real one, without audio. Events are kept
/// until a test delivers them.
#[derive(Default)]
pub struct FakePlayer {
    state: Mutex<FakeState>,
}

impl FakePlayer {
    pub fn take_events(&self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.state.lock().unwrap().pending)
    }

    /// End the current track with `reason` as the player would report it.
    pub fn end_current(&self, reason: EndReason) -> Option<PlayerEvent> {
        let track = self.state.lock().unwrap().current.take()?;
        Some(PlayerEvent::TrackEnd { track, reason })
    }

    pub fn set_position(&self, position: Duration) {
        self.state.lock().unwrap().position = position;
    }

    pub fn current_title(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .current
            .as_ref()
            .map(|track| track.title().to_string())
    }

    pub fn current_id(&self) -> Option<TrackId> {
        self.state.lock().unwrap().current.as_ref().map(AudioTrack::id)
    }

    /// Identity and title of every track that actually started, in order.
    pub fn started(&self) -> Vec<(TrackId, String)> {
        self.state.lock().unwrap().started.clone()
    }

    pub fn started_titles(&self) -> Vec<String> {
        self.started().into_iter().map(|(_, title)| title).collect()
    }

    /// Every `start_track` call as (title or `None`, no_interrupt).
    pub fn start_calls(&self) -> Vec<(Option<String>, bool)> {
        self.state.lock().unwrap().start_calls.clone()
    }

    pub fn stop_calls(&self) -> usize {
        self.state.lock().unwrap().stop_calls
    }
}

#[async_trait]
impl Player for FakePlayer {
    async fn start_track(&self, track: Option<AudioTrack>, no_interrupt: bool) -> StartOutcome {
        let mut state = self.state.lock().unwrap();
        state
            .start_calls
            .push((track.as_ref().map(|t| t.title().to_string()), no_interrupt));

        let Some(track) = track else {
            if let Some(previous) = state.current.take() {
                state.pending.push(PlayerEvent::TrackEnd {
                    track: previous,
                    reason: EndReason::Stopped,
                });
            }
            return StartOutcome::Stopped;
        };

        if no_interrupt && state.current.is_some() {
            return StartOutcome::Busy(track);
        }

        if let Some(previous) = state.current.take() {
            state.pending.push(PlayerEvent::TrackEnd {
                track: previous,
                reason: EndReason::Replaced,
            });
        }

        state.started.push((track.id(), track.title().to_string()));
        state.pending.push(PlayerEvent::TrackStart(track.make_clone()));
        state.position = Duration::ZERO;
        state.current = Some(track);

        StartOutcome::Started
    }

    async fn stop_track(&self) {
        let mut state = self.state.lock().unwrap();
        state.stop_calls += 1;
        if let Some(track) = state.current.take() {
            state.pending.push(PlayerEvent::TrackEnd {
                track,
                reason: EndReason::Stopped,
            });
        }
    }

    async fn set_paused(&self, paused: bool) {
        let mut state = self.state.lock().unwrap();
        if state.paused != paused {
            state.paused = paused;
            state.pending.push(if paused {
                PlayerEvent::PlayerPause
            } else {
                PlayerEvent::PlayerResume
            });
        }
    }

    async fn is_paused(&self) -> bool {
        self.state.lock().unwrap().paused
    }

    async fn playing_track(&self) -> Option<PlayingTrack> {
        let state = self.state.lock().unwrap();
        state.current.as_ref().map(|track| PlayingTrack {
            track: track.make_clone(),
            position: state.position,
        })
    }
}

/// Collects everything the scheduler sends.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut self.sent.lock().unwrap())
    }
}

impl OutputSink for RecordingSink {
    fn send(&self, text: String) {
        self.sent.lock().unwrap().push(text);
    }
}
