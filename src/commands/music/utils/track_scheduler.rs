//! Owns the pending queue of one voice session and decides what plays next.
//!
//! Control commands and player events both go through the same mutex, so
//! they are applied in a single total order.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::messages;
use super::output_sink::{self, OutputSink};
use super::player::{AudioTrack, EndReason, Player, PlayerEvent, StartOutcome};
use crate::commands::music::audio_sources::{LoadResult, LoadedPlaylist};

/// Mutable scheduling state, only ever touched with the lock held.
#[derive(Default)]
struct SchedulerState {
    queue: VecDeque<AudioTrack>,
    loop_enabled: bool,
    loop_track: Option<AudioTrack>,
    last_track: Option<AudioTrack>,
    output: Option<Arc<dyn OutputSink>>,
}

pub struct TrackScheduler {
    player: Arc<dyn Player>,
    state: Mutex<SchedulerState>,
    chunk_limit: usize,
}

impl TrackScheduler {
    pub fn new(player: Arc<dyn Player>, chunk_limit: usize) -> Self {
        Self {
            player,
            state: Mutex::new(SchedulerState::default()),
            chunk_limit,
        }
    }

    /// Route further notifications to `output`.
    pub async fn set_output(&self, output: Arc<dyn OutputSink>) {
        self.state.lock().await.output = Some(output);
    }

    /// Play `track` right away if the player is idle, queue it otherwise.
    pub async fn enqueue(&self, track: AudioTrack) {
        let mut state = self.state.lock().await;
        self.enqueue_locked(&mut state, track).await;
    }

    async fn enqueue_locked(&self, state: &mut SchedulerState, track: AudioTrack) {
        // Announced by the start event when it plays immediately.
        if let StartOutcome::Busy(track) = self.player.start_track(Some(track), true).await {
            let message = messages::queued_track(&track.metadata);
            debug!("{}", message);
            state.queue.push_back(track);
            self.notify(state, &message);
        }
    }

    /// Queue a whole playlist, starting its first track if the player is idle.
    pub async fn enqueue_playlist(&self, name: &str, tracks: Vec<AudioTrack>) {
        let mut state = self.state.lock().await;

        if tracks.is_empty() {
            self.notify(&state, &messages::empty_playlist(name));
            return;
        }

        debug!("Queueing new Playlist: {}", name);
        let total: Duration = tracks.iter().filter_map(AudioTrack::duration).sum();
        let count = tracks.len();

        let mut tracks = tracks.into_iter();
        if let Some(first) = tracks.next() {
            if let StartOutcome::Busy(first) = self.player.start_track(Some(first), true).await {
                state.queue.push_back(first);
            }
        }
        state.queue.extend(tracks);

        let message = messages::queued_playlist(name, total, count);
        debug!("{}", message);
        self.notify(&state, &message);
    }

    /// Start the next track: a fresh copy of the looped track, else the head
    /// of the queue. With nothing left the player is stopped.
    pub async fn advance(&self) {
        let mut state = self.state.lock().await;
        self.advance_locked(&mut state).await;
    }

    async fn advance_locked(&self, state: &mut SchedulerState) {
        let next = if state.loop_enabled {
            state.loop_track.as_ref().map(AudioTrack::make_clone)
        } else {
            state.queue.pop_front()
        };

        match &next {
            Some(track) => debug!("Starting next AudioTrack: {}", track.title()),
            None => debug!("Nothing left in the Queue. Stopping the Audioplayer"),
        }

        self.player.start_track(next, false).await;
    }

    /// Stop the current track without moving on. Returns false if nothing
    /// was playing.
    pub async fn stop(&self) -> bool {
        let state = self.state.lock().await;

        match self.player.playing_track().await {
            Some(playing) => {
                debug!("Stopping: {}", playing.track.title());
                self.player.stop_track().await;
                true
            }
            None => {
                debug!("Stop requested while nothing is playing");
                self.notify(&state, &messages::nothing_playing());
                false
            }
        }
    }

    pub async fn pause(&self) {
        let _state = self.state.lock().await;
        debug!("Pausing Audioplayer");
        self.player.set_paused(true).await;
    }

    /// Unpause, or start the next track if the player was stopped instead.
    pub async fn resume(&self) {
        let mut state = self.state.lock().await;

        if self.player.is_paused().await {
            debug!("Player was paused. Resuming Audioplayer");
            self.player.set_paused(false).await;
        } else {
            debug!("Audioplayer was stopped. Starting next Track");
            self.advance_locked(&mut state).await;
        }
    }

    /// Drop every queued track. The current one keeps playing.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.queue.clear();

        let message = messages::cleared_queue();
        debug!("{}", message);
        self.notify(&state, &message);
    }

    /// Loop whatever is playing now. Returns false if nothing is.
    pub async fn loop_on(&self) -> bool {
        let mut state = self.state.lock().await;

        let Some(playing) = self.player.playing_track().await else {
            debug!("Loop requested while nothing is playing");
            self.notify(&state, &messages::nothing_playing());
            return false;
        };

        let message = messages::looping(playing.track.title());
        state.loop_track = Some(playing.track);
        state.loop_enabled = true;

        debug!("{}", message);
        self.notify(&state, &message);
        true
    }

    /// Stop looping. The looped track itself is kept but no longer used.
    pub async fn loop_off(&self) {
        let mut state = self.state.lock().await;

        let message = match (&state.loop_track, state.loop_enabled) {
            (Some(track), true) => messages::stopped_looping(track.title()),
            _ => messages::not_looping(),
        };
        state.loop_enabled = false;

        debug!("{}", message);
        self.notify(&state, &message);
    }

    /// Queue a fresh copy of the last finished track, if there is one.
    pub async fn repeat_last(&self) -> bool {
        let mut state = self.state.lock().await;

        let Some(track) = state.last_track.as_ref().map(AudioTrack::make_clone) else {
            debug!("Repeat requested without a finished track");
            return false;
        };

        debug!("Repeating: {}", track.title());
        self.enqueue_locked(&mut state, track).await;
        true
    }

    /// The current track with its progress followed by up to `count` queued
    /// tracks.
    pub async fn list_upcoming(&self, count: usize) -> String {
        let state = self.state.lock().await;
        self.list_upcoming_locked(&state, count).await
    }

    async fn list_upcoming_locked(&self, state: &SchedulerState, count: usize) -> String {
        let playing = self.player.playing_track().await;

        messages::queue_listing(
            playing
                .as_ref()
                .map(|playing| (&playing.track.metadata, playing.position)),
            state.queue.iter().take(count).map(|track| &track.metadata),
        )
    }

    /// Send [`TrackScheduler::list_upcoming`] to the output channel.
    pub async fn show_queue(&self, count: usize) {
        let state = self.state.lock().await;
        let listing = self.list_upcoming_locked(&state, count).await;
        debug!("{}", listing);

        self.notify(&state, &listing);
    }

    pub async fn queue_len(&self) -> usize {
        self.state.lock().await.queue.len()
    }

    pub async fn is_looping(&self) -> bool {
        self.state.lock().await.loop_enabled
    }

    /// Titles of the queued tracks, head first.
    pub async fn queued_titles(&self) -> Vec<String> {
        let state = self.state.lock().await;
        state
            .queue
            .iter()
            .map(|track| track.title().to_string())
            .collect()
    }

    /// Title of the track `repeat_last` would play.
    pub async fn last_track_title(&self) -> Option<String> {
        let state = self.state.lock().await;
        state
            .last_track
            .as_ref()
            .map(|track| track.title().to_string())
    }

    pub async fn track_loaded(&self, track: AudioTrack) {
        self.enqueue(track).await;
    }

    pub async fn playlist_loaded(&self, playlist: LoadedPlaylist) {
        if playlist.is_search_result {
            match playlist.tracks.into_iter().next() {
                Some(first) => self.enqueue(first).await,
                None => self.no_matches().await,
            }
        } else {
            self.enqueue_playlist(&playlist.name, playlist.tracks).await;
        }
    }

    pub async fn no_matches(&self) {
        debug!("No Match found");
        let state = self.state.lock().await;
        self.notify(&state, &messages::no_matches());
    }

    pub async fn load_failed(&self, reason: &str) {
        debug!("Load failed: {}", reason);
        let state = self.state.lock().await;
        self.notify(&state, &messages::load_failed(reason));
    }

    /// Feed the outcome of resolving a URL or search query.
    pub async fn handle_load_result(&self, result: LoadResult) {
        match result {
            LoadResult::TrackLoaded(track) => self.track_loaded(track).await,
            LoadResult::PlaylistLoaded(playlist) => self.playlist_loaded(playlist).await,
            LoadResult::NoMatches => self.no_matches().await,
            LoadResult::LoadFailed(reason) => self.load_failed(&reason).await,
        }
    }

    pub async fn handle_event(&self, event: PlayerEvent) {
        match event {
            PlayerEvent::TrackStart(track) => self.on_track_start(track).await,
            PlayerEvent::TrackEnd { track, reason } => self.on_track_end(track, reason).await,
            PlayerEvent::TrackException { track, error } => {
                self.on_track_exception(track, &error).await
            }
            PlayerEvent::TrackStuck { track, threshold } => {
                self.on_track_stuck(track, threshold).await
            }
            PlayerEvent::PlayerPause => self.on_player_pause().await,
            PlayerEvent::PlayerResume => self.on_player_resume().await,
        }
    }

    pub async fn on_track_start(&self, track: AudioTrack) {
        let state = self.state.lock().await;
        let message = messages::now_playing(&track.metadata);
        debug!("{}", message);
        self.notify(&state, &message);
    }

    pub async fn on_track_end(&self, track: AudioTrack, reason: EndReason) {
        let mut state = self.state.lock().await;

        match reason {
            EndReason::Replaced => debug!("OnTrackEnd: Skipped AudioTrack: {}", track.title()),
            EndReason::Stopped => debug!("OnTrackEnd: The Player was stopped"),
            EndReason::Cleanup => debug!("OnTrackEnd: Audioplayer hasn't been queried for a while"),
            EndReason::Finished | EndReason::LoadFailed => {
                debug!("OnTrackEnd: {} ended with {:?}", track.title(), reason)
            }
        }

        if !reason.may_start_next() {
            return;
        }

        state.last_track = Some(track.make_clone());

        // A command may have started something since this track ended.
        if let Some(playing) = self.player.playing_track().await {
            debug!(
                "Not advancing, {} already started in the meantime",
                playing.track.title()
            );
            return;
        }

        self.advance_locked(&mut state).await;
    }

    pub async fn on_track_exception(&self, track: AudioTrack, error: &str) {
        let mut state = self.state.lock().await;
        let message = messages::track_exception(track.title(), error);
        warn!("{}", message);
        self.advance_locked(&mut state).await;
    }

    pub async fn on_track_stuck(&self, track: AudioTrack, threshold: Duration) {
        let mut state = self.state.lock().await;
        let message = messages::track_stuck(track.title(), threshold);
        warn!("{}", message);
        self.notify(&state, &message);
        self.advance_locked(&mut state).await;
    }

    pub async fn on_player_pause(&self) {
        let state = self.state.lock().await;
        debug!("Paused Audioplayer");
        self.notify(&state, &messages::paused());
    }

    pub async fn on_player_resume(&self) {
        let state = self.state.lock().await;
        debug!("Resumed Audioplayer");
        self.notify(&state, &messages::resumed());
    }

    /// Drain player events into this scheduler until the player goes away.
    pub fn spawn_event_loop(
        self: Arc<Self>,
        mut events: UnboundedReceiver<PlayerEvent>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                self.handle_event(event).await;
            }
            info!("Player event channel closed, scheduler event loop finished");
        })
    }

    fn notify(&self, state: &SchedulerState, text: &str) {
        let Some(output) = &state.output else {
            debug!("No output channel bound, dropping notification");
            return;
        };

        for chunk in output_sink::split_message(text, self.chunk_limit) {
            output.send(output_sink::wrap(chunk));
        }
    }
}
