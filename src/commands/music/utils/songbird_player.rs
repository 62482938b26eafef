//! [`Player`] implementation on top of a songbird voice call.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use songbird::input::YoutubeDl;
use songbird::tracks::TrackHandle;
use songbird::{Call, Event, TrackEvent};
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use super::event_handlers::{self, TrackEndNotifier, TrackStartNotifier};
use super::player::{AudioTrack, EndReason, Player, PlayerEvent, PlayingTrack, StartOutcome, TrackId};

/// Shared between the player and the songbird handlers of one track.
pub struct TrackSlot {
    id: TrackId,
    track: Mutex<Option<AudioTrack>>,
    end_reason: Mutex<Option<EndReason>>,
}

impl TrackSlot {
    fn new(track: AudioTrack) -> Self {
        Self {
            id: track.id(),
            track: Mutex::new(Some(track)),
            end_reason: Mutex::new(None),
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    /// Hand out the track for its terminal event. Only the first caller gets it.
    pub async fn take_track(&self) -> Option<AudioTrack> {
        self.track.lock().await.take()
    }

    /// A copy of the track while it has not ended yet.
    pub async fn copy_track(&self) -> Option<AudioTrack> {
        self.track.lock().await.as_ref().map(AudioTrack::make_clone)
    }

    pub async fn is_finished(&self) -> bool {
        self.track.lock().await.is_none()
    }

    /// The reason the player ended this track with, if it did.
    pub async fn recorded_end(&self) -> Option<EndReason> {
        *self.end_reason.lock().await
    }

    async fn record_end(&self, reason: EndReason) {
        *self.end_reason.lock().await = Some(reason);
    }
}

/// The track songbird is currently playing for us.
pub struct ActiveTrack {
    handle: TrackHandle,
    slot: Arc<TrackSlot>,
}

impl ActiveTrack {
    pub fn slot(&self) -> &Arc<TrackSlot> {
        &self.slot
    }
}

pub type CurrentTrack = Arc<Mutex<Option<ActiveTrack>>>;

pub struct SongbirdPlayer {
    call: Arc<Mutex<Call>>,
    http_client: reqwest::Client,
    events: UnboundedSender<PlayerEvent>,
    current: CurrentTrack,
    paused: AtomicBool,
    stuck_threshold: Duration,
}

impl SongbirdPlayer {
    pub fn new(
        call: Arc<Mutex<Call>>,
        http_client: reqwest::Client,
        events: UnboundedSender<PlayerEvent>,
        stuck_threshold: Duration,
    ) -> Self {
        Self {
            call,
            http_client,
            events,
            current: Arc::new(Mutex::new(None)),
            paused: AtomicBool::new(false),
            stuck_threshold,
        }
    }

    fn publish(&self, event: PlayerEvent) {
        event_handlers::publish(&self.events, event);
    }

    /// Stop `active` and make sure it reports exactly one end event.
    async fn end_active(&self, active: ActiveTrack, reason: EndReason) {
        active.slot.record_end(reason).await;

        if let Err(e) = active.handle.stop() {
            // Songbird already dropped the track, so no end event will come.
            debug!("Track {:?} was already gone: {}", active.slot.id(), e);
            if let Some(track) = active.slot.take_track().await {
                self.publish(PlayerEvent::TrackEnd { track, reason });
            }
        }
    }

    fn register_handlers(&self, handle: &TrackHandle, slot: &Arc<TrackSlot>) {
        let end_notifier = TrackEndNotifier {
            slot: slot.clone(),
            current: self.current.clone(),
            events: self.events.clone(),
        };
        let start_notifier = TrackStartNotifier {
            slot: slot.clone(),
            events: self.events.clone(),
        };

        let registrations = [
            handle.add_event(Event::Track(TrackEvent::End), end_notifier.clone()),
            handle.add_event(Event::Track(TrackEvent::Error), end_notifier),
            handle.add_event(Event::Track(TrackEvent::Playable), start_notifier),
        ];

        for result in registrations {
            if let Err(e) = result {
                warn!("Failed to register track event handler: {}", e);
            }
        }

        event_handlers::spawn_stuck_watcher(
            handle.clone(),
            slot.clone(),
            self.events.clone(),
            self.stuck_threshold,
        );
    }
}

#[async_trait]
impl Player for SongbirdPlayer {
    async fn start_track(&self, track: Option<AudioTrack>, no_interrupt: bool) -> StartOutcome {
        let mut current = self.current.lock().await;

        let Some(track) = track else {
            if let Some(active) = current.take() {
                self.end_active(active, EndReason::Stopped).await;
            }
            return StartOutcome::Stopped;
        };

        if no_interrupt && current.is_some() {
            return StartOutcome::Busy(track);
        }

        if let Some(previous) = current.take() {
            self.end_active(previous, EndReason::Replaced).await;
        }

        let Some(url) = track.metadata.url.clone() else {
            warn!("Track {} has no URL, cannot play it", track.title());
            self.publish(PlayerEvent::TrackEnd {
                track,
                reason: EndReason::LoadFailed,
            });
            return StartOutcome::Started;
        };

        info!("Starting playback of {} from {}", track.title(), url);
        let slot = Arc::new(TrackSlot::new(track));
        let input = YoutubeDl::new(self.http_client.clone(), url);
        let handle = self.call.lock().await.play_input(input.into());

        if self.paused.load(Ordering::SeqCst) {
            if let Err(e) = handle.pause() {
                warn!("Failed to start track paused: {}", e);
            }
        }

        self.register_handlers(&handle, &slot);
        *current = Some(ActiveTrack { handle, slot });

        StartOutcome::Started
    }

    async fn stop_track(&self) {
        let active = self.current.lock().await.take();
        if let Some(active) = active {
            self.end_active(active, EndReason::Stopped).await;
        }
    }

    async fn set_paused(&self, paused: bool) {
        if self.paused.swap(paused, Ordering::SeqCst) == paused {
            return;
        }

        if let Some(active) = self.current.lock().await.as_ref() {
            let result = if paused {
                active.handle.pause()
            } else {
                active.handle.play()
            };
            if let Err(e) = result {
                warn!("Failed to change pause state of current track: {}", e);
            }
        }

        self.publish(if paused {
            PlayerEvent::PlayerPause
        } else {
            PlayerEvent::PlayerResume
        });
    }

    async fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    async fn playing_track(&self) -> Option<PlayingTrack> {
        let current = self.current.lock().await;
        let active = current.as_ref()?;
        let track = active.slot.copy_track().await?;
        let position = active
            .handle
            .get_info()
            .await
            .map(|state| state.position)
            .unwrap_or_default();

        Some(PlayingTrack { track, position })
    }
}
