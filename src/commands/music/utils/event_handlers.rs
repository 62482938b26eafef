use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use songbird::tracks::{PlayError, PlayMode, ReadyState, TrackHandle};
use songbird::{EventContext, EventHandler};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use super::player::{AudioTrack, EndReason, PlayerEvent};
use super::songbird_player::{CurrentTrack, TrackSlot};

/// How often the stuck watcher samples the track position.
const STUCK_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub(crate) fn publish(events: &UnboundedSender<PlayerEvent>, event: PlayerEvent) {
    if let Err(e) = events.send(event) {
        debug!("Scheduler is gone, dropping player event {:?}", e.0);
    }
}

/// Turns songbird's end and error events into one terminal [`PlayerEvent`].
#[derive(Clone)]
pub struct TrackEndNotifier {
    pub slot: Arc<TrackSlot>,
    pub current: CurrentTrack,
    pub events: UnboundedSender<PlayerEvent>,
}

#[async_trait]
impl EventHandler for TrackEndNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<songbird::Event> {
        if let EventContext::Track(tracks) = ctx {
            if let Some((state, _)) = tracks.first() {
                self.handle_track_end(&state.playing).await;
            }
        }
        None
    }
}

impl TrackEndNotifier {
    async fn handle_track_end(&self, mode: &PlayMode) {
        let recorded = self.slot.recorded_end().await;

        let Some(track) = self.slot.take_track().await else {
            debug!("Track {:?} already reported its end", self.slot.id());
            return;
        };

        {
            let mut current = self.current.lock().await;
            if current
                .as_ref()
                .is_some_and(|active| active.slot().id() == self.slot.id())
            {
                *current = None;
            }
        }

        publish(&self.events, end_event(recorded, mode, track));
    }
}

/// The one terminal event for `track`. A reason the player recorded when it
/// ended the track itself wins over what songbird reports.
pub(crate) fn end_event(
    recorded: Option<EndReason>,
    mode: &PlayMode,
    track: AudioTrack,
) -> PlayerEvent {
    let reason = match (recorded, mode) {
        (Some(reason), _) => reason,
        (None, PlayMode::Errored(PlayError::Create(e))) => {
            warn!("Failed to load {}: {}", track.title(), e);
            EndReason::LoadFailed
        }
        (None, PlayMode::Errored(PlayError::Parse(e))) => {
            warn!("Failed to parse {}: {}", track.title(), e);
            EndReason::LoadFailed
        }
        (None, PlayMode::Errored(e)) => {
            return PlayerEvent::TrackException {
                track,
                error: e.to_string(),
            };
        }
        (None, PlayMode::End) => EndReason::Finished,
        (None, _) => EndReason::Stopped,
    };

    PlayerEvent::TrackEnd { track, reason }
}

/// Announces a track once songbird has it ready to play.
pub struct TrackStartNotifier {
    pub slot: Arc<TrackSlot>,
    pub events: UnboundedSender<PlayerEvent>,
}

#[async_trait]
impl EventHandler for TrackStartNotifier {
    async fn act(&self, _ctx: &EventContext<'_>) -> Option<songbird::Event> {
        if let Some(track) = self.slot.copy_track().await {
            publish(&self.events, PlayerEvent::TrackStart(track));
        }
        None
    }
}

/// Watch a track and report it once if it is playing but its position has
/// not moved for `threshold`.
pub fn spawn_stuck_watcher(
    handle: TrackHandle,
    slot: Arc<TrackSlot>,
    events: UnboundedSender<PlayerEvent>,
    threshold: Duration,
) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STUCK_POLL_INTERVAL);
        let mut last_position = None;
        let mut stalled = Duration::ZERO;

        loop {
            interval.tick().await;

            if slot.is_finished().await {
                break;
            }

            let Ok(state) = handle.get_info().await else {
                break;
            };

            let playing = matches!(state.playing, PlayMode::Play)
                && matches!(state.ready, ReadyState::Playable);

            if playing && last_position == Some(state.position) {
                stalled += STUCK_POLL_INTERVAL;
            } else {
                stalled = Duration::ZERO;
            }
            last_position = Some(state.position);

            if stalled >= threshold {
                if let Some(track) = slot.copy_track().await {
                    info!("Track {} is stuck at {:?}", track.title(), state.position);
                    publish(&events, PlayerEvent::TrackStuck { track, threshold });
                }
                break;
            }
        }

        debug!("Stuck watcher for {:?} finished", slot.id());
    });
}
