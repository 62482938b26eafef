//! Common test utilities, fixtures, and mocks
//! This module contains shared functionality used across different test categories

pub mod fixtures;
pub mod mocks;

use std::sync::Arc;

use ducktales::commands::music::utils::player::PlayerEvent;
use ducktales::commands::music::utils::track_scheduler::TrackScheduler;

use mocks::{FakePlayer, RecordingSink};

/// A scheduler wired to a fake player and a recording output sink.
pub struct Harness {
    pub player: Arc<FakePlayer>,
    pub sink: Arc<RecordingSink>,
    pub scheduler: TrackScheduler,
}

impl Harness {
    pub async fn new(chunk_limit: usize) -> Self {
        crate::test_utils::init();

        let player = Arc::new(FakePlayer::default());
        let sink = Arc::new(RecordingSink::default());
        let scheduler = TrackScheduler::new(player.clone(), chunk_limit);
        scheduler.set_output(sink.clone()).await;

        Self {
            player,
            sink,
            scheduler,
        }
    }

    /// Feed everything the player published so far to the scheduler, the way
    /// the session event loop would.
    pub async fn deliver_events(&self) {
        loop {
            let events = self.player.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.scheduler.handle_event(event).await;
            }
        }
    }

    /// Deliver `event` and everything the scheduler's reaction publishes.
    pub async fn deliver(&self, event: PlayerEvent) {
        self.scheduler.handle_event(event).await;
        self.deliver_events().await;
    }
}
