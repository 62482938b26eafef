use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use ducktales::commands::music::utils::output_sink::{MSG_POSTFIX, MSG_PREFIX};
use ducktales::commands::music::utils::player::{EndReason, PlayerEvent};
use ducktales::commands::music::utils::track_scheduler::TrackScheduler;

use crate::common::Harness;
use crate::common::fixtures::track;
use crate::common::mocks::{FakePlayer, RecordingSink};

fn unwrap_chunk(chunk: &str) -> &str {
    chunk
        .strip_prefix(MSG_PREFIX)
        .and_then(|chunk| chunk.strip_suffix(MSG_POSTFIX))
        .expect("chunk is not wrapped")
}

#[tokio::test]
async fn test_long_listing_is_sent_in_three_chunks() {
    let h = Harness::new(1000).await;
    h.scheduler.enqueue(track("Now")).await;
    for i in 0..18 {
        h.scheduler
            .enqueue(track(&format!("{:02}{}", i, "x".repeat(121))))
            .await;
    }
    h.sink.take();

    let listing = h.scheduler.list_upcoming(18).await;
    assert_eq!(listing.chars().count(), 2400);

    h.scheduler.show_queue(18).await;

    let sent = h.sink.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|chunk| chunk.chars().count() <= 1000 + 6));
    let joined: String = sent.iter().map(|chunk| unwrap_chunk(chunk)).collect();
    assert_eq!(joined, listing);
}

#[tokio::test]
async fn test_listing_shows_progress_and_bounded_queue() {
    let h = Harness::new(1000).await;
    h.scheduler.enqueue(track("Now")).await;
    h.scheduler.enqueue(track("Next")).await;
    h.scheduler.enqueue(track("Later")).await;
    h.player.set_position(Duration::from_secs(75));

    assert_eq!(
        h.scheduler.list_upcoming(1).await,
        "Currently running Queue:\nNow [1:15 / 2:00]\nNext [2:00]"
    );
}

#[tokio::test]
async fn test_listing_with_nothing_playing() {
    let h = Harness::new(1000).await;

    assert_eq!(h.scheduler.list_upcoming(10).await, "Currently running Queue:\n");
}

#[tokio::test]
async fn test_lifecycle_notifications() {
    let h = Harness::new(1000).await;
    h.scheduler.enqueue(track("A")).await;
    h.scheduler.enqueue(track("B")).await;
    h.deliver_events().await;
    h.scheduler.pause().await;
    h.scheduler.resume().await;
    h.deliver_events().await;
    h.deliver(PlayerEvent::TrackStuck {
        track: track("A"),
        threshold: Duration::from_secs(10),
    })
    .await;

    assert_eq!(
        h.sink.sent(),
        vec![
            "```Queued new AudioTrack: B [2:00]```",
            "```Started next Track: A [2:00]```",
            "```Paused Audioplayer```",
            "```Resumed Audioplayer```",
            "```Track got stuck: A ThresholdMS: 10000 Starting next Track```",
            "```Started next Track: B [2:00]```",
        ]
    );
}

#[tokio::test]
async fn test_guarded_commands_notify_instead_of_failing() {
    let h = Harness::new(1000).await;

    assert!(!h.scheduler.stop().await);
    assert!(!h.scheduler.loop_on().await);
    h.scheduler.loop_off().await;

    assert_eq!(
        h.sink.sent(),
        vec![
            "```Nothing is playing right now```",
            "```Nothing is playing right now```",
            "```No Track is being looped```",
        ]
    );
    assert_eq!(h.player.stop_calls(), 0);
}

#[tokio::test]
async fn test_event_loop_applies_player_events() {
    crate::test_utils::init();
    let player = Arc::new(FakePlayer::default());
    let sink = Arc::new(RecordingSink::default());
    let scheduler = Arc::new(TrackScheduler::new(player.clone(), 1000));
    scheduler.set_output(sink.clone()).await;

    scheduler.enqueue(track("A")).await;
    scheduler.enqueue(track("B")).await;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let event_loop = scheduler.clone().spawn_event_loop(events_rx);

    for event in player.take_events() {
        events_tx.send(event).unwrap();
    }
    events_tx
        .send(player.end_current(EndReason::Finished).unwrap())
        .unwrap();
    drop(events_tx);

    event_loop.await.unwrap();

    assert_eq!(player.current_title().as_deref(), Some("B"));
    assert_eq!(scheduler.last_track_title().await.as_deref(), Some("A"));
    assert!(sink.sent().contains(&"```Started next Track: A [2:00]```".to_string()));
}
