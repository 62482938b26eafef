use pretty_assertions::assert_eq;

use ducktales::commands::music::audio_sources::{LoadResult, LoadedPlaylist};

use crate::common::Harness;
use crate::common::fixtures::{track, tracks};

#[tokio::test]
async fn test_playlist_starts_first_and_queues_rest() {
    let h = Harness::new(1000).await;

    h.scheduler
        .handle_load_result(LoadResult::PlaylistLoaded(LoadedPlaylist {
            name: "Moon".to_string(),
            tracks: tracks(&["One", "Two", "Three"]),
            is_search_result: false,
        }))
        .await;

    assert_eq!(h.player.current_title().as_deref(), Some("One"));
    assert_eq!(h.scheduler.queued_titles().await, vec!["Two", "Three"]);
    assert_eq!(
        h.sink.sent(),
        vec!["```Queued new Playlist: Moon [6:00] (3 tracks)```"]
    );
}

#[tokio::test]
async fn test_playlist_while_busy_appends_everything() {
    let h = Harness::new(1000).await;
    h.scheduler.enqueue(track("Playing")).await;

    h.scheduler
        .enqueue_playlist("Moon", tracks(&["One", "Two"]))
        .await;

    assert_eq!(h.player.current_title().as_deref(), Some("Playing"));
    assert_eq!(h.scheduler.queued_titles().await, vec!["One", "Two"]);
}

#[tokio::test]
async fn test_search_result_queues_only_first_hit() {
    let h = Harness::new(1000).await;
    h.scheduler.enqueue(track("Playing")).await;

    h.scheduler
        .handle_load_result(LoadResult::PlaylistLoaded(LoadedPlaylist {
            name: "duck tales".to_string(),
            tracks: tracks(&["Best Hit", "Second Hit"]),
            is_search_result: true,
        }))
        .await;

    assert_eq!(h.scheduler.queued_titles().await, vec!["Best Hit"]);
    assert_eq!(
        h.sink.sent(),
        vec!["```Queued new AudioTrack: Best Hit [2:00]```"]
    );
}

#[tokio::test]
async fn test_empty_playlist_is_reported() {
    let h = Harness::new(1000).await;

    h.scheduler.enqueue_playlist("Nothing", Vec::new()).await;

    assert!(h.player.start_calls().is_empty());
    assert_eq!(h.sink.sent(), vec!["```Playlist Nothing has no tracks```"]);
}

#[tokio::test]
async fn test_load_errors_only_notify() {
    let h = Harness::new(1000).await;
    h.scheduler.enqueue(track("Playing")).await;
    h.scheduler.enqueue(track("Next")).await;
    h.sink.take();

    h.scheduler.handle_load_result(LoadResult::NoMatches).await;
    h.scheduler
        .handle_load_result(LoadResult::LoadFailed("Video unavailable".to_string()))
        .await;

    assert_eq!(
        h.sink.sent(),
        vec![
            "```No Match found```",
            "```Load failed: Video unavailable```"
        ]
    );
    assert_eq!(h.scheduler.queued_titles().await, vec!["Next"]);
    assert_eq!(h.player.current_title().as_deref(), Some("Playing"));
}
