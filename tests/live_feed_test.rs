//! Hub broadcast frames driving a viewer session in-process.

mod common;

use chess_core::LiveEvent;
use tokio::sync::mpsc;
use viewer::session::{self, LiveInput, SessionStats};
use viewer::view::HeadlessView;
use viewer::{DisplayElement, LiveSyncClient, ViewAdapter};

/// Forward `count` hub events to the viewer as encoded text frames.
fn forward_frames(
    mut events: tokio::sync::broadcast::Receiver<LiveEvent>,
    joined: LiveEvent,
    count: usize,
) -> mpsc::Receiver<LiveInput> {
    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(async move {
        let frame = joined.to_frame().unwrap();
        tx.send(LiveInput::Frame(frame)).await.unwrap();
        for _ in 0..count {
            let event = events.recv().await.unwrap();
            tx.send(LiveInput::Frame(event.to_frame().unwrap()))
                .await
                .unwrap();
        }
    });
    rx
}

#[tokio::test]
async fn test_viewer_mirrors_server_moves() {
    let hub = common::seeded_hub(9);
    let (joined, events) = hub.join().await;
    let rx = forward_frames(events, joined, 6);

    for _ in 0..6 {
        hub.tick().await;
    }

    let mut client = LiveSyncClient::new();
    let mut view = ViewAdapter::new(HeadlessView::default(), HeadlessView::default());
    let stats = session::run_live(rx, &mut client, &mut view).await;
    assert_eq!(stats, SessionStats { handled: 7, skipped: 0 });

    let server = hub.snapshot().await;
    assert_eq!(view.board().position, server.fen);
    assert_eq!(view.board().repaints, 7);
    assert_eq!(client.summary(), Some(&server));
    assert_eq!(
        view.panel().text(DisplayElement::Header),
        Some("Game #1 In Progress")
    );
    assert_eq!(view.panel().text(DisplayElement::GameMoves), Some("Moves: 4"));
    assert_eq!(view.panel().text(DisplayElement::Turn), Some("Turn: White"));
}

#[tokio::test]
async fn test_viewer_sees_game_complete() {
    let hub = common::seeded_hub_with_buffer(21, 16_384);
    let mut watcher = hub.subscribe();
    common::finish_game(&hub).await;

    // Collect every frame of the first game, then feed them to a fresh viewer
    let mut frames = Vec::new();
    while let Ok(event) = watcher.try_recv() {
        frames.push(event);
    }
    let last = frames.last().cloned().unwrap();
    assert!(matches!(last, LiveEvent::GameFinished(_)));

    let (tx, rx) = mpsc::channel(frames.len().max(1));
    for event in frames {
        tx.send(LiveInput::Event(event)).await.unwrap();
    }
    drop(tx);

    let mut client = LiveSyncClient::new();
    let mut view = ViewAdapter::new(HeadlessView::default(), HeadlessView::default());
    session::run_live(rx, &mut client, &mut view).await;

    let finished = last.summary();
    assert_eq!(
        view.panel().text(DisplayElement::Header),
        Some("Game #1 Complete")
    );
    assert_eq!(view.panel().text(DisplayElement::Games), Some("Games: 1"));
    assert_eq!(view.board().position, finished.fen);
}
