//! The viewer's event loop.
//!
//! One task owns the controller and the view and drains a single inbound
//! channel. Handlers run to completion one at a time, in arrival order, so
//! position and controls are never observed half-updated.

use chess_core::{LiveEvent, MoveEngine};
use tokio::sync::mpsc;

use crate::controls::Navigation;
use crate::error::ViewerError;
use crate::live::LiveSyncClient;
use crate::replay::ReplayController;
use crate::view::{BoardView, DisplayPanel, ViewAdapter};

/// Inputs to a live session.
#[derive(Debug, Clone)]
pub enum LiveInput {
    /// Raw text frame off the transport.
    Frame(String),
    /// Already-decoded event.
    Event(LiveEvent),
    Resize,
}

/// Inputs to a replay session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayInput {
    Navigate(Navigation),
    Resize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub handled: u64,
    pub skipped: u64,
}

pub fn decode_frame(frame: &str) -> Result<LiveEvent, ViewerError> {
    Ok(LiveEvent::from_frame(frame)?)
}

/// Mirror the live feed until the channel closes.
pub async fn run_live<B, D>(
    mut rx: mpsc::Receiver<LiveInput>,
    client: &mut LiveSyncClient,
    view: &mut ViewAdapter<B, D>,
) -> SessionStats
where
    B: BoardView,
    D: DisplayPanel,
{
    let mut stats = SessionStats::default();

    while let Some(input) = rx.recv().await {
        let event = match input {
            LiveInput::Resize => {
                view.resize();
                continue;
            }
            LiveInput::Event(event) => event,
            LiveInput::Frame(text) => match decode_frame(&text) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Skipping live frame: {}", e);
                    stats.skipped += 1;
                    continue;
                }
            },
        };
        let effects = client.handle(event);
        view.apply(&effects);
        stats.handled += 1;
    }

    tracing::info!(
        "Live feed closed after {} events ({} skipped)",
        stats.handled,
        stats.skipped
    );
    stats
}

/// Drive a replay from toolbar commands until the channel closes.
///
/// Commands the current state does not allow are logged and ignored.
pub async fn run_replay<E, B, D>(
    mut rx: mpsc::Receiver<ReplayInput>,
    controller: &mut ReplayController<E>,
    view: &mut ViewAdapter<B, D>,
) -> SessionStats
where
    E: MoveEngine,
    B: BoardView,
    D: DisplayPanel,
{
    let mut stats = SessionStats::default();
    view.apply(&controller.frame().effects());

    while let Some(input) = rx.recv().await {
        let nav = match input {
            ReplayInput::Resize => {
                view.resize();
                continue;
            }
            ReplayInput::Navigate(nav) => nav,
        };
        match controller.dispatch(nav) {
            Ok(Some(frame)) => {
                view.apply(&frame.effects());
                stats.handled += 1;
            }
            Ok(None) => stats.handled += 1,
            Err(e) => {
                tracing::warn!("Ignoring {} command: {}", nav, e);
                stats.skipped += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use chess_core::{GameId, LiveGameSummary, MoveRecord, Position, ShakmatyEngine};

    use super::*;
    use crate::controls::ControlAvailability;
    use crate::effects::DisplayElement;
    use crate::view::HeadlessView;

    fn adapter() -> ViewAdapter<HeadlessView, HeadlessView> {
        ViewAdapter::new(HeadlessView::default(), HeadlessView::default())
    }

    #[tokio::test]
    async fn test_live_session_applies_in_arrival_order() {
        let (tx, rx) = mpsc::channel(8);
        let first = LiveEvent::Connected(LiveGameSummary {
            game_id: Some(GameId::Number(3)),
            fen: Some(Position::initial()),
            in_progress: Some(true),
            ..Default::default()
        });
        tx.send(LiveInput::Event(first)).await.unwrap();
        tx.send(LiveInput::Frame("not json".into())).await.unwrap();
        tx.send(LiveInput::Frame(
            r#"{"event":"move","data":{"game_id":3,"fen":"8/8/8/8/8/8/8/K6k w - - 0 1","n_games":2}}"#
                .into(),
        ))
        .await
        .unwrap();
        tx.send(LiveInput::Resize).await.unwrap();
        drop(tx);

        let mut client = LiveSyncClient::new();
        let mut view = adapter();
        let stats = run_live(rx, &mut client, &mut view).await;

        assert_eq!(stats, SessionStats { handled: 2, skipped: 1 });
        assert_eq!(
            view.board().position,
            Some(Position::from_fen("8/8/8/8/8/8/8/K6k w - - 0 1"))
        );
        assert_eq!(view.board().resizes, 1);
        assert_eq!(view.panel().text(DisplayElement::Games), Some("Games: 2"));
        assert_eq!(client.summary().and_then(|s| s.n_games), Some(2));
    }

    #[tokio::test]
    async fn test_mistyped_counter_still_repaints_board() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(LiveInput::Frame(
            r#"{"event":"move","data":{"fen":"8/8/8/8/8/8/8/K6k w - - 0 1","n_games":"10","n_draws":1}}"#
                .into(),
        ))
        .await
        .unwrap();
        tx.send(LiveInput::Frame(r#"{"event":"game_over","data":null}"#.into()))
            .await
            .unwrap();
        drop(tx);

        let mut client = LiveSyncClient::new();
        let mut view = adapter();
        let stats = run_live(rx, &mut client, &mut view).await;

        assert_eq!(stats, SessionStats { handled: 2, skipped: 0 });
        assert_eq!(
            view.board().position,
            Some(Position::from_fen("8/8/8/8/8/8/8/K6k w - - 0 1"))
        );
        assert_eq!(view.panel().text(DisplayElement::Games), Some("Games: -"));
        assert_eq!(client.events_seen(), 2);
    }

    #[tokio::test]
    async fn test_replay_session_skips_disabled_commands() {
        let (tx, rx) = mpsc::channel(8);
        for input in [
            ReplayInput::Navigate(Navigation::Prev),
            ReplayInput::Navigate(Navigation::Next),
            ReplayInput::Navigate(Navigation::Next),
            ReplayInput::Navigate(Navigation::Next),
            ReplayInput::Resize,
        ] {
            tx.send(input).await.unwrap();
        }
        drop(tx);

        let mut controller = ReplayController::new(ShakmatyEngine::new());
        controller.load_record(MoveRecord::from(&["e4", "e5"][..]));
        let mut view = adapter();
        let stats = run_replay(rx, &mut controller, &mut view).await;

        assert_eq!(stats, SessionStats { handled: 2, skipped: 2 });
        assert_eq!(controller.index(), 2);
        assert_eq!(view.board().position.as_ref(), Some(controller.position()));
        assert_eq!(view.panel().controls, ControlAvailability::at(2, 2));
        assert_eq!(view.board().resizes, 1);
    }
}
