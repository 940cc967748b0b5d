//! Mirroring the server's live game.
//!
//! The server is the source of truth. Each inbound event replaces the held
//! summary wholesale and is turned into view effects; nothing is merged,
//! buffered or re-requested.

use std::fmt::Display;

use chess_core::{LiveEvent, LiveGameSummary};

use crate::effects::{DisplayElement, ViewEffect};

/// Shown in place of a field the payload did not carry.
pub const MISSING: &str = "-";

#[derive(Debug, Default)]
pub struct LiveSyncClient {
    summary: Option<LiveGameSummary>,
    events_seen: u64,
}

impl LiveSyncClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take `event` as the new truth and return what the view must show.
    pub fn handle(&mut self, event: LiveEvent) -> Vec<ViewEffect> {
        let effects = reconcile(&event);
        self.events_seen += 1;
        tracing::debug!(
            "Live event #{} ({}) -> {} effects",
            self.events_seen,
            event.name(),
            effects.len()
        );
        self.summary = Some(event.into_summary());
        effects
    }

    /// Most recently received summary.
    pub fn summary(&self) -> Option<&LiveGameSummary> {
        self.summary.as_ref()
    }

    pub fn events_seen(&self) -> u64 {
        self.events_seen
    }
}

/// Map one event to view effects. The board is only repainted when the
/// payload carries a position.
pub fn reconcile(event: &LiveEvent) -> Vec<ViewEffect> {
    let summary = event.summary();
    let mut effects = Vec::with_capacity(9);

    if let Some(fen) = &summary.fen {
        effects.push(ViewEffect::SetPosition(fen.clone()));
    }
    effects.push(ViewEffect::SetText(DisplayElement::Header, header_text(event)));

    let lines = [
        (DisplayElement::Games, "Games", field(&summary.n_games)),
        (DisplayElement::WhiteWins, "White wins", field(&summary.n_white_wins)),
        (DisplayElement::BlackWins, "Black wins", field(&summary.n_black_wins)),
        (DisplayElement::Draws, "Draws", field(&summary.n_draws)),
        (DisplayElement::Moves, "Moves", field(&summary.move_count)),
        (DisplayElement::GameMoves, "Moves", field(&summary.game_move_count)),
        (DisplayElement::Turn, "Turn", field(&summary.turn)),
    ];
    for (element, label, value) in lines {
        effects.push(ViewEffect::SetText(element, format!("{label}: {value}")));
    }
    effects
}

/// `Game #<id> In Progress` or `Game #<id> Complete`.
pub fn header_text(event: &LiveEvent) -> String {
    let summary = event.summary();
    let in_progress = match event {
        LiveEvent::Connected(s) => s.is_in_progress(),
        LiveEvent::MoveApplied(_) => true,
        LiveEvent::GameFinished(_) => false,
    };
    let status = if in_progress { "In Progress" } else { "Complete" };
    format!("Game #{} {}", field(&summary.game_id), status)
}

fn field<T: Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    }
}
