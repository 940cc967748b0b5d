use chess_core::Position;

use crate::controls::ControlAvailability;

/// Text elements of the live scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayElement {
    Header,
    Games,
    WhiteWins,
    BlackWins,
    Draws,
    /// Cumulative moves across all games.
    Moves,
    /// Moves in the current game.
    GameMoves,
    Turn,
}

/// One change to apply to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
    SetPosition(Position),
    SetControls(ControlAvailability),
    SetText(DisplayElement, String),
}
