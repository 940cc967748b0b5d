use std::fmt;

use serde::{Deserialize, Serialize};
use shakmaty::{fen::Fen, Chess, EnPassantMode};

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Full board state encoded as FEN (piece placement + side to move).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(String);

impl Position {
    /// The documented initial position.
    pub fn initial() -> Self {
        Self(STANDARD_START_FEN.to_string())
    }

    /// Wrap a FEN received from the server. Not validated.
    pub fn from_fen(fen: impl Into<String>) -> Self {
        Self(fen.into())
    }

    pub fn of(pos: &Chess) -> Self {
        Self(Fen::from_position(pos, EnPassantMode::Legal).to_string())
    }

    pub fn as_fen(&self) -> &str {
        &self.0
    }

    /// Piece placement field only.
    pub fn placement(&self) -> &str {
        self.0.split(' ').next().unwrap_or_default()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_matches_default_board() {
        assert_eq!(Position::of(&Chess::default()), Position::initial());
        assert_eq!(Position::initial().as_fen(), STANDARD_START_FEN);
    }

    #[test]
    fn test_placement() {
        assert_eq!(
            Position::initial().placement(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Position::initial()).unwrap();
        assert_eq!(json, format!("\"{STANDARD_START_FEN}\""));
    }
}
