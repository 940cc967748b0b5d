//! Move application: the only place positions are produced from moves.

use shakmaty::{san::SanPlus, Chess, Position as _};
use thiserror::Error;

use crate::game_data::MoveRecord;
use crate::pgn;
use crate::position::Position;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid SAN '{descriptor}': {reason}")]
    InvalidSan { descriptor: String, reason: String },

    #[error("Illegal move '{descriptor}' at ply {ply}: {reason}")]
    IllegalMove {
        descriptor: String,
        ply: usize,
        reason: String,
    },

    #[error("No move to undo")]
    NothingToUndo,

    #[error("PGN does not start from the standard position")]
    UnsupportedStart,
}

/// Applies move descriptors to a position and remembers how it got there.
pub trait MoveEngine {
    /// Back to the initial position with an empty history.
    fn reset(&mut self);

    /// Replace the game with `record` replayed from the initial position.
    /// On failure the engine is left at the initial position.
    fn load_from_record(&mut self, record: &MoveRecord) -> Result<Position, EngineError>;

    /// Like [`MoveEngine::load_from_record`], reading the mainline out of PGN text.
    fn load_pgn(&mut self, pgn: &str) -> Result<Position, EngineError>;

    /// Play one SAN move on the current position.
    fn apply_move(&mut self, descriptor: &str) -> Result<Position, EngineError>;

    /// Take back the last ply.
    fn undo(&mut self) -> Result<Position, EngineError>;

    fn current_position(&self) -> Position;

    fn history(&self) -> MoveRecord;
}

/// [`MoveEngine`] backed by shakmaty's legal move generation.
#[derive(Debug, Clone)]
pub struct ShakmatyEngine {
    // positions[0] is the initial position, positions[n] the one after n plies
    positions: Vec<Chess>,
    played: Vec<String>,
}

impl ShakmatyEngine {
    pub fn new() -> Self {
        Self {
            positions: vec![Chess::default()],
            played: Vec::new(),
        }
    }

    /// The live shakmaty board.
    pub fn board(&self) -> &Chess {
        // Never empty: reset() and new() always seed the initial position
        &self.positions[self.positions.len() - 1]
    }

    pub fn ply(&self) -> usize {
        self.played.len()
    }
}

impl Default for ShakmatyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveEngine for ShakmatyEngine {
    fn reset(&mut self) {
        self.positions.truncate(1);
        self.played.clear();
    }

    fn load_from_record(&mut self, record: &MoveRecord) -> Result<Position, EngineError> {
        self.reset();
        for descriptor in record.iter() {
            if let Err(e) = self.apply_move(descriptor) {
                self.reset();
                return Err(e);
            }
        }
        Ok(self.current_position())
    }

    fn load_pgn(&mut self, pgn: &str) -> Result<Position, EngineError> {
        let parsed = pgn::parse_pgn(pgn).ok_or(EngineError::UnsupportedStart)?;
        self.load_from_record(&parsed.moves)
    }

    fn apply_move(&mut self, descriptor: &str) -> Result<Position, EngineError> {
        let descriptor = descriptor.trim();
        let san: SanPlus = descriptor.parse().map_err(|e| EngineError::InvalidSan {
            descriptor: descriptor.to_string(),
            reason: format!("{e}"),
        })?;

        let current = self.board();
        let mv = san.san.to_move(current).map_err(|e| EngineError::IllegalMove {
            descriptor: descriptor.to_string(),
            ply: self.played.len(),
            reason: format!("{e}"),
        })?;

        let mut next = current.clone();
        next.play_unchecked(mv);

        self.positions.push(next);
        self.played.push(san.san.to_string());
        Ok(self.current_position())
    }

    fn undo(&mut self) -> Result<Position, EngineError> {
        if self.played.pop().is_none() {
            return Err(EngineError::NothingToUndo);
        }
        self.positions.pop();
        Ok(self.current_position())
    }

    fn current_position(&self) -> Position {
        Position::of(self.board())
    }

    fn history(&self) -> MoveRecord {
        MoveRecord::new(self.played.clone())
    }
}
