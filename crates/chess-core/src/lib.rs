//! Shared chess domain types for the eternal chess server and viewer.
//!
//! Board state is always carried as a FEN [`Position`], produced either by a
//! [`engine::MoveEngine`] or received verbatim from the live feed.

pub mod engine;
pub mod game_data;
pub mod live;
pub mod pgn;
pub mod position;

pub use engine::{EngineError, MoveEngine, ShakmatyEngine};
pub use game_data::{GameRecord, MoveRecord};
pub use live::{GameId, LiveEvent, LiveGameSummary};
pub use position::Position;
