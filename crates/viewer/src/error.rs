use chess_core::EngineError;
use thiserror::Error;

use crate::controls::Navigation;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Cannot go {nav} at ply {index} of {len}")]
    NavigationUnavailable {
        nav: Navigation,
        index: usize,
        len: usize,
    },

    #[error("Move engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}
