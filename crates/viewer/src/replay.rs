//! Stepping through a finished game.
//!
//! The controller owns the move record and an index into it. Each operation
//! that moves the index hands back a [`ReplayFrame`] carrying both the new
//! position and the matching [`ControlAvailability`], so a caller repaints the
//! board and toggles the toolbar in one go.

use chess_core::{MoveEngine, MoveRecord, Position};

use crate::controls::{ControlAvailability, Navigation};
use crate::effects::ViewEffect;
use crate::error::ViewerError;

/// What the view should show after a navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFrame {
    pub index: usize,
    pub position: Position,
    pub controls: ControlAvailability,
}

impl ReplayFrame {
    pub fn effects(&self) -> Vec<ViewEffect> {
        vec![
            ViewEffect::SetPosition(self.position.clone()),
            ViewEffect::SetControls(self.controls),
        ]
    }
}

pub struct ReplayController<E> {
    engine: E,
    record: MoveRecord,
    index: usize,
    position: Position,
    // Plies currently applied inside the engine. Differs from `index` only
    // right after go_to_end.
    engine_ply: usize,
}

impl<E: MoveEngine> ReplayController<E> {
    pub fn new(mut engine: E) -> Self {
        engine.reset();
        Self {
            engine,
            record: MoveRecord::default(),
            index: 0,
            position: Position::initial(),
            engine_ply: 0,
        }
    }

    /// Start a replay session on `record`, positioned before the first move.
    /// An empty record leaves nothing to step through.
    pub fn load_record(&mut self, record: MoveRecord) -> ReplayFrame {
        if record.is_empty() {
            tracing::debug!("Loaded empty move record; navigation disabled");
        } else {
            tracing::debug!("Loaded move record with {} plies", record.len());
        }
        self.engine.reset();
        self.record = record;
        self.index = 0;
        self.engine_ply = 0;
        self.position = Position::initial();
        self.frame()
    }

    /// Read the mainline out of PGN text and load it.
    pub fn load_pgn(&mut self, pgn: &str) -> Result<ReplayFrame, ViewerError> {
        self.engine.load_pgn(pgn)?;
        let record = self.engine.history();
        Ok(self.load_record(record))
    }

    /// Back to the initial position. No-op at index 0.
    pub fn go_to_start(&mut self) -> Option<ReplayFrame> {
        if self.index == 0 {
            return None;
        }
        self.engine.reset();
        self.engine_ply = 0;
        self.index = 0;
        self.position = Position::initial();
        Some(self.frame())
    }

    /// Take back one ply.
    pub fn step_back(&mut self) -> Result<ReplayFrame, ViewerError> {
        if self.index == 0 {
            return Err(self.unavailable(Navigation::Prev));
        }
        self.sync_engine()?;
        let position = self.engine.undo()?;
        self.engine_ply -= 1;
        self.index -= 1;
        self.position = position;
        Ok(self.frame())
    }

    /// Play the next recorded ply.
    pub fn step_forward(&mut self) -> Result<ReplayFrame, ViewerError> {
        let Some(descriptor) = self.record.get(self.index).map(str::to_string) else {
            return Err(self.unavailable(Navigation::Next));
        };
        self.sync_engine()?;
        let position = self.engine.apply_move(&descriptor)?;
        self.engine_ply += 1;
        self.index += 1;
        self.position = position;
        Ok(self.frame())
    }

    /// Jump to the final position by re-importing the whole record.
    ///
    /// The index lands on `len - 1`, one short of the last ply, while the board
    /// shows the true final position. Next and End therefore stay enabled.
    pub fn go_to_end(&mut self) -> Result<ReplayFrame, ViewerError> {
        let len = self.record.len();
        if self.index >= len {
            return Err(self.unavailable(Navigation::End));
        }
        let loaded = self.engine.load_from_record(&self.record);
        let position = match loaded {
            Ok(position) => position,
            Err(e) => {
                self.engine_ply = 0;
                return Err(e.into());
            }
        };
        self.engine_ply = len;
        self.index = len - 1;
        self.position = position;
        Ok(self.frame())
    }

    /// Run one toolbar command. `Ok(None)` means nothing changed.
    pub fn dispatch(&mut self, nav: Navigation) -> Result<Option<ReplayFrame>, ViewerError> {
        tracing::debug!("Replay {} at ply {}/{}", nav, self.index, self.record.len());
        match nav {
            Navigation::Start => Ok(self.go_to_start()),
            Navigation::Prev => self.step_back().map(Some),
            Navigation::Next => self.step_forward().map(Some),
            Navigation::End => self.go_to_end().map(Some),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    pub fn record(&self) -> &MoveRecord {
        &self.record
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn controls(&self) -> ControlAvailability {
        ControlAvailability::at(self.index, self.record.len())
    }

    pub fn frame(&self) -> ReplayFrame {
        ReplayFrame {
            index: self.index,
            position: self.position.clone(),
            controls: self.controls(),
        }
    }

    /// Bring the engine back in line with `index` before stepping from it.
    fn sync_engine(&mut self) -> Result<(), ViewerError> {
        if self.engine_ply == self.index {
            return Ok(());
        }
        tracing::debug!(
            "Re-syncing move engine from ply {} to ply {}",
            self.engine_ply,
            self.index
        );
        match self.engine.load_from_record(&self.record.prefix(self.index)) {
            Ok(_) => {
                self.engine_ply = self.index;
                Ok(())
            }
            Err(e) => {
                self.engine_ply = 0;
                Err(e.into())
            }
        }
    }

    fn unavailable(&self, nav: Navigation) -> ViewerError {
        ViewerError::NavigationUnavailable {
            nav,
            index: self.index,
            len: self.record.len(),
        }
    }
}
