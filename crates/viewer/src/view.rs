//! Rendering collaborators and the adapter that feeds them.

use std::collections::HashMap;

use chess_core::Position;

use crate::controls::ControlAvailability;
use crate::effects::{DisplayElement, ViewEffect};

/// Draws a board. Accepts a position and repaints.
pub trait BoardView {
    fn set_position(&mut self, position: &Position);

    /// Viewport changed size.
    fn resize(&mut self);
}

/// Navigation controls plus the scoreboard text elements.
pub trait DisplayPanel {
    fn set_controls(&mut self, controls: ControlAvailability);

    fn set_text(&mut self, element: DisplayElement, text: &str);
}

/// Applies effect lists to a board and a panel, in order.
pub struct ViewAdapter<B, D> {
    board: B,
    panel: D,
}

impl<B: BoardView, D: DisplayPanel> ViewAdapter<B, D> {
    pub fn new(board: B, panel: D) -> Self {
        Self { board, panel }
    }

    pub fn apply(&mut self, effects: &[ViewEffect]) {
        for effect in effects {
            match effect {
                ViewEffect::SetPosition(position) => self.board.set_position(position),
                ViewEffect::SetControls(controls) => self.panel.set_controls(*controls),
                ViewEffect::SetText(element, text) => self.panel.set_text(*element, text),
            }
        }
    }

    pub fn resize(&mut self) {
        self.board.resize();
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn panel(&self) -> &D {
        &self.panel
    }

    pub fn into_parts(self) -> (B, D) {
        (self.board, self.panel)
    }
}

/// Keeps whatever it was last told. Used where no real widget is attached.
#[derive(Debug, Clone, Default)]
pub struct HeadlessView {
    pub position: Option<Position>,
    pub controls: ControlAvailability,
    pub texts: HashMap<DisplayElement, String>,
    pub repaints: usize,
    pub resizes: usize,
}

impl HeadlessView {
    pub fn text(&self, element: DisplayElement) -> Option<&str> {
        self.texts.get(&element).map(String::as_str)
    }
}

impl BoardView for HeadlessView {
    fn set_position(&mut self, position: &Position) {
        self.position = Some(position.clone());
        self.repaints += 1;
    }

    fn resize(&mut self) {
        self.resizes += 1;
    }
}

impl DisplayPanel for HeadlessView {
    fn set_controls(&mut self, controls: ControlAvailability) {
        self.controls = controls;
    }

    fn set_text(&mut self, element: DisplayElement, text: &str) {
        self.texts.insert(element, text.to_string());
    }
}
