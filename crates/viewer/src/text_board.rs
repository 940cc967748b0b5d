//! Terminal rendering for the replay binary.

use std::io::Write;

use chess_core::Position;

use crate::controls::{ControlAvailability, Navigation};
use crate::effects::DisplayElement;
use crate::view::{BoardView, DisplayPanel};

/// Render a FEN placement as an 8x8 grid, rank 8 at the top.
pub fn render(position: &Position) -> String {
    let mut out = String::new();
    for (i, row) in position.placement().split('/').enumerate() {
        out.push_str(&format!("{} ", 8 - i));
        for c in row.chars() {
            match c.to_digit(10) {
                Some(empty) => (0..empty).for_each(|_| out.push_str(" .")),
                None => {
                    out.push(' ');
                    out.push(c);
                }
            }
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out
}

/// Board drawn as text into any writer.
pub struct TextBoard<W: Write> {
    out: W,
    last: Option<Position>,
}

impl<W: Write> TextBoard<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    fn draw(&mut self) {
        let Some(position) = &self.last else { return };
        let text = render(position);
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to draw board: {}", e);
        }
    }
}

impl<W: Write> BoardView for TextBoard<W> {
    fn set_position(&mut self, position: &Position) {
        self.last = Some(position.clone());
        self.draw();
    }

    fn resize(&mut self) {
        self.draw();
    }
}

/// Toolbar and scoreboard printed as lines of text.
pub struct TextPanel<W: Write> {
    out: W,
}

impl<W: Write> TextPanel<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!("Failed to write panel: {}", e);
        }
    }
}

impl<W: Write> DisplayPanel for TextPanel<W> {
    fn set_controls(&mut self, controls: ControlAvailability) {
        let toolbar: Vec<String> = Navigation::ALL
            .iter()
            .map(|nav| {
                if controls.allows(*nav) {
                    format!("[{nav}]")
                } else {
                    format!(" {nav} ")
                }
            })
            .collect();
        self.line(&toolbar.join(" "));
    }

    fn set_text(&mut self, _element: DisplayElement, text: &str) {
        self.line(text);
    }
}
