//! Step through a PGN file in the terminal.
//!
//! Usage: replay <game.pgn>
//! Commands on stdin: start | prev | next | end | resize | quit

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use chess_core::ShakmatyEngine;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use viewer::controls::Navigation;
use viewer::session::{self, ReplayInput};
use viewer::text_board::{TextBoard, TextPanel};
use viewer::{ReplayController, ViewAdapter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: replay <game.pgn>");
    };
    let pgn = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;

    let mut controller = ReplayController::new(ShakmatyEngine::new());
    controller
        .load_pgn(&pgn)
        .with_context(|| format!("loading {path}"))?;
    tracing::info!("Loaded {} plies from {}", controller.len(), path);

    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let input = match line.trim() {
                "quit" | "q" => break,
                "resize" => ReplayInput::Resize,
                other => match Navigation::parse(other) {
                    Some(nav) => ReplayInput::Navigate(nav),
                    None => {
                        eprintln!("commands: start | prev | next | end | resize | quit");
                        continue;
                    }
                },
            };
            if tx.blocking_send(input).is_err() {
                break;
            }
        }
    });

    let mut view = ViewAdapter::new(
        TextBoard::new(std::io::stdout()),
        TextPanel::new(std::io::stdout()),
    );
    let stats = session::run_replay(rx, &mut controller, &mut view).await;
    tracing::info!(
        "Replay ended at ply {} ({} commands, {} ignored)",
        controller.index(),
        stats.handled,
        stats.skipped
    );
    Ok(())
}
