//! The eternal game: random legal moves, forever, with running tallies.
//!
//! [`EternalGame`] holds the board, the running tallies and the most recent
//! finished games. [`Hub`] wraps it for
//! the async side and fans every state change out to subscribers as a
//! [`LiveEvent`].

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use chess_core::game_data::{GameMetadata, Winner};
use chess_core::pgn::{self, PGN_DATE_FORMAT};
use chess_core::{EngineError, GameRecord, LiveEvent, LiveGameSummary, MoveEngine, ShakmatyEngine};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{san::San, Chess, Color, EnPassantMode, Position as _};
use tokio::sync::{broadcast, Mutex};

// Automatic draw under the 75-move rule
const HALFMOVE_DRAW_LIMIT: u32 = 150;
// Automatic draw on fivefold repetition
const REPETITION_DRAW_LIMIT: u32 = 5;

pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Decisive(Winner),
    Draw,
}

impl GameOutcome {
    pub fn result_tag(&self) -> &'static str {
        match self {
            GameOutcome::Decisive(Winner::White) => "1-0",
            GameOutcome::Decisive(Winner::Black) => "0-1",
            GameOutcome::Draw => "1/2-1/2",
        }
    }
}

/// Outcome of `board` judged from the position alone.
pub fn outcome(board: &Chess) -> Option<GameOutcome> {
    if board.is_checkmate() {
        let winner = match board.turn() {
            Color::White => Winner::Black,
            Color::Black => Winner::White,
        };
        return Some(GameOutcome::Decisive(winner));
    }
    if board.is_stalemate()
        || board.is_insufficient_material()
        || board.halfmoves() >= HALFMOVE_DRAW_LIMIT
    {
        return Some(GameOutcome::Draw);
    }
    None
}

fn position_key(board: &Chess) -> Zobrist64 {
    board.zobrist_hash(EnPassantMode::Legal)
}

/// Running totals over every finished game, including ones no longer retained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tallies {
    pub games: u64,
    pub white_wins: u64,
    pub black_wins: u64,
    pub draws: u64,
    pub moves: u64,
}

/// A finished game without its moves and PGN, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct GameListing {
    pub id: u64,
    pub completed_at: DateTime<Utc>,
    pub is_draw: bool,
    pub winner: Option<Winner>,
    pub n_moves: u32,
}

impl From<&GameRecord> for GameListing {
    fn from(g: &GameRecord) -> Self {
        Self {
            id: g.id,
            completed_at: g.completed_at,
            is_draw: g.is_draw,
            winner: g.winner,
            n_moves: g.n_moves,
        }
    }
}

pub struct EternalGame<R> {
    engine: ShakmatyEngine,
    // Most recent finished games, oldest first, at most `history_limit`
    finished: VecDeque<GameRecord>,
    history_limit: usize,
    tallies: Tallies,
    // Occurrences of each position in the current game
    repetitions: HashMap<Zobrist64, u32>,
    // Set once the current (over) game has been counted in `tallies`
    recorded: bool,
    rng: R,
}

impl EternalGame<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for EternalGame<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> EternalGame<R> {
    pub fn with_rng(rng: R) -> Self {
        let mut game = Self {
            engine: ShakmatyEngine::new(),
            finished: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            tallies: Tallies::default(),
            repetitions: HashMap::new(),
            recorded: false,
            rng,
        };
        game.reset();
        game
    }

    /// Keep at most `limit` finished games for replay. Tallies are unaffected.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn board(&self) -> &Chess {
        self.engine.board()
    }

    /// Outcome of the current game, counting repetitions.
    pub fn outcome(&self) -> Option<GameOutcome> {
        outcome(self.board()).or_else(|| {
            (self.current_repetitions() >= REPETITION_DRAW_LIMIT).then_some(GameOutcome::Draw)
        })
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// How often the current position has occurred in this game.
    pub fn current_repetitions(&self) -> u32 {
        self.repetitions
            .get(&position_key(self.board()))
            .copied()
            .unwrap_or(0)
    }

    /// Play one SAN move on the current game.
    pub fn play(&mut self, san: &str) -> Result<LiveGameSummary, EngineError> {
        self.engine.apply_move(san)?;
        *self.repetitions.entry(position_key(self.board())).or_insert(0) += 1;
        Ok(self.snapshot())
    }

    /// Play one uniformly random legal move. `None` once the game is over.
    pub fn play_random_move(&mut self) -> Option<Result<LiveGameSummary, EngineError>> {
        if self.is_over() {
            return None;
        }
        let legals = self.engine.board().legal_moves();
        if legals.is_empty() {
            return None;
        }
        let mv = legals[self.rng.gen_range(0..legals.len())].clone();
        let san = San::from_move(self.engine.board(), mv).to_string();
        Some(self.play(&san))
    }

    /// Record the current game if it is over. Returns the new record once.
    pub fn finish(&mut self) -> Option<&GameRecord> {
        if self.recorded {
            return None;
        }
        let result = self.outcome()?;

        let id = self.tallies.games + 1;
        let completed_at = Utc::now();
        let moves = self.engine.history();
        let metadata = GameMetadata {
            white: "Random".into(),
            black: "Random".into(),
            result: result.result_tag().into(),
            date: Some(completed_at.format(PGN_DATE_FORMAT).to_string()),
            event: Some("Eternal Chess".into()),
            site: Some("www.eternalchess.com".into()),
            round: Some(id.to_string()),
        };
        let pgn = pgn::write_pgn(&metadata, &moves);

        let (is_draw, winner) = match result {
            GameOutcome::Draw => (true, None),
            GameOutcome::Decisive(w) => (false, Some(w)),
        };
        let n_moves = self.fullmoves();

        self.tallies.games += 1;
        self.tallies.moves += u64::from(n_moves);
        match winner {
            Some(Winner::White) => self.tallies.white_wins += 1,
            Some(Winner::Black) => self.tallies.black_wins += 1,
            None => self.tallies.draws += 1,
        }

        self.finished.push_back(GameRecord {
            id,
            completed_at,
            is_draw,
            winner,
            n_moves,
            moves,
            pgn,
        });
        while self.finished.len() > self.history_limit {
            self.finished.pop_front();
        }
        self.recorded = true;
        self.finished.back()
    }

    /// Start the next game.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.recorded = false;
        self.repetitions.clear();
        self.repetitions.insert(position_key(self.board()), 1);
    }

    pub fn tallies(&self) -> Tallies {
        self.tallies
    }

    /// Retained games count plus one page of listings, oldest first.
    pub fn games_page(&self, offset: usize, limit: usize) -> (usize, Vec<GameListing>) {
        let page = self
            .finished
            .iter()
            .skip(offset)
            .take(limit)
            .map(GameListing::from)
            .collect();
        (self.finished.len(), page)
    }

    pub fn game(&self, id: u64) -> Option<&GameRecord> {
        self.finished.iter().find(|g| g.id == id)
    }

    pub fn snapshot(&self) -> LiveGameSummary {
        let board = self.board();
        let t = self.tallies;
        let game_over = self.is_over();

        // Once recorded, the current game is already part of the tallies
        let (game_id, move_count) = if self.recorded {
            (t.games, t.moves)
        } else {
            (t.games + 1, t.moves + u64::from(self.fullmoves()))
        };

        LiveGameSummary {
            game_id: Some(game_id.into()),
            fen: Some(self.engine.current_position()),
            turn: Some(
                match board.turn() {
                    Color::White => "White",
                    Color::Black => "Black",
                }
                .to_string(),
            ),
            move_count: Some(move_count),
            game_move_count: Some(u64::from(self.fullmoves())),
            n_games: Some(t.games),
            n_white_wins: Some(t.white_wins),
            n_black_wins: Some(t.black_wins),
            n_draws: Some(t.draws),
            in_progress: Some(!game_over),
            game_over: Some(game_over),
        }
    }

    fn fullmoves(&self) -> u32 {
        self.board().fullmoves().get()
    }
}

/// Shared handle to the eternal game and its event feed.
pub struct Hub {
    game: Mutex<EternalGame<StdRng>>,
    events: broadcast::Sender<LiveEvent>,
}

pub type SharedHub = Arc<Hub>;

impl Hub {
    pub fn new(game: EternalGame<StdRng>, capacity: usize) -> SharedHub {
        let (events, _) = broadcast::channel(capacity.max(1));
        Arc::new(Self {
            game: Mutex::new(game),
            events,
        })
    }

    /// Join the feed: the `connection_established` snapshot plus a receiver for what follows.
    pub async fn join(&self) -> (LiveEvent, broadcast::Receiver<LiveEvent>) {
        let rx = self.events.subscribe();
        let snapshot = self.game.lock().await.snapshot();
        (LiveEvent::Connected(snapshot), rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> LiveGameSummary {
        self.game.lock().await.snapshot()
    }

    pub async fn games_page(&self, offset: usize, limit: usize) -> (usize, Vec<GameListing>) {
        self.game.lock().await.games_page(offset, limit)
    }

    pub async fn game(&self, id: u64) -> Option<GameRecord> {
        self.game.lock().await.game(id).cloned()
    }

    /// One step of the loop: records and announces a finished game, or plays a move.
    /// Returns `true` when a game was just finished.
    pub async fn tick(&self) -> bool {
        let mut game = self.game.lock().await;

        if let Some(record) = game.finish() {
            tracing::info!(
                "Game #{} finished {} after {} moves",
                record.id,
                match record.winner {
                    Some(Winner::White) => "1-0",
                    Some(Winner::Black) => "0-1",
                    None => "1/2-1/2",
                },
                record.n_moves
            );
            let summary = game.snapshot();
            self.publish(LiveEvent::GameFinished(summary));
            return true;
        }

        if game.is_over() {
            game.reset();
        }
        match game.play_random_move() {
            Some(Ok(summary)) => self.publish(LiveEvent::MoveApplied(summary)),
            Some(Err(e)) => {
                tracing::error!("Generated move was rejected: {}", e);
                game.reset();
            }
            None => {}
        }
        false
    }

    /// Play forever: one move per `move_interval`, pausing `game_pause` after each game.
    pub async fn run(self: Arc<Self>, move_interval: Duration, game_pause: Duration) {
        loop {
            let finished = self.tick().await;
            let wait = if finished { game_pause } else { move_interval };
            tokio::time::sleep(wait).await;
        }
    }

    fn publish(&self, event: LiveEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("No live subscribers");
        }
    }
}
