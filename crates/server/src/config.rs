use std::env;
use std::time::Duration;

use crate::hub::DEFAULT_HISTORY_LIMIT;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Delay between two plies of the eternal game.
    pub move_interval: Duration,
    /// Pause after a finished game before the next one starts.
    pub game_pause: Duration,
    /// Live events buffered per subscriber before it starts lagging.
    pub event_buffer: usize,
    /// Finished games kept for replay; older ones are dropped.
    pub game_history: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT").unwrap_or(8000),
            move_interval: Duration::from_millis(parse_var("MOVE_INTERVAL_MS").unwrap_or(1000)),
            game_pause: Duration::from_millis(parse_var("GAME_PAUSE_MS").unwrap_or(10_000)),
            event_buffer: parse_var("EVENT_BUFFER").unwrap_or(64),
            game_history: parse_var("GAME_HISTORY").unwrap_or(DEFAULT_HISTORY_LIMIT),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
