use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered SAN move descriptors for one game. Fixed once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveRecord(Vec<String>);

impl MoveRecord {
    pub fn new(moves: Vec<String>) -> Self {
        Self(moves)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, ply: usize) -> Option<&str> {
        self.0.get(ply).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The first `plies` moves.
    pub fn prefix(&self, plies: usize) -> MoveRecord {
        Self(self.0[..plies.min(self.0.len())].to_vec())
    }

    /// Numbered SAN movetext, e.g. `1. e4 e5 2. Nf3`.
    pub fn to_movetext(&self) -> String {
        let mut out = String::new();
        for (i, san) in self.0.iter().enumerate() {
            if i % 2 == 0 {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(&format!("{}. ", i / 2 + 1));
            } else {
                out.push(' ');
            }
            out.push_str(san);
        }
        out
    }
}

impl From<Vec<String>> for MoveRecord {
    fn from(moves: Vec<String>) -> Self {
        Self(moves)
    }
}

impl From<&[&str]> for MoveRecord {
    fn from(moves: &[&str]) -> Self {
        Self(moves.iter().map(|s| s.to_string()).collect())
    }
}

impl FromIterator<String> for MoveRecord {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub white: String,
    pub black: String,
    pub result: String, // "1-0", "0-1", "1/2-1/2"
    pub date: Option<String>,
    pub event: Option<String>,
    pub site: Option<String>,
    pub round: Option<String>,
}

/// A finished game as kept by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: u64,
    pub completed_at: DateTime<Utc>,
    pub is_draw: bool,
    pub winner: Option<Winner>,
    pub n_moves: u32, // full-move number at the end of the game
    pub moves: MoveRecord,
    pub pgn: String,
}
