//! Live feed payloads, as pushed by the server and consumed by viewers.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <summary>}`. Event
//! names follow the wire names used since the first feed revision:
//! `connection_established`, `move` and `game_over`.

use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Game number, sent as either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameId {
    Number(u64),
    Text(String),
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameId::Number(n) => write!(f, "{n}"),
            GameId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for GameId {
    fn from(n: u64) -> Self {
        GameId::Number(n)
    }
}

/// Server-authoritative state of the current game and the running tallies.
///
/// Every field is optional: partial payloads are accepted and the missing
/// values are rendered as placeholders. A field of the wrong type is treated
/// as missing so it cannot take the rest of the payload down with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveGameSummary {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub game_id: Option<GameId>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fen: Option<Position>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub turn: Option<String>,
    /// Cumulative moves over all games, including the current one.
    #[serde(alias = "n_moves", deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub move_count: Option<u64>,
    /// Full-move number of the current game.
    #[serde(alias = "n_game_moves", deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub game_move_count: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub n_games: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub n_white_wins: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub n_black_wins: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub n_draws: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub in_progress: Option<bool>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
}

impl LiveGameSummary {
    /// Whether the game is still being played. `in_progress` wins over `game_over`;
    /// with neither present the game is assumed to be running.
    pub fn is_in_progress(&self) -> bool {
        match (self.in_progress, self.game_over) {
            (Some(in_progress), _) => in_progress,
            (None, Some(game_over)) => !game_over,
            (None, None) => true,
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

const EVENT_NAMES: &[&str] = &["connection_established", "move", "game_over"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum LiveEvent {
    /// Snapshot sent when a viewer (re)joins.
    #[serde(rename = "connection_established")]
    Connected(LiveGameSummary),
    /// One ply was played.
    #[serde(rename = "move")]
    MoveApplied(LiveGameSummary),
    /// The current game concluded.
    #[serde(rename = "game_over")]
    GameFinished(LiveGameSummary),
}

impl LiveEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LiveEvent::Connected(_) => "connection_established",
            LiveEvent::MoveApplied(_) => "move",
            LiveEvent::GameFinished(_) => "game_over",
        }
    }

    pub fn summary(&self) -> &LiveGameSummary {
        match self {
            LiveEvent::Connected(s) | LiveEvent::MoveApplied(s) | LiveEvent::GameFinished(s) => s,
        }
    }

    pub fn into_summary(self) -> LiveGameSummary {
        match self {
            LiveEvent::Connected(s) | LiveEvent::MoveApplied(s) | LiveEvent::GameFinished(s) => s,
        }
    }

    pub fn to_frame(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_frame(frame: &str) -> serde_json::Result<Self> {
        serde_json::from_str(frame)
    }
}

// A missing, null or non-object `data` decodes as an empty summary.
// Unknown event names are rejected.
impl<'de> Deserialize<'de> for LiveEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawFrame {
            event: String,
            #[serde(default)]
            data: serde_json::Value,
        }

        let raw = RawFrame::deserialize(deserializer)?;
        let wrap: fn(LiveGameSummary) -> LiveEvent = match raw.event.as_str() {
            "connection_established" => LiveEvent::Connected,
            "move" => LiveEvent::MoveApplied,
            "game_over" => LiveEvent::GameFinished,
            other => return Err(de::Error::unknown_variant(other, EVENT_NAMES)),
        };
        let summary = match raw.data {
            data @ serde_json::Value::Object(_) => {
                serde_json::from_value(data).map_err(de::Error::custom)?
            }
            _ => LiveGameSummary::default(),
        };
        Ok(wrap(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_legacy_field_names() {
        let frame = r#"{"event":"move","data":{
            "fen":"8/8/8/8/8/8/8/K6k w - - 0 40",
            "n_games":10,"n_white_wins":4,"n_black_wins":3,"n_draws":3,
            "n_moves":812,"game_id":"11","n_game_moves":40,
            "turn":"White","game_over":false}}"#;

        let event = LiveEvent::from_frame(frame).unwrap();
        let LiveEvent::MoveApplied(summary) = event else {
            panic!("expected move event");
        };
        assert_eq!(summary.game_id, Some(GameId::Text("11".into())));
        assert_eq!(summary.move_count, Some(812));
        assert_eq!(summary.game_move_count, Some(40));
        assert!(summary.is_in_progress());
    }

    #[test]
    fn test_partial_payload_leaves_fields_empty() {
        let event =
            LiveEvent::from_frame(r#"{"event":"game_over","data":{"n_games":11}}"#).unwrap();
        assert_eq!(event.name(), "game_over");
        let summary = event.into_summary();
        assert_eq!(summary.n_games, Some(11));
        assert_eq!(summary.fen, None);
        assert_eq!(summary.game_id, None);
    }

    #[test]
    fn test_frame_shape() {
        let event = LiveEvent::Connected(LiveGameSummary {
            game_id: Some(GameId::Number(7)),
            in_progress: Some(true),
            ..Default::default()
        });
        let value: serde_json::Value = serde_json::from_str(&event.to_frame().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "event": "connection_established",
                "data": { "game_id": 7, "in_progress": true }
            })
        );
    }

    #[test]
    fn test_mistyped_field_is_dropped_alone() {
        let frame = r#"{"event":"move","data":{
            "fen":"8/8/8/8/8/8/8/K6k w - - 0 40",
            "n_games":"10","n_draws":3.5,"move_count":-4,
            "turn":7,"game_id":null,"n_white_wins":2}}"#;

        let summary = LiveEvent::from_frame(frame).unwrap().into_summary();
        assert_eq!(
            summary.fen.as_ref().map(Position::as_fen),
            Some("8/8/8/8/8/8/8/K6k w - - 0 40")
        );
        assert_eq!(summary.n_white_wins, Some(2));
        assert_eq!(summary.n_games, None);
        assert_eq!(summary.n_draws, None);
        assert_eq!(summary.move_count, None);
        assert_eq!(summary.turn, None);
        assert_eq!(summary.game_id, None);
    }

    #[test]
    fn test_missing_or_null_data_is_an_empty_summary() {
        for frame in [
            r#"{"event":"game_over"}"#,
            r#"{"event":"game_over","data":null}"#,
            r#"{"event":"game_over","data":"soon"}"#,
        ] {
            let event = LiveEvent::from_frame(frame).unwrap();
            assert_eq!(event, LiveEvent::GameFinished(LiveGameSummary::default()));
        }
    }

    #[test]
    fn test_unknown_event_is_an_error() {
        assert!(LiveEvent::from_frame(r#"{"event":"chat","data":{}}"#).is_err());
        assert!(LiveEvent::from_frame(r#"{"data":{}}"#).is_err());
        assert!(LiveEvent::from_frame("[1, 2]").is_err());
    }

    #[test]
    fn test_in_progress_flag_precedence() {
        let mut summary = LiveGameSummary::default();
        assert!(summary.is_in_progress());
        summary.game_over = Some(true);
        assert!(!summary.is_in_progress());
        summary.in_progress = Some(true);
        assert!(summary.is_in_progress());
    }
}
