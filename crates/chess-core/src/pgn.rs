//! PGN parsing and writing — lightweight regex-based.

use std::sync::LazyLock;

use regex::Regex;

use crate::game_data::{GameMetadata, MoveRecord};
use crate::position::STANDARD_START_FEN;

pub const PGN_DATE_FORMAT: &str = "%H:%M:%S %d-%m-%Y";

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).expect("header regex"));
static HEADER_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("header line regex"));
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("comment regex"));
static VARIATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("variation regex"));
static MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O")
        .expect("move regex")
});

/// Headers and mainline of a parsed PGN.
#[derive(Debug, Clone)]
pub struct ParsedPgn {
    pub metadata: GameMetadata,
    pub moves: MoveRecord,
}

/// Parse a PGN string into metadata and SAN mainline.
/// Returns `None` for games that start from a non-standard position.
pub fn parse_pgn(pgn: &str) -> Option<ParsedPgn> {
    let mut white = "Unknown".to_string();
    let mut black = "Unknown".to_string();
    let mut result = "*".to_string();
    let mut date = None;
    let mut event = None;
    let mut site = None;
    let mut round = None;
    let mut setup = None;
    let mut fen = None;

    for cap in HEADER_RE.captures_iter(pgn) {
        let key = &cap[1];
        let value = cap[2].to_string();
        match key {
            "White" => white = value,
            "Black" => black = value,
            "Result" => result = value,
            "Date" => date = Some(value),
            "Event" => event = Some(value),
            "Site" => site = Some(value),
            "Round" => round = Some(value),
            "SetUp" => setup = Some(value),
            "FEN" => fen = Some(value),
            _ => {}
        }
    }

    // Replays always start from the initial position
    if setup.as_deref() == Some("1") {
        if let Some(ref f) = fen {
            if f != STANDARD_START_FEN {
                return None;
            }
        }
    }

    Some(ParsedPgn {
        metadata: GameMetadata {
            white,
            black,
            result,
            date,
            event,
            site,
            round,
        },
        moves: extract_moves(pgn),
    })
}

/// Extract SAN moves from PGN text (after removing headers, comments, variations).
pub fn extract_moves(pgn: &str) -> MoveRecord {
    let no_headers = HEADER_LINE_RE.replace_all(pgn, "");
    let no_comments = COMMENT_RE.replace_all(&no_headers, "");
    let no_variations = VARIATION_RE.replace_all(&no_comments, "");

    MOVE_RE
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Render a game as PGN: the seven-tag roster followed by numbered movetext and result.
pub fn write_pgn(metadata: &GameMetadata, moves: &MoveRecord) -> String {
    let tags = [
        ("Event", metadata.event.as_deref().unwrap_or("?")),
        ("Site", metadata.site.as_deref().unwrap_or("?")),
        ("Date", metadata.date.as_deref().unwrap_or("????.??.??")),
        ("Round", metadata.round.as_deref().unwrap_or("?")),
        ("White", metadata.white.as_str()),
        ("Black", metadata.black.as_str()),
        ("Result", metadata.result.as_str()),
    ];

    let mut out = String::new();
    for (key, value) in tags {
        out.push_str(&format!("[{key} \"{}\"]\n", value.replace('"', "'")));
    }
    out.push('\n');

    let movetext = moves.to_movetext();
    if !movetext.is_empty() {
        out.push_str(&movetext);
        out.push(' ');
    }
    out.push_str(&metadata.result);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pgn_basic() {
        let pgn = r#"[Event "Eternal Chess"]
[White "Random"]
[Black "Random"]
[Result "1-0"]
[Round "12"]

1. e4 e5 2. Nf3 {a comment} Nc6 (2... d6) 1-0"#;

        let game = parse_pgn(pgn).unwrap();
        assert_eq!(game.metadata.white, "Random");
        assert_eq!(game.metadata.result, "1-0");
        assert_eq!(game.metadata.round.as_deref(), Some("12"));
        assert_eq!(game.moves.len(), 4);
        assert_eq!(game.moves.get(0), Some("e4"));
        assert_eq!(game.moves.get(3), Some("Nc6"));
    }

    #[test]
    fn test_non_standard_start_is_rejected() {
        let pgn = r#"[SetUp "1"]
[FEN "8/8/8/8/8/8/8/K6k w - - 0 1"]

1. Kb2 *"#;
        assert!(parse_pgn(pgn).is_none());
    }

    #[test]
    fn test_extract_moves_castling_and_promotion() {
        let moves = extract_moves("1. O-O O-O-O 2. exd8=Q+ Kxd8#");
        assert_eq!(moves.as_slice(), ["O-O", "O-O-O", "exd8=Q+", "Kxd8#"]);
    }

    #[test]
    fn test_write_pgn_reparses() {
        let metadata = GameMetadata {
            white: "Random".into(),
            black: "Random".into(),
            result: "1/2-1/2".into(),
            date: Some("10:00:00 01-02-2026".into()),
            event: Some("Eternal Chess".into()),
            site: Some("www.eternalchess.com".into()),
            round: Some("4".into()),
        };
        let moves = MoveRecord::from(&["d4", "d5", "c4"][..]);
        let pgn = write_pgn(&metadata, &moves);

        assert!(pgn.starts_with("[Event \"Eternal Chess\"]\n"));
        assert!(pgn.ends_with("1. d4 d5 2. c4 1/2-1/2"));

        let parsed = parse_pgn(&pgn).unwrap();
        assert_eq!(parsed.moves, moves);
        assert_eq!(parsed.metadata.round.as_deref(), Some("4"));
    }
}
