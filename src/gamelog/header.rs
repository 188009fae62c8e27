//! Per-game header lines.
//!
//! A header line carries everything about a game except its moves:
//!
//! ```text
//! 2024.03.15 W 1-0 quick attack
//! ```
//!
//! date in PGN `YYYY.MM.DD` form, the side the log owner played (`W` or
//! `B`), the PGN result, and an optional free-text trailing comment.

use once_cell::sync::Lazy;
use regex::Regex;

/// Side the log owner played in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

/// Game result as recorded in the log, in PGN result notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    Unknown,
}

impl GameResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Unknown => "*",
        }
    }
}

/// Metadata for one logged game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameHeader {
    /// PGN-format date, `YYYY.MM.DD`.
    pub date: String,
    pub color: Color,
    pub result: GameResult,
    pub comment: Option<String>,
}

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}\.\d{2}\.\d{2})\s+([WB])\s+(1-0|0-1|1/2-1/2|\*)(?:\s+(\S.*))?$").unwrap()
});

/// Parse one trimmed line as a game header. Returns `None` when the
/// line is not a header at all; the log loader decides whether that is
/// an error.
pub fn parse_header(line: &str) -> Option<GameHeader> {
    let caps = HEADER_RE.captures(line)?;
    let color = match &caps[2] {
        "W" => Color::White,
        _ => Color::Black,
    };
    let result = match &caps[3] {
        "1-0" => GameResult::WhiteWins,
        "0-1" => GameResult::BlackWins,
        "1/2-1/2" => GameResult::Draw,
        _ => GameResult::Unknown,
    };
    Some(GameHeader {
        date: caps[1].to_string(),
        color,
        result,
        comment: caps.get(4).map(|m| m.as_str().trim_end().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_header() {
        let header = parse_header("2024.03.15 W 1-0 quick attack").unwrap();
        assert_eq!(header.date, "2024.03.15");
        assert_eq!(header.color, Color::White);
        assert_eq!(header.result, GameResult::WhiteWins);
        assert_eq!(header.comment.as_deref(), Some("quick attack"));
    }

    #[test]
    fn comment_is_optional() {
        let header = parse_header("2024.03.16 B 1/2-1/2").unwrap();
        assert_eq!(header.color, Color::Black);
        assert_eq!(header.result, GameResult::Draw);
        assert_eq!(header.comment, None);
    }

    #[test]
    fn unfinished_games_are_recorded_with_star() {
        let header = parse_header("2024.04.01 W *").unwrap();
        assert_eq!(header.result, GameResult::Unknown);
    }

    #[test]
    fn rejects_non_header_lines() {
        assert!(parse_header("1e4e52Nf3Nf6").is_none());
        assert!(parse_header("2024.03.15").is_none());
        assert!(parse_header("2024.03.15 X 1-0").is_none());
        assert!(parse_header("2024-03-15 W 1-0").is_none());
        assert!(parse_header("").is_none());
    }

    #[test]
    fn result_notation_round_trips() {
        for (text, result) in [
            ("1-0", GameResult::WhiteWins),
            ("0-1", GameResult::BlackWins),
            ("1/2-1/2", GameResult::Draw),
            ("*", GameResult::Unknown),
        ] {
            assert_eq!(result.as_str(), text);
        }
    }
}
