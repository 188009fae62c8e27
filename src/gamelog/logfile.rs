//! Game log file loading.
//!
//! A log file is a flat sequence of games, each a header line followed
//! by one line of unspaced move text. Blank lines and `#` comment lines
//! may appear anywhere between games.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::header::{parse_header, GameHeader};

/// One game as read from the log: its header and its raw move line.
/// The move line is scanned lazily, at export time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedGame {
    pub header: GameHeader,
    pub moves: String,
}

/// A loaded game log.
#[derive(Debug)]
pub struct GameLog {
    games: Vec<LoggedGame>,
    path: PathBuf,
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A line that should start a game does not parse as a header.
    #[error("line {line}: malformed game header: {text:?}")]
    MalformedHeader { line: usize, text: String },
    /// A header line at end of file, or followed by another header.
    #[error("line {line}: game header has no move line")]
    MissingMoves { line: usize },
}

impl GameLog {
    /// Load a game log file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path)?;
        let games = Self::parse(&text)?;
        debug!("loaded {} games from {}", games.len(), path.display());
        Ok(GameLog { games, path })
    }

    /// Build a log directly from text, for callers without a file.
    pub fn from_text(text: &str) -> Result<Self, LogError> {
        Ok(GameLog {
            games: Self::parse(text)?,
            path: PathBuf::new(),
        })
    }

    fn parse(text: &str) -> Result<Vec<LoggedGame>, LogError> {
        let mut games = Vec::new();
        let mut pending: Option<(usize, GameHeader)> = None;
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match pending.take() {
                None => match parse_header(line) {
                    Some(header) => pending = Some((line_no, header)),
                    None => {
                        return Err(LogError::MalformedHeader {
                            line: line_no,
                            text: line.to_string(),
                        })
                    }
                },
                Some((header_line, header)) => {
                    // Two headers in a row means the first game lost
                    // its move line.
                    if parse_header(line).is_some() {
                        return Err(LogError::MissingMoves { line: header_line });
                    }
                    games.push(LoggedGame {
                        header,
                        moves: line.to_string(),
                    });
                }
            }
        }
        if let Some((header_line, _)) = pending {
            return Err(LogError::MissingMoves { line: header_line });
        }
        Ok(games)
    }

    pub fn games(&self) -> &[LoggedGame] {
        &self.games
    }

    pub fn num_games(&self) -> usize {
        self.games.len()
    }

    pub fn game(&self, game_id: usize) -> Option<&LoggedGame> {
        self.games.get(game_id)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamelog::header::{Color, GameResult};

    #[test]
    fn pairs_headers_with_move_lines() {
        let log = GameLog::from_text(
            "# spring log\n\
             2024.03.15 W 1-0 quick attack\n\
             1e4e52Nf3Nf6\n\
             \n\
             2024.03.16 B 0-1\n\
             1d4d52c4e6\n",
        )
        .unwrap();
        assert_eq!(log.num_games(), 2);
        let first = log.game(0).unwrap();
        assert_eq!(first.header.color, Color::White);
        assert_eq!(first.header.comment.as_deref(), Some("quick attack"));
        assert_eq!(first.moves, "1e4e52Nf3Nf6");
        let second = log.game(1).unwrap();
        assert_eq!(second.header.result, GameResult::BlackWins);
        assert_eq!(second.moves, "1d4d52c4e6");
        assert!(log.game(2).is_none());
    }

    #[test]
    fn malformed_header_reports_line_number() {
        let err = GameLog::from_text("# log\nnot a header\n").unwrap_err();
        match err {
            LogError::MalformedHeader { line, text } => {
                assert_eq!(line, 2);
                assert_eq!(text, "not a header");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_at_eof_is_missing_moves() {
        let err = GameLog::from_text("2024.03.15 W 1-0\n").unwrap_err();
        match err {
            LogError::MissingMoves { line } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn two_headers_in_a_row_is_missing_moves() {
        let err =
            GameLog::from_text("2024.03.15 W 1-0\n2024.03.16 B 0-1\n1e4e5\n").unwrap_err();
        match err {
            LogError::MissingMoves { line } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            GameLog::load("test/data/nonexistent.log"),
            Err(LogError::Io(_))
        ));
    }
}
