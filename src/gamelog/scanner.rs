//! Left-to-right scanner over one line of unspaced move text.
//!
//! The scanner peels off `<number><white-ply><black-ply>` triples until
//! the line is exhausted, trusting the move numbers embedded in the
//! input rather than recomputing them. Its only state is the current
//! byte offset; every successful match advances it by the matched
//! length, so concatenating the emitted records always reproduces the
//! input exactly.

use thiserror::Error;

use super::grammar::{match_ply, MoveToken};

/// One full move as written in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord<'a> {
    /// The move number exactly as written (maximal digit run, may be
    /// empty only for unnumbered input the log format never produces).
    pub number: &'a str,
    pub white: MoveToken<'a>,
    /// Absent only on the final record of a game that ends after
    /// White's ply.
    pub black: Option<MoveToken<'a>>,
}

/// All records of one game's move line, in order.
pub type GameTranscript<'a> = Vec<MoveRecord<'a>>;

/// A failed scan. Both variants are fatal for the whole line: the
/// grammar has no skip-and-resynchronize recovery, and a retry would
/// fail identically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// No grammar rule matches at the cursor. Carries the entire
    /// unconsumed remainder for diagnosis.
    #[error("no ply notation matches at byte {offset}: {remainder:?}")]
    NoGrammarMatch { offset: usize, remainder: String },
    /// The line ended where a ply was still required.
    #[error("move text ends mid-pair at byte {offset}")]
    TruncatedInput { offset: usize },
}

/// Scan one line of move text into an ordered sequence of records.
///
/// The line must already be trimmed and non-empty; it is the caller's
/// job to filter out headers and comment lines.
pub fn scan_line(line: &str) -> Result<GameTranscript<'_>, ScanError> {
    let mut records = Vec::new();
    let mut cursor = 0;
    while cursor < line.len() {
        let digits = line[cursor..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        let number = &line[cursor..cursor + digits];
        cursor += digits;

        let white = next_ply(line, cursor)?;
        cursor += white.text.len();

        let black = if cursor < line.len() {
            let ply = next_ply(line, cursor)?;
            cursor += ply.text.len();
            Some(ply)
        } else {
            None
        };

        records.push(MoveRecord {
            number,
            white,
            black,
        });
    }
    Ok(records)
}

fn next_ply(line: &str, cursor: usize) -> Result<MoveToken<'_>, ScanError> {
    let rest = &line[cursor..];
    if rest.is_empty() {
        return Err(ScanError::TruncatedInput { offset: cursor });
    }
    match_ply(rest).ok_or_else(|| ScanError::NoGrammarMatch {
        offset: cursor,
        remainder: rest.to_string(),
    })
}
