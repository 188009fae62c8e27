//! PGN exporter for parsed game logs.

use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::gamelog::{scan_line, Color, GameHeader, GameLog, LoggedGame, ScanError};
use crate::stats::StatsAccumulator;

/// Callback invoked after each exported game with the game's ordinal.
/// Installed only in interactive mode; when absent it costs nothing.
type PauseHook = Box<dyn FnMut(usize)>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A move line failed to tokenize. The export stops at the first
    /// bad line; output past it would be misaligned.
    #[error("game {game} ({date}): {source}")]
    BadMoveText {
        game: usize,
        date: String,
        #[source]
        source: ScanError,
    },
}

/// Writes games from a [`GameLog`] as PGN.
pub struct PgnExporter {
    player_name: String,
    max_games: Option<usize>,
    pause_hook: Option<PauseHook>,
}

impl PgnExporter {
    pub fn new() -> Self {
        PgnExporter {
            player_name: "?".to_string(),
            max_games: None,
            pause_hook: None,
        }
    }

    /// Name written for the log owner's side in the PGN tags.
    pub fn with_player_name<S: Into<String>>(mut self, name: S) -> Self {
        self.player_name = name.into();
        self
    }

    pub fn with_max_games(mut self, max: usize) -> Self {
        self.max_games = Some(max);
        self
    }

    pub fn with_pause_hook(mut self, hook: PauseHook) -> Self {
        self.pause_hook = Some(hook);
        self
    }

    /// Export games to `writer`, recording each exported game into
    /// `stats`. Returns the number of games written.
    pub fn export<W: Write>(
        &mut self,
        log: &GameLog,
        writer: &mut W,
        stats: &mut StatsAccumulator,
    ) -> Result<usize, ExportError> {
        let games = log.games();
        let export_count = self
            .max_games
            .map(|max| max.min(games.len()))
            .unwrap_or(games.len());

        let mut exported = 0;
        for (game_num, game) in games.iter().enumerate() {
            if exported >= export_count {
                break;
            }

            self.export_game(writer, game, game_num)?;
            writer.write_all(b"\n")?; // Empty line between games

            stats.record(&game.header);
            exported += 1;

            if exported % 1000 == 0 {
                debug!("exported {} games...", exported);
            }
            if let Some(hook) = self.pause_hook.as_mut() {
                hook(game_num + 1);
            }
        }

        Ok(exported)
    }

    fn export_game<W: Write>(
        &self,
        writer: &mut W,
        game: &LoggedGame,
        game_num: usize,
    ) -> Result<(), ExportError> {
        self.write_headers(writer, &game.header)?;
        self.write_moves(writer, game, game_num)?;

        // Trailing comment, then the game result.
        match &game.header.comment {
            Some(comment) => writeln!(writer, "{{{}}} {}", comment, game.header.result.as_str())?,
            None => writeln!(writer, "{}", game.header.result.as_str())?,
        }

        Ok(())
    }

    fn write_headers<W: Write>(&self, writer: &mut W, header: &GameHeader) -> io::Result<()> {
        // The log only knows which side its owner played; the opponent
        // stays "?" per PGN convention.
        let (white, black) = match header.color {
            Color::White => (self.player_name.as_str(), "?"),
            Color::Black => ("?", self.player_name.as_str()),
        };

        writeln!(writer, "[Event \"?\"]")?;
        writeln!(writer, "[Site \"?\"]")?;
        writeln!(writer, "[Date \"{}\"]", header.date)?;
        writeln!(writer, "[Round \"?\"]")?;
        writeln!(writer, "[White \"{}\"]", white)?;
        writeln!(writer, "[Black \"{}\"]", black)?;
        writeln!(writer, "[Result \"{}\"]", header.result.as_str())?;

        writeln!(writer)?; // Empty line after headers

        Ok(())
    }

    fn write_moves<W: Write>(
        &self,
        writer: &mut W,
        game: &LoggedGame,
        game_num: usize,
    ) -> Result<(), ExportError> {
        let records = scan_line(&game.moves).map_err(|source| ExportError::BadMoveText {
            game: game_num + 1,
            date: game.header.date.clone(),
            source,
        })?;
        debug!("game {}: {} move records", game_num + 1, records.len());

        for record in &records {
            match record.black {
                Some(black) => writeln!(
                    writer,
                    "{}. {} {}",
                    record.number, record.white.text, black.text
                )?,
                None => writeln!(writer, "{}. {}", record.number, record.white.text)?,
            }
        }

        Ok(())
    }
}

impl Default for PgnExporter {
    fn default() -> Self {
        Self::new()
    }
}
