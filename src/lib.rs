//! Chess game log to PGN converter library
//!
//! Reads compact game logs — one header line plus one unspaced move
//! line per game, as copied from a web game viewer — and converts them
//! to PGN along with per-day win/loss/draw statistics.

pub mod gamelog;
pub mod pgn;
pub mod stats;

pub use gamelog::{GameHeader, GameLog, MoveRecord, MoveToken, ScanError};
pub use pgn::{ExportError, PgnExporter};
pub use stats::{DayStats, StatsAccumulator};
