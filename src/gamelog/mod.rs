pub mod grammar;
pub mod header;
pub mod logfile;
pub mod scanner;

pub use grammar::{match_ply, MoveToken, RuleKind};
pub use header::{Color, GameHeader, GameResult};
pub use logfile::{GameLog, LogError, LoggedGame};
pub use scanner::{scan_line, GameTranscript, MoveRecord, ScanError};
