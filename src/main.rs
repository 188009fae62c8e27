use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use logtopgn::{GameLog, PgnExporter, StatsAccumulator};

/// Convert a compact chess game log to PGN format.
///
/// A log file holds two lines per game: a header line
/// (`<date> <W|B> <result> [comment]`) and one unbroken string of move
/// text with no separators, e.g. `1e4e52Nf3Nf6`. Each game is written
/// as a PGN record, and a per-day win/loss/draw summary goes to a CSV
/// file alongside it.
#[derive(Parser)]
#[command(name = "logtopgn")]
#[command(about = "Convert compact chess game logs to PGN format")]
#[command(version = "0.1.0")]
struct Args {
    /// Path to the game log file
    #[arg(value_name = "LOG")]
    log: PathBuf,

    /// Output PGN file (if not specified, uses the log name with .pgn extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output statistics CSV file (if not specified, uses the log name with .csv extension)
    #[arg(short, long, value_name = "FILE")]
    stats: Option<PathBuf>,

    /// Force overwrite existing output files
    #[arg(short, long)]
    force: bool,

    /// Name recorded for the log owner's side in PGN headers
    #[arg(long, default_value = "Player")]
    player: String,

    /// Maximum number of games to export (0 = all games)
    #[arg(long, default_value = "0")]
    max_games: usize,

    /// Wait for a keypress after each exported game
    #[arg(long)]
    pause: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .init();

    let pgn_path = args
        .output
        .unwrap_or_else(|| args.log.with_extension("pgn"));
    let csv_path = args.stats.unwrap_or_else(|| args.log.with_extension("csv"));

    for path in [&pgn_path, &csv_path] {
        if path.exists() && !args.force {
            anyhow::bail!(
                "output file '{}' already exists (use --force to overwrite)",
                path.display()
            );
        }
    }

    println!("Converting game log '{}' to PGN format...", args.log.display());

    let log = GameLog::load(&args.log)
        .with_context(|| format!("failed to load game log '{}'", args.log.display()))?;

    println!("Loaded log with {} games", log.num_games());

    let mut exporter = PgnExporter::new().with_player_name(args.player);
    if args.max_games > 0 {
        exporter = exporter.with_max_games(args.max_games);
    }
    if args.pause {
        exporter = exporter.with_pause_hook(Box::new(|game| {
            println!("-- game {} written, press Enter to continue --", game);
            let mut line = String::new();
            let _ = io::stdin().read_line(&mut line);
        }));
    }

    let mut stats = StatsAccumulator::new();

    let pgn_file = File::create(&pgn_path)
        .with_context(|| format!("failed to create '{}'", pgn_path.display()))?;
    let mut pgn_writer = BufWriter::new(pgn_file);
    let exported = exporter
        .export(&log, &mut pgn_writer, &mut stats)
        .context("error exporting to PGN")?;
    pgn_writer.flush()?;

    println!(
        "Successfully exported {} games to '{}'",
        exported,
        pgn_path.display()
    );

    let csv_file = File::create(&csv_path)
        .with_context(|| format!("failed to create '{}'", csv_path.display()))?;
    let mut csv_writer = BufWriter::new(csv_file);
    stats
        .write_csv(&mut csv_writer)
        .context("error writing statistics CSV")?;
    csv_writer.flush()?;

    println!(
        "Wrote statistics for {} days to '{}'",
        stats.num_days(),
        csv_path.display()
    );

    Ok(())
}
