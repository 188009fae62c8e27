//! Per-day win/loss/draw statistics.
//!
//! The accumulator is a plain value owned by the driver and passed into
//! the exporter explicitly; nothing here touches global state.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::gamelog::{Color, GameHeader, GameResult};

/// Counters for a single day of play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl DayStats {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score percentage, counting a draw as half a win.
    pub fn score_percent(&self) -> f64 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        (f64::from(self.wins) + f64::from(self.draws) * 0.5) / f64::from(games) * 100.0
    }
}

/// Running per-date statistics over a whole log.
///
/// Keyed by the PGN date string; `BTreeMap` keeps the CSV output in
/// date order.
#[derive(Debug, Default)]
pub struct StatsAccumulator {
    days: BTreeMap<String, DayStats>,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed game. Games with an unknown (`*`) result
    /// carry no score and are not counted.
    pub fn record(&mut self, header: &GameHeader) {
        if header.result == GameResult::Unknown {
            return;
        }
        let day = self.days.entry(header.date.clone()).or_default();
        match (header.color, header.result) {
            (_, GameResult::Draw) => day.draws += 1,
            (Color::White, GameResult::WhiteWins) | (Color::Black, GameResult::BlackWins) => {
                day.wins += 1
            }
            _ => day.losses += 1,
        }
    }

    pub fn num_days(&self) -> usize {
        self.days.len()
    }

    pub fn day(&self, date: &str) -> Option<&DayStats> {
        self.days.get(date)
    }

    pub fn days(&self) -> impl Iterator<Item = (&str, &DayStats)> {
        self.days.iter().map(|(date, day)| (date.as_str(), day))
    }

    /// Write the statistics as CSV, one row per day in date order.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "date,wins,losses,draws,score_pct")?;
        for (date, day) in &self.days {
            writeln!(
                writer,
                "{},{},{},{},{:.1}",
                date,
                day.wins,
                day.losses,
                day.draws,
                day.score_percent()
            )?;
        }
        Ok(())
    }
}
