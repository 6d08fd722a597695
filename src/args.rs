//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Total number of seats at the table.
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=10))]
    pub players: u8,

    /// How many seats are interactive; the rest are automated.
    #[arg(long, default_value_t = 1)]
    pub humans: u8,

    /// Seed for deterministic shuffling and automated play.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable ANSI colours in card output.
    #[arg(long)]
    pub no_color: bool,

    /// Replay a recorded game log (JSON) instead of playing.
    #[arg(long)]
    pub replay: Option<PathBuf>,
}
