//! CLI argument definitions for beatforge.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "beatforge")]
#[command(about = "Procedural beatmap generator and offline auto-player", version)]
pub struct Args {
    /// Engine config file (TOML)
    #[arg(long, value_name = "FILE", env = "BEATFORGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a beatmap
    Generate {
        /// Generation style (standard, technical, or an alias such as tech)
        #[arg(long, short, default_value = "standard")]
        style: String,
        /// Song title
        #[arg(long, short)]
        title: String,
        /// Song artist
        #[arg(long, short, default_value = "Unknown Artist")]
        artist: String,
        /// Track length in milliseconds
        #[arg(long, short, default_value = "60000")]
        duration: f64,
        /// Difficulty level (1-10)
        #[arg(long)]
        difficulty: Option<f64>,
        /// Tempo in beats per minute
        #[arg(long)]
        bpm: Option<f64>,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Output file path (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show a beatmap summary
    Info {
        /// Beatmap JSON file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Auto-play a beatmap and print the result
    Play {
        /// Beatmap JSON file
        file: PathBuf,
        /// Seed for the auto-player's timing errors
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Maximum timing error in milliseconds
        #[arg(long, default_value = "30")]
        jitter: f64,
        /// Probability of skipping an object (0.0-1.0)
        #[arg(long, default_value = "0.0")]
        miss_rate: f64,
        /// Simulated frame length in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: f64,
        /// Append the result to a record log in this directory
        #[arg(long, value_name = "DIR")]
        record_dir: Option<PathBuf>,
    },
}
