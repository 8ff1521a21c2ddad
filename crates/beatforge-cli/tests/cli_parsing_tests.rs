//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without actually executing the commands.

use std::path::PathBuf;

use clap::Parser;

// Re-create Args structure for testing since it's not publicly exported
#[derive(Parser)]
#[command(name = "beatforge")]
struct Args {
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    Generate {
        #[arg(long, short, default_value = "standard")]
        style: String,
        #[arg(long, short)]
        title: String,
        #[arg(long, short, default_value = "Unknown Artist")]
        artist: String,
        #[arg(long, short, default_value = "60000")]
        duration: f64,
        #[arg(long)]
        difficulty: Option<f64>,
        #[arg(long)]
        bpm: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    Info {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    Play {
        file: PathBuf,
        #[arg(long, default_value = "0")]
        seed: u64,
        #[arg(long, default_value = "30")]
        jitter: f64,
        #[arg(long, default_value = "0.0")]
        miss_rate: f64,
        #[arg(long, default_value = "16")]
        frame_ms: f64,
        #[arg(long, value_name = "DIR")]
        record_dir: Option<PathBuf>,
    },
}

#[test]
fn test_parse_requires_subcommand() {
    assert!(Args::try_parse_from(["beatforge"]).is_err());
}

#[test]
fn test_parse_generate_defaults() {
    let args = Args::try_parse_from(["beatforge", "generate", "--title", "Song"]).unwrap();
    assert!(args.config.is_none());
    match args.command {
        Command::Generate {
            style,
            title,
            artist,
            duration,
            difficulty,
            bpm,
            seed,
            output,
        } => {
            assert_eq!(style, "standard");
            assert_eq!(title, "Song");
            assert_eq!(artist, "Unknown Artist");
            assert_eq!(duration, 60000.0);
            assert!(difficulty.is_none());
            assert!(bpm.is_none());
            assert!(seed.is_none());
            assert!(output.is_none());
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_parse_generate_full() {
    let args = Args::try_parse_from([
        "beatforge",
        "generate",
        "-s",
        "tech",
        "-t",
        "Song",
        "-a",
        "Artist",
        "-d",
        "90000",
        "--difficulty",
        "7.5",
        "--bpm",
        "174",
        "--seed",
        "42",
        "-o",
        "map.json",
    ])
    .unwrap();
    match args.command {
        Command::Generate {
            style,
            duration,
            difficulty,
            bpm,
            seed,
            output,
            ..
        } => {
            assert_eq!(style, "tech");
            assert_eq!(duration, 90000.0);
            assert_eq!(difficulty, Some(7.5));
            assert_eq!(bpm, Some(174.0));
            assert_eq!(seed, Some(42));
            assert_eq!(output, Some(PathBuf::from("map.json")));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_parse_generate_requires_title() {
    assert!(Args::try_parse_from(["beatforge", "generate"]).is_err());
}

#[test]
fn test_parse_info() {
    let args = Args::try_parse_from(["beatforge", "info", "map.json", "--json"]).unwrap();
    match args.command {
        Command::Info { file, json } => {
            assert_eq!(file, PathBuf::from("map.json"));
            assert!(json);
        }
        _ => panic!("Expected Info command"),
    }
}

#[test]
fn test_parse_play_defaults() {
    let args = Args::try_parse_from(["beatforge", "play", "map.json"]).unwrap();
    match args.command {
        Command::Play {
            seed,
            jitter,
            miss_rate,
            frame_ms,
            record_dir,
            ..
        } => {
            assert_eq!(seed, 0);
            assert_eq!(jitter, 30.0);
            assert_eq!(miss_rate, 0.0);
            assert_eq!(frame_ms, 16.0);
            assert!(record_dir.is_none());
        }
        _ => panic!("Expected Play command"),
    }
}

#[test]
fn test_parse_play_with_options() {
    let args = Args::try_parse_from([
        "beatforge",
        "play",
        "map.json",
        "--seed",
        "9",
        "--jitter",
        "50",
        "--miss-rate",
        "0.1",
        "--frame-ms",
        "8",
        "--record-dir",
        "records",
    ])
    .unwrap();
    match args.command {
        Command::Play {
            seed,
            jitter,
            miss_rate,
            frame_ms,
            record_dir,
            ..
        } => {
            assert_eq!(seed, 9);
            assert_eq!(jitter, 50.0);
            assert_eq!(miss_rate, 0.1);
            assert_eq!(frame_ms, 8.0);
            assert_eq!(record_dir, Some(PathBuf::from("records")));
        }
        _ => panic!("Expected Play command"),
    }
}

#[test]
fn test_parse_global_config_after_subcommand() {
    let args =
        Args::try_parse_from(["beatforge", "info", "map.json", "--config", "beatforge.toml"])
            .unwrap();
    assert_eq!(args.config, Some(PathBuf::from("beatforge.toml")));
}

#[test]
fn test_parse_play_requires_file() {
    assert!(Args::try_parse_from(["beatforge", "play"]).is_err());
}
