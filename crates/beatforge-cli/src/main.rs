mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("beatforge=info,beatforge_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(args.config.as_deref())?;

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
        } => commands::generate::run(
            &config,
            commands::generate::GenerateOptions {
                style,
                title,
                artist,
                duration,
                difficulty,
                bpm,
                seed,
            },
            output.as_deref(),
        ),
        Command::Info { file, json } => commands::info::run(&file, json),
        Command::Play {
            file,
            seed,
            jitter,
            miss_rate,
            frame_ms,
            record_dir,
        } => commands::play::run(
            &config,
            &file,
            commands::play::AutoPlayer {
                seed,
                jitter,
                miss_rate,
                frame_ms,
            },
            record_dir.as_deref(),
        ),
    }
}
