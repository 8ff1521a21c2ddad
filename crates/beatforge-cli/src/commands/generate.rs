//! Generate command.

use std::path::Path;

use anyhow::{Result, bail};
use beatforge_core::{BeatmapFactory, Config, CreateBeatmapParams};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub struct GenerateOptions {
    pub style: String,
    pub title: String,
    pub artist: String,
    pub duration: f64,
    pub difficulty: Option<f64>,
    pub bpm: Option<f64>,
    pub seed: Option<u64>,
}

/// Generate a beatmap and write it as JSON
pub fn run(config: &Config, options: GenerateOptions, output: Option<&Path>) -> Result<()> {
    if !options.duration.is_finite() || options.duration <= 0.0 {
        bail!("Duration must be a positive number of milliseconds");
    }

    let factory = BeatmapFactory::resolve(&options.style, &config.generator)?;

    let mut params = CreateBeatmapParams::new(options.title, options.artist, options.duration);
    params.difficulty = options.difficulty;
    params.bpm = options.bpm;

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let beatmap = factory.create_beatmap(&params, &mut rng);
    let content = serde_json::to_string_pretty(&beatmap)?;

    if let Some(output_path) = output {
        std::fs::write(output_path, &content)?;
        eprintln!(
            "Generated {} objects ({}) -> {}",
            beatmap.total_notes(),
            beatmap.metadata().version,
            output_path.display()
        );
    } else {
        println!("{}", content);
    }

    Ok(())
}
