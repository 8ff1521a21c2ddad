//! Info command.

use std::path::Path;

use anyhow::{Context, Result};
use beatforge_core::JsonBeatmapStore;

/// Print a beatmap's summary
pub fn run(file: &Path, json: bool) -> Result<()> {
    let beatmap = JsonBeatmapStore::read_file(file)
        .with_context(|| format!("Failed to read beatmap {}", file.display()))?;
    let summary = beatmap.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} - {} [{}]", summary.artist, summary.title, summary.version);
    println!("  Id:         {}", summary.id);
    println!("  Creator:    {}", summary.creator);
    println!("  BPM:        {}", summary.bpm);
    println!("  Length:     {:.1}s", summary.length);
    println!("  Objects:    {}", beatmap.total_notes());
    println!("  Max score:  {}", beatmap.max_score());
    println!("  Difficulty: {:.2}", summary.difficulty);

    let difficulty = beatmap.difficulty();
    println!(
        "  AR {:.1} / CS {:.1} / OD {:.1} / HP {:.1}",
        difficulty.approach_rate,
        difficulty.circle_size,
        difficulty.overall_difficulty,
        difficulty.hp_drain_rate
    );

    Ok(())
}
