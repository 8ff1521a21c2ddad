//! Play command: an offline auto-player that drives a session frame by frame.

use std::path::Path;

use anyhow::{Context, Result, bail};
use beatforge_core::{
    Beatmap, Config, GameSession, JsonBeatmapStore, Position, RecordLog, SessionState,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Auto-player behavior
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    pub seed: u64,
    /// Maximum absolute timing error (ms)
    pub jitter: f64,
    /// Probability of not clicking an object at all
    pub miss_rate: f64,
    pub frame_ms: f64,
}

/// A click the auto-player will make, in session time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedClick {
    pub time: f64,
    pub position: Position,
}

impl AutoPlayer {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.miss_rate) {
            bail!("--miss-rate must be between 0 and 1");
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            bail!("--jitter must be zero or positive");
        }
        if !self.frame_ms.is_finite() || self.frame_ms <= 0.0 {
            bail!("--frame-ms must be positive");
        }
        Ok(())
    }

    /// Decide every click up front, sorted by time
    pub fn plan(&self, beatmap: &Beatmap) -> Vec<PlannedClick> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut clicks: Vec<PlannedClick> = beatmap
            .hit_objects()
            .iter()
            .filter_map(|object| {
                if rng.random_bool(self.miss_rate) {
                    return None;
                }
                let offset = if self.jitter > 0.0 {
                    rng.random_range(-self.jitter..=self.jitter)
                } else {
                    0.0
                };
                Some(PlannedClick {
                    time: (object.time + offset).max(0.0),
                    position: object.position,
                })
            })
            .collect();
        clicks.sort_by(|a, b| a.time.total_cmp(&b.time));
        clicks
    }

    /// Play a session to completion. The session clock starts at 0.
    pub fn play(&self, session: &mut GameSession) -> Result<()> {
        let clicks = self.plan(session.beatmap());
        let config = session.config();
        let give_up_at = session.beatmap().total_length()
            + config.miss_threshold_ms
            + config.completion_delay_ms
            + self.frame_ms;

        session.start(0.0)?;

        let mut pending = clicks.iter().peekable();
        let mut now = 0.0;
        while session.state() != SessionState::Completed {
            now += self.frame_ms;

            while let Some(click) = pending.next_if(|c| c.time <= now) {
                if let Some(result) = session.process_hit(Some(click.position), click.time) {
                    debug!("Click at {:.0}ms: {}", click.time, result.result_type);
                }
            }
            session.update(now);

            if now > give_up_at {
                session.end();
            }
        }

        Ok(())
    }
}

/// Auto-play a beatmap file and print the result
pub fn run(
    config: &Config,
    file: &Path,
    player: AutoPlayer,
    record_dir: Option<&Path>,
) -> Result<()> {
    player.validate()?;

    let beatmap = JsonBeatmapStore::read_file(file)
        .with_context(|| format!("Failed to read beatmap {}", file.display()))?;
    let session_id = format!("play-{}-{}", beatmap.id(), player.seed);
    let mut session = GameSession::with_config(session_id, beatmap, config.session.clone());

    info!(
        "Auto-playing {} objects (jitter {}ms, miss rate {})",
        session.beatmap().total_notes(),
        player.jitter,
        player.miss_rate
    );
    player.play(&mut session)?;

    let record = session.play_record(Utc::now());
    println!("{}", record.summary_line());

    let counts = &record.stats.hit_counts;
    println!(
        "  PERFECT {} / GREAT {} / GOOD {} / BAD {} / MISS {}",
        counts.perfect, counts.great, counts.good, counts.bad, counts.miss
    );

    if let Some(dir) = record_dir {
        let mut log = RecordLog::new(dir);
        log.append(record)?;
        if let Some(path) = log.current_path() {
            eprintln!("Recorded to: {}", path.display());
        }
    }

    Ok(())
}
