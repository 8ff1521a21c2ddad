use rand::{Rng, RngCore};
use tracing::debug;

use crate::beatmap::{BeatmapDifficulty, BeatmapTimingPoint};
use crate::config::generation;
use crate::generator::{
    CreateBeatmapParams, GenerationStrategy, GeneratorStyle, ObjectWriter, Placement,
};
use crate::hit_object::HitObject;

const HALF_BEAT_CHANCE: f64 = 0.2;
const REST_CHANCE: f64 = 0.1;

/// Beat length of the first timing point, falling back to the requested bpm.
/// Never shorter than `MIN_BEAT_MS`.
pub(crate) fn beat_length(
    params: &CreateBeatmapParams,
    timing_points: &[BeatmapTimingPoint],
) -> f64 {
    timing_points
        .first()
        .map(BeatmapTimingPoint::beat_length)
        .filter(|beat| beat.is_finite() && *beat > 0.0)
        .unwrap_or_else(|| 60000.0 / params.bpm())
        .max(generation::MIN_BEAT_MS)
}

/// Allowed jump distance between consecutive objects; widens with level
pub(crate) fn distance_band(level: f64) -> (f64, f64) {
    (40.0 + level * 4.0, 100.0 + level * 25.0)
}

/// One object per beat, spacing compressed by level.
///
/// Spacing is `max(150ms, beat / (level / 5))`. Each beat may gain a
/// half-beat object (20%) or be followed by an extra beat of silence (10%).
#[derive(Debug, Clone, Default)]
pub struct StandardStrategy {
    placement: Placement,
}

impl StandardStrategy {
    pub fn new(placement: Placement) -> Self {
        Self { placement }
    }

    /// Gap between consecutive beats for a level and beat length
    pub fn spacing(beat_length: f64, level: f64) -> f64 {
        let difficulty_factor = level / 5.0;
        (beat_length / difficulty_factor).max(generation::MIN_SPACING_MS)
    }
}

impl GenerationStrategy for StandardStrategy {
    fn style(&self) -> GeneratorStyle {
        GeneratorStyle::Standard
    }

    fn generate_hit_objects(
        &self,
        params: &CreateBeatmapParams,
        difficulty: &BeatmapDifficulty,
        timing_points: &[BeatmapTimingPoint],
        rng: &mut dyn RngCore,
    ) -> Vec<HitObject> {
        let level = params.level();
        let spacing = Self::spacing(beat_length(params, timing_points), level);
        let (min_distance, max_distance) = distance_band(level);

        let end_time = params.duration() - generation::LEAD_OUT_MS;
        let mut writer = ObjectWriter::new(difficulty.approach_rate, end_time);
        let mut time = generation::LEAD_IN_MS;

        debug!(
            "Standard generation: level {}, spacing {:.1}ms, band {:.0}-{:.0}",
            level, spacing, min_distance, max_distance
        );

        while time < end_time {
            let position = self.placement.position_in_band(
                writer.last_position(),
                min_distance,
                max_distance,
                rng,
            );
            writer.push(time, position);

            if rng.random_bool(HALF_BEAT_CHANCE) {
                let position = self.placement.position_in_band(
                    writer.last_position(),
                    min_distance / 2.0,
                    max_distance / 2.0,
                    rng,
                );
                writer.push(time + spacing / 2.0, position);
            }

            time += spacing;

            if rng.random_bool(REST_CHANCE) {
                time += spacing;
            }
        }

        writer.finish()
    }
}
