use serde::{Deserialize, Serialize};

use crate::config::generation;

// Base stats at level 5 before scaling.
const BASE_APPROACH_RATE: f64 = 5.0;
const BASE_CIRCLE_SIZE: f64 = 4.0;
const BASE_OVERALL_DIFFICULTY: f64 = 5.0;
const BASE_HP_DRAIN_RATE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeatmapDifficulty {
    pub approach_rate: f64,
    pub circle_size: f64,
    pub overall_difficulty: f64,
    pub hp_drain_rate: f64,
    pub slider_multiplier: f64,
    pub bpm: f64,
}

impl Default for BeatmapDifficulty {
    fn default() -> Self {
        Self::from_level(generation::DEFAULT_LEVEL, generation::DEFAULT_BPM)
    }
}

impl BeatmapDifficulty {
    /// Clamp a requested level into [1, 10]
    pub fn clamp_level(level: f64) -> f64 {
        level.clamp(generation::MIN_LEVEL, generation::MAX_LEVEL)
    }

    /// Scale a base stat by level: `clamp(1, 10, base * (0.7 + level/10 * 0.8))`
    pub fn scale_stat(base: f64, level: f64) -> f64 {
        let level = Self::clamp_level(level);
        (base * (0.7 + level / 10.0 * 0.8)).clamp(generation::MIN_LEVEL, generation::MAX_LEVEL)
    }

    /// Derive all stats from a 1-10 level. Out of range levels are clamped.
    pub fn from_level(level: f64, bpm: f64) -> Self {
        let level = Self::clamp_level(level);
        Self {
            approach_rate: Self::scale_stat(BASE_APPROACH_RATE, level),
            circle_size: Self::scale_stat(BASE_CIRCLE_SIZE, level),
            overall_difficulty: Self::scale_stat(BASE_OVERALL_DIFFICULTY, level),
            hp_drain_rate: Self::scale_stat(BASE_HP_DRAIN_RATE, level),
            slider_multiplier: 1.0 + level / 20.0,
            bpm,
        }
    }

    /// Single-number rating shown in listings: mean of AR, OD and CS
    pub fn star_rating(&self) -> f64 {
        (self.approach_rate + self.overall_difficulty + self.circle_size) / 3.0
    }
}
