use serde::{Deserialize, Serialize};

use crate::config::generation;

/// A tempo/meter marker. Immutable; the `with_*` builders return modified copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeatmapTimingPoint {
    pub time: f64,
    pub bpm: f64,
    /// Beats per bar
    pub meter: u32,
    pub is_inherited: bool,
    pub volume: u32,
    pub velocity_multiplier: f64,
}

impl BeatmapTimingPoint {
    pub fn new(time: f64, bpm: f64) -> Self {
        Self {
            time,
            bpm,
            meter: generation::DEFAULT_METER,
            is_inherited: false,
            volume: 100,
            velocity_multiplier: 1.0,
        }
    }

    /// Milliseconds per beat
    pub fn beat_length(&self) -> f64 {
        60000.0 / self.bpm
    }

    pub fn bar_length(&self) -> f64 {
        self.beat_length() * self.meter as f64
    }

    pub fn with_time(self, time: f64) -> Self {
        Self { time, ..self }
    }

    pub fn with_bpm(self, bpm: f64) -> Self {
        Self { bpm, ..self }
    }

    pub fn with_meter(self, meter: u32) -> Self {
        Self { meter, ..self }
    }

    pub fn with_volume(self, volume: u32) -> Self {
        Self { volume, ..self }
    }

    pub fn with_velocity_multiplier(self, velocity_multiplier: f64) -> Self {
        Self {
            velocity_multiplier,
            ..self
        }
    }

    pub fn inherited(self, is_inherited: bool) -> Self {
        Self {
            is_inherited,
            ..self
        }
    }
}
