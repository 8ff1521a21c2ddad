use serde::{Deserialize, Serialize};

use crate::beatmap::BeatmapDifficulty;
use crate::config::generation;

/// Input to [`BeatmapFactory::create_beatmap`](crate::generator::BeatmapFactory::create_beatmap)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBeatmapParams {
    pub id: Option<String>,
    pub title: String,
    pub artist: String,
    pub creator: Option<String>,
    pub version: Option<String>,
    /// Requested level, 1-10. Clamped, never rejected.
    pub difficulty: Option<f64>,
    /// Track duration in milliseconds
    pub duration: f64,
    pub bpm: Option<f64>,
    pub audio_file: Option<String>,
    pub background_image: Option<String>,
}

impl CreateBeatmapParams {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, duration: f64) -> Self {
        Self {
            id: None,
            title: title.into(),
            artist: artist.into(),
            creator: None,
            version: None,
            difficulty: None,
            duration,
            bpm: None,
            audio_file: None,
            background_image: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_difficulty(mut self, level: f64) -> Self {
        self.difficulty = Some(level);
        self
    }

    pub fn with_bpm(mut self, bpm: f64) -> Self {
        self.bpm = Some(bpm);
        self
    }

    pub fn with_audio_file(mut self, audio_file: impl Into<String>) -> Self {
        self.audio_file = Some(audio_file.into());
        self
    }

    pub fn with_background_image(mut self, background_image: impl Into<String>) -> Self {
        self.background_image = Some(background_image.into());
        self
    }

    /// Requested level clamped into [1, 10], 5 when absent
    pub fn level(&self) -> f64 {
        self.difficulty
            .filter(|level| level.is_finite())
            .map(BeatmapDifficulty::clamp_level)
            .unwrap_or(generation::DEFAULT_LEVEL)
    }

    /// Requested bpm capped at `MAX_BPM`, 120 when absent or not a positive number
    pub fn bpm(&self) -> f64 {
        self.bpm
            .filter(|bpm| bpm.is_finite() && *bpm > 0.0)
            .map(|bpm| bpm.min(generation::MAX_BPM))
            .unwrap_or(generation::DEFAULT_BPM)
    }

    /// Track duration clamped into [0, `MAX_DURATION_MS`]; non-finite becomes 0
    pub fn duration(&self) -> f64 {
        if self.duration.is_finite() {
            self.duration.clamp(0.0, generation::MAX_DURATION_MS)
        } else {
            0.0
        }
    }
}
