use std::str::FromStr;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};
use tracing::info;

use crate::beatmap::{Beatmap, BeatmapDifficulty, BeatmapMetadata, BeatmapTimingPoint};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::generator::{CreateBeatmapParams, Placement, StandardStrategy, TechnicalStrategy};
use crate::hit_object::HitObject;

const DEFAULT_CREATOR: &str = "beatforge";

/// Named generation style. Parsing accepts a few aliases, case-insensitively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorStyle {
    #[strum(serialize = "standard", serialize = "std", serialize = "default", serialize = "normal")]
    Standard,
    #[strum(serialize = "technical", serialize = "tech", serialize = "hard")]
    Technical,
}

impl GeneratorStyle {
    /// Resolve a style name or alias
    pub fn resolve(name: &str) -> Result<Self> {
        Self::from_str(name.trim()).map_err(|_| Error::UnknownStyle(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Technical => "technical",
        }
    }

    /// Label used for the difficulty name when none is given
    fn version_label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Technical => "Technical",
        }
    }
}

impl std::fmt::Display for GeneratorStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Hit object placement for one generation style
pub trait GenerationStrategy {
    fn style(&self) -> GeneratorStyle;

    /// Place hit objects for a beatmap. Must terminate for any input and
    /// draw all randomness from `rng`.
    fn generate_hit_objects(
        &self,
        params: &CreateBeatmapParams,
        difficulty: &BeatmapDifficulty,
        timing_points: &[BeatmapTimingPoint],
        rng: &mut dyn RngCore,
    ) -> Vec<HitObject>;
}

/// Builds beatmaps: shared setup steps plus a style-specific strategy
pub struct BeatmapFactory {
    strategy: Box<dyn GenerationStrategy>,
}

impl BeatmapFactory {
    pub fn new(strategy: Box<dyn GenerationStrategy>) -> Self {
        Self { strategy }
    }

    pub fn standard(config: &GeneratorConfig) -> Self {
        Self::for_style(GeneratorStyle::Standard, config)
    }

    pub fn technical(config: &GeneratorConfig) -> Self {
        Self::for_style(GeneratorStyle::Technical, config)
    }

    pub fn for_style(style: GeneratorStyle, config: &GeneratorConfig) -> Self {
        let placement = Placement::new(config.edge_padding);
        let strategy: Box<dyn GenerationStrategy> = match style {
            GeneratorStyle::Standard => Box::new(StandardStrategy::new(placement)),
            GeneratorStyle::Technical => Box::new(TechnicalStrategy::new(placement)),
        };
        Self::new(strategy)
    }

    /// Factory for a style name such as "standard" or "tech"
    pub fn resolve(name: &str, config: &GeneratorConfig) -> Result<Self> {
        Ok(Self::for_style(GeneratorStyle::resolve(name)?, config))
    }

    pub fn style(&self) -> GeneratorStyle {
        self.strategy.style()
    }

    /// Create a complete beatmap.
    ///
    /// The id (when absent) is drawn from `rng` before any hit object, so a
    /// given seed always reproduces the same beatmap.
    pub fn create_beatmap(&self, params: &CreateBeatmapParams, rng: &mut dyn RngCore) -> Beatmap {
        let id = params
            .id
            .clone()
            .unwrap_or_else(|| format!("{:016x}", rng.random::<u64>()));
        let level = params.level();
        let bpm = params.bpm();

        let metadata = self.build_metadata(params, level);
        let difficulty = BeatmapDifficulty::from_level(level, bpm);
        let timing_points = vec![BeatmapTimingPoint::new(0.0, bpm)];

        let hit_objects = self
            .strategy
            .generate_hit_objects(params, &difficulty, &timing_points, rng);

        info!(
            "Generated {} beatmap {} \"{}\": {} objects (level {}, {} bpm)",
            self.style(),
            id,
            metadata.title,
            hit_objects.len(),
            level,
            bpm
        );

        Beatmap::new(id, metadata, difficulty, timing_points, hit_objects)
    }

    fn build_metadata(&self, params: &CreateBeatmapParams, level: f64) -> BeatmapMetadata {
        BeatmapMetadata {
            title: params.title.clone(),
            artist: params.artist.clone(),
            creator: params
                .creator
                .clone()
                .unwrap_or_else(|| DEFAULT_CREATOR.to_string()),
            version: params
                .version
                .clone()
                .unwrap_or_else(|| format!("{} Lv.{}", self.style().version_label(), level)),
            audio_file: params.audio_file.clone().unwrap_or_default(),
            background_image: params.background_image.clone(),
            preview_time: params.duration() / 3.0,
        }
    }
}
