use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::beatmap::{BeatmapDifficulty, BeatmapTimingPoint};
use crate::config::timing;
use crate::hit_object::{HitObject, HitResultType};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatmapMetadata {
    pub title: String,
    pub artist: String,
    pub creator: String,
    pub version: String,
    pub audio_file: String,
    pub background_image: Option<String>,
    /// Offset into the audio used for song-select previews (ms)
    pub preview_time: f64,
}

/// Listing view of a beatmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatmapSummary {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub creator: String,
    pub version: String,
    /// Mean of AR, OD and CS
    pub difficulty: f64,
    pub bpm: f64,
    /// Length in seconds
    pub length: f64,
    pub thumbnail_url: Option<String>,
}

/// A playable chart. Hit objects are sorted by time once, at construction,
/// and never reordered afterwards. Hit object ids are unique within a beatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBeatmap")]
pub struct Beatmap {
    id: String,
    metadata: BeatmapMetadata,
    difficulty: BeatmapDifficulty,
    timing_points: Vec<BeatmapTimingPoint>,
    hit_objects: Vec<HitObject>,
}

/// Deserialization shape; routed through `Beatmap::new` so imported files
/// get the same ordering guarantee as generated ones.
#[derive(Deserialize)]
struct RawBeatmap {
    id: String,
    metadata: BeatmapMetadata,
    difficulty: BeatmapDifficulty,
    #[serde(default)]
    timing_points: Vec<BeatmapTimingPoint>,
    #[serde(default)]
    hit_objects: Vec<HitObject>,
}

impl From<RawBeatmap> for Beatmap {
    fn from(raw: RawBeatmap) -> Self {
        Beatmap::new(
            raw.id,
            raw.metadata,
            raw.difficulty,
            raw.timing_points,
            raw.hit_objects,
        )
    }
}

impl Beatmap {
    pub fn new(
        id: impl Into<String>,
        metadata: BeatmapMetadata,
        difficulty: BeatmapDifficulty,
        mut timing_points: Vec<BeatmapTimingPoint>,
        mut hit_objects: Vec<HitObject>,
    ) -> Self {
        // Stable sorts: objects sharing a time keep their insertion order.
        hit_objects.sort_by(|a, b| a.time.total_cmp(&b.time));
        timing_points.sort_by(|a, b| a.time.total_cmp(&b.time));
        dedup_ids(&mut hit_objects);

        Self {
            id: id.into(),
            metadata,
            difficulty,
            timing_points,
            hit_objects,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metadata(&self) -> &BeatmapMetadata {
        &self.metadata
    }

    pub fn difficulty(&self) -> &BeatmapDifficulty {
        &self.difficulty
    }

    pub fn timing_points(&self) -> &[BeatmapTimingPoint] {
        &self.timing_points
    }

    pub fn hit_objects(&self) -> &[HitObject] {
        &self.hit_objects
    }

    /// Mutable access to one object's hit state. Cannot reorder the sequence.
    pub(crate) fn hit_object_mut(&mut self, index: usize) -> Option<&mut HitObject> {
        self.hit_objects.get_mut(index)
    }

    pub fn first_object(&self) -> Option<&HitObject> {
        self.hit_objects.first()
    }

    pub fn total_notes(&self) -> usize {
        self.hit_objects.len()
    }

    /// Score of an all-PERFECT play
    pub fn max_score(&self) -> u32 {
        self.total_notes() as u32 * HitResultType::Perfect.points()
    }

    /// Last object's time plus a fixed trailing buffer, or 0 when empty
    pub fn total_length(&self) -> f64 {
        self.hit_objects
            .last()
            .map(|last| last.time + timing::END_BUFFER_MS)
            .unwrap_or(0.0)
    }

    /// Timing point in effect at `time`: the last one starting at or before it,
    /// or the first one if `time` precedes them all
    pub fn timing_point_at(&self, time: f64) -> Option<&BeatmapTimingPoint> {
        self.timing_points
            .iter()
            .rev()
            .find(|tp| tp.time <= time)
            .or_else(|| self.timing_points.first())
    }

    pub fn summary(&self) -> BeatmapSummary {
        BeatmapSummary {
            id: self.id.clone(),
            title: self.metadata.title.clone(),
            artist: self.metadata.artist.clone(),
            creator: self.metadata.creator.clone(),
            version: self.metadata.version.clone(),
            difficulty: self.difficulty.star_rating(),
            bpm: self.difficulty.bpm,
            length: self.total_length() / 1000.0,
            thumbnail_url: self.metadata.background_image.clone(),
        }
    }
}

/// Rename repeated ids to `<id>#<n>`, keeping the earliest object's id as is
fn dedup_ids(objects: &mut [HitObject]) {
    let mut seen: HashSet<String> = HashSet::with_capacity(objects.len());

    for object in objects.iter_mut() {
        if seen.contains(&object.id) {
            let original = std::mem::take(&mut object.id);
            let mut n = 1;
            while seen.contains(&format!("{}#{}", original, n)) {
                n += 1;
            }
            object.id = format!("{}#{}", original, n);
            warn!("Duplicate hit object id {} renamed to {}", original, object.id);
        }
        seen.insert(object.id.clone());
    }
}
