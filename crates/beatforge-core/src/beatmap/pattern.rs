use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::config::playfield;
use crate::hit_object::{HitObject, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum MirrorAxis {
    /// Flip left/right (x is reflected)
    #[strum(serialize = "x")]
    X,
    /// Flip top/bottom (y is reflected)
    #[strum(serialize = "y")]
    Y,
}

/// A reusable template of hit objects.
///
/// Template times are relative to the pattern start. When
/// `relative_positions` is set, template positions are offsets from the
/// anchor passed to [`BeatmapPattern::apply`]; otherwise they are absolute
/// playfield coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatmapPattern {
    pub id: String,
    pub name: String,
    pub hit_objects: Vec<HitObject>,
    pub relative_positions: bool,
    pub pattern_duration: f64,
    pub tags: Vec<String>,
}

impl BeatmapPattern {
    /// Capture a run of placed objects as a relative template anchored on the first one
    pub fn from_objects(
        id: impl Into<String>,
        name: impl Into<String>,
        objects: &[HitObject],
        tags: Vec<String>,
    ) -> Self {
        let id = id.into();
        let (origin_time, origin) = objects
            .first()
            .map(|o| (o.time, o.position))
            .unwrap_or_default();

        let hit_objects: Vec<HitObject> = objects
            .iter()
            .enumerate()
            .map(|(i, o)| {
                o.clone_at(
                    format!("{}-{}", id, i),
                    Position::new(o.position.x - origin.x, o.position.y - origin.y),
                    o.time - origin_time,
                )
            })
            .collect();

        let pattern_duration = hit_objects
            .iter()
            .map(|o| o.end_time())
            .fold(0.0, f64::max);

        Self {
            id,
            name: name.into(),
            hit_objects,
            relative_positions: true,
            pattern_duration,
            tags,
        }
    }

    /// Duration once played back at `speed`
    pub fn duration_at(&self, speed: f64) -> f64 {
        self.pattern_duration / speed
    }

    /// Instantiate the template starting at `start_time`.
    ///
    /// `speed` compresses time (2.0 plays twice as fast) and `scale` stretches
    /// relative offsets. Results are clamped onto the playfield.
    pub fn apply(
        &self,
        start_time: f64,
        anchor: Position,
        speed: f64,
        scale: f64,
    ) -> Vec<HitObject> {
        let speed = if speed > 0.0 { speed } else { 1.0 };

        self.hit_objects
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let position = if self.relative_positions {
                    anchor.offset(template.position.x * scale, template.position.y * scale)
                } else {
                    template.position
                };
                template.clone_at(
                    format!("{}-{}-{}", self.id, start_time, i),
                    position.clamped(0.0),
                    start_time + template.time / speed,
                )
            })
            .collect()
    }

    /// Mirrored copy with a new id, name and tag.
    ///
    /// Absolute positions are reflected across the playfield; relative
    /// offsets are reflected across the anchor.
    pub fn mirror(&self, axis: MirrorAxis) -> Self {
        let axis_name: &'static str = axis.into();
        let reflect = |p: Position| -> Position {
            match (axis, self.relative_positions) {
                (MirrorAxis::X, true) => Position::new(-p.x, p.y),
                (MirrorAxis::Y, true) => Position::new(p.x, -p.y),
                (MirrorAxis::X, false) => Position::new(playfield::WIDTH - p.x, p.y),
                (MirrorAxis::Y, false) => Position::new(p.x, playfield::HEIGHT - p.y),
            }
        };

        let id = format!("{}-mirror-{}", self.id, axis_name);
        let hit_objects = self
            .hit_objects
            .iter()
            .enumerate()
            .map(|(i, o)| o.clone_at(format!("{}-{}", id, i), reflect(o.position), o.time))
            .collect();

        let mut tags = self.tags.clone();
        tags.push("mirrored".to_string());

        Self {
            id,
            name: format!("{} (Mirrored {})", self.name, axis_name.to_uppercase()),
            hit_objects,
            relative_positions: self.relative_positions,
            pattern_duration: self.pattern_duration,
            tags,
        }
    }
}
