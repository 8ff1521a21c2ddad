use serde::{Deserialize, Serialize};

use crate::config::{playfield, timing};
use crate::hit_object::{HitResult, HitResultType, Position};

/// Variant-specific data of a hit object.
///
/// Only `Circle` has fully defined behavior. `Slider` is judged on its head
/// like a circle, and `Spinner` is judged on timing alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HitObjectKind {
    Circle,
    Slider {
        /// Control points after the head, in playfield coordinates
        curve: Vec<Position>,
        repeats: u32,
        end_time: f64,
    },
    Spinner {
        end_time: f64,
    },
}

/// A timed, positioned target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitObject {
    pub id: String,
    pub position: Position,
    /// Absolute time in milliseconds
    pub time: f64,
    pub approach_rate: f64,
    pub radius: f64,
    pub is_hit: bool,
    pub hit_time: Option<f64>,
    pub kind: HitObjectKind,
}

impl HitObject {
    pub fn circle(
        id: impl Into<String>,
        position: Position,
        time: f64,
        approach_rate: f64,
    ) -> Self {
        Self::with_kind(id, position, time, approach_rate, HitObjectKind::Circle)
    }

    pub fn slider(
        id: impl Into<String>,
        position: Position,
        time: f64,
        approach_rate: f64,
        curve: Vec<Position>,
        repeats: u32,
        end_time: f64,
    ) -> Self {
        Self::with_kind(
            id,
            position,
            time,
            approach_rate,
            HitObjectKind::Slider {
                curve,
                repeats,
                end_time,
            },
        )
    }

    pub fn spinner(id: impl Into<String>, time: f64, approach_rate: f64, end_time: f64) -> Self {
        Self::with_kind(
            id,
            Position::center(),
            time,
            approach_rate,
            HitObjectKind::Spinner { end_time },
        )
    }

    fn with_kind(
        id: impl Into<String>,
        position: Position,
        time: f64,
        approach_rate: f64,
        kind: HitObjectKind,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            time,
            approach_rate,
            radius: playfield::DEFAULT_RADIUS,
            is_hit: false,
            hit_time: None,
            kind,
        }
    }

    pub fn is_circle(&self) -> bool {
        matches!(self.kind, HitObjectKind::Circle)
    }

    /// Time at which the object stops being active
    pub fn end_time(&self) -> f64 {
        match &self.kind {
            HitObjectKind::Circle => self.time,
            HitObjectKind::Slider { end_time, .. } | HitObjectKind::Spinner { end_time } => {
                *end_time
            }
        }
    }

    /// How long before `time` the object becomes visible.
    ///
    /// AR 0 maps to 1800ms and AR 10 to 450ms, linearly in between.
    pub fn approach_time(&self) -> f64 {
        let ar = self.approach_rate.clamp(0.0, 10.0);
        timing::APPROACH_MAX_MS - (ar / 10.0) * (timing::APPROACH_MAX_MS - timing::APPROACH_MIN_MS)
    }

    /// Copy of this object moved to a new position and time with fresh hit state.
    /// Slider curves and end times move along with the head.
    pub fn clone_at(&self, id: impl Into<String>, position: Position, time: f64) -> Self {
        let dx = position.x - self.position.x;
        let dy = position.y - self.position.y;
        let dt = time - self.time;

        let kind = match &self.kind {
            HitObjectKind::Circle => HitObjectKind::Circle,
            HitObjectKind::Slider {
                curve,
                repeats,
                end_time,
            } => HitObjectKind::Slider {
                curve: curve.iter().map(|p| p.offset(dx, dy)).collect(),
                repeats: *repeats,
                end_time: end_time + dt,
            },
            HitObjectKind::Spinner { end_time } => HitObjectKind::Spinner {
                end_time: end_time + dt,
            },
        };

        Self {
            id: id.into(),
            position,
            time,
            approach_rate: self.approach_rate,
            radius: self.radius,
            is_hit: false,
            hit_time: None,
            kind,
        }
    }

    /// Whether `point` lies inside the circular hit region
    pub fn contains(&self, point: Position) -> bool {
        match self.kind {
            HitObjectKind::Spinner { .. } => true,
            _ => self.position.distance_to(point) <= self.radius,
        }
    }

    /// Judge a click. A click outside the hit region is a miss whatever its timing.
    ///
    /// Marks the object as hit; each object is expected to be evaluated once.
    pub fn evaluate(&mut self, click_time: f64, click_position: Position) -> HitResult {
        self.is_hit = true;
        self.hit_time = Some(click_time);

        if !self.contains(click_position) {
            return HitResult::miss(click_time);
        }

        HitResult::new(HitResultType::from_offset(click_time - self.time), click_time)
    }
}
