use rand::{Rng, RngCore};

use crate::config::{generation, playfield};
use crate::hit_object::{HitObject, Position};

/// Random position sampling inside the padded playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    padding: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(playfield::EDGE_PADDING)
    }
}

impl Placement {
    pub fn new(padding: f64) -> Self {
        // Keep a non-empty sampling area whatever the caller passes.
        let max_padding = playfield::HEIGHT / 2.0 - 1.0;
        let padding = if padding.is_nan() {
            playfield::EDGE_PADDING
        } else {
            padding.clamp(0.0, max_padding)
        };
        Self { padding }
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn clamp(&self, position: Position) -> Position {
        position.clamped(self.padding)
    }

    pub fn random_position(&self, rng: &mut dyn RngCore) -> Position {
        Position::new(
            rng.random_range(self.padding..=playfield::WIDTH - self.padding),
            rng.random_range(self.padding..=playfield::HEIGHT - self.padding),
        )
    }

    /// Position whose distance from `previous` lies in `[min, max]`.
    ///
    /// Rejection-samples a bounded number of times, then settles for an
    /// unconstrained position so generation always terminates.
    pub fn position_in_band(
        &self,
        previous: Option<Position>,
        min_distance: f64,
        max_distance: f64,
        rng: &mut dyn RngCore,
    ) -> Position {
        let Some(previous) = previous else {
            return self.random_position(rng);
        };

        for _ in 0..generation::MAX_PLACEMENT_ATTEMPTS {
            let candidate = self.random_position(rng);
            let distance = previous.distance_to(candidate);
            if distance >= min_distance && distance <= max_distance {
                return candidate;
            }
        }

        self.random_position(rng)
    }

    /// `anchor` shifted by up to `spread` on each axis, kept on the playfield
    pub fn jitter(&self, anchor: Position, spread: f64, rng: &mut dyn RngCore) -> Position {
        self.clamp(anchor.offset(
            rng.random_range(-spread..=spread),
            rng.random_range(-spread..=spread),
        ))
    }
}

/// Accumulates generated circles, numbering them in placement order and
/// refusing anything at or past the end of the playable range.
#[derive(Debug)]
pub struct ObjectWriter {
    objects: Vec<HitObject>,
    approach_rate: f64,
    end_time: f64,
}

impl ObjectWriter {
    pub fn new(approach_rate: f64, end_time: f64) -> Self {
        Self {
            objects: Vec::new(),
            approach_rate,
            end_time,
        }
    }

    /// Place a circle; returns false (and places nothing) if `time` is out of range
    pub fn push(&mut self, time: f64, position: Position) -> bool {
        if time >= self.end_time {
            return false;
        }
        let id = format!("note-{:04}", self.objects.len());
        self.objects
            .push(HitObject::circle(id, position, time, self.approach_rate));
        true
    }

    pub fn last_position(&self) -> Option<Position> {
        self.objects.last().map(|o| o.position)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn finish(self) -> Vec<HitObject> {
        self.objects
    }
}
