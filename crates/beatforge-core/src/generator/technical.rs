use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

use rand::{Rng, RngCore};
use strum::IntoStaticStr;
use tracing::debug;

use crate::beatmap::{BeatmapDifficulty, BeatmapTimingPoint};
use crate::config::generation;
use crate::generator::standard::{beat_length, distance_band};
use crate::generator::{
    CreateBeatmapParams, GenerationStrategy, GeneratorStyle, ObjectWriter, Placement,
};
use crate::hit_object::{HitObject, Position};

const BLOCK_REST_CHANCE: f64 = 0.3;
const TRIPLET_SKIP_CHANCE: f64 = 0.2;
const STREAM_DELAY_CHANCE: f64 = 0.15;
const POLYRHYTHM_REST_CHANCE: f64 = 0.3;

const STREAM_RADIUS: f64 = 150.0;
/// Fraction of a full revolution a stream sweeps over one block
const STREAM_REVOLUTIONS: f64 = 0.7;
const TRIPLET_STEP: f64 = 40.0;
const POLYRHYTHM_JITTER: f64 = 20.0;
const SHAPE_ANCHOR_SPREAD: f64 = 50.0;
const LINE_SPACING: f64 = 70.0;
const LINE_POINTS: usize = 4;

/// Beat divisions a tech-shape vertex may be followed by
const TECH_SUBDIVISIONS: [f64; 5] = [1.0, 1.5, 2.0, 3.0, 4.0];

/// Building block used to fill one technical block
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum TechnicalPattern {
    Triplet,
    Stream,
    Stack,
    Polyrhythm,
    Tech,
}

impl TechnicalPattern {
    pub const ALL: [TechnicalPattern; 5] = [
        Self::Triplet,
        Self::Stream,
        Self::Stack,
        Self::Polyrhythm,
        Self::Tech,
    ];

    fn pick(rng: &mut dyn RngCore) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Line,
    Triangle,
    Rectangle,
}

/// Pattern-driven generation in fixed 5 second blocks.
///
/// Every block is filled by one randomly chosen [`TechnicalPattern`];
/// 30% of blocks are followed by a two-beat rest.
#[derive(Debug, Clone, Default)]
pub struct TechnicalStrategy {
    placement: Placement,
}

impl TechnicalStrategy {
    pub fn new(placement: Placement) -> Self {
        Self { placement }
    }
}

impl GenerationStrategy for TechnicalStrategy {
    fn style(&self) -> GeneratorStyle {
        GeneratorStyle::Technical
    }

    fn generate_hit_objects(
        &self,
        params: &CreateBeatmapParams,
        difficulty: &BeatmapDifficulty,
        timing_points: &[BeatmapTimingPoint],
        rng: &mut dyn RngCore,
    ) -> Vec<HitObject> {
        let end_time = params.duration() - generation::LEAD_OUT_MS;
        let mut blocks = BlockFiller {
            writer: ObjectWriter::new(difficulty.approach_rate, end_time),
            placement: self.placement,
            beat: beat_length(params, timing_points),
            overall_difficulty: difficulty.overall_difficulty,
            band: distance_band(params.level()),
            rng,
        };

        let mut time = generation::LEAD_IN_MS;
        while time < end_time {
            let block_end = (time + generation::TECHNICAL_BLOCK_MS).min(end_time);
            let pattern = TechnicalPattern::pick(blocks.rng);
            let before = blocks.writer.len();

            match pattern {
                TechnicalPattern::Triplet => blocks.triplets(time, block_end),
                TechnicalPattern::Stream => blocks.stream(time, block_end),
                TechnicalPattern::Stack => blocks.stacks(time, block_end),
                TechnicalPattern::Polyrhythm => blocks.polyrhythm(time, block_end),
                TechnicalPattern::Tech => blocks.shapes(time, block_end),
            }

            let name: &'static str = pattern.into();
            debug!(
                "Block {:.0}-{:.0}ms: {} ({} objects)",
                time,
                block_end,
                name,
                blocks.writer.len() - before
            );

            time = block_end;
            if blocks.rng.random_bool(BLOCK_REST_CHANCE) {
                time += blocks.beat * 2.0;
            }
        }

        blocks.writer.finish()
    }
}

/// Per-generation state shared by the block pattern generators.
/// Each generator fills `[start, end)` and never writes past `end`.
struct BlockFiller<'a> {
    writer: ObjectWriter,
    placement: Placement,
    beat: f64,
    overall_difficulty: f64,
    band: (f64, f64),
    rng: &'a mut dyn RngCore,
}

impl BlockFiller<'_> {
    fn place(&mut self, time: f64, end: f64, position: Position) {
        if time < end {
            self.writer.push(time, self.placement.clamp(position));
        }
    }

    fn next_anchor(&mut self) -> Position {
        let (min, max) = self.band;
        self.placement
            .position_in_band(self.writer.last_position(), min, max, self.rng)
    }

    /// Groups of three at third-beat spacing, drifting in one direction
    fn triplets(&mut self, start: f64, end: f64) {
        let step = self.beat / 3.0;
        let mut time = start;

        while time < end {
            let mut position = self.next_anchor();
            let heading = self.rng.random_range(0.0..TAU);

            for _ in 0..3 {
                if time >= end {
                    break;
                }
                self.place(time, end, position);
                position = self.placement.clamp(position.polar(heading, TRIPLET_STEP));
                time += step;
            }

            if self.rng.random_bool(TRIPLET_SKIP_CHANCE) {
                time += self.beat;
            }
        }
    }

    /// Quarter (or sixth, above OD 7) notes sweeping an arc around the center
    fn stream(&mut self, start: f64, end: f64) {
        let spacing = if self.overall_difficulty > 7.0 {
            self.beat / 6.0
        } else {
            self.beat / 4.0
        };
        let start_angle = self.rng.random_range(0.0..TAU);
        let sweep = STREAM_REVOLUTIONS * TAU;
        let span = (end - start).max(1.0);
        let mut time = start;

        while time < end {
            let progress = (time - start) / span;
            let position = Position::center().polar(start_angle + progress * sweep, STREAM_RADIUS);
            self.place(time, end, position);

            time += spacing;
            if self.rng.random_bool(STREAM_DELAY_CHANCE) {
                time += spacing / 2.0;
            }
        }
    }

    /// Bursts of 2-5 notes on one spot, 1-2 beats apart
    fn stacks(&mut self, start: f64, end: f64) {
        let step = self.beat / 4.0;
        let mut time = start;

        while time < end {
            let count = self.rng.random_range(2..=5);
            let position = self.placement.random_position(self.rng);

            for _ in 0..count {
                if time >= end {
                    break;
                }
                self.place(time, end, position);
                time += step;
            }

            let gap_beats: u32 = self.rng.random_range(1..=2);
            time += self.beat * gap_beats as f64;
        }
    }

    /// Beats split into 2, 3 or 4 notes clustered around a jittered anchor
    fn polyrhythm(&mut self, start: f64, end: f64) {
        let mut time = start;

        while time < end {
            let subdivision: u32 = self.rng.random_range(2..=4);
            let anchor = self.next_anchor();

            for _ in 0..subdivision {
                if time >= end {
                    break;
                }
                let position = self.placement.jitter(anchor, POLYRHYTHM_JITTER, self.rng);
                self.place(time, end, position);
                time += self.beat / subdivision as f64;
            }

            if self.rng.random_bool(POLYRHYTHM_REST_CHANCE) {
                time += self.beat / 2.0;
            }
        }
    }

    /// Lines, triangles and rectangles with a random rhythm per vertex
    fn shapes(&mut self, start: f64, end: f64) {
        let mut time = start;

        while time < end {
            let anchor = match self.writer.last_position() {
                Some(previous) => self.placement.jitter(previous, SHAPE_ANCHOR_SPREAD, self.rng),
                None => self.placement.random_position(self.rng),
            };
            let shape = match self.rng.random_range(0..3) {
                0 => Shape::Line,
                1 => Shape::Triangle,
                _ => Shape::Rectangle,
            };

            for vertex in self.shape_vertices(shape, anchor) {
                if time >= end {
                    break;
                }
                self.place(time, end, vertex);
                let pick = self.rng.random_range(0..TECH_SUBDIVISIONS.len());
                let subdivision = TECH_SUBDIVISIONS[pick];
                time += self.beat / subdivision;
            }

            time += self.beat / 2.0;
        }
    }

    fn shape_vertices(&mut self, shape: Shape, anchor: Position) -> Vec<Position> {
        let heading = self.rng.random_range(0.0..TAU);

        match shape {
            Shape::Line => (0..LINE_POINTS)
                .map(|i| anchor.polar(heading, LINE_SPACING * i as f64))
                .collect(),
            Shape::Triangle => {
                let side = self.rng.random_range(100.0..=150.0);
                vec![
                    anchor,
                    anchor.polar(heading, side),
                    anchor.polar(heading + FRAC_PI_3, side),
                ]
            }
            Shape::Rectangle => {
                let width = self.rng.random_range(80.0..=120.0);
                let height = self.rng.random_range(80.0..=120.0);
                let corner = anchor.polar(heading, width);
                vec![
                    anchor,
                    corner,
                    corner.polar(heading + FRAC_PI_2, height),
                    anchor.polar(heading + FRAC_PI_2, height),
                ]
            }
        }
    }
}
