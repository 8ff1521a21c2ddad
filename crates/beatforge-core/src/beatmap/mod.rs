//! Beatmap-related types and data structures.
//!
//! This module contains types for representing playable charts:
//! - `BeatmapDifficulty` - AR/CS/OD/HP, slider multiplier and bpm
//! - `BeatmapTimingPoint` - tempo and meter changes
//! - `Beatmap`, `BeatmapMetadata`, `BeatmapSummary` - the chart aggregate
//! - `BeatmapPattern` - reusable hit object templates

mod chart;
mod difficulty;
mod pattern;
mod timing_point;

pub use chart::*;
pub use difficulty::*;
pub use pattern::*;
pub use timing_point::*;
