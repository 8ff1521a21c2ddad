//! Procedural beatmap generation.
//!
//! `BeatmapFactory` runs the shared creation steps (id, metadata, difficulty,
//! timing) and delegates hit object placement to a `GenerationStrategy`:
//! - `StandardStrategy` - one object per beat with occasional half-beats and rests
//! - `TechnicalStrategy` - 5 second blocks of triplets, streams, stacks,
//!   polyrhythms and geometric shapes
//!
//! All randomness comes from the `RngCore` passed in, so a seeded generator
//! reproduces the same beatmap.

mod factory;
mod params;
mod placement;
mod standard;
mod technical;

pub use factory::*;
pub use params::*;
pub use placement::*;
pub use standard::*;
pub use technical::*;
