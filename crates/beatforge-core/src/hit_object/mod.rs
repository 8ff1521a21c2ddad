//! Hit objects and their judgement.
//!
//! This module contains:
//! - `Position` - a point on the playfield
//! - `HitObject`, `HitObjectKind` - timed targets (circle, slider, spinner)
//! - `HitResultType`, `HitResult` - the outcome of evaluating a click

mod object;
mod position;
mod result;

pub use object::*;
pub use position::*;
pub use result::*;
